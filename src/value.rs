//! Runtime values held by registers and memory cells

use std::fmt;

use crate::{
    error::{ErrorKind, KindResult},
    token::{Token, TokenKind},
};

/// Longest string a value can hold, in bytes
pub const MAX_STR_LEN: usize = 63;

/// Tag of a [`Value`]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Tag {
    Int,
    Float,
    Str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Float(f32),
    Str(String),
}

impl Default for Value {
    fn default() -> Self {
        Value::Int(0)
    }
}

/// How [`crate::registers::RegisterBank::assign`] combines a value with a slot
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ArithOp {
    Set,
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    fn name(self) -> &'static str {
        match self {
            ArithOp::Set => "assignment",
            ArithOp::Add => "addition",
            ArithOp::Sub => "substraction",
            ArithOp::Mul => "multiplication",
            ArithOp::Div => "division",
        }
    }
}

impl Value {
    /// String value, failing if it does not fit.
    pub fn string(s: impl Into<String>) -> KindResult<Self> {
        let s = s.into();
        if s.len() > MAX_STR_LEN {
            return Err(ErrorKind::capacity(format!(
                "string is longer than {} bytes",
                MAX_STR_LEN
            )));
        }
        Ok(Value::Str(s))
    }

    /// Value of a literal token. Numbers are parsed best-effort.
    pub fn from_literal(token: Token<'_>) -> KindResult<Self> {
        match token.kind {
            TokenKind::Integer => Ok(Value::Int(parse_int(token.text))),
            TokenKind::Float => Ok(Value::Float(parse_float(token.text))),
            TokenKind::String => Value::string(token.text),
            _ => Err(ErrorKind::syntax(format!(
                "'{}' is not a value",
                token.text
            ))),
        }
    }

    pub fn tag(&self) -> Tag {
        match self {
            Value::Int(_) => Tag::Int,
            Value::Float(_) => Tag::Float,
            Value::Str(_) => Tag::Str,
        }
    }

    /// Convert to `tag`. Returns the value unchanged when it already has that tag.
    pub fn coerce(self, tag: Tag) -> KindResult<Self> {
        Ok(match (self, tag) {
            (v @ Value::Int(_), Tag::Int)
            | (v @ Value::Float(_), Tag::Float)
            | (v @ Value::Str(_), Tag::Str) => v,
            (Value::Float(f), Tag::Int) => Value::Int(f as i32),
            (Value::Str(s), Tag::Int) => Value::Int(parse_int(&s)),
            (Value::Int(i), Tag::Float) => Value::Float(i as f32),
            (Value::Str(s), Tag::Float) => Value::Float(parse_float(&s)),
            (v, Tag::Str) => Value::string(v.to_string())?,
        })
    }

    /// Combine `self` with `rhs` according to `op`. The result always carries `rhs`'s tag:
    /// `self` is coerced to it first.
    pub fn combine(self, rhs: Value, op: ArithOp) -> KindResult<Value> {
        if op == ArithOp::Set {
            return Ok(rhs);
        }

        match (self.coerce(rhs.tag())?, rhs) {
            (Value::Int(lhs), Value::Int(rhs)) => Ok(Value::Int(match op {
                ArithOp::Add => lhs.wrapping_add(rhs),
                ArithOp::Sub => lhs.wrapping_sub(rhs),
                ArithOp::Mul => lhs.wrapping_mul(rhs),
                ArithOp::Div if rhs == 0 => return Err(ErrorKind::DivisionByZero),
                ArithOp::Div => lhs.wrapping_div(rhs),
                ArithOp::Set => rhs,
            })),
            (Value::Float(lhs), Value::Float(rhs)) => Ok(Value::Float(match op {
                ArithOp::Add => lhs + rhs,
                ArithOp::Sub => lhs - rhs,
                ArithOp::Mul => lhs * rhs,
                ArithOp::Div => lhs / rhs,
                ArithOp::Set => rhs,
            })),
            (Value::Str(lhs), Value::Str(rhs)) => match op {
                ArithOp::Add => Value::string(lhs + &rhs),
                _ => Err(ErrorKind::type_error(format!(
                    "cannot do {} on string",
                    op.name()
                ))),
            },
            _ => unreachable!("coerce returns the requested tag"),
        }
    }

    pub fn as_int(&self, what: &str) -> KindResult<i32> {
        match self {
            Value::Int(i) => Ok(*i),
            other => Err(ErrorKind::type_error(format!(
                "{} must be an integer, got {}",
                what,
                other.type_name()
            ))),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
        }
    }
}

/// Ints as decimal, floats with six decimals (`nan`/`inf` lowercase, like `%f`),
/// strings verbatim.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) if x.is_nan() => {
                f.write_str(if x.is_sign_negative() { "-nan" } else { "nan" })
            }
            Value::Float(x) => write!(f, "{:.6}", x),
            Value::Str(s) => f.write_str(s),
        }
    }
}

/// Length of the longest prefix of `s` (after leading whitespace) that looks like a
/// signed number. Returns `(start, end)` byte offsets.
fn numeric_prefix(s: &str, allow_fraction: bool) -> (usize, usize) {
    let bytes = s.as_bytes();
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());

    let mut end = start;
    if matches!(bytes.get(end), Some(b'+' | b'-')) {
        end += 1;
    }
    while matches!(bytes.get(end), Some(b) if b.is_ascii_digit()) {
        end += 1;
    }
    if allow_fraction && bytes.get(end) == Some(&b'.') {
        end += 1;
        while matches!(bytes.get(end), Some(b) if b.is_ascii_digit()) {
            end += 1;
        }
    }
    (start, end)
}

/// Best-effort integer parse: the longest numeric prefix, `0` if there is none or it
/// does not fit.
pub fn parse_int(s: &str) -> i32 {
    let (start, end) = numeric_prefix(s, false);
    s[start..end].parse().unwrap_or(0)
}

/// Best-effort float parse: the longest numeric prefix, `0.0` if there is none.
pub fn parse_float(s: &str) -> f32 {
    let (start, end) = numeric_prefix(s, true);
    let prefix = &s[start..end];
    // "5." and "-.5" are fine for atof but not for str::parse
    let prefix = prefix.strip_suffix('.').unwrap_or(prefix);
    match prefix.parse() {
        Ok(x) => x,
        Err(_) => format!("{}0", prefix).parse().unwrap_or(0.0),
    }
}
