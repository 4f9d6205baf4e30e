//! Errors raised while loading or running a program.
//!
//! Every error is fatal: the run stops and the error is reported together with
//! the 1-based source line it came from.

use thiserror::Error;

/// What went wrong, without the location.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ErrorKind {
    /// Malformed instruction shape or operand.
    #[error("{0}")]
    Syntax(String),
    /// Unrecognized register name or instruction mnemonic.
    #[error("{0}")]
    UnknownSymbol(String),
    /// Operation attempted on an incompatible value.
    #[error("{0}")]
    Type(String),
    /// A fixed capacity (tokens, lines, string length, memory) was exceeded.
    #[error("{0}")]
    Capacity(String),
    #[error("division by zero")]
    DivisionByZero,
    /// Console read/write failure.
    #[error("io error: {0}")]
    Io(String),
}

impl ErrorKind {
    pub fn syntax(msg: impl Into<String>) -> Self {
        ErrorKind::Syntax(msg.into())
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        ErrorKind::UnknownSymbol(msg.into())
    }

    pub fn type_error(msg: impl Into<String>) -> Self {
        ErrorKind::Type(msg.into())
    }

    pub fn capacity(msg: impl Into<String>) -> Self {
        ErrorKind::Capacity(msg.into())
    }

    /// Attach a 0-based line index to this error.
    pub fn at(self, index: usize) -> AslError {
        AslError {
            line: index + 1,
            kind: self,
        }
    }
}

impl From<std::io::Error> for ErrorKind {
    fn from(err: std::io::Error) -> Self {
        ErrorKind::Io(err.to_string())
    }
}

/// An [`ErrorKind`] located at a source line.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Error line {line}: {kind}")]
pub struct AslError {
    /// 1-based line number
    pub line: usize,
    pub kind: ErrorKind,
}

pub type KindResult<T> = Result<T, ErrorKind>;
pub type AslResult<T> = Result<T, AslError>;
