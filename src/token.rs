/// Lexical class of a token
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum TokenKind {
    Register,
    Instruction,
    Integer,
    Float,
    String,
    EndOfInstruction,
    Invalid,
}

impl TokenKind {
    /// Registers and literals, i.e. anything that can stand in an operand slot.
    pub fn is_operand(self) -> bool {
        matches!(
            self,
            TokenKind::Register | TokenKind::Integer | TokenKind::Float | TokenKind::String
        )
    }
}

/// A lexeme together with its class. String tokens hold the text between the quotes.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str) -> Self {
        Token { kind, text }
    }

    pub fn end() -> Self {
        Token::new(TokenKind::EndOfInstruction, "")
    }

    /// Classify a bare identifier.
    ///
    /// ***Note that this looks at character positions only:*** any word of three or more
    /// characters starting with `r` whose third character is `x` or `p` is a register,
    /// whether or not such a register exists.
    pub fn word(text: &'a str) -> Self {
        let bytes = text.as_bytes();
        let is_register =
            bytes.len() >= 3 && bytes[0] == b'r' && (bytes[2] == b'x' || bytes[2] == b'p');

        if is_register {
            Token::new(TokenKind::Register, text)
        } else {
            Token::new(TokenKind::Instruction, text)
        }
    }
}

/// Instruction mnemonics of the language
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Op {
    Init,
    Add,
    Sub,
    Mul,
    Div,
    GoEq,
    GoBi,
    GoLe,
    Print,
    Store,
    Load,
    Tos,
    Toi,
    Tof,
    Input,
    Exit,
}

impl Op {
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        let op = match mnemonic {
            "init" => Op::Init,
            "add" => Op::Add,
            "sub" => Op::Sub,
            "mul" => Op::Mul,
            "div" => Op::Div,
            "go?eq" => Op::GoEq,
            "go?bi" => Op::GoBi,
            "go?le" => Op::GoLe,
            "print" => Op::Print,
            "store" => Op::Store,
            "load" => Op::Load,
            "tos" => Op::Tos,
            "toi" => Op::Toi,
            "tof" => Op::Tof,
            "input" => Op::Input,
            "exit" => Op::Exit,
            _ => return None,
        };
        Some(op)
    }

    /// Number of operands the instruction takes
    pub fn arity(self) -> usize {
        match self {
            Op::Exit => 0,
            Op::Print | Op::Store | Op::Load | Op::Tos | Op::Toi | Op::Tof | Op::Input => 1,
            Op::Init | Op::Add | Op::Sub | Op::Mul | Op::Div | Op::GoEq | Op::GoBi | Op::GoLe => 2,
        }
    }
}
