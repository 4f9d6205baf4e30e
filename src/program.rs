//! Program representation

use log::debug;

use crate::{
    error::{AslResult, ErrorKind, KindResult},
    lexer::tokenize_line,
    token::Token,
};

/// Token slots per instruction: opcode, two operands and one spare
pub const MAX_TOKENS: usize = 4;
/// Maximum number of source lines
pub const MAX_LINES: usize = 1024;

/// One source line, tokenized
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Instruction<'a> {
    tokens: Vec<Token<'a>>,
}

impl<'a> Instruction<'a> {
    pub fn new(tokens: Vec<Token<'a>>) -> KindResult<Self> {
        if tokens.len() > MAX_TOKENS {
            return Err(ErrorKind::capacity(format!(
                "too many tokens ({} > {})",
                tokens.len(),
                MAX_TOKENS
            )));
        }
        Ok(Instruction { tokens })
    }

    /// Tokenize `line` into an instruction
    pub fn parse(line: &'a str) -> KindResult<Self> {
        Self::new(tokenize_line(line)?)
    }

    /// Token at `index`, or `EndOfInstruction` past the last one.
    pub fn slot(&self, index: usize) -> Token<'a> {
        self.tokens.get(index).copied().unwrap_or_else(Token::end)
    }

    pub fn opcode(&self) -> Token<'a> {
        self.slot(0)
    }

    /// Empty or comment-only line
    pub fn is_blank(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token<'a>] {
        &self.tokens
    }
}

/// Ordered instructions, addressed by 0-based line index
#[derive(Debug, Default)]
pub struct Program<'a> {
    pub instructions: Vec<Instruction<'a>>,
}

impl<'a> Program<'a> {
    /// Split `source` into lines and tokenize each one.
    pub fn load(source: &'a str) -> AslResult<Self> {
        let mut instructions = Vec::new();

        for (index, line) in source.lines().enumerate() {
            if index >= MAX_LINES {
                return Err(ErrorKind::capacity(format!(
                    "program is longer than {} lines",
                    MAX_LINES
                ))
                .at(index));
            }
            instructions.push(Instruction::parse(line).map_err(|kind| kind.at(index))?);
        }

        let program = Program { instructions };
        debug!(
            "loaded {} lines ({} blank)",
            program.len(),
            program.instructions.iter().filter(|i| i.is_blank()).count()
        );
        Ok(program)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Instruction<'a>> {
        self.instructions.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn load() {
        let program = Program::load("init rax 1\n\n# comment\nprint rax\n").unwrap();
        assert_eq!(program.len(), 4);
        assert!(!program.instructions[0].is_blank());
        assert!(program.instructions[1].is_blank());
        assert!(program.instructions[2].is_blank());
        assert_eq!(program.instructions[3].opcode(), Token::word("print"));
    }

    #[test]
    fn slots_past_the_end() {
        let instruction = Instruction::parse("print rax").unwrap();
        assert_eq!(instruction.slot(1).kind, TokenKind::Register);
        assert_eq!(instruction.slot(2).kind, TokenKind::EndOfInstruction);
        assert_eq!(instruction.slot(3).kind, TokenKind::EndOfInstruction);
    }

    #[test]
    fn too_many_tokens() {
        let err = Program::load("exit\ninit rax 1 2 3").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(matches!(err.kind, ErrorKind::Capacity(_)));

        // four tokens still fit
        assert!(Program::load("init rax 1 2").is_ok());
    }

    #[test]
    fn too_many_lines() {
        let source = "exit\n".repeat(MAX_LINES + 1);
        let err = Program::load(&source).unwrap_err();
        assert_eq!(err.line, MAX_LINES + 1);
        assert!(matches!(err.kind, ErrorKind::Capacity(_)));

        let source = "exit\n".repeat(MAX_LINES);
        assert_eq!(Program::load(&source).unwrap().len(), MAX_LINES);
    }

    #[test]
    fn load_error_has_line_number() {
        let err = Program::load("exit\nprint 'oops").unwrap_err();
        assert_eq!(err.to_string(), "Error line 2: unterminated string literal");
    }
}
