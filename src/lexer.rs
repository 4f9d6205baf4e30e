use super::error::{ErrorKind, KindResult};
use super::token::{Token, TokenKind};

/// Cursor over a single source line
pub struct Lexer<'a> {
    line: &'a str,
    cursor: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(line: &'a str) -> Self {
        Lexer { line, cursor: 0 }
    }

    /// Get the next token. This consumes the token, except for `EndOfInstruction` which
    /// is returned again on every further call.
    pub fn next_token(&mut self) -> KindResult<Token<'a>> {
        self.trim();

        match self.next_char(true) {
            None | Some(b'#') => Ok(Token::end()),
            Some(ch) => {
                self.cursor += 1;
                if ch == b'"' || ch == b'\'' {
                    self.read_str_literal()
                } else if ch.is_ascii_digit() || (ch == b'-' && self.peek_digit()) {
                    Ok(self.read_number())
                } else if ch.is_ascii_alphabetic() {
                    Ok(self.read_word())
                } else {
                    Ok(self.read_invalid())
                }
            }
        }
    }

    /// Trim whitespaces, tabs, carriage returns, control chars
    fn trim(&mut self) {
        while let Some(ch) = self.next_char(true) {
            if !matches!(ch, b' ' | b'\t' | b'\r' | b'\n' | b'\x0B' | b'\x0C') {
                break;
            }
            self.cursor += 1;
        }
    }

    fn peek_digit(&mut self) -> bool {
        matches!(self.next_char(true), Some(ch) if ch.is_ascii_digit())
    }

    /// Read digits and dots. A dot anywhere makes it a float; `1.2.3` is not rejected here.
    fn read_number(&mut self) -> Token<'a> {
        let start_pos = self.cursor - 1;
        while let Some(ch) = self.next_char(false) {
            if !ch.is_ascii_digit() && ch != b'.' {
                self.cursor -= 1;
                break;
            }
        }

        let text = &self.line[start_pos..self.cursor];
        if text.contains('.') {
            Token::new(TokenKind::Float, text)
        } else {
            Token::new(TokenKind::Integer, text)
        }
    }

    /// Read a string literal. Either quote closes it, whichever one opened it.
    fn read_str_literal(&mut self) -> KindResult<Token<'a>> {
        let start_pos = self.cursor;
        while let Some(ch) = self.next_char(false) {
            if ch == b'"' || ch == b'\'' {
                let text = &self.line[start_pos..self.cursor - 1];
                return Ok(Token::new(TokenKind::String, text));
            }
        }

        Err(ErrorKind::syntax("unterminated string literal"))
    }

    /// Read an instruction mnemonic or a register name
    fn read_word(&mut self) -> Token<'a> {
        let start_pos = self.cursor - 1;
        while let Some(ch) = self.next_char(false) {
            if !ch.is_ascii_alphabetic() && ch != b'?' {
                self.cursor -= 1;
                break;
            }
        }

        Token::word(&self.line[start_pos..self.cursor])
    }

    /// A single unexpected character
    fn read_invalid(&mut self) -> Token<'a> {
        let start_pos = self.cursor - 1;
        let width = self.line[start_pos..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        self.cursor = start_pos + width;

        Token::new(TokenKind::Invalid, &self.line[start_pos..self.cursor])
    }

    /// Get the next byte and increase the cursor if `peek` is false
    fn next_char(&mut self, peek: bool) -> Option<u8> {
        let ch = *self.line.as_bytes().get(self.cursor)?;
        if !peek {
            self.cursor += 1;
        }
        Some(ch)
    }
}

/// Tokenize a whole line, stopping at the end of the line or at a comment.
pub fn tokenize_line(line: &str) -> KindResult<Vec<Token<'_>>> {
    let mut lexer = Lexer::new(line);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        if token.kind == TokenKind::EndOfInstruction {
            return Ok(tokens);
        }
        tokens.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(line: &str) -> Vec<(TokenKind, &str)> {
        tokenize_line(line)
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn trim() {
        let mut lexer = Lexer::new("\t\r\x0C print rax");
        lexer.trim();
        assert_eq!(&lexer.line[lexer.cursor..], "print rax");
    }

    #[test]
    fn init_line() {
        assert_eq!(
            kinds("init rax 42"),
            vec![
                (TokenKind::Instruction, "init"),
                (TokenKind::Register, "rax"),
                (TokenKind::Integer, "42"),
            ]
        );
    }

    #[test]
    fn numbers() {
        assert_eq!(
            kinds("-12 3.5 1.2.3 7"),
            vec![
                (TokenKind::Integer, "-12"),
                (TokenKind::Float, "3.5"),
                (TokenKind::Float, "1.2.3"),
                (TokenKind::Integer, "7"),
            ]
        );
    }

    #[test]
    fn lone_minus_is_invalid() {
        assert_eq!(kinds("- x"), vec![
            (TokenKind::Invalid, "-"),
            (TokenKind::Instruction, "x"),
        ]);
    }

    #[test]
    fn strings() {
        assert_eq!(
            kinds(r#"print "hello world' 'a#b' """#),
            vec![
                (TokenKind::Instruction, "print"),
                (TokenKind::String, "hello world"),
                (TokenKind::String, "a#b"),
                (TokenKind::String, ""),
            ]
        );
    }

    #[test]
    fn unterminated_string() {
        assert_eq!(
            tokenize_line("print 'oops"),
            Err(ErrorKind::syntax("unterminated string literal"))
        );
    }

    #[test]
    fn comments_and_blank_lines() {
        assert!(kinds("").is_empty());
        assert!(kinds("   # nothing here").is_empty());
        assert_eq!(kinds("exit # bye"), vec![(TokenKind::Instruction, "exit")]);
    }

    #[test]
    fn end_of_instruction_is_sticky() {
        let mut lexer = Lexer::new("exit #");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Instruction);
        assert_eq!(lexer.next_token().unwrap(), Token::end());
        assert_eq!(lexer.next_token().unwrap(), Token::end());
    }

    #[test]
    fn conditional_jump_mnemonic() {
        assert_eq!(
            kinds("go?bi rax 1"),
            vec![
                (TokenKind::Instruction, "go?bi"),
                (TokenKind::Register, "rax"),
                (TokenKind::Integer, "1"),
            ]
        );
    }

    #[test]
    fn invalid_characters() {
        assert_eq!(kinds("@ é"), vec![
            (TokenKind::Invalid, "@"),
            (TokenKind::Invalid, "é"),
        ]);
    }
}
