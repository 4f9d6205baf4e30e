//! Structural checks run on an instruction right before it executes.

use crate::{
    error::{AslResult, ErrorKind},
    program::Instruction,
    token::{Op, TokenKind},
};

/// Check the shape of `instruction`, found at 0-based line `index`.
///
/// Only a missing operand is excused by the arity of the mnemonic, so `print rax` and
/// `exit` pass but `print rax @` does not. Unknown mnemonics are held to the full
/// two-operand shape and rejected later by the executor.
pub fn validate(instruction: &Instruction<'_>, index: usize) -> AslResult<()> {
    let opcode = instruction.opcode();
    if opcode.kind != TokenKind::Instruction {
        return Err(ErrorKind::syntax("first token must be an instruction").at(index));
    }

    let arity = Op::from_mnemonic(opcode.text).map_or(2, Op::arity);

    let second = instruction.slot(1).kind;
    let present = second != TokenKind::EndOfInstruction;
    if (arity >= 1 || present) && !second.is_operand() {
        return Err(ErrorKind::syntax("second token must be a register or a value").at(index));
    }

    let third = instruction.slot(2).kind;
    if third == TokenKind::EndOfInstruction {
        if arity >= 2 {
            return Err(ErrorKind::syntax("third token is missing").at(index));
        }
    } else if !third.is_operand() {
        return Err(ErrorKind::syntax("third token must be register or a value").at(index));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(line: &str) -> Result<(), String> {
        let instruction = Instruction::parse(line).unwrap();
        validate(&instruction, 2).map_err(|e| e.to_string())
    }

    #[test]
    fn accepts_well_formed() {
        assert_eq!(check("init rax 42"), Ok(()));
        assert_eq!(check("add rcx 'x'"), Ok(()));
        assert_eq!(check("go?eq rax rbx"), Ok(()));
        assert_eq!(check("print 3.5"), Ok(()));
        assert_eq!(check("exit"), Ok(()));
    }

    #[test]
    fn rule_order() {
        assert_eq!(
            check("42 rax 1"),
            Err("Error line 3: first token must be an instruction".to_string())
        );
        assert_eq!(
            check("init @ 1"),
            Err("Error line 3: second token must be a register or a value".to_string())
        );
        assert_eq!(
            check("print"),
            Err("Error line 3: second token must be a register or a value".to_string())
        );
        assert_eq!(
            check("init rax"),
            Err("Error line 3: third token is missing".to_string())
        );
        assert_eq!(
            check("init rax @"),
            Err("Error line 3: third token must be register or a value".to_string())
        );
        assert_eq!(
            check("print rax @"),
            Err("Error line 3: third token must be register or a value".to_string())
        );
        assert_eq!(
            check("exit @"),
            Err("Error line 3: second token must be a register or a value".to_string())
        );
    }

    #[test]
    fn unknown_mnemonic_needs_two_operands() {
        assert_eq!(
            check("jump rax"),
            Err("Error line 3: third token is missing".to_string())
        );
        assert_eq!(check("jump rax 1"), Ok(()));
    }
}
