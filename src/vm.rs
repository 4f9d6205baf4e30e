//! Virtual machine that runs a program line by line

use std::{
    cmp::Ordering,
    io::{self, BufRead, Write},
};

use log::{debug, trace};

use crate::{
    error::{AslResult, ErrorKind, KindResult},
    program::{Instruction, Program},
    registers::{resolve_register_index, Memory, RegisterBank},
    token::{Op, Token, TokenKind},
    validator::validate,
    value::{ArithOp, Tag, Value},
};

/// Why the machine stopped
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Halt {
    /// `rip` left the program
    EndOfProgram,
    /// An `exit` instruction ran
    Exit,
}

/// What the loop does after an instruction
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Flow {
    Next,
    Jump(i32),
    Exit,
}

/// Virtual machine representation
pub struct AslVm<'a> {
    program: Program<'a>,
    registers: RegisterBank,
    memory: Memory,
    current: usize,         // index of the instruction running or last run
    pub halt: Option<Halt>, // halt flag with reason
}

impl<'a> AslVm<'a> {
    pub fn load(source: &'a str) -> AslResult<Self> {
        Ok(Self::new(Program::load(source)?))
    }

    pub fn new(program: Program<'a>) -> Self {
        AslVm {
            program,
            registers: RegisterBank::new(),
            memory: Memory::new(),
            current: 0,
            halt: None,
        }
    }

    pub fn registers(&self) -> &RegisterBank {
        &self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Run on the process console until the program halts.
    pub fn run(&mut self) -> AslResult<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(&mut stdin.lock(), &mut stdout.lock())
    }

    /// Run until the program halts, reading `input` and printing to `output`.
    pub fn run_with<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> AslResult<()> {
        while self.halt.is_none() {
            self.next_instruction(input, output)?;
        }
        output
            .flush()
            .map_err(|err| ErrorKind::from(err).at(self.current))
    }

    /// One cycle: fetch the line at `rip`, validate it, execute it and move `rip`.
    pub fn next_instruction<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> AslResult<()> {
        let rip = self.registers.rip().map_err(|kind| kind.at(self.current))?;

        let index = match usize::try_from(rip) {
            Ok(index) if index < self.program.len() => index,
            _ => {
                debug!("rip {} is outside the program, halting", rip);
                self.halt = Some(Halt::EndOfProgram);
                return Ok(());
            }
        };
        self.current = index;

        let instruction = self.program.instructions[index].clone();
        if instruction.is_blank() {
            self.registers.set_rip(rip.wrapping_add(1));
            return Ok(());
        }

        validate(&instruction, index)?;
        trace!("rip={} {:?}", rip, instruction.tokens());

        let flow = self
            .execute(&instruction, input, output)
            .map_err(|kind| kind.at(index))?;

        match flow {
            Flow::Next => {
                // the instruction may have written rip itself, advance from there
                let rip = self.registers.rip().map_err(|kind| kind.at(index))?;
                self.registers.set_rip(rip.wrapping_add(1));
            }
            Flow::Jump(target) => {
                debug!("jump from {} to {}", index, target);
                self.registers.set_rip(target);
            }
            Flow::Exit => {
                debug!("exit at line {}", index + 1);
                self.halt = Some(Halt::Exit);
            }
        }

        Ok(())
    }

    fn execute<R: BufRead, W: Write>(
        &mut self,
        instruction: &Instruction<'a>,
        input: &mut R,
        output: &mut W,
    ) -> KindResult<Flow> {
        let opcode = instruction.opcode();
        let op = Op::from_mnemonic(opcode.text)
            .ok_or_else(|| ErrorKind::unknown(format!("unknown instruction {}", opcode.text)))?;

        let first = instruction.slot(1);
        let second = instruction.slot(2);

        match op {
            Op::Init => self.ins_assign(first, second, ArithOp::Set),
            Op::Add => self.ins_assign(first, second, ArithOp::Add),
            Op::Sub => self.ins_assign(first, second, ArithOp::Sub),
            Op::Mul => self.ins_assign(first, second, ArithOp::Mul),
            Op::Div => self.ins_assign(first, second, ArithOp::Div),
            Op::GoEq => self.ins_go(first, second, Ordering::Equal),
            Op::GoBi => self.ins_go(first, second, Ordering::Greater),
            Op::GoLe => self.ins_go(first, second, Ordering::Less),
            Op::Print => self.ins_print(first, output),
            Op::Store => self.ins_store(first),
            Op::Load => self.ins_load(first),
            Op::Tos => self.ins_convert(first, Tag::Str),
            Op::Toi => self.ins_convert(first, Tag::Int),
            Op::Tof => self.ins_convert(first, Tag::Float),
            Op::Input => self.ins_input(first, input),
            Op::Exit => Ok(Flow::Exit),
        }
    }

    /// Slot index of a register operand
    fn register(&self, token: Token<'_>) -> KindResult<usize> {
        if token.kind != TokenKind::Register {
            return Err(ErrorKind::syntax(format!(
                "expected a register, got '{}'",
                token.text
            )));
        }
        resolve_register_index(token.text)
    }

    /// Value of an operand: a register's content or a literal
    fn operand(&self, token: Token<'_>) -> KindResult<Value> {
        match token.kind {
            TokenKind::Register => Ok(self.registers.get(self.register(token)?).clone()),
            _ => Value::from_literal(token),
        }
    }

    /// `init`, `add`, `sub`, `mul` and `div`
    fn ins_assign(&mut self, dest: Token<'_>, src: Token<'_>, op: ArithOp) -> KindResult<Flow> {
        let index = self.register(dest)?;
        let value = self.operand(src)?;
        self.registers.assign(index, value, op)?;
        Ok(Flow::Next)
    }

    /// Jump to `target` if the sign of `cond` is `expected`
    fn ins_go(
        &mut self,
        cond: Token<'_>,
        target: Token<'_>,
        expected: Ordering,
    ) -> KindResult<Flow> {
        let sign = match self.operand(cond)? {
            Value::Int(i) => Some(i.cmp(&0)),
            Value::Float(f) => f.partial_cmp(&0.0),
            Value::Str(_) => return Err(ErrorKind::type_error("cannot compare a string with zero")),
        };
        let target = self.operand(target)?.as_int("jump target")?;

        if sign == Some(expected) {
            Ok(Flow::Jump(target))
        } else {
            Ok(Flow::Next)
        }
    }

    fn ins_print<W: Write>(&mut self, token: Token<'_>, output: &mut W) -> KindResult<Flow> {
        let value = self.operand(token)?;
        writeln!(output, "{}", value)?;
        Ok(Flow::Next)
    }

    /// Write a value to the cell under `rmp`
    fn ins_store(&mut self, token: Token<'_>) -> KindResult<Flow> {
        let value = self.operand(token)?;
        let addr = self.registers.rmp()?;
        self.memory.write(addr, value);
        Ok(Flow::Next)
    }

    /// Copy the cell under `rmp` to a register
    fn ins_load(&mut self, token: Token<'_>) -> KindResult<Flow> {
        let index = self.register(token)?;
        let addr = self.registers.rmp()?;
        let value = self.memory.read(addr).clone();
        self.registers.assign(index, value, ArithOp::Set)?;
        Ok(Flow::Next)
    }

    /// `tos`, `toi` and `tof`
    fn ins_convert(&mut self, token: Token<'_>, tag: Tag) -> KindResult<Flow> {
        let index = self.register(token)?;
        let value = self.registers.get(index).clone().coerce(tag)?;
        self.registers.assign(index, value, ArithOp::Set)?;
        Ok(Flow::Next)
    }

    /// Read one whitespace-delimited word into a register as a string
    fn ins_input<R: BufRead>(&mut self, token: Token<'_>, input: &mut R) -> KindResult<Flow> {
        let index = self.register(token)?;
        let word = read_word(input)?;
        self.registers.assign(index, Value::string(word)?, ArithOp::Set)?;
        Ok(Flow::Next)
    }
}

/// Skip leading whitespace and read up to the next whitespace or the end of input.
/// The terminating whitespace is left in `input`.
fn read_word<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut word = Vec::new();
    loop {
        let (used, done) = {
            let buf = input.fill_buf()?;
            if buf.is_empty() {
                break;
            }

            let mut used = 0;
            let mut done = false;
            for &byte in buf {
                if byte.is_ascii_whitespace() {
                    if !word.is_empty() {
                        done = true;
                        break;
                    }
                } else {
                    word.push(byte);
                }
                used += 1;
            }
            (used, done)
        };

        input.consume(used);
        if done {
            break;
        }
    }

    Ok(String::from_utf8_lossy(&word).into_owned())
}
