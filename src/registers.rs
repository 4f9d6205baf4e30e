//! Register bank and flat memory

use crate::{
    error::{ErrorKind, KindResult},
    value::{ArithOp, Value},
};

/// Register names in slot order
pub const REGISTER_NAMES: [&str; 8] = ["rax", "rbx", "rcx", "rdx", "rex", "rfx", "rip", "rmp"];
/// Slot of the instruction pointer
pub const RIP: usize = 6;
/// Slot of the memory pointer
pub const RMP: usize = 7;
/// Number of memory cells
pub const MEMORY_SIZE: usize = 1024;

/// Map a register name to its slot index.
pub fn resolve_register_index(name: &str) -> KindResult<usize> {
    REGISTER_NAMES
        .iter()
        .position(|&reg| reg == name)
        .ok_or_else(|| ErrorKind::unknown(format!("unknown register {}", name)))
}

/// The eight registers. Every slot starts as `Int(0)`.
#[derive(Debug, Default)]
pub struct RegisterBank {
    slots: [Value; 8],
}

impl RegisterBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> &Value {
        &self.slots[index]
    }

    /// Combine `value` into slot `index`. The slot always takes `value`'s tag.
    pub fn assign(&mut self, index: usize, value: Value, op: ArithOp) -> KindResult<()> {
        self.slots[index] = self.slots[index].clone().combine(value, op)?;
        Ok(())
    }

    /// Instruction pointer. Fails if something retagged it.
    pub fn rip(&self) -> KindResult<i32> {
        self.slots[RIP].as_int("rip")
    }

    pub fn set_rip(&mut self, rip: i32) {
        self.slots[RIP] = Value::Int(rip);
    }

    /// Memory pointer as a cell address.
    pub fn rmp(&self) -> KindResult<usize> {
        let rmp = self.slots[RMP].as_int("rmp")?;
        usize::try_from(rmp)
            .ok()
            .filter(|&addr| addr < MEMORY_SIZE)
            .ok_or_else(|| {
                ErrorKind::capacity(format!(
                    "memory address {} out of range 0..{}",
                    rmp, MEMORY_SIZE
                ))
            })
    }
}

/// Fixed array of typed cells, all `Int(0)` at start
#[derive(Debug)]
pub struct Memory {
    cells: Vec<Value>,
}

impl Default for Memory {
    fn default() -> Self {
        Memory {
            cells: vec![Value::default(); MEMORY_SIZE],
        }
    }
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self, addr: usize) -> &Value {
        &self.cells[addr]
    }

    pub fn write(&mut self, addr: usize, value: Value) {
        self.cells[addr] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_indices() {
        let mut seen = Vec::new();
        for name in REGISTER_NAMES {
            let index = resolve_register_index(name).unwrap();
            assert!(index < 8);
            assert!(!seen.contains(&index));
            assert_eq!(resolve_register_index(name).unwrap(), index);
            seen.push(index);
        }
        assert_eq!(resolve_register_index("rip").unwrap(), RIP);
        assert_eq!(resolve_register_index("rmp").unwrap(), RMP);
    }

    #[test]
    fn unknown_registers() {
        for name in ["rqx", "RAX", "rgx", "ra", ""] {
            assert!(matches!(
                resolve_register_index(name),
                Err(ErrorKind::UnknownSymbol(_))
            ));
        }
    }

    #[test]
    fn fresh_bank() {
        let bank = RegisterBank::new();
        for index in 0..8 {
            assert_eq!(bank.get(index), &Value::Int(0));
        }
        assert_eq!(bank.rip(), Ok(0));
        assert_eq!(bank.rmp(), Ok(0));
    }

    #[test]
    fn assign_keeps_value_on_error() {
        let mut bank = RegisterBank::new();
        bank.assign(2, Value::Str("hi".into()), ArithOp::Set).unwrap();
        assert!(bank.assign(2, Value::Str("x".into()), ArithOp::Sub).is_err());
        assert_eq!(bank.get(2), &Value::Str("hi".into()));
    }

    #[test]
    fn memory_pointer_bounds() {
        let mut bank = RegisterBank::new();
        bank.assign(RMP, Value::Int(1023), ArithOp::Set).unwrap();
        assert_eq!(bank.rmp(), Ok(1023));
        bank.assign(RMP, Value::Int(1024), ArithOp::Set).unwrap();
        assert!(matches!(bank.rmp(), Err(ErrorKind::Capacity(_))));
        bank.assign(RMP, Value::Int(-1), ArithOp::Set).unwrap();
        assert!(matches!(bank.rmp(), Err(ErrorKind::Capacity(_))));
        bank.assign(RMP, Value::Float(1.0), ArithOp::Set).unwrap();
        assert!(matches!(bank.rmp(), Err(ErrorKind::Type(_))));
    }

    #[test]
    fn memory_cells() {
        let mut memory = Memory::new();
        assert_eq!(memory.read(5), &Value::Int(0));
        memory.write(5, Value::Float(2.0));
        assert_eq!(memory.read(5), &Value::Float(2.0));
    }
}
