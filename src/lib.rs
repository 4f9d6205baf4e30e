//! ASL is a line-oriented, register-based scripting language interpreter.
//!
//! # Example
//!
//! ```text
//! init rax 3          # counter
//! print rax
//! sub rax 1
//! go?bi rax 1         # back to line index 1 while rax > 0
//! print "liftoff"
//! ```
//!
//! # Instructions
//!
//! | Instruction | Usage                 | Brief   |
//! |-------------|-----------------------|---------|
//! | Init        | init _reg_ _value_    | Set `reg` to `value`. The register takes the type of `value`. |
//! | Add         | add _reg_ _value_     | `reg += value`. Strings are concatenated. |
//! | Sub         | sub _reg_ _value_     | `reg -= value`. Fails on strings. |
//! | Mul         | mul _reg_ _value_     | `reg *= value`. Fails on strings. |
//! | Div         | div _reg_ _value_     | `reg /= value`. Fails on strings and on integer division by zero. |
//! | GoEq        | go?eq _cond_ _target_ | Jump to line index `target` if `cond == 0`. |
//! | GoBi        | go?bi _cond_ _target_ | Jump to line index `target` if `cond > 0`. |
//! | GoLe        | go?le _cond_ _target_ | Jump to line index `target` if `cond < 0`. |
//! | Print       | print _value_         | Print `value` followed by a newline. Floats get six decimals. |
//! | Store       | store _value_         | Write `value` to the memory cell at `rmp`. |
//! | Load        | load _reg_            | Copy the memory cell at `rmp` into `reg`. |
//! | Tos         | tos _reg_             | Convert `reg` to a string. |
//! | Toi         | toi _reg_             | Convert `reg` to an integer. |
//! | Tof         | tof _reg_             | Convert `reg` to a float. |
//! | Input       | input _reg_           | Read one whitespace-delimited word from stdin into `reg` as a string. |
//! | Exit        | exit                  | Stop the program. |
//!
//! Compound operations convert the register to the type of the operand before
//! computing, so `add rax 2.5` on an integer register leaves a float behind.
//!
//! # Registers
//!
//! `rax`, `rbx`, `rcx`, `rdx`, `rex` and `rfx` are general purpose. `rip` holds the
//! 0-based index of the current line and `rmp` the index of the memory cell used by
//! `store` and `load`. All registers and all 1024 memory cells start as integer `0`.
//!
//! # Important notes
//!
//! - One instruction per line, `#` starts a comment. Blank lines still count as lines.
//! - Strings are quoted with `"` or `'` and hold at most 63 bytes. There are no escapes.
//! - A float literal must contain a `.`.
//! - Every error is fatal and reported as `Error line <n>: <message>`.

pub mod error;
pub mod lexer;
pub mod program;
pub mod registers;
pub mod token;
pub mod validator;
pub mod value;
pub mod vm;
