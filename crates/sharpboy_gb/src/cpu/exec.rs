//! Primary-table instruction handlers.
//!
//! Every handler has the [`Handler`](super::Handler) signature: it runs
//! with PC already past the opcode byte, consumes its own operand bytes and
//! returns the T-cycles of the whole instruction. Operand encodings are
//! const generic parameters, so one generic handler serves a whole row of
//! the opcode map while the table still holds one function per opcode.

mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;
