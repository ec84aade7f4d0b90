//! Operand encodings used as const generic parameters by the handlers.
//!
//! These follow the bit fields of the opcode map, so a handler such as
//! `ld_r_r::<R_B, R_HL>` reads exactly like opcode 0x46.

// 8-bit operands (opcode bits 0-2 / 3-5).
pub(crate) const R_B: u8 = 0;
pub(crate) const R_C: u8 = 1;
pub(crate) const R_D: u8 = 2;
pub(crate) const R_E: u8 = 3;
pub(crate) const R_H: u8 = 4;
pub(crate) const R_L: u8 = 5;
/// Memory at HL.
pub(crate) const R_HL: u8 = 6;
pub(crate) const R_A: u8 = 7;

// 16-bit pairs (opcode bits 4-5). Stack instructions use AF in the SP slot.
pub(crate) const P_BC: u8 = 0;
pub(crate) const P_DE: u8 = 1;
pub(crate) const P_HL: u8 = 2;
pub(crate) const P_SP: u8 = 3;
pub(crate) const P_AF: u8 = 3;

// Indirect addressing for LD (rr),A / LD A,(rr).
pub(crate) const IND_BC: u8 = 0;
pub(crate) const IND_DE: u8 = 1;
pub(crate) const IND_HLI: u8 = 2;
pub(crate) const IND_HLD: u8 = 3;

// Branch conditions (opcode bits 3-4).
pub(crate) const CC_NZ: u8 = 0;
pub(crate) const CC_Z: u8 = 1;
pub(crate) const CC_NC: u8 = 2;
pub(crate) const CC_C: u8 = 3;

// ALU operations (opcode bits 3-5 of 0x80-0xBF and the d8 forms).
pub(crate) const ALU_ADD: u8 = 0;
pub(crate) const ALU_ADC: u8 = 1;
pub(crate) const ALU_SUB: u8 = 2;
pub(crate) const ALU_SBC: u8 = 3;
pub(crate) const ALU_AND: u8 = 4;
pub(crate) const ALU_XOR: u8 = 5;
pub(crate) const ALU_OR: u8 = 6;
pub(crate) const ALU_CP: u8 = 7;
