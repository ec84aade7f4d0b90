//! Opcode dispatch tables.
//!
//! Two 256-slot tables of function pointers, built at compile time. The
//! primary table's 0xCB slot is the prefix that reads the next byte and
//! dispatches it through [`EXTENDED`]. The eleven undefined primary slots
//! hold [`Opcode::ILLEGAL`], which is distinguishable from NOP by its
//! [`OpcodeKind`].
//!
//! Mnemonics double as disassembly templates: `d8`/`d16` are immediates,
//! `a8` is a high-page offset, `a16` an absolute address and `r8` a signed
//! displacement.

use super::operand::*;
use super::Cpu;
use crate::memory::Memory;

/// Signature shared by every instruction handler. Returns T-cycles.
pub type Handler = fn(&mut Cpu, &mut dyn Memory) -> u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpcodeKind {
    Instruction,
    /// The 0xCB prefix into the extended table.
    Prefix,
    /// Undefined on hardware.
    Illegal,
}

/// One table slot.
#[derive(Clone, Copy)]
pub struct Opcode {
    mnemonic: &'static str,
    length: u8,
    kind: OpcodeKind,
    handler: Handler,
}

impl Opcode {
    pub const ILLEGAL: Opcode = Opcode {
        mnemonic: "ILLEGAL",
        length: 1,
        kind: OpcodeKind::Illegal,
        handler: Cpu::illegal,
    };

    const fn new(mnemonic: &'static str, length: u8, handler: Handler) -> Self {
        Self {
            mnemonic,
            length,
            kind: OpcodeKind::Instruction,
            handler,
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        self.mnemonic
    }

    /// Encoded length in bytes, counting the 0xCB prefix for extended
    /// entries.
    pub fn length(&self) -> u8 {
        self.length
    }

    pub fn kind(&self) -> OpcodeKind {
        self.kind
    }

    pub fn is_illegal(&self) -> bool {
        self.kind == OpcodeKind::Illegal
    }

    pub fn handler(&self) -> Handler {
        self.handler
    }

    /// Run the handler. PC must already point past the opcode byte.
    #[inline]
    pub fn execute(&self, cpu: &mut Cpu, mem: &mut dyn Memory) -> u32 {
        (self.handler)(cpu, mem)
    }
}

impl std::fmt::Debug for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Opcode")
            .field("mnemonic", &self.mnemonic)
            .field("length", &self.length)
            .field("kind", &self.kind)
            .finish()
    }
}

#[inline]
pub fn lookup(opcode: u8) -> &'static Opcode {
    &PRIMARY[opcode as usize]
}

#[inline]
pub fn lookup_extended(opcode: u8) -> &'static Opcode {
    &EXTENDED[opcode as usize]
}

/// LD r,r' row: one destination, the eight sources in encoding order.
macro_rules! ld_row {
    ($t:ident, $base:literal, $dst:literal, $d:ident) => {
        $t[$base] = Opcode::new(concat!("LD ", $dst, ",B"), 1, Cpu::ld_r_r::<$d, R_B>);
        $t[$base + 1] = Opcode::new(concat!("LD ", $dst, ",C"), 1, Cpu::ld_r_r::<$d, R_C>);
        $t[$base + 2] = Opcode::new(concat!("LD ", $dst, ",D"), 1, Cpu::ld_r_r::<$d, R_D>);
        $t[$base + 3] = Opcode::new(concat!("LD ", $dst, ",E"), 1, Cpu::ld_r_r::<$d, R_E>);
        $t[$base + 4] = Opcode::new(concat!("LD ", $dst, ",H"), 1, Cpu::ld_r_r::<$d, R_H>);
        $t[$base + 5] = Opcode::new(concat!("LD ", $dst, ",L"), 1, Cpu::ld_r_r::<$d, R_L>);
        $t[$base + 6] = Opcode::new(concat!("LD ", $dst, ",(HL)"), 1, Cpu::ld_r_r::<$d, R_HL>);
        $t[$base + 7] = Opcode::new(concat!("LD ", $dst, ",A"), 1, Cpu::ld_r_r::<$d, R_A>);
    };
}

/// ALU row: one operation over the eight operands.
macro_rules! alu_row {
    ($t:ident, $base:literal, $name:literal, $op:ident) => {
        $t[$base] = Opcode::new(concat!($name, "B"), 1, Cpu::alu_r::<$op, R_B>);
        $t[$base + 1] = Opcode::new(concat!($name, "C"), 1, Cpu::alu_r::<$op, R_C>);
        $t[$base + 2] = Opcode::new(concat!($name, "D"), 1, Cpu::alu_r::<$op, R_D>);
        $t[$base + 3] = Opcode::new(concat!($name, "E"), 1, Cpu::alu_r::<$op, R_E>);
        $t[$base + 4] = Opcode::new(concat!($name, "H"), 1, Cpu::alu_r::<$op, R_H>);
        $t[$base + 5] = Opcode::new(concat!($name, "L"), 1, Cpu::alu_r::<$op, R_L>);
        $t[$base + 6] = Opcode::new(concat!($name, "(HL)"), 1, Cpu::alu_r::<$op, R_HL>);
        $t[$base + 7] = Opcode::new(concat!($name, "A"), 1, Cpu::alu_r::<$op, R_A>);
    };
}

/// Extended rotate/shift row.
macro_rules! cb_row {
    ($t:ident, $base:literal, $name:literal, $f:ident) => {
        $t[$base] = Opcode::new(concat!($name, " B"), 2, Cpu::$f::<R_B>);
        $t[$base + 1] = Opcode::new(concat!($name, " C"), 2, Cpu::$f::<R_C>);
        $t[$base + 2] = Opcode::new(concat!($name, " D"), 2, Cpu::$f::<R_D>);
        $t[$base + 3] = Opcode::new(concat!($name, " E"), 2, Cpu::$f::<R_E>);
        $t[$base + 4] = Opcode::new(concat!($name, " H"), 2, Cpu::$f::<R_H>);
        $t[$base + 5] = Opcode::new(concat!($name, " L"), 2, Cpu::$f::<R_L>);
        $t[$base + 6] = Opcode::new(concat!($name, " (HL)"), 2, Cpu::$f::<R_HL>);
        $t[$base + 7] = Opcode::new(concat!($name, " A"), 2, Cpu::$f::<R_A>);
    };
}

/// Extended BIT/RES/SET row for a single bit number.
macro_rules! cb_bit_row {
    ($t:ident, $base:literal, $name:literal, $f:ident, $bit:literal) => {
        $t[$base] = Opcode::new(concat!($name, " ", $bit, ",B"), 2, Cpu::$f::<$bit, R_B>);
        $t[$base + 1] = Opcode::new(concat!($name, " ", $bit, ",C"), 2, Cpu::$f::<$bit, R_C>);
        $t[$base + 2] = Opcode::new(concat!($name, " ", $bit, ",D"), 2, Cpu::$f::<$bit, R_D>);
        $t[$base + 3] = Opcode::new(concat!($name, " ", $bit, ",E"), 2, Cpu::$f::<$bit, R_E>);
        $t[$base + 4] = Opcode::new(concat!($name, " ", $bit, ",H"), 2, Cpu::$f::<$bit, R_H>);
        $t[$base + 5] = Opcode::new(concat!($name, " ", $bit, ",L"), 2, Cpu::$f::<$bit, R_L>);
        $t[$base + 6] = Opcode::new(concat!($name, " ", $bit, ",(HL)"), 2, Cpu::$f::<$bit, R_HL>);
        $t[$base + 7] = Opcode::new(concat!($name, " ", $bit, ",A"), 2, Cpu::$f::<$bit, R_A>);
    };
}

pub static PRIMARY: [Opcode; 256] = {
    let mut t = [Opcode::ILLEGAL; 256];

    // 0x00
    t[0x00] = Opcode::new("NOP", 1, Cpu::nop);
    t[0x01] = Opcode::new("LD BC,d16", 3, Cpu::ld_rr_d16::<P_BC>);
    t[0x02] = Opcode::new("LD (BC),A", 1, Cpu::ld_ind_a::<IND_BC>);
    t[0x03] = Opcode::new("INC BC", 1, Cpu::inc_rr::<P_BC>);
    t[0x04] = Opcode::new("INC B", 1, Cpu::inc_r::<R_B>);
    t[0x05] = Opcode::new("DEC B", 1, Cpu::dec_r::<R_B>);
    t[0x06] = Opcode::new("LD B,d8", 2, Cpu::ld_r_d8::<R_B>);
    t[0x07] = Opcode::new("RLCA", 1, Cpu::rlca);
    t[0x08] = Opcode::new("LD (a16),SP", 3, Cpu::ld_a16_sp);
    t[0x09] = Opcode::new("ADD HL,BC", 1, Cpu::add_hl_rr::<P_BC>);
    t[0x0A] = Opcode::new("LD A,(BC)", 1, Cpu::ld_a_ind::<IND_BC>);
    t[0x0B] = Opcode::new("DEC BC", 1, Cpu::dec_rr::<P_BC>);
    t[0x0C] = Opcode::new("INC C", 1, Cpu::inc_r::<R_C>);
    t[0x0D] = Opcode::new("DEC C", 1, Cpu::dec_r::<R_C>);
    t[0x0E] = Opcode::new("LD C,d8", 2, Cpu::ld_r_d8::<R_C>);
    t[0x0F] = Opcode::new("RRCA", 1, Cpu::rrca);

    // 0x10
    t[0x10] = Opcode::new("STOP", 2, Cpu::stop);
    t[0x11] = Opcode::new("LD DE,d16", 3, Cpu::ld_rr_d16::<P_DE>);
    t[0x12] = Opcode::new("LD (DE),A", 1, Cpu::ld_ind_a::<IND_DE>);
    t[0x13] = Opcode::new("INC DE", 1, Cpu::inc_rr::<P_DE>);
    t[0x14] = Opcode::new("INC D", 1, Cpu::inc_r::<R_D>);
    t[0x15] = Opcode::new("DEC D", 1, Cpu::dec_r::<R_D>);
    t[0x16] = Opcode::new("LD D,d8", 2, Cpu::ld_r_d8::<R_D>);
    t[0x17] = Opcode::new("RLA", 1, Cpu::rla);
    t[0x18] = Opcode::new("JR r8", 2, Cpu::jr_r8);
    t[0x19] = Opcode::new("ADD HL,DE", 1, Cpu::add_hl_rr::<P_DE>);
    t[0x1A] = Opcode::new("LD A,(DE)", 1, Cpu::ld_a_ind::<IND_DE>);
    t[0x1B] = Opcode::new("DEC DE", 1, Cpu::dec_rr::<P_DE>);
    t[0x1C] = Opcode::new("INC E", 1, Cpu::inc_r::<R_E>);
    t[0x1D] = Opcode::new("DEC E", 1, Cpu::dec_r::<R_E>);
    t[0x1E] = Opcode::new("LD E,d8", 2, Cpu::ld_r_d8::<R_E>);
    t[0x1F] = Opcode::new("RRA", 1, Cpu::rra);

    // 0x20
    t[0x20] = Opcode::new("JR NZ,r8", 2, Cpu::jr_cc::<CC_NZ>);
    t[0x21] = Opcode::new("LD HL,d16", 3, Cpu::ld_rr_d16::<P_HL>);
    t[0x22] = Opcode::new("LD (HL+),A", 1, Cpu::ld_ind_a::<IND_HLI>);
    t[0x23] = Opcode::new("INC HL", 1, Cpu::inc_rr::<P_HL>);
    t[0x24] = Opcode::new("INC H", 1, Cpu::inc_r::<R_H>);
    t[0x25] = Opcode::new("DEC H", 1, Cpu::dec_r::<R_H>);
    t[0x26] = Opcode::new("LD H,d8", 2, Cpu::ld_r_d8::<R_H>);
    t[0x27] = Opcode::new("DAA", 1, Cpu::daa_a);
    t[0x28] = Opcode::new("JR Z,r8", 2, Cpu::jr_cc::<CC_Z>);
    t[0x29] = Opcode::new("ADD HL,HL", 1, Cpu::add_hl_rr::<P_HL>);
    t[0x2A] = Opcode::new("LD A,(HL+)", 1, Cpu::ld_a_ind::<IND_HLI>);
    t[0x2B] = Opcode::new("DEC HL", 1, Cpu::dec_rr::<P_HL>);
    t[0x2C] = Opcode::new("INC L", 1, Cpu::inc_r::<R_L>);
    t[0x2D] = Opcode::new("DEC L", 1, Cpu::dec_r::<R_L>);
    t[0x2E] = Opcode::new("LD L,d8", 2, Cpu::ld_r_d8::<R_L>);
    t[0x2F] = Opcode::new("CPL", 1, Cpu::cpl);

    // 0x30
    t[0x30] = Opcode::new("JR NC,r8", 2, Cpu::jr_cc::<CC_NC>);
    t[0x31] = Opcode::new("LD SP,d16", 3, Cpu::ld_rr_d16::<P_SP>);
    t[0x32] = Opcode::new("LD (HL-),A", 1, Cpu::ld_ind_a::<IND_HLD>);
    t[0x33] = Opcode::new("INC SP", 1, Cpu::inc_rr::<P_SP>);
    t[0x34] = Opcode::new("INC (HL)", 1, Cpu::inc_r::<R_HL>);
    t[0x35] = Opcode::new("DEC (HL)", 1, Cpu::dec_r::<R_HL>);
    t[0x36] = Opcode::new("LD (HL),d8", 2, Cpu::ld_r_d8::<R_HL>);
    t[0x37] = Opcode::new("SCF", 1, Cpu::scf);
    t[0x38] = Opcode::new("JR C,r8", 2, Cpu::jr_cc::<CC_C>);
    t[0x39] = Opcode::new("ADD HL,SP", 1, Cpu::add_hl_rr::<P_SP>);
    t[0x3A] = Opcode::new("LD A,(HL-)", 1, Cpu::ld_a_ind::<IND_HLD>);
    t[0x3B] = Opcode::new("DEC SP", 1, Cpu::dec_rr::<P_SP>);
    t[0x3C] = Opcode::new("INC A", 1, Cpu::inc_r::<R_A>);
    t[0x3D] = Opcode::new("DEC A", 1, Cpu::dec_r::<R_A>);
    t[0x3E] = Opcode::new("LD A,d8", 2, Cpu::ld_r_d8::<R_A>);
    t[0x3F] = Opcode::new("CCF", 1, Cpu::ccf);

    // 0x40-0x7F
    ld_row!(t, 0x40, "B", R_B);
    ld_row!(t, 0x48, "C", R_C);
    ld_row!(t, 0x50, "D", R_D);
    ld_row!(t, 0x58, "E", R_E);
    ld_row!(t, 0x60, "H", R_H);
    ld_row!(t, 0x68, "L", R_L);
    ld_row!(t, 0x70, "(HL)", R_HL);
    ld_row!(t, 0x78, "A", R_A);
    // LD (HL),(HL) does not exist; its encoding is HALT.
    t[0x76] = Opcode::new("HALT", 1, Cpu::halt);

    // 0x80-0xBF
    alu_row!(t, 0x80, "ADD A,", ALU_ADD);
    alu_row!(t, 0x88, "ADC A,", ALU_ADC);
    alu_row!(t, 0x90, "SUB ", ALU_SUB);
    alu_row!(t, 0x98, "SBC A,", ALU_SBC);
    alu_row!(t, 0xA0, "AND ", ALU_AND);
    alu_row!(t, 0xA8, "XOR ", ALU_XOR);
    alu_row!(t, 0xB0, "OR ", ALU_OR);
    alu_row!(t, 0xB8, "CP ", ALU_CP);

    // 0xC0
    t[0xC0] = Opcode::new("RET NZ", 1, Cpu::ret_cc::<CC_NZ>);
    t[0xC1] = Opcode::new("POP BC", 1, Cpu::pop_rr::<P_BC>);
    t[0xC2] = Opcode::new("JP NZ,a16", 3, Cpu::jp_cc::<CC_NZ>);
    t[0xC3] = Opcode::new("JP a16", 3, Cpu::jp_a16);
    t[0xC4] = Opcode::new("CALL NZ,a16", 3, Cpu::call_cc::<CC_NZ>);
    t[0xC5] = Opcode::new("PUSH BC", 1, Cpu::push_rr::<P_BC>);
    t[0xC6] = Opcode::new("ADD A,d8", 2, Cpu::alu_d8::<ALU_ADD>);
    t[0xC7] = Opcode::new("RST 00H", 1, Cpu::rst::<0x00>);
    t[0xC8] = Opcode::new("RET Z", 1, Cpu::ret_cc::<CC_Z>);
    t[0xC9] = Opcode::new("RET", 1, Cpu::ret);
    t[0xCA] = Opcode::new("JP Z,a16", 3, Cpu::jp_cc::<CC_Z>);
    t[0xCB] = Opcode {
        mnemonic: "PREFIX CB",
        length: 1,
        kind: OpcodeKind::Prefix,
        handler: Cpu::prefix_cb,
    };
    t[0xCC] = Opcode::new("CALL Z,a16", 3, Cpu::call_cc::<CC_Z>);
    t[0xCD] = Opcode::new("CALL a16", 3, Cpu::call_a16);
    t[0xCE] = Opcode::new("ADC A,d8", 2, Cpu::alu_d8::<ALU_ADC>);
    t[0xCF] = Opcode::new("RST 08H", 1, Cpu::rst::<0x08>);

    // 0xD0
    t[0xD0] = Opcode::new("RET NC", 1, Cpu::ret_cc::<CC_NC>);
    t[0xD1] = Opcode::new("POP DE", 1, Cpu::pop_rr::<P_DE>);
    t[0xD2] = Opcode::new("JP NC,a16", 3, Cpu::jp_cc::<CC_NC>);
    t[0xD4] = Opcode::new("CALL NC,a16", 3, Cpu::call_cc::<CC_NC>);
    t[0xD5] = Opcode::new("PUSH DE", 1, Cpu::push_rr::<P_DE>);
    t[0xD6] = Opcode::new("SUB d8", 2, Cpu::alu_d8::<ALU_SUB>);
    t[0xD7] = Opcode::new("RST 10H", 1, Cpu::rst::<0x10>);
    t[0xD8] = Opcode::new("RET C", 1, Cpu::ret_cc::<CC_C>);
    t[0xD9] = Opcode::new("RETI", 1, Cpu::reti);
    t[0xDA] = Opcode::new("JP C,a16", 3, Cpu::jp_cc::<CC_C>);
    t[0xDC] = Opcode::new("CALL C,a16", 3, Cpu::call_cc::<CC_C>);
    t[0xDE] = Opcode::new("SBC A,d8", 2, Cpu::alu_d8::<ALU_SBC>);
    t[0xDF] = Opcode::new("RST 18H", 1, Cpu::rst::<0x18>);

    // 0xE0
    t[0xE0] = Opcode::new("LDH (a8),A", 2, Cpu::ldh_a8_a);
    t[0xE1] = Opcode::new("POP HL", 1, Cpu::pop_rr::<P_HL>);
    t[0xE2] = Opcode::new("LD (C),A", 1, Cpu::ld_c_a);
    t[0xE5] = Opcode::new("PUSH HL", 1, Cpu::push_rr::<P_HL>);
    t[0xE6] = Opcode::new("AND d8", 2, Cpu::alu_d8::<ALU_AND>);
    t[0xE7] = Opcode::new("RST 20H", 1, Cpu::rst::<0x20>);
    t[0xE8] = Opcode::new("ADD SP,r8", 2, Cpu::add_sp_r8);
    t[0xE9] = Opcode::new("JP (HL)", 1, Cpu::jp_hl);
    t[0xEA] = Opcode::new("LD (a16),A", 3, Cpu::ld_a16_a);
    t[0xEE] = Opcode::new("XOR d8", 2, Cpu::alu_d8::<ALU_XOR>);
    t[0xEF] = Opcode::new("RST 28H", 1, Cpu::rst::<0x28>);

    // 0xF0
    t[0xF0] = Opcode::new("LDH A,(a8)", 2, Cpu::ldh_a_a8);
    t[0xF1] = Opcode::new("POP AF", 1, Cpu::pop_rr::<P_AF>);
    t[0xF2] = Opcode::new("LD A,(C)", 1, Cpu::ld_a_c);
    t[0xF3] = Opcode::new("DI", 1, Cpu::di);
    t[0xF5] = Opcode::new("PUSH AF", 1, Cpu::push_rr::<P_AF>);
    t[0xF6] = Opcode::new("OR d8", 2, Cpu::alu_d8::<ALU_OR>);
    t[0xF7] = Opcode::new("RST 30H", 1, Cpu::rst::<0x30>);
    t[0xF8] = Opcode::new("LD HL,SP+r8", 2, Cpu::ld_hl_sp_r8);
    t[0xF9] = Opcode::new("LD SP,HL", 1, Cpu::ld_sp_hl);
    t[0xFA] = Opcode::new("LD A,(a16)", 3, Cpu::ld_a_a16);
    t[0xFB] = Opcode::new("EI", 1, Cpu::ei);
    t[0xFE] = Opcode::new("CP d8", 2, Cpu::alu_d8::<ALU_CP>);
    t[0xFF] = Opcode::new("RST 38H", 1, Cpu::rst::<0x38>);

    t
};

pub static EXTENDED: [Opcode; 256] = {
    let mut t = [Opcode::ILLEGAL; 256];

    cb_row!(t, 0x00, "RLC", cb_rlc);
    cb_row!(t, 0x08, "RRC", cb_rrc);
    cb_row!(t, 0x10, "RL", cb_rl);
    cb_row!(t, 0x18, "RR", cb_rr);
    cb_row!(t, 0x20, "SLA", cb_sla);
    cb_row!(t, 0x28, "SRA", cb_sra);
    cb_row!(t, 0x30, "SWAP", cb_swap);
    cb_row!(t, 0x38, "SRL", cb_srl);

    cb_bit_row!(t, 0x40, "BIT", cb_bit, 0);
    cb_bit_row!(t, 0x48, "BIT", cb_bit, 1);
    cb_bit_row!(t, 0x50, "BIT", cb_bit, 2);
    cb_bit_row!(t, 0x58, "BIT", cb_bit, 3);
    cb_bit_row!(t, 0x60, "BIT", cb_bit, 4);
    cb_bit_row!(t, 0x68, "BIT", cb_bit, 5);
    cb_bit_row!(t, 0x70, "BIT", cb_bit, 6);
    cb_bit_row!(t, 0x78, "BIT", cb_bit, 7);

    cb_bit_row!(t, 0x80, "RES", cb_res, 0);
    cb_bit_row!(t, 0x88, "RES", cb_res, 1);
    cb_bit_row!(t, 0x90, "RES", cb_res, 2);
    cb_bit_row!(t, 0x98, "RES", cb_res, 3);
    cb_bit_row!(t, 0xA0, "RES", cb_res, 4);
    cb_bit_row!(t, 0xA8, "RES", cb_res, 5);
    cb_bit_row!(t, 0xB0, "RES", cb_res, 6);
    cb_bit_row!(t, 0xB8, "RES", cb_res, 7);

    cb_bit_row!(t, 0xC0, "SET", cb_set, 0);
    cb_bit_row!(t, 0xC8, "SET", cb_set, 1);
    cb_bit_row!(t, 0xD0, "SET", cb_set, 2);
    cb_bit_row!(t, 0xD8, "SET", cb_set, 3);
    cb_bit_row!(t, 0xE0, "SET", cb_set, 4);
    cb_bit_row!(t, 0xE8, "SET", cb_set, 5);
    cb_bit_row!(t, 0xF0, "SET", cb_set, 6);
    cb_bit_row!(t, 0xF8, "SET", cb_set, 7);

    t
};
