use super::*;
use crate::memory::{Memory, IE_ADDR, IF_ADDR};

struct TestBus {
    memory: Vec<u8>,
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: vec![0; 0x10000],
        }
    }
}

impl Memory for TestBus {
    fn read_byte(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write_byte(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }
}

/// CPU at the post-boot entry point with `program` loaded at 0x0100.
fn setup(program: &[u8]) -> (Cpu, TestBus) {
    setup_with(CpuConfig::default(), program)
}

fn setup_with(config: CpuConfig, program: &[u8]) -> (Cpu, TestBus) {
    let mut bus = TestBus::default();
    bus.memory[0x0100..0x0100 + program.len()].copy_from_slice(program);
    (Cpu::new(config), bus)
}

fn bcd(n: u8) -> u8 {
    ((n / 10) << 4) | (n % 10)
}

#[test]
fn nop_advances_pc() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    let cycles = cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0101);
    assert_eq!(cycles, 4);
}

#[test]
fn step_records_last_and_total_cycles() {
    // LD BC,d16; NOP
    let (mut cpu, mut bus) = setup(&[0x01, 0x34, 0x12, 0x00]);
    cpu.step(&mut bus);
    assert_eq!(cpu.last_cycles(), 12);
    cpu.step(&mut bus);
    assert_eq!(cpu.last_cycles(), 4);
    assert_eq!(cpu.total_cycles(), 16);
    assert_eq!(cpu.regs.bc(), 0x1234);
}

#[test]
fn push_bc_pop_de_copies_the_pair() {
    let (mut cpu, mut bus) = setup(&[0xC5, 0xD1]);
    cpu.regs.set_bc(0x1234);
    cpu.regs.sp = 0xFFFE;

    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(cpu.step(&mut bus), 12);

    assert_eq!(cpu.regs.de(), 0x1234);
    assert_eq!(cpu.regs.bc(), 0x1234);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn pop_af_clears_low_flag_nibble() {
    let (mut cpu, mut bus) = setup(&[0xF1]);
    cpu.regs.sp = 0xC000;
    bus.memory[0xC000] = 0xFF;
    bus.memory[0xC001] = 0x12;

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x12);
    assert_eq!(cpu.regs.f.bits(), 0xF0);
    assert_eq!(cpu.regs.af(), 0x12F0);
}

#[test]
fn cpl_twice_restores_a_and_keeps_n_h() {
    let (mut cpu, mut bus) = setup(&[0x2F, 0x2F]);
    cpu.regs.a = 0x5A;
    cpu.regs.f = Flags::empty();

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0xA5);
    assert!(cpu.flag(Flags::SUBTRACT) && cpu.flag(Flags::HALF_CARRY));

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x5A);
    assert!(cpu.flag(Flags::SUBTRACT) && cpu.flag(Flags::HALF_CARRY));
}

#[test]
fn jr_nz_cost_depends_on_the_branch() {
    // Not taken: Z set.
    let (mut cpu, mut bus) = setup(&[0x20, 0x05]);
    cpu.set_flag(Flags::ZERO, true);
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.pc, 0x0102);

    // Taken: Z clear.
    let (mut cpu, mut bus) = setup(&[0x20, 0x05]);
    cpu.set_flag(Flags::ZERO, false);
    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0107);

    // Backwards displacement.
    let (mut cpu, mut bus) = setup(&[0x20, 0xFE]);
    cpu.set_flag(Flags::ZERO, false);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0100);
}

#[test]
fn conditional_jp_call_ret_costs() {
    let (mut cpu, mut bus) = setup(&[0xCA, 0x00, 0x02]);
    cpu.set_flag(Flags::ZERO, false);
    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0103);

    let (mut cpu, mut bus) = setup(&[0xCA, 0x00, 0x02]);
    cpu.set_flag(Flags::ZERO, true);
    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x0200);

    let (mut cpu, mut bus) = setup(&[0xDC, 0x00, 0x02]);
    cpu.set_flag(Flags::CARRY, false);
    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.regs.sp, 0xFFFE);

    // RET NC not taken, then taken.
    let (mut cpu, mut bus) = setup(&[0xD0, 0xD0]);
    cpu.regs.sp = 0xC000;
    bus.memory[0xC000] = 0x34;
    bus.memory[0xC001] = 0x12;
    cpu.set_flag(Flags::CARRY, true);
    assert_eq!(cpu.step(&mut bus), 8);
    cpu.set_flag(Flags::CARRY, false);
    assert_eq!(cpu.step(&mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x1234);
    assert_eq!(cpu.regs.sp, 0xC002);
}

#[test]
fn call_pushes_return_address() {
    let (mut cpu, mut bus) = setup(&[0xCD, 0x50, 0x01]);
    cpu.regs.sp = 0xFFFE;

    let cycles = cpu.step(&mut bus);

    assert_eq!(cycles, 24);
    assert_eq!(cpu.regs.pc, 0x0150);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.memory[0xFFFC], 0x03);
    assert_eq!(bus.memory[0xFFFD], 0x01);
}

#[test]
fn call_then_ret_round_trip() {
    let (mut cpu, mut bus) = setup(&[0xCD, 0x00, 0x02]);
    bus.memory[0x0200] = 0xC9;
    cpu.step(&mut bus);
    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x0103);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn rst_jumps_to_fixed_vector() {
    let (mut cpu, mut bus) = setup(&[0xEF]);
    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x0028);
    assert_eq!(bus.read_word(cpu.regs.sp), 0x0101);
}

#[test]
fn inc_sets_half_carry_and_keeps_carry() {
    let (mut cpu, mut bus) = setup(&[0x04]);
    cpu.regs.b = 0x0F;
    cpu.regs.f = Flags::CARRY | Flags::SUBTRACT;

    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.b, 0x10);
    assert!(cpu.flag(Flags::HALF_CARRY));
    assert!(!cpu.flag(Flags::ZERO));
    assert!(!cpu.flag(Flags::SUBTRACT));
    assert!(cpu.flag(Flags::CARRY));
}

#[test]
fn dec_to_zero_and_through_a_nibble() {
    let (mut cpu, mut bus) = setup(&[0x0D, 0x0D]);
    cpu.regs.c = 0x01;
    cpu.regs.f = Flags::CARRY;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.c, 0x00);
    assert!(cpu.flag(Flags::ZERO) && cpu.flag(Flags::SUBTRACT));
    assert!(!cpu.flag(Flags::HALF_CARRY));
    assert!(cpu.flag(Flags::CARRY));

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.c, 0xFF);
    assert!(cpu.flag(Flags::HALF_CARRY));
    assert!(!cpu.flag(Flags::ZERO));
    assert!(cpu.flag(Flags::CARRY));
}

#[test]
fn inc_hl_indirect_costs_twelve() {
    let (mut cpu, mut bus) = setup(&[0x34]);
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0xFF;
    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(bus.memory[0xC000], 0x00);
    assert!(cpu.flag(Flags::ZERO) && cpu.flag(Flags::HALF_CARRY));
}

#[test]
fn and_sets_half_carry() {
    let (mut cpu, mut bus) = setup(&[0xE6, 0x0F]);
    cpu.regs.a = 0xFF;
    cpu.regs.f = Flags::CARRY;

    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.a, 0x0F);
    assert_eq!(cpu.regs.f, Flags::HALF_CARRY);
}

#[test]
fn xor_a_clears_a_and_sets_zero() {
    let (mut cpu, mut bus) = setup(&[0xAF]);
    cpu.regs.a = 0x42;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0);
    assert_eq!(cpu.regs.f, Flags::ZERO);
}

#[test]
fn add_boundaries() {
    let (mut cpu, mut bus) = setup(&[0xC6, 0x01]);
    cpu.regs.a = 0xFF;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, Flags::ZERO | Flags::HALF_CARRY | Flags::CARRY);

    let (mut cpu, mut bus) = setup(&[0xC6, 0x01]);
    cpu.regs.a = 0x0F;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x10);
    assert_eq!(cpu.regs.f, Flags::HALF_CARRY);

    let (mut cpu, mut bus) = setup(&[0xC6, 0x80]);
    cpu.regs.a = 0x80;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, Flags::ZERO | Flags::CARRY);
}

#[test]
fn adc_includes_carry_in_both_nibbles() {
    let (mut cpu, mut bus) = setup(&[0xCE, 0x01]);
    cpu.regs.a = 0xFE;
    cpu.regs.f = Flags::CARRY;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, Flags::ZERO | Flags::HALF_CARRY | Flags::CARRY);

    let (mut cpu, mut bus) = setup(&[0xCE, 0x0F]);
    cpu.regs.a = 0x00;
    cpu.regs.f = Flags::CARRY;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x10);
    assert_eq!(cpu.regs.f, Flags::HALF_CARRY);
}

#[test]
fn sub_and_sbc_boundaries() {
    let (mut cpu, mut bus) = setup(&[0xD6, 0x01]);
    cpu.regs.a = 0x10;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x0F);
    assert_eq!(cpu.regs.f, Flags::SUBTRACT | Flags::HALF_CARRY);

    let (mut cpu, mut bus) = setup(&[0xD6, 0x01]);
    cpu.regs.a = 0x00;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0xFF);
    assert_eq!(cpu.regs.f, Flags::SUBTRACT | Flags::HALF_CARRY | Flags::CARRY);

    let (mut cpu, mut bus) = setup(&[0xDE, 0x00]);
    cpu.regs.a = 0x00;
    cpu.regs.f = Flags::CARRY;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0xFF);
    assert_eq!(cpu.regs.f, Flags::SUBTRACT | Flags::HALF_CARRY | Flags::CARRY);

    let (mut cpu, mut bus) = setup(&[0x90]);
    cpu.regs.a = 0x3E;
    cpu.regs.b = 0x3E;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, Flags::ZERO | Flags::SUBTRACT);
}

#[test]
fn cp_sets_flags_without_changing_a() {
    let (mut cpu, mut bus) = setup(&[0xFE, 0x42, 0xFE, 0x50]);
    cpu.regs.a = 0x42;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x42);
    assert_eq!(cpu.regs.f, Flags::ZERO | Flags::SUBTRACT);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x42);
    assert!(cpu.flag(Flags::CARRY));
    assert!(!cpu.flag(Flags::ZERO));
}

#[test]
fn alu_from_hl_costs_eight() {
    let (mut cpu, mut bus) = setup(&[0x86]);
    cpu.regs.a = 0x01;
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x02;
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.a, 0x03);
}

#[test]
fn add_hl_half_carry_comes_from_bit_eleven() {
    let (mut cpu, mut bus) = setup(&[0x09]);
    cpu.regs.set_hl(0x0FFF);
    cpu.regs.set_bc(0x0001);
    cpu.regs.f = Flags::ZERO | Flags::SUBTRACT;
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.hl(), 0x1000);
    assert_eq!(cpu.regs.f, Flags::ZERO | Flags::HALF_CARRY);

    let (mut cpu, mut bus) = setup(&[0x19]);
    cpu.regs.set_hl(0xFFFF);
    cpu.regs.set_de(0x0001);
    cpu.regs.f = Flags::empty();
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.hl(), 0x0000);
    assert_eq!(cpu.regs.f, Flags::HALF_CARRY | Flags::CARRY);

    // 0x00FF + 0x0001 carries out of bit 7 only: no 16-bit half-carry.
    let (mut cpu, mut bus) = setup(&[0x29]);
    cpu.regs.set_hl(0x8000);
    cpu.regs.f = Flags::empty();
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.hl(), 0x0000);
    assert_eq!(cpu.regs.f, Flags::CARRY);
}

#[test]
fn stack_pointer_offsets_use_low_byte_flags() {
    let (mut cpu, mut bus) = setup(&[0xF8, 0x01]);
    cpu.regs.sp = 0x00FF;
    cpu.regs.f = Flags::ZERO;
    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.regs.hl(), 0x0100);
    assert_eq!(cpu.regs.f, Flags::HALF_CARRY | Flags::CARRY);

    let (mut cpu, mut bus) = setup(&[0xE8, 0xFF]);
    cpu.regs.sp = 0x0000;
    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(cpu.regs.sp, 0xFFFF);
    assert_eq!(cpu.regs.f, Flags::empty());
}

#[test]
fn daa_matches_decimal_addition_and_subtraction() {
    for x in 0..100u8 {
        for y in 0..100u8 {
            // ADD A,d8; DAA
            let (mut cpu, mut bus) = setup(&[0xC6, bcd(y), 0x27]);
            cpu.regs.a = bcd(x);
            cpu.step(&mut bus);
            cpu.step(&mut bus);
            let sum = u16::from(x) + u16::from(y);
            assert_eq!(cpu.regs.a, bcd((sum % 100) as u8), "{x} + {y}");
            assert_eq!(cpu.flag(Flags::CARRY), sum >= 100, "{x} + {y}");
            assert_eq!(cpu.flag(Flags::ZERO), sum % 100 == 0, "{x} + {y}");
            assert!(!cpu.flag(Flags::HALF_CARRY));
            assert!(!cpu.flag(Flags::SUBTRACT));

            // SUB d8; DAA
            let (mut cpu, mut bus) = setup(&[0xD6, bcd(y), 0x27]);
            cpu.regs.a = bcd(x);
            cpu.step(&mut bus);
            cpu.step(&mut bus);
            let diff = (100 + u16::from(x) - u16::from(y)) % 100;
            assert_eq!(cpu.regs.a, bcd(diff as u8), "{x} - {y}");
            assert_eq!(cpu.flag(Flags::CARRY), x < y, "{x} - {y}");
            assert_eq!(cpu.flag(Flags::ZERO), diff == 0, "{x} - {y}");
            assert!(cpu.flag(Flags::SUBTRACT));
        }
    }
}

#[test]
fn accumulator_rotates_always_clear_zero() {
    let (mut cpu, mut bus) = setup(&[0x17]);
    cpu.regs.a = 0x80;
    cpu.regs.f = Flags::ZERO;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, Flags::CARRY);

    let (mut cpu, mut bus) = setup(&[0x1F]);
    cpu.regs.a = 0x01;
    cpu.regs.f = Flags::CARRY;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x80);
    assert_eq!(cpu.regs.f, Flags::CARRY);

    let (mut cpu, mut bus) = setup(&[0x07]);
    cpu.regs.a = 0x85;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x0B);
    assert_eq!(cpu.regs.f, Flags::CARRY);
}

#[test]
fn scf_and_ccf() {
    let (mut cpu, mut bus) = setup(&[0x37, 0x3F, 0x3F]);
    cpu.regs.f = Flags::ZERO | Flags::SUBTRACT | Flags::HALF_CARRY;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.f, Flags::ZERO | Flags::CARRY);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.f, Flags::ZERO);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.f, Flags::ZERO | Flags::CARRY);
}

#[test]
fn loads_through_hl_increment_and_decrement() {
    let (mut cpu, mut bus) = setup(&[0x22, 0x32, 0x2A]);
    cpu.regs.a = 0x77;
    cpu.regs.set_hl(0xC000);

    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.hl(), 0xC001);
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.hl(), 0xC000);
    assert_eq!(bus.memory[0xC000], 0x77);
    assert_eq!(bus.memory[0xC001], 0x77);

    cpu.regs.a = 0;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0x77);
    assert_eq!(cpu.regs.hl(), 0xC001);
}

#[test]
fn ld_a16_sp_stores_little_endian() {
    let (mut cpu, mut bus) = setup(&[0x08, 0x00, 0xC0]);
    cpu.regs.sp = 0xBEEF;
    assert_eq!(cpu.step(&mut bus), 20);
    assert_eq!(bus.memory[0xC000], 0xEF);
    assert_eq!(bus.memory[0xC001], 0xBE);
}

#[test]
fn high_page_loads() {
    let (mut cpu, mut bus) = setup(&[0xE0, 0x80, 0xF2]);
    cpu.regs.a = 0x99;
    cpu.regs.c = 0x80;
    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(bus.memory[0xFF80], 0x99);
    cpu.regs.a = 0;
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.a, 0x99);
}

#[test]
fn ld_r_r_costs() {
    // LD B,C; LD (HL),B; LD A,(HL)
    let (mut cpu, mut bus) = setup(&[0x41, 0x70, 0x7E]);
    cpu.regs.c = 0x3C;
    cpu.regs.set_hl(0xC123);
    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.a, 0x3C);
    assert_eq!(bus.memory[0xC123], 0x3C);
}

#[test]
fn extended_costs_include_the_prefix() {
    // RL C
    let (mut cpu, mut bus) = setup(&[0xCB, 0x11]);
    cpu.regs.c = 0x80;
    cpu.regs.f = Flags::empty();
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.c, 0x00);
    assert_eq!(cpu.regs.f, Flags::ZERO | Flags::CARRY);
    assert_eq!(cpu.regs.pc, 0x0102);

    // RLC (HL), BIT 0,(HL), SET 7,(HL)
    let (mut cpu, mut bus) = setup(&[0xCB, 0x06, 0xCB, 0x46, 0xCB, 0xFE]);
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x80;
    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(bus.memory[0xC000], 0x01);
    assert_eq!(cpu.step(&mut bus), 12);
    assert!(!cpu.flag(Flags::ZERO));
    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(bus.memory[0xC000], 0x81);
}

#[test]
fn bit_res_set_on_registers() {
    // BIT 7,H; RES 0,A; SWAP B
    let (mut cpu, mut bus) = setup(&[0xCB, 0x7C, 0xCB, 0x87, 0xCB, 0x30]);
    cpu.regs.h = 0x7F;
    cpu.regs.a = 0xFF;
    cpu.regs.b = 0xA5;
    cpu.regs.f = Flags::CARRY;

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.f, Flags::ZERO | Flags::HALF_CARRY | Flags::CARRY);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0xFE);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.b, 0x5A);
    assert_eq!(cpu.regs.f, Flags::empty());
}

#[test]
fn shifts_preserve_or_clear_the_sign_bit() {
    // SRA A; SRL B; SLA C
    let (mut cpu, mut bus) = setup(&[0xCB, 0x2F, 0xCB, 0x38, 0xCB, 0x21]);
    cpu.regs.a = 0x81;
    cpu.regs.b = 0x81;
    cpu.regs.c = 0x80;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a, 0xC0);
    assert!(cpu.flag(Flags::CARRY));
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.b, 0x40);
    assert!(cpu.flag(Flags::CARRY));
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.c, 0x00);
    assert_eq!(cpu.regs.f, Flags::ZERO | Flags::CARRY);
}

#[test]
fn every_opcode_reports_a_whole_machine_cycle() {
    for opcode in 0..=u8::MAX {
        let (mut cpu, mut bus) = setup(&[opcode, 0x00, 0x00]);
        cpu.regs.set_hl(0xC000);
        let cycles = cpu.step(&mut bus);
        assert!(cycles >= 4 && cycles % 4 == 0, "{opcode:#04x}: {cycles}");

        let (mut cpu, mut bus) = setup(&[0xCB, opcode]);
        cpu.regs.set_hl(0xC000);
        let cycles = cpu.step(&mut bus);
        assert!(matches!(cycles, 8 | 12 | 16), "CB {opcode:#04x}: {cycles}");
    }
}

#[test]
fn ei_takes_effect_after_the_next_instruction() {
    // EI; NOP; NOP
    let (mut cpu, mut bus) = setup(&[0xFB, 0x00, 0x00]);
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;

    cpu.step(&mut bus);
    assert!(!cpu.ime());
    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0102);
    assert!(cpu.ime());

    assert_eq!(cpu.step(&mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x0040);
    assert!(!cpu.ime());
    assert_eq!(bus.memory[IF_ADDR as usize], 0x00);
    assert_eq!(bus.read_word(cpu.regs.sp), 0x0102);
}

#[test]
fn ei_while_enabling_keeps_ime_set_until_di() {
    // EI; EI; NOP; DI; NOP
    let (mut cpu, mut bus) = setup(&[0xFB, 0xFB, 0x00, 0xF3, 0x00]);
    cpu.step(&mut bus);
    assert!(!cpu.ime());
    cpu.step(&mut bus);
    assert!(cpu.ime());
    cpu.step(&mut bus);
    assert!(cpu.ime());

    cpu.step(&mut bus);
    assert!(!cpu.ime());
    cpu.step(&mut bus);
    assert!(!cpu.ime());
}

#[test]
fn di_cancels_a_pending_ei() {
    let (mut cpu, mut bus) = setup(&[0xFB, 0xF3, 0x00, 0x00]);
    for _ in 0..4 {
        cpu.step(&mut bus);
    }
    assert!(!cpu.ime());
}

#[test]
fn reti_enables_ime_immediately() {
    let (mut cpu, mut bus) = setup(&[0xD9]);
    cpu.regs.sp = 0xC000;
    bus.memory[0xC000] = 0x00;
    bus.memory[0xC001] = 0x02;
    assert_eq!(cpu.step(&mut bus), 16);
    assert!(cpu.ime());
    assert_eq!(cpu.regs.pc, 0x0200);
}

#[test]
fn interrupt_priority_and_masking() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    cpu.set_ime(true);
    // Timer and Serial requested, only Serial enabled.
    bus.memory[IE_ADDR as usize] = 0x08;
    bus.memory[IF_ADDR as usize] = 0x0C;
    assert_eq!(cpu.step(&mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x0058);
    assert_eq!(bus.memory[IF_ADDR as usize], 0x04);
}

#[test]
fn halt_with_ime_waits_then_services() {
    let (mut cpu, mut bus) = setup(&[0x76, 0x00]);
    cpu.set_ime(true);
    bus.memory[IE_ADDR as usize] = 0x01;

    assert_eq!(cpu.step(&mut bus), 4);
    assert!(cpu.is_halted());
    assert_eq!(cpu.regs.pc, 0x0101);

    assert_eq!(cpu.step(&mut bus), 4);
    assert!(cpu.is_halted());
    assert_eq!(cpu.regs.pc, 0x0101);

    bus.memory[IF_ADDR as usize] = 0x01;
    assert_eq!(cpu.step(&mut bus), 20);
    assert!(!cpu.is_halted());
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(bus.read_word(cpu.regs.sp), 0x0101);
}

#[test]
fn halt_without_ime_wakes_without_servicing() {
    // HALT; INC B
    let (mut cpu, mut bus) = setup(&[0x76, 0x04]);
    bus.memory[IE_ADDR as usize] = 0x04;

    cpu.step(&mut bus);
    assert!(cpu.is_halted());

    bus.memory[IF_ADDR as usize] = 0x04;
    cpu.step(&mut bus);
    assert!(!cpu.is_halted());
    assert_eq!(cpu.regs.b, 0x01);
    assert_eq!(cpu.regs.pc, 0x0102);
    assert_eq!(bus.memory[IF_ADDR as usize], 0x04);
}

#[test]
fn halt_bug_repeats_the_next_byte() {
    // HALT; INC B; NOP
    let (mut cpu, mut bus) = setup(&[0x76, 0x04, 0x00]);
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;

    cpu.step(&mut bus);
    assert!(!cpu.is_halted());
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0101);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0102);
    assert_eq!(cpu.regs.b, 0x02);
}

#[test]
fn ei_then_halt_with_a_request_returns_to_the_halt() {
    // EI; HALT; handler at 0x40: INC B; RETI
    let (mut cpu, mut bus) = setup(&[0xFB, 0x76, 0x00]);
    bus.memory[0x40] = 0x04;
    bus.memory[0x41] = 0xD9;
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;

    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.step(&mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(bus.read_word(cpu.regs.sp), 0x0101);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0041);
    assert_eq!(cpu.regs.b, 0x01);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0101);
    cpu.step(&mut bus);
    assert!(cpu.is_halted());
    assert_eq!(cpu.regs.b, 0x01);
}

#[test]
fn halt_bug_can_be_disabled() {
    let config = CpuConfig::builder().halt_bug(false).build();
    let (mut cpu, mut bus) = setup_with(config, &[0x76, 0x04, 0x00]);
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;

    cpu.step(&mut bus);
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0103);
    assert_eq!(cpu.regs.b, 0x01);
}

#[test]
fn stop_skips_padding_and_waits_for_joypad() {
    // STOP 00; INC B
    let (mut cpu, mut bus) = setup(&[0x10, 0x00, 0x04]);
    bus.memory[IE_ADDR as usize] = 0x1F;

    cpu.step(&mut bus);
    assert!(cpu.is_stopped());
    assert_eq!(cpu.regs.pc, 0x0102);

    // A timer request does not end STOP.
    bus.memory[IF_ADDR as usize] = 0x04;
    assert_eq!(cpu.step(&mut bus), 4);
    assert!(cpu.is_stopped());

    bus.memory[IF_ADDR as usize] = 0x10;
    cpu.step(&mut bus);
    assert!(!cpu.is_stopped());
    assert_eq!(cpu.regs.b, 0x01);
}

#[test]
fn illegal_opcode_defaults_to_nop() {
    let (mut cpu, mut bus) = setup(&[0xD3, 0x00]);
    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0101);
    assert_eq!(cpu.state(), RunState::Running);
    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0102);
}

#[test]
fn illegal_opcode_can_lock_the_cpu() {
    let config = CpuConfig::builder()
        .illegal_opcode(IllegalOpcodePolicy::Lock)
        .build();
    let (mut cpu, mut bus) = setup_with(config, &[0xFD, 0x04]);
    cpu.set_ime(true);
    bus.memory[IE_ADDR as usize] = 0x01;

    assert_eq!(cpu.step(&mut bus), 4);
    assert!(cpu.is_locked());

    // Locked: no dispatch and no interrupt servicing.
    bus.memory[IF_ADDR as usize] = 0x01;
    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0101);
    assert_eq!(cpu.regs.b, 0x00);
}

#[test]
fn reset_restores_post_boot_state_and_keeps_config() {
    let config = CpuConfig::builder().halt_bug(false).build();
    let (mut cpu, mut bus) = setup_with(config, &[0x3C, 0xFB]);
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    cpu.reset();
    assert_eq!(cpu.regs, Registers::post_boot());
    assert_eq!(cpu.total_cycles(), 0);
    assert!(!cpu.config().halt_bug);
    assert!(!cpu.ime());
}
