use super::*;
use crate::{MAX_ROM_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH, START_ADDRESS};

fn emulator_with(program: &[u8]) -> Emulator {
    let mut emulator = Emulator::default();
    emulator.load_rom(program);
    emulator
}

fn step(emulator: &mut Emulator) {
    emulator.step().expect("step failed");
}

fn run(emulator: &mut Emulator, steps: usize) {
    for _ in 0..steps {
        step(emulator);
    }
}

#[test]
fn fetch_advances_pc_by_two() {
    // LD V0, 0x12
    let mut emulator = emulator_with(&[0x60, 0x12]);
    step(&mut emulator);
    assert_eq!(emulator.regs.pc, START_ADDRESS + 2);
    assert_eq!(emulator.regs.v[0], 0x12);
}

#[test]
fn add_reg_sets_carry_before_truncation() {
    // LD V1, 0xFF; LD V2, 0x02; ADD V1, V2
    let mut emulator = emulator_with(&[0x61, 0xFF, 0x62, 0x02, 0x81, 0x24]);
    run(&mut emulator, 3);
    assert_eq!(emulator.regs.v[1], 0x01);
    assert_eq!(emulator.regs.v[0xF], 1);
}

#[test]
fn add_reg_clears_carry_when_no_overflow() {
    // Leave a stale 1 in VF first to prove it gets cleared.
    // LD VF, 0x01; LD V1, 0x10; LD V2, 0x20; ADD V1, V2
    let mut emulator = emulator_with(&[0x6F, 0x01, 0x61, 0x10, 0x62, 0x20, 0x81, 0x24]);
    run(&mut emulator, 4);
    assert_eq!(emulator.regs.v[1], 0x30);
    assert_eq!(emulator.regs.v[0xF], 0);
}

#[test]
fn add_imm_wraps_without_touching_flag() {
    // LD VF, 0x07; LD V1, 0xFF; ADD V1, 0x02
    let mut emulator = emulator_with(&[0x6F, 0x07, 0x61, 0xFF, 0x71, 0x02]);
    run(&mut emulator, 3);
    assert_eq!(emulator.regs.v[1], 0x01);
    assert_eq!(emulator.regs.v[0xF], 0x07);
}

#[test]
fn sub_uses_not_borrow_polarity() {
    // LD V1, 0x10; LD V2, 0x05; SUB V1, V2
    let mut emulator = emulator_with(&[0x61, 0x10, 0x62, 0x05, 0x81, 0x25]);
    run(&mut emulator, 3);
    assert_eq!(emulator.regs.v[1], 0x0B);
    assert_eq!(emulator.regs.v[0xF], 1);
}

#[test]
fn sub_flags_set_when_operands_equal() {
    // Vx >= Vy includes equality.
    let mut emulator = emulator_with(&[0x61, 0x10, 0x62, 0x10, 0x81, 0x25]);
    run(&mut emulator, 3);
    assert_eq!(emulator.regs.v[1], 0x00);
    assert_eq!(emulator.regs.v[0xF], 1);
}

#[test]
fn sub_wraps_and_clears_flag_on_borrow() {
    // LD V1, 0x05; LD V2, 0x10; SUB V1, V2
    let mut emulator = emulator_with(&[0x61, 0x05, 0x62, 0x10, 0x81, 0x25]);
    run(&mut emulator, 3);
    assert_eq!(emulator.regs.v[1], 0xF5);
    assert_eq!(emulator.regs.v[0xF], 0);
}

#[test]
fn subn_reverses_operands() {
    // LD V1, 0x05; LD V2, 0x10; SUBN V1, V2 -> V1 = V2 - V1
    let mut emulator = emulator_with(&[0x61, 0x05, 0x62, 0x10, 0x81, 0x27]);
    run(&mut emulator, 3);
    assert_eq!(emulator.regs.v[1], 0x0B);
    assert_eq!(emulator.regs.v[0xF], 1);
}

#[test]
fn shr_captures_low_bit_before_shifting() {
    // LD V1, 0x05; SHR V1
    let mut emulator = emulator_with(&[0x61, 0x05, 0x81, 0x06]);
    run(&mut emulator, 2);
    assert_eq!(emulator.regs.v[1], 0x02);
    assert_eq!(emulator.regs.v[0xF], 1);
}

#[test]
fn shl_captures_high_bit_before_shifting() {
    // LD V1, 0x81; SHL V1
    let mut emulator = emulator_with(&[0x61, 0x81, 0x81, 0x0E]);
    run(&mut emulator, 2);
    assert_eq!(emulator.regs.v[1], 0x02);
    assert_eq!(emulator.regs.v[0xF], 1);
}

#[test]
fn bitwise_ops_combine_into_x() {
    // LD V1, 0b1100; LD V2, 0b1010; OR/AND/XOR in sequence with reloads.
    let mut emulator = emulator_with(&[
        0x61, 0x0C, 0x62, 0x0A, 0x81, 0x21, // OR  -> 0x0E
        0x63, 0x0C, 0x83, 0x22, // AND -> 0x08
        0x64, 0x0C, 0x84, 0x23, // XOR -> 0x06
    ]);
    run(&mut emulator, 7);
    assert_eq!(emulator.regs.v[1], 0x0E);
    assert_eq!(emulator.regs.v[3], 0x08);
    assert_eq!(emulator.regs.v[4], 0x06);
}

#[test]
fn jump_sets_pc() {
    let mut emulator = emulator_with(&[0x1A, 0xBC]);
    step(&mut emulator);
    assert_eq!(emulator.regs.pc, 0xABC);
}

#[test]
fn jump_offset_adds_v0() {
    // LD V0, 0x10; JP V0, 0x300
    let mut emulator = emulator_with(&[0x60, 0x10, 0xB3, 0x00]);
    run(&mut emulator, 2);
    assert_eq!(emulator.regs.pc, 0x310);
}

#[test]
fn call_then_ret_round_trips() {
    // 0x200: CALL 0x206
    // 0x202: LD V1, 0xAA   (executed after the return)
    // 0x204: (padding)
    // 0x206: RET
    let mut emulator = emulator_with(&[0x22, 0x06, 0x61, 0xAA, 0x00, 0x00, 0x00, 0xEE]);
    step(&mut emulator);
    assert_eq!(emulator.regs.pc, 0x206);
    assert_eq!(emulator.regs.sp, 1);
    assert_eq!(emulator.regs.stack[0], 0x202);
    step(&mut emulator);
    assert_eq!(emulator.regs.pc, 0x202);
    assert_eq!(emulator.regs.sp, 0);
    step(&mut emulator);
    assert_eq!(emulator.regs.v[1], 0xAA);
}

#[test]
fn seventeenth_call_overflows_the_stack() {
    // CALL 0x200: an endless self-call. 16 calls fill the stack.
    let mut emulator = emulator_with(&[0x22, 0x00]);
    for _ in 0..16 {
        step(&mut emulator);
    }
    assert_eq!(
        emulator.step(),
        Err(CoreError::StackOverflow {
            pc: 0x200,
            opcode: 0x2200
        })
    );
}

#[test]
fn ret_with_empty_stack_underflows() {
    let mut emulator = emulator_with(&[0x00, 0xEE]);
    assert_eq!(
        emulator.step(),
        Err(CoreError::StackUnderflow {
            pc: 0x200,
            opcode: 0x00EE
        })
    );
}

#[test]
fn unrecognized_word_is_an_error_not_a_skip() {
    let mut emulator = emulator_with(&[0x50, 0x01]);
    assert_eq!(
        emulator.step(),
        Err(CoreError::InvalidOpcode {
            pc: 0x200,
            opcode: 0x5001
        })
    );
}

#[test]
fn zero_word_is_invalid() {
    let mut emulator = emulator_with(&[]);
    assert_eq!(
        emulator.step(),
        Err(CoreError::InvalidOpcode {
            pc: 0x200,
            opcode: 0x0000
        })
    );
}

#[test]
fn skip_equal_immediate() {
    // LD V1, 0x11; SE V1, 0x11 skips; SE V1, 0x22 does not.
    let mut emulator = emulator_with(&[0x61, 0x11, 0x31, 0x11]);
    run(&mut emulator, 2);
    assert_eq!(emulator.regs.pc, START_ADDRESS + 6);

    let mut emulator = emulator_with(&[0x61, 0x11, 0x31, 0x22]);
    run(&mut emulator, 2);
    assert_eq!(emulator.regs.pc, START_ADDRESS + 4);
}

#[test]
fn skip_not_equal_immediate() {
    let mut emulator = emulator_with(&[0x61, 0x11, 0x41, 0x22]);
    run(&mut emulator, 2);
    assert_eq!(emulator.regs.pc, START_ADDRESS + 6);
}

#[test]
fn skip_register_comparisons() {
    // LD V1, 7; LD V2, 7; SE V1, V2 skips.
    let mut emulator = emulator_with(&[0x61, 0x07, 0x62, 0x07, 0x51, 0x20]);
    run(&mut emulator, 3);
    assert_eq!(emulator.regs.pc, START_ADDRESS + 8);

    // SNE with equal registers does not skip.
    let mut emulator = emulator_with(&[0x61, 0x07, 0x62, 0x07, 0x91, 0x20]);
    run(&mut emulator, 3);
    assert_eq!(emulator.regs.pc, START_ADDRESS + 6);
}

#[test]
fn cls_clears_the_framebuffer() {
    let mut emulator = emulator_with(&[0x00, 0xE0]);
    emulator.framebuffer.flip(5, 5);
    step(&mut emulator);
    assert!(emulator.display().as_slice().iter().all(|p| !p));
}

#[test]
fn draw_twice_self_cancels_and_reports_collision() {
    // LD I, 0x050 (glyph for 0); DRW V0, V0, 5 twice at the origin.
    let mut emulator = emulator_with(&[0xA0, 0x50, 0xD0, 0x05, 0xD0, 0x05]);
    run(&mut emulator, 2);
    assert!(emulator.display().pixel(0, 0));
    assert_eq!(emulator.regs.v[0xF], 0);
    step(&mut emulator);
    assert!(emulator.display().as_slice().iter().all(|p| !p));
    assert_eq!(emulator.regs.v[0xF], 1);
}

#[test]
fn draw_wraps_at_screen_edges() {
    // Put the draw position one pixel inside the corner so the 8x5 glyph
    // spills past both edges.
    // LD V1, 63; LD V2, 31; LD I, 0x050; DRW V1, V2, 5
    let mut emulator = emulator_with(&[0x61, 0x3F, 0x62, 0x1F, 0xA0, 0x50, 0xD1, 0x25]);
    run(&mut emulator, 4);
    // Glyph 0's top row is 0xF0: pixels at columns 0..4 of the row, which
    // land at x = 63, 0, 1, 2 after wrapping, y = 31.
    assert!(emulator.display().pixel(SCREEN_WIDTH - 1, SCREEN_HEIGHT - 1));
    assert!(emulator.display().pixel(0, SCREEN_HEIGHT - 1));
    assert!(emulator.display().pixel(2, SCREEN_HEIGHT - 1));
}

#[test]
fn add_index_accumulates() {
    // LD VA, 0x05; ADD I, VA with I starting at 0.
    let mut emulator = emulator_with(&[0x6A, 0x05, 0xFA, 0x1E]);
    run(&mut emulator, 2);
    assert_eq!(emulator.regs.i, 5);
}

#[test]
fn add_index_wraps_modulo_address_space() {
    // LD I, 0xFFF; LD V1, 0x02; ADD I, V1
    let mut emulator = emulator_with(&[0xAF, 0xFF, 0x61, 0x02, 0xF1, 0x1E]);
    run(&mut emulator, 3);
    assert_eq!(emulator.regs.i, 0x001);
    // VF is not part of the chosen policy.
    assert_eq!(emulator.regs.v[0xF], 0);
}

#[test]
fn load_glyph_addresses_the_font_table() {
    // LD V1, 0x0A; LD F, V1
    let mut emulator = emulator_with(&[0x61, 0x0A, 0xF1, 0x29]);
    run(&mut emulator, 2);
    assert_eq!(emulator.regs.i, FONT_BASE_ADDRESS + 0xA * FONT_GLYPH_SIZE);
    // The bytes there are the glyph for 'A'.
    assert_eq!(emulator.memory.read(emulator.regs.i), 0xF0);
}

#[test]
fn store_bcd_decomposes_decimal_digits() {
    // LD V1, 234; LD I, 0x300; LD B, V1
    let mut emulator = emulator_with(&[0x61, 0xEA, 0xA3, 0x00, 0xF1, 0x33]);
    run(&mut emulator, 3);
    assert_eq!(emulator.memory.read(0x300), 2);
    assert_eq!(emulator.memory.read(0x301), 3);
    assert_eq!(emulator.memory.read(0x302), 4);
}

#[test]
fn store_and_load_register_ranges_are_inclusive() {
    // LD V0..V2, then LD [I], V2 at 0x300, clobber, LD V2, [I].
    let mut emulator = emulator_with(&[
        0x60, 0x11, 0x61, 0x22, 0x62, 0x33, // V0..V2
        0xA3, 0x00, // I = 0x300
        0xF2, 0x55, // store V0..=V2
        0x60, 0x00, 0x61, 0x00, 0x62, 0x00, // clobber
        0xF2, 0x65, // load V0..=V2
    ]);
    run(&mut emulator, 5);
    assert_eq!(emulator.memory.read(0x300), 0x11);
    assert_eq!(emulator.memory.read(0x301), 0x22);
    assert_eq!(emulator.memory.read(0x302), 0x33);
    run(&mut emulator, 4);
    assert_eq!(emulator.regs.v[0], 0x11);
    assert_eq!(emulator.regs.v[1], 0x22);
    assert_eq!(emulator.regs.v[2], 0x33);
}

#[test]
fn random_with_zero_mask_is_zero() {
    // RND V1, 0x00 always produces 0 whatever the random byte was.
    let mut emulator = emulator_with(&[0x61, 0xFF, 0xC1, 0x00]);
    run(&mut emulator, 2);
    assert_eq!(emulator.regs.v[1], 0);
}

#[test]
fn skip_if_key_pressed() {
    // LD V1, 0x04; SKP V1
    let mut emulator = emulator_with(&[0x61, 0x04, 0xE1, 0x9E]);
    emulator.set_key(0x4, true);
    run(&mut emulator, 2);
    assert_eq!(emulator.regs.pc, START_ADDRESS + 6);
}

#[test]
fn skip_if_key_released() {
    let mut emulator = emulator_with(&[0x61, 0x04, 0xE1, 0xA1]);
    run(&mut emulator, 2);
    assert_eq!(emulator.regs.pc, START_ADDRESS + 6);

    let mut emulator = emulator_with(&[0x61, 0x04, 0xE1, 0xA1]);
    emulator.set_key(0x4, true);
    run(&mut emulator, 2);
    assert_eq!(emulator.regs.pc, START_ADDRESS + 4);
}

#[test]
fn wait_key_parks_until_a_press() {
    // LD Vx,K then LD V1, 0x55 once resolved.
    let mut emulator = emulator_with(&[0xF2, 0x0A, 0x61, 0x55]);
    step(&mut emulator);
    assert_eq!(emulator.mode(), ExecMode::AwaitingKey { dest: 2 });
    let parked_pc = emulator.regs.pc;

    // No progress while waiting, no matter how often the driver steps.
    run(&mut emulator, 5);
    assert_eq!(emulator.regs.pc, parked_pc);
    assert_eq!(emulator.regs.v[1], 0);

    // A release does not resolve the wait.
    emulator.set_key(0x7, false);
    assert_eq!(emulator.mode(), ExecMode::AwaitingKey { dest: 2 });

    emulator.set_key(0x7, true);
    assert_eq!(emulator.mode(), ExecMode::Running);
    assert_eq!(emulator.regs.v[2], 0x7);
    step(&mut emulator);
    assert_eq!(emulator.regs.v[1], 0x55);
}

#[test]
fn delay_timer_round_trips_through_registers() {
    // LD V1, 0x30; LD DT, V1; LD V2, DT
    let mut emulator = emulator_with(&[0x61, 0x30, 0xF1, 0x15, 0xF2, 0x07]);
    run(&mut emulator, 3);
    assert_eq!(emulator.regs.v[2], 0x30);
}

#[test]
fn timers_decrement_per_tick_and_floor_at_zero() {
    let mut emulator = Emulator::default();
    emulator.regs.delay = 2;
    emulator.regs.sound = 1;
    assert!(emulator.sound_active());
    emulator.tick_timers();
    assert_eq!(emulator.regs.delay, 1);
    assert_eq!(emulator.regs.sound, 0);
    assert!(!emulator.sound_active());
    emulator.tick_timers();
    emulator.tick_timers();
    assert_eq!(emulator.regs.delay, 0);
    assert_eq!(emulator.regs.sound, 0);
}

#[test]
fn flag_register_is_plain_v15() {
    // LD VF, 0x05 writes the same storage the carry flag uses.
    let mut emulator = emulator_with(&[0x6F, 0x05, 0x61, 0x01, 0x62, 0x01, 0x81, 0x24]);
    step(&mut emulator);
    assert_eq!(emulator.regs.v[0xF], 0x05);
    // A non-overflowing ADD then clears it.
    run(&mut emulator, 3);
    assert_eq!(emulator.regs.v[0xF], 0);
}

#[test]
fn reset_restores_power_on_state() {
    let mut emulator = emulator_with(&[0x61, 0x07, 0xA3, 0x00]);
    run(&mut emulator, 2);
    emulator.set_key(3, true);
    emulator.reset();
    assert_eq!(emulator.regs.pc, START_ADDRESS);
    assert_eq!(emulator.regs.v[1], 0);
    assert_eq!(emulator.regs.i, 0);
    assert!(!emulator.keys[3]);
    // Font survives because reset rebuilds memory from scratch.
    assert_eq!(emulator.memory.read(FONT_BASE_ADDRESS), 0xF0);
    // The program image is gone.
    assert_eq!(emulator.memory.read(START_ADDRESS), 0);
}

#[test]
fn rom_copy_is_capped_at_available_space() {
    let mut emulator = Emulator::default();
    emulator.load_rom(&vec![0xEE; MAX_ROM_SIZE + 1]);
    assert_eq!(emulator.memory.read(0xFFF), 0xEE);
    assert_eq!(emulator.memory.read(FONT_BASE_ADDRESS), 0xF0);
}
