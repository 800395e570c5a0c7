pub mod app;
pub mod emulator;
pub mod error;
pub mod framebuffer;
pub mod instruction;
pub mod memory;
pub mod opcode;
pub mod registers;
pub mod sound;

pub use app::EmulatorApp;
pub use emulator::{Emulator, ExecMode};
pub use error::CoreError;
pub use framebuffer::FrameBuffer;
pub use instruction::Instruction;
pub use memory::Memory;
pub use opcode::Opcode;
pub use registers::Registers;

/// Total addressable memory (4 KiB).
pub const RAM_SIZE: usize = 4096;
/// Number of general purpose V registers.
pub const NUM_REGS: usize = 16;
/// Depth of the subroutine return stack.
pub const STACK_DEPTH: usize = 16;
/// Number of keypad keys (hex digits 0-F).
pub const NUM_KEYS: usize = 16;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;
pub const SCREEN_SCALE: u32 = 10;

/// Where program images are loaded and where execution begins.
pub const START_ADDRESS: u16 = 0x200;
/// Largest ROM image that fits between the load address and the end of RAM.
pub const MAX_ROM_SIZE: usize = RAM_SIZE - START_ADDRESS as usize;

/// Base address of the builtin font sprites in the reserved interpreter area.
pub const FONT_BASE_ADDRESS: u16 = 0x050;
/// Bytes per font glyph (each hex digit is a 5-row sprite).
pub const FONT_GLYPH_SIZE: u16 = 5;
pub const FONTSET_SIZE: usize = 80;

/// CHIP-8 instruction and timer pacing. The two rates are independent in the
/// real machine: timers always run at 60 Hz regardless of how many
/// instructions execute per frame.
pub const CPU_CLOCK_HZ: u32 = 720;
pub const FRAME_RATE_HZ: u32 = 60;
pub const INSTRUCTIONS_PER_FRAME: u32 = CPU_CLOCK_HZ / FRAME_RATE_HZ;

/// Sprites for the hex digits 0-F, 5 bytes per glyph, one row per byte.
pub const FONTSET: [u8; FONTSET_SIZE] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
