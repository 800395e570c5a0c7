use crate::{FONTSET, FONTSET_SIZE, FONT_BASE_ADDRESS, MAX_ROM_SIZE, RAM_SIZE, START_ADDRESS};

/// The 4 KiB machine RAM.
///
/// Addresses 0x000-0x1FF are the reserved interpreter area; the font sprites
/// live there at [`FONT_BASE_ADDRESS`] and are written once at construction.
/// Every access address is reduced modulo [`RAM_SIZE`], so reads and writes
/// past 0xFFF wrap around instead of faulting.
pub struct Memory {
    bytes: [u8; RAM_SIZE],
}

impl Default for Memory {
    fn default() -> Self {
        let mut memory = Self {
            bytes: [0; RAM_SIZE],
        };
        let base = FONT_BASE_ADDRESS as usize;
        memory.bytes[base..base + FONTSET_SIZE].copy_from_slice(&FONTSET);
        memory
    }
}

impl Memory {
    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[addr as usize % RAM_SIZE]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[addr as usize % RAM_SIZE] = value;
    }

    /// Copy a program image to the load address.
    ///
    /// The copy is capped at the space above [`START_ADDRESS`]; rejecting
    /// oversize images with a proper error is the loader's job, before the
    /// bytes get here.
    pub fn load_rom(&mut self, rom: &[u8]) {
        let start = START_ADDRESS as usize;
        let len = rom.len().min(MAX_ROM_SIZE);
        self.bytes[start..start + len].copy_from_slice(&rom[..len]);
    }
}
