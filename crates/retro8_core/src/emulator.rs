use crate::error::CoreError;
use crate::framebuffer::FrameBuffer;
use crate::instruction::Instruction;
use crate::memory::Memory;
use crate::opcode::Opcode;
use crate::registers::{Registers, FLAG_REG};
use crate::{FONT_BASE_ADDRESS, FONT_GLYPH_SIZE, NUM_KEYS, RAM_SIZE, STACK_DEPTH};

#[cfg(test)]
mod tests;

/// Whether the machine is making progress or parked on the key-wait
/// instruction.
///
/// Fx0A is the one instruction whose completion depends on external input.
/// Instead of rewinding the program counter and re-executing it every step,
/// the machine records which register is waiting; `step` is a no-op until a
/// key press resolves the wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    Running,
    AwaitingKey { dest: usize },
}

/// The CHIP-8 machine: register file, RAM, display, and keypad state, with
/// the fetch-decode-execute engine that mutates them.
pub struct Emulator {
    regs: Registers,
    memory: Memory,
    framebuffer: FrameBuffer,
    keys: [bool; NUM_KEYS],
    mode: ExecMode,
}

impl Default for Emulator {
    fn default() -> Self {
        Self {
            regs: Registers::default(),
            memory: Memory::default(),
            framebuffer: FrameBuffer::default(),
            keys: [false; NUM_KEYS],
            mode: ExecMode::Running,
        }
    }
}

impl Emulator {
    /// Return the machine to its power-on state (font loaded, PC at the
    /// start address, everything else zeroed).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Copy a program image to the load address. Oversize images are capped;
    /// the loader validates sizes before calling this.
    pub fn load_rom(&mut self, rom: &[u8]) {
        self.memory.load_rom(rom);
    }

    /// Run one fetch-decode-execute step.
    ///
    /// While the machine is awaiting a key this makes no progress and
    /// returns `Ok(())`; the driver keeps pacing frames and feeding key
    /// events until the wait resolves. Errors are fatal to the run.
    pub fn step(&mut self) -> Result<(), CoreError> {
        if let ExecMode::AwaitingKey { .. } = self.mode {
            return Ok(());
        }
        let fetch_pc = self.regs.pc;
        let opcode = self.fetch();
        let instruction =
            Instruction::decode(opcode).ok_or(CoreError::InvalidOpcode {
                pc: fetch_pc,
                opcode: opcode.0,
            })?;
        self.execute(instruction, opcode, fetch_pc)
    }

    /// Assemble the instruction word at PC and advance PC past it, so every
    /// control transfer below operates on the post-fetch PC.
    fn fetch(&mut self) -> Opcode {
        let hi = self.memory.read(self.regs.pc);
        let lo = self.memory.read(self.regs.pc.wrapping_add(1));
        self.regs.pc = self.regs.pc.wrapping_add(2);
        Opcode::from_bytes(hi, lo)
    }

    fn execute(
        &mut self,
        instruction: Instruction,
        opcode: Opcode,
        fetch_pc: u16,
    ) -> Result<(), CoreError> {
        match instruction {
            Instruction::Clear => self.framebuffer.clear(),
            Instruction::Return => {
                if self.regs.sp == 0 {
                    return Err(CoreError::StackUnderflow {
                        pc: fetch_pc,
                        opcode: opcode.0,
                    });
                }
                self.regs.sp -= 1;
                self.regs.pc = self.regs.stack[self.regs.sp as usize];
            }
            Instruction::Jump { addr } => self.regs.pc = addr,
            Instruction::Call { addr } => {
                if self.regs.sp as usize >= STACK_DEPTH {
                    return Err(CoreError::StackOverflow {
                        pc: fetch_pc,
                        opcode: opcode.0,
                    });
                }
                self.regs.stack[self.regs.sp as usize] = self.regs.pc;
                self.regs.sp += 1;
                self.regs.pc = addr;
            }
            Instruction::SkipEqImm { x, value } => {
                if self.regs.v[x] == value {
                    self.skip();
                }
            }
            Instruction::SkipNeImm { x, value } => {
                if self.regs.v[x] != value {
                    self.skip();
                }
            }
            Instruction::SkipEqReg { x, y } => {
                if self.regs.v[x] == self.regs.v[y] {
                    self.skip();
                }
            }
            Instruction::SkipNeReg { x, y } => {
                if self.regs.v[x] != self.regs.v[y] {
                    self.skip();
                }
            }
            Instruction::LoadImm { x, value } => self.regs.v[x] = value,
            Instruction::AddImm { x, value } => {
                // Wraps without touching VF, unlike the register form.
                self.regs.v[x] = self.regs.v[x].wrapping_add(value);
            }
            Instruction::Move { x, y } => self.regs.v[x] = self.regs.v[y],
            Instruction::Or { x, y } => self.regs.v[x] |= self.regs.v[y],
            Instruction::And { x, y } => self.regs.v[x] &= self.regs.v[y],
            Instruction::Xor { x, y } => self.regs.v[x] ^= self.regs.v[y],
            Instruction::Add { x, y } => {
                let (value, carry) = self.regs.v[x].overflowing_add(self.regs.v[y]);
                self.regs.v[x] = value;
                self.regs.v[FLAG_REG] = carry as u8;
            }
            Instruction::Sub { x, y } => {
                // VF = 1 when Vx >= Vy (NOT-borrow polarity).
                let (value, borrow) = self.regs.v[x].overflowing_sub(self.regs.v[y]);
                self.regs.v[x] = value;
                self.regs.v[FLAG_REG] = !borrow as u8;
            }
            Instruction::SubNeg { x, y } => {
                let (value, borrow) = self.regs.v[y].overflowing_sub(self.regs.v[x]);
                self.regs.v[x] = value;
                self.regs.v[FLAG_REG] = !borrow as u8;
            }
            Instruction::ShiftRight { x } => {
                // The outgoing bit lands in VF before the shift.
                self.regs.v[FLAG_REG] = self.regs.v[x] & 0x1;
                self.regs.v[x] >>= 1;
            }
            Instruction::ShiftLeft { x } => {
                self.regs.v[FLAG_REG] = (self.regs.v[x] & 0x80) >> 7;
                self.regs.v[x] <<= 1;
            }
            Instruction::LoadIndex { addr } => self.regs.i = addr,
            Instruction::JumpOffset { addr } => {
                self.regs.pc = addr.wrapping_add(self.regs.v[0] as u16);
            }
            Instruction::Random { x, mask } => {
                self.regs.v[x] = rand::random::<u8>() & mask;
            }
            Instruction::Draw { x, y, height } => self.draw_sprite(x, y, height),
            Instruction::SkipKeyPressed { x } => {
                if self.key_for_reg(x) {
                    self.skip();
                }
            }
            Instruction::SkipKeyReleased { x } => {
                if !self.key_for_reg(x) {
                    self.skip();
                }
            }
            Instruction::ReadDelay { x } => self.regs.v[x] = self.regs.delay,
            Instruction::WaitKey { x } => {
                // Park until a key press arrives; see `set_key`.
                self.mode = ExecMode::AwaitingKey { dest: x };
            }
            Instruction::SetDelay { x } => self.regs.delay = self.regs.v[x],
            Instruction::SetSound { x } => self.regs.sound = self.regs.v[x],
            Instruction::AddIndex { x } => {
                // Wraps within the 12-bit address space; VF is untouched.
                self.regs.i = self.regs.i.wrapping_add(self.regs.v[x] as u16) % RAM_SIZE as u16;
            }
            Instruction::LoadGlyph { x } => {
                let digit = (self.regs.v[x] & 0xF) as u16;
                self.regs.i = FONT_BASE_ADDRESS + digit * FONT_GLYPH_SIZE;
            }
            Instruction::StoreBcd { x } => {
                let value = self.regs.v[x];
                self.memory.write(self.regs.i, value / 100);
                self.memory.write(self.regs.i.wrapping_add(1), (value / 10) % 10);
                self.memory.write(self.regs.i.wrapping_add(2), value % 10);
            }
            Instruction::StoreRegs { x } => {
                for offset in 0..=x {
                    let addr = self.regs.i.wrapping_add(offset as u16);
                    self.memory.write(addr, self.regs.v[offset]);
                }
            }
            Instruction::LoadRegs { x } => {
                for offset in 0..=x {
                    let addr = self.regs.i.wrapping_add(offset as u16);
                    self.regs.v[offset] = self.memory.read(addr);
                }
            }
        }
        Ok(())
    }

    /// One extra instruction slot beyond the fetch-time advance.
    fn skip(&mut self) {
        self.regs.pc = self.regs.pc.wrapping_add(2);
    }

    /// XOR-blit an 8-bit-wide sprite read from memory[I..I+height) at
    /// (Vx, Vy), wrapping each pixel on both axes. VF reports whether any
    /// lit pixel was turned off.
    fn draw_sprite(&mut self, x: usize, y: usize, height: u8) {
        let x_coord = self.regs.v[x] as usize;
        let y_coord = self.regs.v[y] as usize;
        let mut collision = false;
        for row in 0..height as usize {
            let bits = self.memory.read(self.regs.i.wrapping_add(row as u16));
            for col in 0..8 {
                if bits & (0x80 >> col) != 0 {
                    collision |= self.framebuffer.flip(x_coord + col, y_coord + row);
                }
            }
        }
        self.regs.v[FLAG_REG] = collision as u8;
    }

    fn key_for_reg(&self, x: usize) -> bool {
        self.keys[(self.regs.v[x] & 0xF) as usize]
    }

    /// Decrement both timers by one tick. The driver calls this at 60 Hz,
    /// independently of how many instructions it runs per frame.
    pub fn tick_timers(&mut self) {
        if self.regs.delay > 0 {
            self.regs.delay -= 1;
        }
        if self.regs.sound > 0 {
            self.regs.sound -= 1;
        }
    }

    /// Record a keypad state change from the input collaborator.
    ///
    /// A press also resolves a pending key wait by storing the key index in
    /// the waiting register; releases never resolve it.
    pub fn set_key(&mut self, idx: usize, pressed: bool) {
        assert!(idx < NUM_KEYS, "invalid key index: {}", idx);
        self.keys[idx] = pressed;
        if pressed {
            if let ExecMode::AwaitingKey { dest } = self.mode {
                self.regs.v[dest] = idx as u8;
                self.mode = ExecMode::Running;
            }
        }
    }

    /// True while the sound timer is nonzero; the audio collaborator turns
    /// this into an actual tone.
    pub fn sound_active(&self) -> bool {
        self.regs.sound > 0
    }

    pub fn mode(&self) -> ExecMode {
        self.mode
    }

    /// Read-only view of the display for frontends.
    pub fn display(&self) -> &FrameBuffer {
        &self.framebuffer
    }
}
