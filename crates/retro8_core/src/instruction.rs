use crate::opcode::Opcode;

/// One decoded CHIP-8 instruction.
///
/// Decoding pulls the addressing fields out of the raw word and names the
/// operation, so execution is a single exhaustive match with no re-parsing.
/// Register selectors are stored as `usize` ready to index the V array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0: clear the display.
    Clear,
    /// 00EE: return from a subroutine.
    Return,
    /// 1nnn: jump to `addr`.
    Jump { addr: u16 },
    /// 2nnn: call the subroutine at `addr`.
    Call { addr: u16 },
    /// 3xkk: skip the next instruction if Vx == `value`.
    SkipEqImm { x: usize, value: u8 },
    /// 4xkk: skip the next instruction if Vx != `value`.
    SkipNeImm { x: usize, value: u8 },
    /// 5xy0: skip the next instruction if Vx == Vy.
    SkipEqReg { x: usize, y: usize },
    /// 6xkk: Vx = `value`.
    LoadImm { x: usize, value: u8 },
    /// 7xkk: Vx += `value`, wrapping, VF untouched.
    AddImm { x: usize, value: u8 },
    /// 8xy0: Vx = Vy.
    Move { x: usize, y: usize },
    /// 8xy1: Vx |= Vy.
    Or { x: usize, y: usize },
    /// 8xy2: Vx &= Vy.
    And { x: usize, y: usize },
    /// 8xy3: Vx ^= Vy.
    Xor { x: usize, y: usize },
    /// 8xy4: Vx += Vy, VF = carry.
    Add { x: usize, y: usize },
    /// 8xy5: Vx -= Vy, VF = NOT borrow.
    Sub { x: usize, y: usize },
    /// 8xy6: VF = bit 0 of Vx, then Vx >>= 1.
    ShiftRight { x: usize },
    /// 8xy7: Vx = Vy - Vx, VF = NOT borrow.
    SubNeg { x: usize, y: usize },
    /// 8xyE: VF = bit 7 of Vx, then Vx <<= 1.
    ShiftLeft { x: usize },
    /// 9xy0: skip the next instruction if Vx != Vy.
    SkipNeReg { x: usize, y: usize },
    /// Annn: I = `addr`.
    LoadIndex { addr: u16 },
    /// Bnnn: jump to `addr` + V0.
    JumpOffset { addr: u16 },
    /// Cxkk: Vx = random byte AND `mask`.
    Random { x: usize, mask: u8 },
    /// Dxyn: draw the `height`-row sprite at memory[I..] to (Vx, Vy).
    Draw { x: usize, y: usize, height: u8 },
    /// Ex9E: skip the next instruction if key Vx is pressed.
    SkipKeyPressed { x: usize },
    /// ExA1: skip the next instruction if key Vx is not pressed.
    SkipKeyReleased { x: usize },
    /// Fx07: Vx = delay timer.
    ReadDelay { x: usize },
    /// Fx0A: halt until a key is pressed, then Vx = that key.
    WaitKey { x: usize },
    /// Fx15: delay timer = Vx.
    SetDelay { x: usize },
    /// Fx18: sound timer = Vx.
    SetSound { x: usize },
    /// Fx1E: I += Vx, wrapping modulo the address space.
    AddIndex { x: usize },
    /// Fx29: I = address of the font glyph for the hex digit in Vx.
    LoadGlyph { x: usize },
    /// Fx33: store the decimal digits of Vx at I, I+1, I+2.
    StoreBcd { x: usize },
    /// Fx55: store V0..=Vx to memory starting at I.
    StoreRegs { x: usize },
    /// Fx65: load V0..=Vx from memory starting at I.
    LoadRegs { x: usize },
}

impl Instruction {
    /// Decode a raw word, or `None` when no family/subcode matches.
    ///
    /// The 0nnn machine-call family is deliberately not recognized; only the
    /// 00E0/00EE forms are real instructions on this machine. Families 5 and
    /// 9 require a zero low nibble.
    pub fn decode(opcode: Opcode) -> Option<Instruction> {
        let (x, y) = (opcode.x(), opcode.y());
        let instruction = match opcode.op() {
            0x0 => match opcode.kk() {
                0xE0 if x == 0 => Instruction::Clear,
                0xEE if x == 0 => Instruction::Return,
                _ => return None,
            },
            0x1 => Instruction::Jump { addr: opcode.nnn() },
            0x2 => Instruction::Call { addr: opcode.nnn() },
            0x3 => Instruction::SkipEqImm {
                x,
                value: opcode.kk(),
            },
            0x4 => Instruction::SkipNeImm {
                x,
                value: opcode.kk(),
            },
            0x5 if opcode.n() == 0 => Instruction::SkipEqReg { x, y },
            0x6 => Instruction::LoadImm {
                x,
                value: opcode.kk(),
            },
            0x7 => Instruction::AddImm {
                x,
                value: opcode.kk(),
            },
            0x8 => match opcode.n() {
                0x0 => Instruction::Move { x, y },
                0x1 => Instruction::Or { x, y },
                0x2 => Instruction::And { x, y },
                0x3 => Instruction::Xor { x, y },
                0x4 => Instruction::Add { x, y },
                0x5 => Instruction::Sub { x, y },
                0x6 => Instruction::ShiftRight { x },
                0x7 => Instruction::SubNeg { x, y },
                0xE => Instruction::ShiftLeft { x },
                _ => return None,
            },
            0x9 if opcode.n() == 0 => Instruction::SkipNeReg { x, y },
            0xA => Instruction::LoadIndex { addr: opcode.nnn() },
            0xB => Instruction::JumpOffset { addr: opcode.nnn() },
            0xC => Instruction::Random {
                x,
                mask: opcode.kk(),
            },
            0xD => Instruction::Draw {
                x,
                y,
                height: opcode.n(),
            },
            0xE => match opcode.kk() {
                0x9E => Instruction::SkipKeyPressed { x },
                0xA1 => Instruction::SkipKeyReleased { x },
                _ => return None,
            },
            0xF => match opcode.kk() {
                0x07 => Instruction::ReadDelay { x },
                0x0A => Instruction::WaitKey { x },
                0x15 => Instruction::SetDelay { x },
                0x18 => Instruction::SetSound { x },
                0x1E => Instruction::AddIndex { x },
                0x29 => Instruction::LoadGlyph { x },
                0x33 => Instruction::StoreBcd { x },
                0x55 => Instruction::StoreRegs { x },
                0x65 => Instruction::LoadRegs { x },
                _ => return None,
            },
            _ => return None,
        };
        Some(instruction)
    }
}
