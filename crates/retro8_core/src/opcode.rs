use std::fmt;

/// A raw 16-bit instruction word, assembled big-endian from two memory bytes.
///
/// The accessors expose the fixed addressing fields the ISA carves out of the
/// word. Extraction is pure and infallible; whether the combination of fields
/// names a real instruction is decided by [`crate::Instruction::decode`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Opcode(pub u16);

impl Opcode {
    pub const fn from_bytes(hi: u8, lo: u8) -> Self {
        Opcode((hi as u16) << 8 | lo as u16)
    }

    /// Top nibble: the instruction family selector.
    pub const fn op(self) -> u8 {
        (self.0 >> 12) as u8
    }

    /// Bits 8-11: the primary register selector.
    pub const fn x(self) -> usize {
        ((self.0 >> 8) & 0xF) as usize
    }

    /// Bits 4-7: the secondary register selector.
    pub const fn y(self) -> usize {
        ((self.0 >> 4) & 0xF) as usize
    }

    /// Low nibble: a 4-bit immediate (e.g. sprite height).
    pub const fn n(self) -> u8 {
        (self.0 & 0xF) as u8
    }

    /// Low byte: an 8-bit immediate.
    pub const fn kk(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Low 12 bits: an address immediate.
    pub const fn nnn(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opcode({:04X})", self.0)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}
