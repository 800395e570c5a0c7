use crate::{NUM_REGS, STACK_DEPTH, START_ADDRESS};

/// Index of the flag register. VF is an ordinary element of the V array that
/// several instructions also write as their carry/borrow/collision flag;
/// programs addressing V15 directly observe the same storage.
pub const FLAG_REG: usize = 0xF;

/// The CHIP-8 register file: pure data, mutated by the execution unit.
#[derive(Clone, Debug)]
pub struct Registers {
    /// General purpose registers V0-VF.
    pub v: [u8; NUM_REGS],
    /// Address register I.
    pub i: u16,
    /// Program counter; each instruction is two bytes.
    pub pc: u16,
    /// Stack pointer: the number of return addresses currently pushed.
    pub sp: u8,
    /// Subroutine return stack.
    pub stack: [u16; STACK_DEPTH],
    /// Delay timer, decremented at 60 Hz while nonzero.
    pub delay: u8,
    /// Sound timer, decremented at 60 Hz while nonzero; audible while > 0.
    pub sound: u8,
}

impl Default for Registers {
    fn default() -> Self {
        Self {
            v: [0; NUM_REGS],
            i: 0,
            pc: START_ADDRESS,
            sp: 0,
            stack: [0; STACK_DEPTH],
            delay: 0,
            sound: 0,
        }
    }
}
