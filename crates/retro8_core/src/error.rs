/// Fatal machine faults surfaced by [`crate::Emulator::step`].
///
/// Each variant carries the address the offending word was fetched from and
/// the raw word itself. The core never recovers from these; restarting with a
/// different program is a caller decision.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    #[error("call with the return stack full (opcode {opcode:04X} at {pc:#05X})")]
    StackOverflow { pc: u16, opcode: u16 },

    #[error("return with an empty stack (opcode {opcode:04X} at {pc:#05X})")]
    StackUnderflow { pc: u16, opcode: u16 },

    #[error("unrecognized opcode {opcode:04X} at {pc:#05X}")]
    InvalidOpcode { pc: u16, opcode: u16 },
}
