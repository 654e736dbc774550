use thiserror::Error;

/// Fatal machine faults.
///
/// Any of these aborts the current `step` or construction attempt and leaves
/// the machine in its last valid state; whether to reset or give up is the
/// host's decision. Arithmetic can never produce one of these since register
/// math wraps modulo 256 and memory addressing wraps within the 4K space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MachineError {
    /// The program is larger than the memory region reserved for it.
    #[error("program is {len} bytes but at most {max} fit in memory")]
    CapacityExceeded { len: usize, max: usize },

    /// A 2NNN call was executed with every stack slot already in use.
    #[error("call at {pc:#06X} overflowed the call stack")]
    StackOverflow { pc: u16 },

    /// A 00EE return was executed with no return address on the stack.
    #[error("return at {pc:#06X} on an empty call stack")]
    StackUnderflow { pc: u16 },
}
