pub use error::MachineError;
pub use machine::{BeepEvent, Machine, StepResult};
pub use state::{FrameBuffer, Quirks};

pub mod constants;
mod error;
mod instruction;
mod machine;
mod opcode;
mod operations;
mod state;
