//! Architectural machine state primitives.

/// Register file and condition flags.
pub mod registers;
/// Execution-state machine.
pub mod run_state;

pub use registers::{Flags, RegisterFile, MAX_REGISTERS};
pub use run_state::RunState;
