//! Core of the W16 toolchain: instruction tables, binary image format, and
//! the fetch-decode-execute engine.

/// Opcode tables, profiles, and fixed bit layouts.
pub mod encoding;
pub use encoding::{
    opcode_of, Condition, FieldKind, FieldRangeError, Fields, Layout, OpcodeSpec, Operation,
    Profile, ProfileParseError, RegisterTest, Syntax, BASIC_OPCODE_TABLE, EXTENDED_OPCODE_TABLE,
};

/// Instruction decode with fixed-mask field extraction.
pub mod decoder;
pub use decoder::{DecodedInstruction, DecodedOrFault, Decoder};

/// Runtime fault taxonomy.
pub mod fault;
pub use fault::FaultCode;

/// Register file, flags, and run-state machine.
pub mod state;
pub use state::{Flags, RegisterFile, RunState, MAX_REGISTERS};

/// Word-addressed data memory.
pub mod memory;
pub use memory::Memory;

/// Headerless binary program image.
pub mod image;
pub use image::{BinaryImage, LoadError, WORD_BYTES};

/// Console seam for input, output, and dumps.
pub mod console;
pub use console::{render_dump, BufferedConsole, Console, InputError, OutputRecord, StdConsole};

/// Run diagnostics.
pub mod diag;
pub use diag::{Diagnostics, FaultRecord};

/// Host-facing configuration, state, and run loop.
pub mod api;
pub use api::{CoreConfig, CoreState, Machine, RunBoundary, RunOutcome, StepOutcome};

/// Instruction execution pipeline.
pub mod execute;
pub use execute::{commit_execution, execute_instruction, step_one, ExecuteOutcome, ExecuteState};

/// Instruction disassembly.
pub mod disasm;
pub use disasm::{disassemble_program, disassemble_word, DisassemblyRow};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
#[cfg(test)]
use tempfile as _;
