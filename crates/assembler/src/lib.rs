//! Two-pass assembler for the W16 instruction set.
//!
//! [`assemble_source`] turns source text into a [`w16_core::BinaryImage`]
//! using the opcode tables and bit layouts of the active
//! [`w16_core::Profile`].

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
#[cfg(test)]
use tempfile as _;

/// Top-level two-pass assembler pipeline.
pub mod assembler;
/// Operand-shape dispatch and instruction encoding.
pub mod encoder;
/// Assembly error and warning types.
pub mod errors;
/// Mnemonic resolution against the core opcode tables.
pub mod mnemonic;
/// Label, mnemonic and operand parsing.
pub mod parser;
/// Comment stripping and line numbering.
pub mod source;
/// Symbol table and pass-1 address assignment.
pub mod symbols;

pub use assembler::{
    assemble_file, assemble_source, write_image, AssemblerConfig, Assembly, ListingEntry,
    DEFAULT_LABEL_CAPACITY,
};
pub use encoder::{encode_instruction, EncodeError, EncodeErrorKind};
pub use errors::{AssembleError, AssembleWarning, AssembleWarningKind};
pub use symbols::{Symbol, SymbolTable};
