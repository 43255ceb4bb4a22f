//! Top-level assembler pipeline.
//!
//! 1. **Normalize**: strip comments and blank lines ([`crate::source`])
//! 2. **Pass 1**: assign addresses and build the symbol table
//!    ([`crate::symbols`])
//! 3. **Pass 2**: encode every instruction ([`crate::encoder`])
//!
//! Assembly is all-or-nothing: the first failing line aborts it and no image
//! is produced.

use std::fmt;
use std::fs;
use std::path::Path;

use tracing::{debug, info};
use w16_core::{BinaryImage, Profile};

use crate::encoder::{encode_line, EncodeError};
use crate::errors::{AssembleError, AssembleWarning};
use crate::source::normalize_source;
use crate::symbols::{assign_addresses, SymbolTable};

/// Labels the symbol table holds before further definitions are dropped.
pub const DEFAULT_LABEL_CAPACITY: usize = 64;

/// Assembler settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblerConfig {
    /// Target profile: register names, opcode table, capacity.
    pub profile: Profile,
    /// Maximum number of labels.
    pub label_capacity: usize,
}

impl AssemblerConfig {
    /// Default settings for `profile`.
    #[must_use]
    pub const fn for_profile(profile: Profile) -> Self {
        Self {
            profile,
            label_capacity: DEFAULT_LABEL_CAPACITY,
        }
    }
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self::for_profile(Profile::default())
    }
}

/// One encoded instruction with the source it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Instruction index.
    pub address: usize,
    /// Encoded word.
    pub word: u16,
    /// Instruction text, label marker removed.
    pub source: String,
    /// 1-indexed source line.
    pub line: usize,
}

impl fmt::Display for ListingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  L{:03}: {:<25} -> 0x{:04X}",
            self.address, self.source, self.word
        )
    }
}

/// A successful assembly.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Encoded program.
    pub image: BinaryImage,
    /// One entry per instruction, in address order.
    pub listing: Vec<ListingEntry>,
    /// Labels defined in pass 1.
    pub symbols: SymbolTable,
    /// Non-fatal diagnostics.
    pub warnings: Vec<AssembleWarning>,
}

impl Assembly {
    /// Listing rendered as text, one line per instruction.
    #[must_use]
    pub fn listing_text(&self) -> String {
        self.listing.iter().map(|entry| format!("{entry}\n")).collect()
    }
}

/// Assembles source text held in memory.
///
/// # Errors
///
/// Returns the first [`EncodeError`] from either pass.
pub fn assemble_source(source: &str, config: &AssemblerConfig) -> Result<Assembly, EncodeError> {
    let lines = normalize_source(source);
    let assignment = assign_addresses(&lines, config)?;

    let mut words = Vec::with_capacity(assignment.lines.len());
    let mut listing = Vec::with_capacity(assignment.lines.len());
    for line in &assignment.lines {
        let word = encode_line(line, &assignment.symbols, config.profile)?;
        debug!(address = line.address, word, text = %line.text, "encoded");
        words.push(word);
        listing.push(ListingEntry {
            address: line.address,
            word,
            source: line.text.clone(),
            line: line.line,
        });
    }

    info!(
        profile = %config.profile,
        instructions = words.len(),
        labels = assignment.symbols.len(),
        "assembly complete"
    );
    Ok(Assembly {
        image: BinaryImage::new(words),
        listing,
        symbols: assignment.symbols,
        warnings: assignment.warnings,
    })
}

/// Reads and assembles a source file.
///
/// # Errors
///
/// Returns [`AssembleError::Read`] when the file cannot be read and
/// [`AssembleError::Encode`] when a line fails to assemble.
pub fn assemble_file(path: &Path, config: &AssemblerConfig) -> Result<Assembly, AssembleError> {
    let source = fs::read_to_string(path).map_err(|source| AssembleError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(assemble_source(&source, config)?)
}

/// Writes the assembled image to `path`.
///
/// # Errors
///
/// Returns [`AssembleError::Write`] on I/O failure.
pub fn write_image(assembly: &Assembly, path: &Path) -> Result<(), AssembleError> {
    assembly
        .image
        .save(path)
        .map_err(|source| AssembleError::Write {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::EncodeErrorKind;
    use std::path::PathBuf;

    fn basic() -> AssemblerConfig {
        AssemblerConfig::for_profile(Profile::Basic)
    }

    #[test]
    fn assemble_empty_source() {
        let assembly = assemble_source("; nothing here\n\n", &basic()).unwrap();
        assert!(assembly.image.is_empty());
        assert!(assembly.listing.is_empty());
    }

    #[test]
    fn assemble_with_forward_and_backward_labels() {
        let source = "\
top:  JMP done
      INC A
done: JNZ top
";
        let assembly = assemble_source(source, &basic()).unwrap();
        assert_eq!(
            assembly.image.words(),
            &[(0x0C << 11) | 2, 0x0A << 11, 0x0E << 11]
        );
        assert_eq!(assembly.symbols["top"].address, 0);
        assert_eq!(assembly.symbols["done"].address, 2);
    }

    #[test]
    fn listing_lines_match_progress_format() {
        let assembly = assemble_source("SET A, #5\n", &basic()).unwrap();
        assert_eq!(
            assembly.listing[0].to_string(),
            "  L000: SET A, #5                 -> 0x0805"
        );
        assert_eq!(
            assembly.listing_text(),
            "  L000: SET A, #5                 -> 0x0805\n"
        );
    }

    #[test]
    fn first_error_aborts_assembly() {
        let err = assemble_source("SET A, #1\nJMP nowhere\nFOO\n", &basic()).unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.kind, EncodeErrorKind::UndefinedLabel("nowhere".to_string()));
    }

    #[test]
    fn duplicate_labels_surface_as_warnings() {
        let assembly = assemble_source("x: HLT\nx: HLT\nJMP x\n", &basic()).unwrap();
        assert_eq!(assembly.warnings.len(), 1);
        assert_eq!(assembly.image.get(2), Some(0x0C << 11));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("prog.asm");
        let out = dir.path().join("prog.bin");
        fs::write(&src, "MOV EAX, #5\nOUT EAX\nHLT\n").unwrap();

        let assembly = assemble_file(&src, &AssemblerConfig::default()).unwrap();
        write_image(&assembly, &out).unwrap();

        let bytes = fs::read(&out).unwrap();
        assert_eq!(bytes, vec![0x05, 0x30, 0x00, 0x28, 0x00, 0x00]);
    }

    #[test]
    fn missing_source_is_a_read_error() {
        let err = assemble_file(&PathBuf::from("/nonexistent/prog.asm"), &basic()).unwrap_err();
        assert!(matches!(err, AssembleError::Read { .. }));
    }
}
