//! Symbol table and pass-1 address assignment.
//!
//! Pass 1 walks the normalized lines, strips `label:` markers, gives every
//! remaining instruction the next address and records each label against the
//! address of the instruction that follows it.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::assembler::AssemblerConfig;
use crate::encoder::{EncodeError, EncodeErrorKind};
use crate::errors::{AssembleWarning, AssembleWarningKind};
use crate::parser::split_label;
use crate::source::SourceLine;

/// A label with its assigned address and definition location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    /// Address of the instruction the label marks.
    pub address: u16,
    /// Source line number where the label was defined.
    pub defined_at: usize,
}

/// Symbol table mapping label names to their definitions.
pub type SymbolTable = HashMap<String, Symbol>;

/// An instruction with its assigned address, label marker removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionLine {
    /// Instruction index in the image.
    pub address: usize,
    /// 1-indexed source line number.
    pub line: usize,
    /// Instruction text.
    pub text: String,
}

/// Output of pass 1.
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    /// Instructions in address order.
    pub lines: Vec<InstructionLine>,
    /// Label definitions.
    pub symbols: SymbolTable,
    /// Duplicate or overflowing labels.
    pub warnings: Vec<AssembleWarning>,
}

impl Assignment {
    fn define(&mut self, name: &str, address: usize, line: usize, capacity: usize) {
        if let Some(first) = self.symbols.get(name) {
            warn!(label = name, line, first_line = first.defined_at, "duplicate label ignored");
            self.warnings.push(AssembleWarning {
                kind: AssembleWarningKind::DuplicateLabel {
                    name: name.to_string(),
                    first_line: first.defined_at,
                },
                line,
            });
            return;
        }
        if self.symbols.len() >= capacity {
            warn!(label = name, line, capacity, "label table full, label ignored");
            self.warnings.push(AssembleWarning {
                kind: AssembleWarningKind::LabelTableFull {
                    name: name.to_string(),
                    capacity,
                },
                line,
            });
            return;
        }
        // Addresses beyond u16 only occur past the capacity check below.
        let address = u16::try_from(address).unwrap_or(u16::MAX);
        debug!(label = name, address, "label defined");
        self.symbols.insert(
            name.to_string(),
            Symbol {
                address,
                defined_at: line,
            },
        );
    }
}

/// Runs pass 1 over normalized source lines.
///
/// Label-only lines do not advance the address counter.
///
/// # Errors
///
/// Returns an [`EncodeError`] for malformed or reserved label names and when
/// the instruction count exceeds the profile's program capacity.
pub fn assign_addresses(
    lines: &[SourceLine],
    config: &AssemblerConfig,
) -> Result<Assignment, EncodeError> {
    let mut assignment = Assignment::default();

    for source in lines {
        let line = source.original_line;
        let (label, instruction) =
            split_label(&source.text).map_err(|kind| EncodeError::new(kind, line, &source.text))?;
        let address = assignment.lines.len();

        if let Some(name) = label {
            if config.profile.register_index(name).is_some() {
                return Err(EncodeError::new(
                    EncodeErrorKind::ReservedLabel(name.to_string()),
                    line,
                    &source.text,
                ));
            }
            assignment.define(name, address, line, config.label_capacity);
        }

        if !instruction.is_empty() {
            assignment.lines.push(InstructionLine {
                address,
                line,
                text: instruction.to_string(),
            });
        }
    }

    let capacity = config.profile.program_capacity();
    if assignment.lines.len() > capacity {
        let line = assignment.lines[capacity].line;
        return Err(EncodeError::new(
            EncodeErrorKind::ProgramTooLarge {
                count: assignment.lines.len(),
                capacity,
            },
            line,
            assignment.lines[capacity].text.clone(),
        ));
    }

    debug!(
        instructions = assignment.lines.len(),
        labels = assignment.symbols.len(),
        "pass 1 complete"
    );
    Ok(assignment)
}
