//! Error and warning types for the assembler pipeline.
//!
//! Encoding failures carry their own line context ([`EncodeError`]); the
//! file-level [`AssembleError`] adds the I/O failures around them.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::encoder::EncodeError;

/// Failure of a whole assembly run. Nothing is written when one occurs.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// The source file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// Source path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A line failed pass 1 or pass 2.
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// The binary image could not be written.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

impl AssembleError {
    /// Source line the failure points at, if any.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::Encode(err) => Some(err.line),
            Self::Read { .. } | Self::Write { .. } => None,
        }
    }
}

/// A non-fatal assembly diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleWarning {
    /// Kind of warning.
    pub kind: AssembleWarningKind,
    /// 1-indexed source line.
    pub line: usize,
}

/// Classification of assembly warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssembleWarningKind {
    /// A label was defined again; the first definition stays.
    DuplicateLabel {
        /// Label name.
        name: String,
        /// Line of the kept definition.
        first_line: usize,
    },
    /// The label table was full; the label was not recorded.
    LabelTableFull {
        /// Label name.
        name: String,
        /// Table capacity.
        capacity: usize,
    },
}

impl fmt::Display for AssembleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            AssembleWarningKind::DuplicateLabel { name, first_line } => write!(
                f,
                "duplicate label '{name}' ignored (first defined at line {first_line})"
            ),
            AssembleWarningKind::LabelTableFull { name, capacity } => write!(
                f,
                "label table full ({capacity} labels), '{name}' ignored"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::EncodeErrorKind;

    #[test]
    fn warning_display() {
        let warning = AssembleWarning {
            kind: AssembleWarningKind::DuplicateLabel {
                name: "loop".to_string(),
                first_line: 2,
            },
            line: 9,
        };
        assert_eq!(
            warning.to_string(),
            "line 9: duplicate label 'loop' ignored (first defined at line 2)"
        );
    }

    #[test]
    fn encode_errors_pass_through() {
        let err = AssembleError::from(EncodeError::new(
            EncodeErrorKind::UndefinedLabel("end".to_string()),
            4,
            "JMP end",
        ));
        assert_eq!(err.line(), Some(4));
        assert_eq!(err.to_string(), "line 4: undefined label 'end'");
    }

    #[test]
    fn io_errors_name_the_path() {
        let err = AssembleError::Read {
            path: PathBuf::from("prog.asm"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "cannot read prog.asm: missing");
        assert_eq!(err.line(), None);
    }
}
