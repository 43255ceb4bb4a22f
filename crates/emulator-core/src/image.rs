//! Headerless binary program image.
//!
//! A program on disk is a flat run of 16-bit little-endian words. The word
//! count is the file length divided by two; a trailing odd byte is ignored.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

/// Bytes per instruction word on disk.
pub const WORD_BYTES: usize = 2;

/// Failure to read a program image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("cannot read program image {}: {source}", path.display())]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Ordered sequence of encoded instruction words.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct BinaryImage {
    words: Vec<u16>,
}

impl BinaryImage {
    /// Wraps already-encoded words.
    #[must_use]
    pub const fn new(words: Vec<u16>) -> Self {
        Self { words }
    }

    /// Parses little-endian words from `bytes`, keeping at most `capacity` words.
    ///
    /// Oversized input is truncated rather than rejected.
    #[must_use]
    pub fn from_bytes(bytes: &[u8], capacity: usize) -> Self {
        let available = bytes.len() / WORD_BYTES;
        if available > capacity {
            warn!(
                words = available,
                capacity, "program image exceeds capacity; truncating"
            );
        }
        let words = bytes
            .chunks_exact(WORD_BYTES)
            .take(capacity)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Self { words }
    }

    /// Serializes the words as little-endian bytes.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.words.iter().flat_map(|word| word.to_le_bytes()).collect()
    }

    /// Reads an image from disk, truncating it to `capacity` words.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Read`] when the file cannot be read.
    pub fn load(path: &Path, capacity: usize) -> Result<Self, LoadError> {
        let bytes = fs::read(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_bytes(&bytes, capacity))
    }

    /// Writes the image to disk.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the file cannot be written.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        fs::write(path, self.to_bytes())
    }

    /// Encoded words in program order.
    #[must_use]
    pub fn words(&self) -> &[u16] {
        &self.words
    }

    /// Word at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<u16> {
        self.words.get(index).copied()
    }

    /// Number of instruction words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the image holds no instructions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl From<Vec<u16>> for BinaryImage {
    fn from(words: Vec<u16>) -> Self {
        Self::new(words)
    }
}
