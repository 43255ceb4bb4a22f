//! Word-addressed data memory.

/// Fixed-size array of signed 32-bit words addressed `0..len`.
///
/// Addresses arrive as `i64` because base+offset arithmetic on a signed
/// register can land anywhere; out-of-range accesses are reported to the
/// caller instead of panicking.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Memory {
    words: Box<[i32]>,
}

impl Memory {
    /// Allocates `len` zeroed words.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; len].into_boxed_slice(),
        }
    }

    /// Number of words.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether memory has no words.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn index(&self, address: i64) -> Option<usize> {
        usize::try_from(address)
            .ok()
            .filter(|index| *index < self.words.len())
    }

    /// Whether `address` is inside memory.
    #[must_use]
    pub fn contains(&self, address: i64) -> bool {
        self.index(address).is_some()
    }

    /// Reads a word, or `None` when `address` is out of range.
    #[must_use]
    pub fn read(&self, address: i64) -> Option<i32> {
        self.index(address).map(|index| self.words[index])
    }

    /// Writes a word. Returns `false` and leaves memory untouched when
    /// `address` is out of range.
    pub fn write(&mut self, address: i64, value: i32) -> bool {
        match self.index(address) {
            Some(index) => {
                self.words[index] = value;
                true
            }
            None => false,
        }
    }

    /// Zeroes every word.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// All words in address order.
    #[must_use]
    pub fn as_slice(&self) -> &[i32] {
        &self.words
    }
}

#[cfg(test)]
mod tests {
    use super::Memory;

    #[test]
    fn fresh_memory_is_zeroed() {
        let memory = Memory::new(64);
        assert_eq!(memory.len(), 64);
        assert!(memory.as_slice().iter().all(|word| *word == 0));
    }

    #[test]
    fn out_of_range_accesses_are_rejected() {
        let mut memory = Memory::new(4);
        assert_eq!(memory.read(-1), None);
        assert_eq!(memory.read(4), None);
        assert!(!memory.write(4, 9));
        assert!(!memory.write(i64::MIN, 9));
        assert!(memory.write(3, 9));
        assert_eq!(memory.read(3), Some(9));
    }

    #[test]
    fn clear_zeroes_every_word() {
        let mut memory = Memory::new(8);
        assert!(memory.write(0, 1));
        assert!(memory.write(7, -1));
        memory.clear();
        assert!(memory.as_slice().iter().all(|word| *word == 0));
    }
}
