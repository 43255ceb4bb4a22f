use crate::encoding::Profile;

/// Largest register file any profile defines; matches the 3-bit register field.
pub const MAX_REGISTERS: usize = 8;

/// Signed 32-bit register file sized for one profile.
///
/// Indices past the profile's register count are addressable by the 3-bit
/// field but do not exist; reads report `None` and writes are refused.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RegisterFile {
    values: [i32; MAX_REGISTERS],
    count: u8,
}

impl RegisterFile {
    /// Creates a zeroed register file for `profile`.
    #[must_use]
    pub fn for_profile(profile: Profile) -> Self {
        let count = u8::try_from(profile.register_names().len()).unwrap_or(u8::MAX);
        Self {
            values: [0; MAX_REGISTERS],
            count: count.min(MAX_REGISTERS as u8),
        }
    }

    /// Number of registers that exist.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count as usize
    }

    /// Always `false`; every profile defines at least one register.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether `index` names an existing register.
    #[must_use]
    pub const fn contains(&self, index: u8) -> bool {
        index < self.count
    }

    /// Reads a register.
    #[must_use]
    pub const fn get(&self, index: u8) -> Option<i32> {
        if self.contains(index) {
            Some(self.values[index as usize])
        } else {
            None
        }
    }

    /// Writes a register. Returns `false` when the register does not exist.
    pub fn set(&mut self, index: u8, value: i32) -> bool {
        if self.contains(index) {
            self.values[usize::from(index)] = value;
            true
        } else {
            false
        }
    }

    /// Zeroes every register.
    pub fn clear(&mut self) {
        self.values = [0; MAX_REGISTERS];
    }

    /// Existing registers in index order.
    #[must_use]
    pub fn as_slice(&self) -> &[i32] {
        &self.values[..self.len()]
    }
}

/// Condition flags written by comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Flags {
    /// Result of the last comparison was zero.
    pub zero: bool,
    /// Result of the last comparison was negative.
    pub sign: bool,
}

impl Flags {
    /// Flags produced by comparing `lhs` against `rhs`.
    ///
    /// The difference is taken at 64 bits so the sign is exact for every pair
    /// of 32-bit operands.
    #[must_use]
    pub const fn from_comparison(lhs: i32, rhs: i32) -> Self {
        let result = lhs as i64 - rhs as i64;
        Self {
            zero: result == 0,
            sign: result < 0,
        }
    }
}
