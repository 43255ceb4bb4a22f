//! Flag updates and branch predicates.

use crate::encoding::{Condition, RegisterTest};
use crate::state::Flags;

/// Describes how flags change after an instruction executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagsUpdate {
    /// No change to flags.
    #[default]
    None,
    /// Replace both flags.
    Set(Flags),
}

/// Whether a flag-based branch is taken.
#[must_use]
pub const fn condition_holds(condition: Condition, flags: Flags) -> bool {
    let Flags { zero, sign } = flags;
    match condition {
        Condition::Equal => zero,
        Condition::NotEqual => !zero,
        Condition::Greater => !zero && !sign,
        Condition::Less => sign,
        Condition::GreaterOrEqual => !sign,
        Condition::LessOrEqual => zero || sign,
    }
}

/// Whether a register-test branch is taken.
#[must_use]
pub const fn register_test_holds(test: RegisterTest, value: i32) -> bool {
    match test {
        RegisterTest::Zero => value == 0,
        RegisterTest::NonZero => value != 0,
        RegisterTest::Positive => value > 0,
        RegisterTest::Negative => value < 0,
    }
}
