//! Mnemonic resolution against the core opcode tables.
//!
//! The assembler never keeps its own opcode list; every form it can emit is a
//! row of the active profile's table in `w16_core`.

use w16_core::{OpcodeSpec, Profile};

/// All encodable forms of one mnemonic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MnemonicForms {
    /// Canonical spelling from the table.
    pub canonical: &'static str,
    /// Table rows sharing the mnemonic, in opcode order.
    pub forms: Vec<&'static OpcodeSpec>,
}

impl MnemonicForms {
    /// Operand patterns of every form, e.g. `reg, reg | reg, #imm`.
    #[must_use]
    pub fn describe(&self) -> String {
        self.forms
            .iter()
            .map(|spec| match spec.syntax.pattern() {
                "" => "no operands",
                pattern => pattern,
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Whether any form accepts `count` operands.
    #[must_use]
    pub fn accepts_arity(&self, count: usize) -> bool {
        self.forms.iter().any(|spec| spec.syntax.accepts_arity(count))
    }
}

/// Resolves a mnemonic or alias, case-insensitively, for `profile`.
#[must_use]
pub fn resolve_mnemonic(profile: Profile, name: &str) -> Option<MnemonicForms> {
    let canonical = profile.canonical_mnemonic(name)?;
    Some(MnemonicForms {
        canonical,
        forms: profile.entries_for(canonical).collect(),
    })
}
