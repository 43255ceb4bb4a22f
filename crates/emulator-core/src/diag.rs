//! Run diagnostics: saturating counters for recovered conditions and the last fault.

use crate::FaultCode;

/// Where and why the run stopped on a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct FaultRecord {
    /// Fault raised.
    pub code: FaultCode,
    /// Program counter of the faulting instruction.
    pub pc: i32,
    /// Raw instruction word at `pc`.
    pub word: u16,
}

/// Counters accumulated over one run.
///
/// Warnings never stop execution; they are logged through `tracing` when they
/// happen and tallied here so hosts and tests can observe them afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Diagnostics {
    /// Instructions fetched and dispatched, including a faulting one.
    pub steps: u64,
    /// Out-of-range memory reads and writes.
    pub memory_warnings: u32,
    /// Accesses to register indices the profile does not define.
    pub register_warnings: u32,
    /// Console reads that did not produce an integer.
    pub input_errors: u32,
    /// Last fault, if the run faulted.
    pub last_fault: Option<FaultRecord>,
}

impl Diagnostics {
    /// Whether any recoverable warning was counted.
    #[must_use]
    pub const fn has_warnings(&self) -> bool {
        self.memory_warnings > 0 || self.register_warnings > 0 || self.input_errors > 0
    }

    pub(crate) fn record_warnings(&mut self, memory: u32, register: u32, input: u32) {
        self.memory_warnings = self.memory_warnings.saturating_add(memory);
        self.register_warnings = self.register_warnings.saturating_add(register);
        self.input_errors = self.input_errors.saturating_add(input);
    }
}

#[cfg(test)]
mod tests {
    use super::Diagnostics;

    #[test]
    fn counters_saturate() {
        let mut diag = Diagnostics {
            memory_warnings: u32::MAX,
            ..Diagnostics::default()
        };
        diag.record_warnings(1, 2, 0);
        assert_eq!(diag.memory_warnings, u32::MAX);
        assert_eq!(diag.register_warnings, 2);
        assert!(diag.has_warnings());
        assert!(!Diagnostics::default().has_warnings());
    }
}
