use thiserror::Error;

/// Runtime conditions that stop the simulator.
///
/// Memory and register range problems are warnings, not faults; see
/// [`crate::diag::Diagnostics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum FaultCode {
    /// Fetched word carries an opcode the active profile does not assign.
    #[error("unknown opcode")]
    IllegalOpcode = 0x01,
    /// `DIV` with a zero divisor.
    #[error("division by zero")]
    DivideByZero = 0x02,
}

impl FaultCode {
    /// Stable numeric code reported by the simulator front end.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Converts a numeric code back into a fault.
    #[must_use]
    pub const fn from_u8(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Self::IllegalOpcode),
            0x02 => Some(Self::DivideByZero),
            _ => None,
        }
    }
}
