//! Instruction decode: opcode lookup and fixed-mask field extraction.

use crate::encoding::{opcode_of, Fields, OpcodeSpec, Operation, Profile};
use crate::fault::FaultCode;

/// A fetched word resolved against a profile's opcode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedInstruction {
    /// Raw instruction word.
    pub word: u16,
    /// Table row selected by the opcode.
    pub spec: &'static OpcodeSpec,
    /// Operand fields extracted with the row's layout.
    pub fields: Fields,
}

impl DecodedInstruction {
    /// Operation to execute.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.spec.operation
    }

    /// 5-bit opcode value.
    #[must_use]
    pub const fn opcode(&self) -> u8 {
        self.spec.opcode
    }
}

/// Result of decoding an instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedOrFault {
    /// Successfully decoded instruction.
    Instruction(DecodedInstruction),
    /// Decoding failed with a fault.
    Fault(FaultCode),
}

impl DecodedOrFault {
    /// Returns the decoded instruction if present.
    #[must_use]
    pub const fn instruction(self) -> Option<DecodedInstruction> {
        match self {
            Self::Instruction(instruction) => Some(instruction),
            Self::Fault(_) => None,
        }
    }

    /// Returns the fault if decoding failed.
    #[must_use]
    pub const fn fault(self) -> Option<FaultCode> {
        match self {
            Self::Instruction(_) => None,
            Self::Fault(cause) => Some(cause),
        }
    }
}

/// Stateless instruction decoder.
pub struct Decoder;

impl Decoder {
    /// Decodes a 16-bit instruction word for `profile`.
    ///
    /// The opcode alone selects the layout, so decoding never inspects
    /// operand values. An unassigned opcode decodes to
    /// [`FaultCode::IllegalOpcode`].
    #[must_use]
    pub fn decode(profile: Profile, word: u16) -> DecodedOrFault {
        match profile.lookup_opcode(opcode_of(word)) {
            Some(spec) => DecodedOrFault::Instruction(DecodedInstruction {
                word,
                spec,
                fields: spec.layout().decode(word),
            }),
            None => DecodedOrFault::Fault(FaultCode::IllegalOpcode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{Layout, Syntax};
    use proptest::prelude::*;

    fn fields_for(layout: Layout, reg_a: u8, reg_b: u8, value: u16, address: u16) -> Fields {
        let value = layout.value_max().map_or(0, |max| value % (max + 1));
        let address = layout.address_max().map_or(0, |max| address % (max + 1));
        match layout {
            Layout::Bare => Fields::default(),
            Layout::Reg => Fields {
                reg_a,
                ..Fields::default()
            },
            Layout::RegReg => Fields {
                reg_a,
                reg_b,
                ..Fields::default()
            },
            Layout::RegByte => Fields {
                reg_a,
                value,
                ..Fields::default()
            },
            Layout::RegBaseOffset => Fields {
                reg_a,
                reg_b,
                value,
                address: 0,
            },
            Layout::Byte => Fields {
                value,
                ..Fields::default()
            },
            Layout::ShortImmAddr => Fields {
                value,
                address,
                ..Fields::default()
            },
        }
    }

    #[test]
    fn decode_halt_in_both_profiles() {
        for profile in Profile::ALL {
            let instruction = Decoder::decode(profile, 0x0000)
                .instruction()
                .expect("HLT decodes");
            assert_eq!(instruction.operation(), Operation::Halt);
        }
    }

    #[test]
    fn decode_extracts_base_offset_fields() {
        let word = (0x0F << 11) | (2 << 8) | (3 << 5) | 17;
        let instruction = Decoder::decode(Profile::Extended, word)
            .instruction()
            .expect("MOV r, [b+o] decodes");
        assert_eq!(instruction.spec.syntax, Syntax::RegBaseOffset);
        assert_eq!(
            instruction.fields,
            Fields {
                reg_a: 2,
                reg_b: 3,
                value: 17,
                address: 0,
            }
        );
    }

    #[test]
    fn unassigned_basic_opcodes_fault() {
        for opcode in 0x16u16..=0x1F {
            let result = Decoder::decode(Profile::Basic, opcode << 11);
            assert_eq!(result.fault(), Some(FaultCode::IllegalOpcode));
        }
    }

    #[test]
    fn every_extended_opcode_is_assigned() {
        for opcode in 0u16..=0x1F {
            assert!(Decoder::decode(Profile::Extended, opcode << 11)
                .instruction()
                .is_some());
        }
    }

    #[test]
    fn unused_bits_are_ignored() {
        let clean = Decoder::decode(Profile::Extended, 0x0000).instruction();
        let noisy = Decoder::decode(Profile::Extended, 0x07FF).instruction();
        assert_eq!(
            clean.map(|i| i.fields),
            noisy.map(|i| i.fields),
            "HLT has no operand fields"
        );
    }

    proptest! {
        #[test]
        fn encode_then_decode_recovers_every_field(
            extended in any::<bool>(),
            row in 0usize..32,
            reg_a in 0u8..8,
            reg_b in 0u8..8,
            value in 0u16..=255,
            address in 0u16..=63,
        ) {
            let profile = if extended { Profile::Extended } else { Profile::Basic };
            let table = profile.opcode_table();
            let spec = &table[row % table.len()];
            let fields = fields_for(spec.layout(), reg_a, reg_b, value, address);
            let word = spec.encode(fields).expect("fields are in range");
            let decoded = Decoder::decode(profile, word).instruction().expect("assigned opcode");
            prop_assert_eq!(decoded.opcode(), spec.opcode);
            prop_assert_eq!(decoded.spec.syntax, spec.syntax);
            prop_assert_eq!(decoded.fields, fields);
        }
    }
}
