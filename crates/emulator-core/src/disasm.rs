//! Instruction disassembly for the W16 ISA.
//!
//! The text produced here is valid assembler input, so a disassembled word
//! reassembles to the same word.

use crate::decoder::{DecodedInstruction, DecodedOrFault, Decoder};
use crate::encoding::{Profile, Syntax};
use crate::execute::register_label;
use crate::image::BinaryImage;

/// A single disassembled instruction row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DisassemblyRow {
    /// Instruction index.
    pub address: usize,
    /// Raw instruction word.
    pub word: u16,
    /// Rendered instruction text.
    pub text: String,
    /// Whether the word carries an unassigned opcode.
    pub is_illegal: bool,
}

/// Renders a decoded instruction in source syntax.
#[must_use]
pub fn disassemble_instruction(profile: Profile, instruction: &DecodedInstruction) -> String {
    let fields = instruction.fields;
    let mnemonic = instruction.spec.mnemonic;
    let ra = register_label(profile, fields.reg_a);
    let rb = register_label(profile, fields.reg_b);
    let value = fields.value;
    match instruction.spec.syntax {
        Syntax::Bare => mnemonic.to_string(),
        Syntax::Reg => format!("{mnemonic} {ra}"),
        Syntax::RegReg => format!("{mnemonic} {ra}, {rb}"),
        Syntax::RegImm => format!("{mnemonic} {ra}, #{value}"),
        Syntax::RegAddr | Syntax::TestTarget => format!("{mnemonic} {ra}, {value}"),
        Syntax::RegMem => format!("{mnemonic} {ra}, [{value}]"),
        Syntax::MemReg => format!("{mnemonic} [{value}], {ra}"),
        Syntax::RegBaseOffset => format!("{mnemonic} {ra}, [{rb}+{value}]"),
        Syntax::BaseOffsetReg => format!("{mnemonic} [{rb}+{value}], {ra}"),
        Syntax::ImmAddr => format!("{mnemonic} #{value}, {}", fields.address),
        Syntax::Target | Syntax::Addr => format!("{mnemonic} {value}"),
    }
}

/// Renders one raw word; unassigned opcodes render as a `.word` comment line.
#[must_use]
pub fn disassemble_word(profile: Profile, word: u16) -> String {
    match Decoder::decode(profile, word) {
        DecodedOrFault::Instruction(instruction) => disassemble_instruction(profile, &instruction),
        DecodedOrFault::Fault(_) => format!(".word {word:#06X} ; ILLEGAL"),
    }
}

/// Disassembles every word of a program.
#[must_use]
pub fn disassemble_program(profile: Profile, program: &BinaryImage) -> Vec<DisassemblyRow> {
    program
        .words()
        .iter()
        .enumerate()
        .map(|(address, &word)| DisassemblyRow {
            address,
            word,
            text: disassemble_word(profile, word),
            is_illegal: Decoder::decode(profile, word).fault().is_some(),
        })
        .collect()
}
