//! Opcode tables and fixed bit layouts for the W16 ISA.
//!
//! Every instruction is one 16-bit word with the opcode in bits 15..11. The
//! remaining bits are partitioned by the [`Layout`] implied by the opcode's
//! [`Syntax`]. The assembler encodes through [`OpcodeSpec::encode`] and the
//! decoder extracts fields through [`Layout::decode`], so both halves read the
//! same table.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Bit position of the opcode field (bits 15..11).
pub const OPCODE_SHIFT: u16 = 11;
/// Mask of the 5-bit opcode field after shifting.
pub const OPCODE_MASK: u16 = 0x1F;
/// Bit position of the first register field (bits 10..8).
pub const REG_A_SHIFT: u16 = 8;
/// Bit position of the second register field (bits 7..5).
pub const REG_B_SHIFT: u16 = 5;
/// Mask of a 3-bit register field after shifting.
pub const REG_MASK: u16 = 0x07;
/// Mask of the 8-bit immediate/address field (bits 7..0).
pub const BYTE_MASK: u16 = 0xFF;
/// Mask of the 5-bit base+offset displacement (bits 4..0).
pub const OFFSET_MASK: u16 = 0x1F;
/// Bit position of the short immediate in the immediate-to-memory layout (bits 10..6).
pub const SHORT_IMM_SHIFT: u16 = 6;
/// Mask of the 5-bit short immediate after shifting.
pub const SHORT_IMM_MASK: u16 = 0x1F;
/// Mask of the 6-bit short address (bits 5..0).
pub const SHORT_ADDR_MASK: u16 = 0x3F;

/// Extracts the opcode field from an instruction word.
#[must_use]
pub const fn opcode_of(word: u16) -> u8 {
    ((word >> OPCODE_SHIFT) & OPCODE_MASK) as u8
}

/// Architecture profile selecting registers, sizes, and the opcode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Profile {
    /// Three registers, 64 words, direct register-test branching.
    Basic,
    /// Eight x86-style registers, 256 words, flags, stack and calls.
    #[default]
    Extended,
}

/// Register names of the basic profile, indexed by register field value.
pub const BASIC_REGISTERS: [&str; 3] = ["A", "B", "C"];
/// Register names of the extended profile, indexed by register field value.
pub const EXTENDED_REGISTERS: [&str; 8] = ["EAX", "EBX", "ECX", "EDX", "ESI", "EDI", "EBP", "ESP"];

/// Extended-profile alias mnemonics and the canonical mnemonic they stand for.
pub const EXTENDED_ALIASES: [(&str, &str); 6] = [
    ("JZ", "JE"),
    ("JNZ", "JNE"),
    ("JNLE", "JG"),
    ("JNGE", "JL"),
    ("JNL", "JGE"),
    ("JNG", "JLE"),
];

impl Profile {
    /// All profiles in declaration order.
    pub const ALL: [Self; 2] = [Self::Basic, Self::Extended];

    /// Lowercase profile name used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Extended => "extended",
        }
    }

    /// Register names, indexed by register field value.
    #[must_use]
    pub const fn register_names(self) -> &'static [&'static str] {
        match self {
            Self::Basic => &BASIC_REGISTERS,
            Self::Extended => &EXTENDED_REGISTERS,
        }
    }

    /// Number of data words in memory.
    #[must_use]
    pub const fn memory_words(self) -> usize {
        match self {
            Self::Basic => 64,
            Self::Extended => 256,
        }
    }

    /// Maximum number of instruction words a program may hold.
    #[must_use]
    pub const fn program_capacity(self) -> usize {
        match self {
            Self::Basic => 64,
            Self::Extended => 256,
        }
    }

    /// Opcode table of this profile.
    #[must_use]
    pub const fn opcode_table(self) -> &'static [OpcodeSpec] {
        match self {
            Self::Basic => &BASIC_OPCODE_TABLE,
            Self::Extended => &EXTENDED_OPCODE_TABLE,
        }
    }

    /// Alias mnemonics accepted by the assembler.
    #[must_use]
    pub const fn aliases(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Basic => &[],
            Self::Extended => &EXTENDED_ALIASES,
        }
    }

    /// Register index of the stack pointer, when the profile has a stack.
    #[must_use]
    pub const fn stack_pointer(self) -> Option<u8> {
        match self {
            Self::Basic => None,
            Self::Extended => Some(7),
        }
    }

    /// Register index of the frame base pointer, when the profile has one.
    #[must_use]
    pub const fn base_pointer(self) -> Option<u8> {
        match self {
            Self::Basic => None,
            Self::Extended => Some(6),
        }
    }

    /// Register tested by a conditional branch written without a register operand.
    #[must_use]
    pub const fn default_test_register(self) -> u8 {
        0
    }

    /// Resolves a register name (case-insensitive) to its field value.
    #[must_use]
    pub fn register_index(self, name: &str) -> Option<u8> {
        self.register_names()
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(name))
            .and_then(|index| u8::try_from(index).ok())
    }

    /// Returns the register name for a field value, if the profile defines it.
    #[must_use]
    pub fn register_name(self, index: u8) -> Option<&'static str> {
        self.register_names().get(usize::from(index)).copied()
    }

    /// Looks up the table entry assigned to a 5-bit opcode.
    #[must_use]
    pub fn lookup_opcode(self, opcode: u8) -> Option<&'static OpcodeSpec> {
        self.opcode_table()
            .iter()
            .find(|spec| spec.opcode == opcode)
    }

    /// Resolves a mnemonic or alias (case-insensitive) to its canonical spelling.
    #[must_use]
    pub fn canonical_mnemonic(self, name: &str) -> Option<&'static str> {
        if let Some(spec) = self
            .opcode_table()
            .iter()
            .find(|spec| spec.mnemonic.eq_ignore_ascii_case(name))
        {
            return Some(spec.mnemonic);
        }
        self.aliases()
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
            .map(|(_, canonical)| *canonical)
    }

    /// Table entries sharing a canonical mnemonic, in opcode order.
    pub fn entries_for(self, mnemonic: &str) -> impl Iterator<Item = &'static OpcodeSpec> + '_ {
        self.opcode_table()
            .iter()
            .filter(move |spec| spec.mnemonic.eq_ignore_ascii_case(mnemonic))
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a profile name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown profile '{0}' (expected 'basic' or 'extended')")]
pub struct ProfileParseError(pub String);

impl FromStr for Profile {
    type Err = ProfileParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|profile| profile.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ProfileParseError(s.to_string()))
    }
}

/// Source-level operand syntax of an opcode.
///
/// The syntax fixes both what the assembler accepts and which [`Layout`] the
/// word uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Syntax {
    /// No operands.
    Bare,
    /// `r`
    Reg,
    /// `r, r`
    RegReg,
    /// `r, #imm`
    RegImm,
    /// `r, addr` (bare address or label)
    RegAddr,
    /// `r, [addr]`
    RegMem,
    /// `[addr], r`
    MemReg,
    /// `r, [base+offset]`
    RegBaseOffset,
    /// `[base+offset], r`
    BaseOffsetReg,
    /// `#imm, addr`
    ImmAddr,
    /// `target`
    Target,
    /// `[r,] target`, where a missing register means the profile's test register.
    TestTarget,
    /// `addr`
    Addr,
}

impl Syntax {
    /// Bit layout used by words of this syntax.
    #[must_use]
    pub const fn layout(self) -> Layout {
        match self {
            Self::Bare => Layout::Bare,
            Self::Reg => Layout::Reg,
            Self::RegReg => Layout::RegReg,
            Self::RegImm | Self::RegAddr | Self::RegMem | Self::MemReg | Self::TestTarget => {
                Layout::RegByte
            }
            Self::RegBaseOffset | Self::BaseOffsetReg => Layout::RegBaseOffset,
            Self::ImmAddr => Layout::ShortImmAddr,
            Self::Target | Self::Addr => Layout::Byte,
        }
    }

    /// Whether the syntax accepts `count` source operands.
    #[must_use]
    pub const fn accepts_arity(self, count: usize) -> bool {
        match self {
            Self::Bare => count == 0,
            Self::Reg | Self::Target | Self::Addr => count == 1,
            Self::TestTarget => count == 1 || count == 2,
            Self::RegReg
            | Self::RegImm
            | Self::RegAddr
            | Self::RegMem
            | Self::MemReg
            | Self::RegBaseOffset
            | Self::BaseOffsetReg
            | Self::ImmAddr => count == 2,
        }
    }

    /// Human-readable operand pattern, used in diagnostics.
    #[must_use]
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::Bare => "",
            Self::Reg => "reg",
            Self::RegReg => "reg, reg",
            Self::RegImm => "reg, #imm",
            Self::RegAddr => "reg, addr",
            Self::RegMem => "reg, [addr]",
            Self::MemReg => "[addr], reg",
            Self::RegBaseOffset => "reg, [base+offset]",
            Self::BaseOffsetReg => "[base+offset], reg",
            Self::ImmAddr => "#imm, addr",
            Self::Target => "target",
            Self::TestTarget => "[reg,] target",
            Self::Addr => "addr",
        }
    }
}

/// Fixed field partition of an instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Opcode only.
    Bare,
    /// Register A in bits 10..8.
    Reg,
    /// Register A in bits 10..8, register B in bits 7..5.
    RegReg,
    /// Register A in bits 10..8, 8-bit value in bits 7..0.
    RegByte,
    /// Register A in bits 10..8, base register in bits 7..5, offset in bits 4..0.
    RegBaseOffset,
    /// 8-bit value in bits 7..0.
    Byte,
    /// 5-bit immediate in bits 10..6, 6-bit address in bits 5..0.
    ShortImmAddr,
}

/// Operand fields of one instruction word.
///
/// Fields a layout does not use are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Fields {
    /// First register field (destination, stored register, or tested register).
    pub reg_a: u8,
    /// Second register field (source or base register).
    pub reg_b: u8,
    /// Immediate, address, or offset, depending on layout.
    pub value: u16,
    /// Address paired with a short immediate.
    pub address: u16,
}

/// Named operand field, used in range errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// 5-bit opcode.
    Opcode,
    /// Register field.
    Register,
    /// Immediate, address, or offset field.
    Value,
    /// Short address field.
    Address,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Opcode => "opcode",
            Self::Register => "register",
            Self::Value => "value",
            Self::Address => "address",
        })
    }
}

/// A field value does not fit its bit range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{field} field value {value} exceeds maximum {max}")]
pub struct FieldRangeError {
    /// Field that overflowed.
    pub field: FieldKind,
    /// Rejected value.
    pub value: u16,
    /// Largest value the field holds.
    pub max: u16,
}

const fn check(field: FieldKind, value: u16, max: u16) -> Result<u16, FieldRangeError> {
    if value > max {
        Err(FieldRangeError { field, value, max })
    } else {
        Ok(value)
    }
}

impl Layout {
    /// Largest value the primary value field holds, if the layout has one.
    #[must_use]
    pub const fn value_max(self) -> Option<u16> {
        match self {
            Self::RegByte | Self::Byte => Some(BYTE_MASK),
            Self::RegBaseOffset => Some(OFFSET_MASK),
            Self::ShortImmAddr => Some(SHORT_IMM_MASK),
            Self::Bare | Self::Reg | Self::RegReg => None,
        }
    }

    /// Largest value the secondary address field holds, if the layout has one.
    #[must_use]
    pub const fn address_max(self) -> Option<u16> {
        match self {
            Self::ShortImmAddr => Some(SHORT_ADDR_MASK),
            _ => None,
        }
    }

    /// Packs an opcode and its fields into one word.
    ///
    /// # Errors
    ///
    /// Returns [`FieldRangeError`] when any used field exceeds its width.
    pub const fn encode(self, opcode: u8, fields: Fields) -> Result<u16, FieldRangeError> {
        let op = match check(FieldKind::Opcode, opcode as u16, OPCODE_MASK) {
            Ok(op) => op << OPCODE_SHIFT,
            Err(err) => return Err(err),
        };
        let reg_a = match check(FieldKind::Register, fields.reg_a as u16, REG_MASK) {
            Ok(reg) => reg,
            Err(err) => return Err(err),
        };
        let reg_b = match check(FieldKind::Register, fields.reg_b as u16, REG_MASK) {
            Ok(reg) => reg,
            Err(err) => return Err(err),
        };
        let word = match self {
            Self::Bare => op,
            Self::Reg => op | (reg_a << REG_A_SHIFT),
            Self::RegReg => op | (reg_a << REG_A_SHIFT) | (reg_b << REG_B_SHIFT),
            Self::RegByte => match check(FieldKind::Value, fields.value, BYTE_MASK) {
                Ok(value) => op | (reg_a << REG_A_SHIFT) | value,
                Err(err) => return Err(err),
            },
            Self::RegBaseOffset => match check(FieldKind::Value, fields.value, OFFSET_MASK) {
                Ok(offset) => op | (reg_a << REG_A_SHIFT) | (reg_b << REG_B_SHIFT) | offset,
                Err(err) => return Err(err),
            },
            Self::Byte => match check(FieldKind::Value, fields.value, BYTE_MASK) {
                Ok(value) => op | value,
                Err(err) => return Err(err),
            },
            Self::ShortImmAddr => {
                let imm = match check(FieldKind::Value, fields.value, SHORT_IMM_MASK) {
                    Ok(imm) => imm,
                    Err(err) => return Err(err),
                };
                match check(FieldKind::Address, fields.address, SHORT_ADDR_MASK) {
                    Ok(addr) => op | (imm << SHORT_IMM_SHIFT) | addr,
                    Err(err) => return Err(err),
                }
            }
        };
        Ok(word)
    }

    /// Extracts the fields this layout defines from a word.
    #[must_use]
    pub const fn decode(self, word: u16) -> Fields {
        let reg_a = ((word >> REG_A_SHIFT) & REG_MASK) as u8;
        let reg_b = ((word >> REG_B_SHIFT) & REG_MASK) as u8;
        match self {
            Self::Bare => Fields {
                reg_a: 0,
                reg_b: 0,
                value: 0,
                address: 0,
            },
            Self::Reg => Fields {
                reg_a,
                reg_b: 0,
                value: 0,
                address: 0,
            },
            Self::RegReg => Fields {
                reg_a,
                reg_b,
                value: 0,
                address: 0,
            },
            Self::RegByte => Fields {
                reg_a,
                reg_b: 0,
                value: word & BYTE_MASK,
                address: 0,
            },
            Self::RegBaseOffset => Fields {
                reg_a,
                reg_b,
                value: word & OFFSET_MASK,
                address: 0,
            },
            Self::Byte => Fields {
                reg_a: 0,
                reg_b: 0,
                value: word & BYTE_MASK,
                address: 0,
            },
            Self::ShortImmAddr => Fields {
                reg_a: 0,
                reg_b: 0,
                value: (word >> SHORT_IMM_SHIFT) & SHORT_IMM_MASK,
                address: word & SHORT_ADDR_MASK,
            },
        }
    }
}

/// Flag combination tested by an extended-profile conditional branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    /// `ZF`
    Equal,
    /// `!ZF`
    NotEqual,
    /// `!ZF && !SF`
    Greater,
    /// `SF`
    Less,
    /// `!SF`
    GreaterOrEqual,
    /// `ZF || SF`
    LessOrEqual,
}

/// Register predicate tested by a basic-profile conditional branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterTest {
    /// `r == 0`
    Zero,
    /// `r != 0`
    NonZero,
    /// `r > 0`
    Positive,
    /// `r < 0`
    Negative,
}

/// Semantic operation selected by an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Operation {
    Halt,
    Dump,
    MoveImmediate,
    MoveRegister,
    Load,
    Store,
    StoreImmediate,
    LoadIndexed,
    StoreIndexed,
    Add,
    Sub,
    Mul,
    Div,
    AddImmediate,
    SubImmediate,
    Increment,
    Decrement,
    Xor,
    Not,
    Compare,
    CompareImmediate,
    Jump,
    Branch(Condition),
    BranchOnRegister(RegisterTest),
    Push,
    Pop,
    Call,
    Return,
    Input,
    Output,
    ClearRegister,
    ClearRegisters,
    ClearMemory,
    ClearAllMemory,
}

/// One row of an opcode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpcodeSpec {
    /// Canonical uppercase mnemonic.
    pub mnemonic: &'static str,
    /// 5-bit opcode value.
    pub opcode: u8,
    /// Accepted operand syntax; determines the bit layout.
    pub syntax: Syntax,
    /// Operation executed by the simulator.
    pub operation: Operation,
}

impl OpcodeSpec {
    const fn new(mnemonic: &'static str, opcode: u8, syntax: Syntax, operation: Operation) -> Self {
        Self {
            mnemonic,
            opcode,
            syntax,
            operation,
        }
    }

    /// Bit layout of this opcode.
    #[must_use]
    pub const fn layout(&self) -> Layout {
        self.syntax.layout()
    }

    /// Encodes this opcode with the given operand fields.
    ///
    /// # Errors
    ///
    /// Returns [`FieldRangeError`] when a field does not fit the layout.
    pub const fn encode(&self, fields: Fields) -> Result<u16, FieldRangeError> {
        self.syntax.layout().encode(self.opcode, fields)
    }
}

/// Extended-profile opcode table. All 32 opcodes are assigned.
pub const EXTENDED_OPCODE_TABLE: [OpcodeSpec; 32] = [
    OpcodeSpec::new("HLT", 0x00, Syntax::Bare, Operation::Halt),
    OpcodeSpec::new("MUL", 0x01, Syntax::RegReg, Operation::Mul),
    OpcodeSpec::new("DIV", 0x02, Syntax::RegReg, Operation::Div),
    OpcodeSpec::new("XOR", 0x03, Syntax::RegReg, Operation::Xor),
    OpcodeSpec::new("INP", 0x04, Syntax::Reg, Operation::Input),
    OpcodeSpec::new("OUT", 0x05, Syntax::Reg, Operation::Output),
    OpcodeSpec::new("MOV", 0x06, Syntax::RegImm, Operation::MoveImmediate),
    OpcodeSpec::new("MOV", 0x07, Syntax::RegMem, Operation::Load),
    OpcodeSpec::new("MOV", 0x08, Syntax::MemReg, Operation::Store),
    OpcodeSpec::new("INC", 0x09, Syntax::Reg, Operation::Increment),
    OpcodeSpec::new("DEC", 0x0A, Syntax::Reg, Operation::Decrement),
    OpcodeSpec::new("PUSH", 0x0B, Syntax::Reg, Operation::Push),
    OpcodeSpec::new("POP", 0x0C, Syntax::Reg, Operation::Pop),
    OpcodeSpec::new("CALL", 0x0D, Syntax::Target, Operation::Call),
    OpcodeSpec::new("RET", 0x0E, Syntax::Bare, Operation::Return),
    OpcodeSpec::new("MOV", 0x0F, Syntax::RegBaseOffset, Operation::LoadIndexed),
    OpcodeSpec::new("ADD", 0x10, Syntax::RegReg, Operation::Add),
    OpcodeSpec::new("SUB", 0x11, Syntax::RegReg, Operation::Sub),
    OpcodeSpec::new("MOV", 0x12, Syntax::RegReg, Operation::MoveRegister),
    OpcodeSpec::new("ADD", 0x13, Syntax::RegImm, Operation::AddImmediate),
    OpcodeSpec::new("SUB", 0x14, Syntax::RegImm, Operation::SubImmediate),
    OpcodeSpec::new("CMP", 0x15, Syntax::RegImm, Operation::CompareImmediate),
    OpcodeSpec::new("NOT", 0x16, Syntax::Reg, Operation::Not),
    OpcodeSpec::new("CMP", 0x17, Syntax::RegReg, Operation::Compare),
    OpcodeSpec::new("JMP", 0x18, Syntax::Target, Operation::Jump),
    OpcodeSpec::new("JE", 0x19, Syntax::Target, Operation::Branch(Condition::Equal)),
    OpcodeSpec::new("JNE", 0x1A, Syntax::Target, Operation::Branch(Condition::NotEqual)),
    OpcodeSpec::new("JG", 0x1B, Syntax::Target, Operation::Branch(Condition::Greater)),
    OpcodeSpec::new("JL", 0x1C, Syntax::Target, Operation::Branch(Condition::Less)),
    OpcodeSpec::new(
        "JGE",
        0x1D,
        Syntax::Target,
        Operation::Branch(Condition::GreaterOrEqual),
    ),
    OpcodeSpec::new(
        "JLE",
        0x1E,
        Syntax::Target,
        Operation::Branch(Condition::LessOrEqual),
    ),
    OpcodeSpec::new("MOV", 0x1F, Syntax::BaseOffsetReg, Operation::StoreIndexed),
];

/// Basic-profile opcode table. Opcodes `0x16..=0x1F` are unassigned.
pub const BASIC_OPCODE_TABLE: [OpcodeSpec; 22] = [
    OpcodeSpec::new("HLT", 0x00, Syntax::Bare, Operation::Halt),
    OpcodeSpec::new("SET", 0x01, Syntax::RegImm, Operation::MoveImmediate),
    OpcodeSpec::new("STA", 0x02, Syntax::RegAddr, Operation::Store),
    OpcodeSpec::new("STA", 0x03, Syntax::ImmAddr, Operation::StoreImmediate),
    OpcodeSpec::new("LDA", 0x04, Syntax::RegAddr, Operation::Load),
    OpcodeSpec::new("MOV", 0x05, Syntax::RegReg, Operation::MoveRegister),
    OpcodeSpec::new("INP", 0x06, Syntax::Reg, Operation::Input),
    OpcodeSpec::new("OUT", 0x07, Syntax::Reg, Operation::Output),
    OpcodeSpec::new("ADD", 0x08, Syntax::RegReg, Operation::Add),
    OpcodeSpec::new("SUB", 0x09, Syntax::RegReg, Operation::Sub),
    OpcodeSpec::new("INC", 0x0A, Syntax::Reg, Operation::Increment),
    OpcodeSpec::new("DEC", 0x0B, Syntax::Reg, Operation::Decrement),
    OpcodeSpec::new("JMP", 0x0C, Syntax::Target, Operation::Jump),
    OpcodeSpec::new(
        "JZ",
        0x0D,
        Syntax::TestTarget,
        Operation::BranchOnRegister(RegisterTest::Zero),
    ),
    OpcodeSpec::new(
        "JNZ",
        0x0E,
        Syntax::TestTarget,
        Operation::BranchOnRegister(RegisterTest::NonZero),
    ),
    OpcodeSpec::new(
        "JP",
        0x0F,
        Syntax::TestTarget,
        Operation::BranchOnRegister(RegisterTest::Positive),
    ),
    OpcodeSpec::new(
        "JN",
        0x10,
        Syntax::TestTarget,
        Operation::BranchOnRegister(RegisterTest::Negative),
    ),
    OpcodeSpec::new("CLRR", 0x11, Syntax::Reg, Operation::ClearRegister),
    OpcodeSpec::new("CLRR", 0x12, Syntax::Bare, Operation::ClearRegisters),
    OpcodeSpec::new("CLRM", 0x13, Syntax::Addr, Operation::ClearMemory),
    OpcodeSpec::new("CLRM", 0x14, Syntax::Bare, Operation::ClearAllMemory),
    OpcodeSpec::new("DMP", 0x15, Syntax::Bare, Operation::Dump),
];
