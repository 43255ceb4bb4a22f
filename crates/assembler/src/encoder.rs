//! Pass 2: operand-shape dispatch and instruction encoding.
//!
//! Every operand is classified once by [`crate::parser`]; the encoder then
//! picks the first table row of the mnemonic whose syntax accepts the operand
//! shapes and packs the fields with the core crate's shared [`Layout`] code.
//!
//! [`Layout`]: w16_core::Layout

use thiserror::Error;
use w16_core::{FieldKind, Fields, OpcodeSpec, Profile, Syntax};

use crate::mnemonic::{resolve_mnemonic, MnemonicForms};
use crate::parser::{parse_operand, tokenize, AddressRef, Operand, OperandKind};
use crate::symbols::{InstructionLine, SymbolTable};

/// Encoding failure attached to the source line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct EncodeError {
    /// Specific failure.
    pub kind: EncodeErrorKind,
    /// 1-based source line number.
    pub line: usize,
    /// Instruction text as written, without comments.
    pub text: String,
}

impl EncodeError {
    /// Attaches a source position to `kind`.
    #[must_use]
    pub fn new(kind: EncodeErrorKind, line: usize, text: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            text: text.into(),
        }
    }
}

/// Why a line could not be encoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeErrorKind {
    /// Mnemonic not present in the profile's table.
    #[error("unknown mnemonic '{0}'")]
    UnknownMnemonic(String),
    /// No form of the mnemonic takes this many operands.
    #[error("{mnemonic} takes {expected}, found {found} operand(s)")]
    WrongArity {
        /// Canonical mnemonic.
        mnemonic: String,
        /// Operand count as written.
        found: usize,
        /// Accepted operand patterns.
        expected: String,
    },
    /// A register operand names no register of the profile.
    #[error("invalid register '{0}'")]
    InvalidRegister(String),
    /// A literal or resolved label does not fit its field.
    #[error("{field} {value} out of range (0..={max})")]
    ValueOutOfRange {
        /// Field name: immediate, address, or offset.
        field: &'static str,
        /// Value as written or resolved.
        value: i64,
        /// Largest encodable value.
        max: u16,
    },
    /// Label never defined.
    #[error("undefined label '{0}'")]
    UndefinedLabel(String),
    /// Malformed label name.
    #[error("invalid label name '{0}'")]
    InvalidLabel(String),
    /// Label defined with the name of a register.
    #[error("label '{0}' collides with a register name")]
    ReservedLabel(String),
    /// Malformed numeric literal.
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    /// Operand text that is neither register, literal, label nor memory.
    #[error("malformed operand '{0}'")]
    MalformedOperand(String),
    /// Both operands address memory.
    #[error("memory-to-memory moves are not supported")]
    MemoryToMemory,
    /// Operand count fits but no form accepts the shapes.
    #[error("unsupported operands for {mnemonic}; expected {expected}")]
    UnsupportedOperands {
        /// Canonical mnemonic.
        mnemonic: String,
        /// Accepted operand patterns.
        expected: String,
    },
    /// More instructions than the profile's program capacity.
    #[error("program has {count} instructions, capacity is {capacity}")]
    ProgramTooLarge {
        /// Instructions in the source.
        count: usize,
        /// Profile capacity.
        capacity: usize,
    },
}

/// Operand shapes a syntax accepts for a given operand count.
#[must_use]
pub const fn operand_kinds(syntax: Syntax, count: usize) -> Option<&'static [OperandKind]> {
    use OperandKind::{BaseOffset, Direct, Immediate, Register, Target};
    let kinds: &'static [OperandKind] = match (syntax, count) {
        (Syntax::Bare, 0) => &[],
        (Syntax::Reg, 1) => &[Register],
        (Syntax::RegReg, 2) => &[Register, Register],
        (Syntax::RegImm, 2) => &[Register, Immediate],
        (Syntax::RegAddr | Syntax::TestTarget, 2) => &[Register, Target],
        (Syntax::RegMem, 2) => &[Register, Direct],
        (Syntax::MemReg, 2) => &[Direct, Register],
        (Syntax::RegBaseOffset, 2) => &[Register, BaseOffset],
        (Syntax::BaseOffsetReg, 2) => &[BaseOffset, Register],
        (Syntax::ImmAddr, 2) => &[Immediate, Target],
        (Syntax::Target | Syntax::TestTarget | Syntax::Addr, 1) => &[Target],
        _ => return None,
    };
    Some(kinds)
}

fn shape_matches(syntax: Syntax, operands: &[Operand]) -> bool {
    operand_kinds(syntax, operands.len()).is_some_and(|kinds| {
        kinds
            .iter()
            .zip(operands)
            .all(|(kind, operand)| *kind == operand.kind())
    })
}

fn resolve(target: &AddressRef, symbols: &SymbolTable) -> Result<i64, EncodeErrorKind> {
    match target {
        AddressRef::Literal(value) => Ok(*value),
        AddressRef::Label(name) => symbols
            .get(name)
            .map(|symbol| i64::from(symbol.address))
            .ok_or_else(|| EncodeErrorKind::UndefinedLabel(name.clone())),
    }
}

fn fit(field: &'static str, value: i64, max: u16) -> Result<u16, EncodeErrorKind> {
    u16::try_from(value)
        .ok()
        .filter(|v| *v <= max)
        .ok_or(EncodeErrorKind::ValueOutOfRange { field, value, max })
}

fn field_name(kind: FieldKind, syntax: Syntax) -> &'static str {
    match (kind, syntax) {
        (FieldKind::Value, Syntax::RegImm | Syntax::ImmAddr) => "immediate",
        (FieldKind::Value, Syntax::RegBaseOffset | Syntax::BaseOffsetReg) => "offset",
        (FieldKind::Opcode, _) => "opcode",
        (FieldKind::Register, _) => "register",
        _ => "address",
    }
}

/// Binds classified operands to the fields of `spec`.
fn bind(
    spec: &OpcodeSpec,
    operands: &[Operand],
    symbols: &SymbolTable,
    profile: Profile,
) -> Result<Fields, EncodeErrorKind> {
    let layout = spec.layout();
    let value_max = layout.value_max().unwrap_or(0);
    let value_field = field_name(FieldKind::Value, spec.syntax);
    let mut fields = Fields::default();
    let mut registers = 0;

    for operand in operands {
        match operand {
            Operand::Register(index) => {
                if registers == 0 {
                    fields.reg_a = *index;
                } else {
                    fields.reg_b = *index;
                }
                registers += 1;
            }
            Operand::Immediate(value) => {
                fields.value = fit(value_field, *value, value_max)?;
            }
            Operand::Direct(target) => {
                fields.value = fit(value_field, resolve(target, symbols)?, value_max)?;
            }
            Operand::BaseOffset { base, offset } => {
                fields.reg_b = *base;
                fields.value = fit(value_field, *offset, value_max)?;
            }
            Operand::Target(target) => {
                let address = resolve(target, symbols)?;
                match layout.address_max() {
                    Some(max) => fields.address = fit("address", address, max)?,
                    None => fields.value = fit(value_field, address, value_max)?,
                }
            }
        }
    }

    if spec.syntax == Syntax::TestTarget && operands.len() == 1 {
        fields.reg_a = profile.default_test_register();
    }
    Ok(fields)
}

/// Explains why no form of `forms` accepted `operands`.
fn diagnose(forms: &MnemonicForms, operands: &[Operand]) -> EncodeErrorKind {
    if !forms.accepts_arity(operands.len()) {
        return EncodeErrorKind::WrongArity {
            mnemonic: forms.canonical.to_string(),
            found: operands.len(),
            expected: forms.describe(),
        };
    }
    if operands.len() == 2 && operands.iter().all(Operand::is_memory) {
        return EncodeErrorKind::MemoryToMemory;
    }

    // A bare name where every candidate wants a register is a bad register
    // name rather than a label.
    let candidates: Vec<&'static [OperandKind]> = forms
        .forms
        .iter()
        .filter_map(|spec| operand_kinds(spec.syntax, operands.len()))
        .collect();
    for (position, operand) in operands.iter().enumerate() {
        if let Operand::Target(AddressRef::Label(name)) = operand {
            let wants_register = candidates
                .iter()
                .all(|kinds| kinds.get(position) == Some(&OperandKind::Register));
            if wants_register {
                return EncodeErrorKind::InvalidRegister(name.clone());
            }
        }
    }

    EncodeErrorKind::UnsupportedOperands {
        mnemonic: forms.canonical.to_string(),
        expected: forms.describe(),
    }
}

/// Encodes one instruction's text into a word.
///
/// # Errors
///
/// Returns an [`EncodeErrorKind`] describing the first problem found.
pub fn encode_instruction(
    text: &str,
    symbols: &SymbolTable,
    profile: Profile,
) -> Result<u16, EncodeErrorKind> {
    let tokens = tokenize(text)?;
    let forms = resolve_mnemonic(profile, &tokens.mnemonic)
        .ok_or_else(|| EncodeErrorKind::UnknownMnemonic(tokens.mnemonic.clone()))?;
    let operands = tokens
        .operands
        .iter()
        .map(|token| parse_operand(token, profile))
        .collect::<Result<Vec<_>, _>>()?;

    let spec = forms
        .forms
        .iter()
        .find(|spec| shape_matches(spec.syntax, &operands))
        .ok_or_else(|| diagnose(&forms, &operands))?;
    let fields = bind(spec, &operands, symbols, profile)?;

    // Operands were range-checked against the layout in `bind`.
    spec.encode(fields).map_err(|err| EncodeErrorKind::ValueOutOfRange {
        field: field_name(err.field, spec.syntax),
        value: i64::from(err.value),
        max: err.max,
    })
}

/// Encodes an addressed instruction line, attaching its position on failure.
///
/// # Errors
///
/// Returns an [`EncodeError`] carrying the line number and text.
pub fn encode_line(
    line: &InstructionLine,
    symbols: &SymbolTable,
    profile: Profile,
) -> Result<u16, EncodeError> {
    encode_instruction(&line.text, symbols, profile)
        .map_err(|kind| EncodeError::new(kind, line.line, line.text.clone()))
}
