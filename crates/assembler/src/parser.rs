//! Line-level parsing: label markers, mnemonic/operand tokenization, and
//! operand classification.

use w16_core::Profile;

use crate::encoder::EncodeErrorKind;

/// An address written as a literal or a label name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressRef {
    /// Numeric literal.
    Literal(i64),
    /// Label to resolve through the symbol table.
    Label(String),
}

/// One classified source operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Register name of the active profile.
    Register(u8),
    /// `#literal`
    Immediate(i64),
    /// `[literal]` or `[label]`
    Direct(AddressRef),
    /// `[REG]`, `[REG+n]`, or `[REG-n]`
    BaseOffset {
        /// Base register index.
        base: u8,
        /// Signed displacement as written.
        offset: i64,
    },
    /// Bare literal or label.
    Target(AddressRef),
}

/// Shape of an operand, ignoring its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandKind {
    /// Register name.
    Register,
    /// `#`-prefixed literal.
    Immediate,
    /// Bracketed direct address.
    Direct,
    /// Bracketed base register plus offset.
    BaseOffset,
    /// Bare address or label.
    Target,
}

impl Operand {
    /// Shape of this operand.
    #[must_use]
    pub const fn kind(&self) -> OperandKind {
        match self {
            Self::Register(_) => OperandKind::Register,
            Self::Immediate(_) => OperandKind::Immediate,
            Self::Direct(_) => OperandKind::Direct,
            Self::BaseOffset { .. } => OperandKind::BaseOffset,
            Self::Target(_) => OperandKind::Target,
        }
    }

    /// Whether the operand addresses memory.
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Direct(_) | Self::BaseOffset { .. })
    }
}

/// A tokenized instruction: mnemonic plus raw operand tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionTokens {
    /// Mnemonic as written.
    pub mnemonic: String,
    /// Operand tokens with whitespace inside brackets removed.
    pub operands: Vec<String>,
}

/// Splits a `label:` marker off the front of a line.
///
/// Returns the label (if any) and the remaining instruction text, trimmed.
///
/// # Errors
///
/// Returns [`EncodeErrorKind::InvalidLabel`] when the text before the colon
/// is not a valid label name.
pub fn split_label(text: &str) -> Result<(Option<&str>, &str), EncodeErrorKind> {
    let Some(colon) = text.find(':') else {
        return Ok((None, text.trim()));
    };
    let label = text[..colon].trim();
    if !is_valid_label(label) {
        return Err(EncodeErrorKind::InvalidLabel(label.to_string()));
    }
    Ok((Some(label), text[colon + 1..].trim()))
}

/// Whether `s` is a valid label: a letter or `_` followed by ASCII
/// alphanumerics or `_`.
#[must_use]
pub fn is_valid_label(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() && first != '_' {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Splits instruction text into a mnemonic and operand tokens.
///
/// Operands are separated by commas and/or whitespace. Bracketed operands are
/// kept whole, so `[EBX + 2]` is one token (`[EBX+2]`).
///
/// # Errors
///
/// Returns [`EncodeErrorKind::MalformedOperand`] for unbalanced brackets.
pub fn tokenize(text: &str) -> Result<InstructionTokens, EncodeErrorKind> {
    let text = text.trim();
    let (mnemonic, rest) = text
        .split_once(char::is_whitespace)
        .unwrap_or((text, ""));

    let mut operands = Vec::new();
    let mut current = String::new();
    let mut in_brackets = false;
    for ch in rest.chars() {
        match ch {
            '[' if !in_brackets => {
                in_brackets = true;
                current.push(ch);
            }
            ']' if in_brackets => {
                in_brackets = false;
                current.push(ch);
            }
            '[' | ']' => return Err(EncodeErrorKind::MalformedOperand(rest.trim().to_string())),
            c if c.is_whitespace() => {
                if !in_brackets && !current.is_empty() {
                    operands.push(std::mem::take(&mut current));
                }
            }
            ',' if !in_brackets => {
                if !current.is_empty() {
                    operands.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if in_brackets {
        return Err(EncodeErrorKind::MalformedOperand(rest.trim().to_string()));
    }
    if !current.is_empty() {
        operands.push(current);
    }

    Ok(InstructionTokens {
        mnemonic: mnemonic.to_string(),
        operands,
    })
}

/// Parses a decimal, `0x` hexadecimal, or `0b` binary literal with an
/// optional sign.
///
/// # Errors
///
/// Returns [`EncodeErrorKind::InvalidNumber`] when `s` is not a literal.
pub fn parse_number(s: &str) -> Result<i64, EncodeErrorKind> {
    let s = s.trim();
    let err = || EncodeErrorKind::InvalidNumber(s.to_string());
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let magnitude = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => i64::from_str_radix(hex, 16).map_err(|_| err())?,
        None => match digits
            .strip_prefix("0b")
            .or_else(|| digits.strip_prefix("0B"))
        {
            Some(bin) => i64::from_str_radix(bin, 2).map_err(|_| err())?,
            None => {
                if !digits.chars().all(|c| c.is_ascii_digit()) {
                    return Err(err());
                }
                digits.parse::<i64>().map_err(|_| err())?
            }
        },
    };
    Ok(if negative { -magnitude } else { magnitude })
}

fn parse_address_ref(token: &str) -> Result<AddressRef, EncodeErrorKind> {
    if token.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+') {
        parse_number(token).map(AddressRef::Literal)
    } else if is_valid_label(token) {
        Ok(AddressRef::Label(token.to_string()))
    } else {
        Err(EncodeErrorKind::MalformedOperand(token.to_string()))
    }
}

fn parse_memory(inner: &str, token: &str, profile: Profile) -> Result<Operand, EncodeErrorKind> {
    if let Some(base) = profile.register_index(inner) {
        return Ok(Operand::BaseOffset { base, offset: 0 });
    }
    if let Some(pos) = inner.find(['+', '-']).filter(|pos| *pos > 0) {
        let (base_name, displacement) = inner.split_at(pos);
        let base = profile
            .register_index(base_name)
            .ok_or_else(|| EncodeErrorKind::InvalidRegister(base_name.to_string()))?;
        let offset = parse_number(displacement)?;
        return Ok(Operand::BaseOffset { base, offset });
    }
    if inner.is_empty() {
        return Err(EncodeErrorKind::MalformedOperand(token.to_string()));
    }
    parse_address_ref(inner).map(Operand::Direct)
}

/// Classifies one operand token for `profile`.
///
/// Register names take precedence over labels.
///
/// # Errors
///
/// Returns an [`EncodeErrorKind`] for malformed literals, brackets, or base
/// registers.
pub fn parse_operand(token: &str, profile: Profile) -> Result<Operand, EncodeErrorKind> {
    if let Some(literal) = token.strip_prefix('#') {
        return parse_number(literal).map(Operand::Immediate);
    }
    if let Some(inner) = token.strip_prefix('[') {
        let inner = inner
            .strip_suffix(']')
            .ok_or_else(|| EncodeErrorKind::MalformedOperand(token.to_string()))?;
        return parse_memory(inner.trim(), token, profile);
    }
    if let Some(index) = profile.register_index(token) {
        return Ok(Operand::Register(index));
    }
    parse_address_ref(token).map(Operand::Target)
}
