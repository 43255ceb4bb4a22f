//! Source normalization.
//!
//! Strips `;` comments and surrounding whitespace and drops blank lines,
//! keeping each surviving line's 1-indexed position in the original file so
//! diagnostics can point back at it.

/// A non-blank source line with its original location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// Trimmed text with the comment removed.
    pub text: String,
    /// 1-indexed line number in the original file.
    pub original_line: usize,
}

/// Removes an end-of-line comment.
#[must_use]
pub fn strip_comment(line: &str) -> &str {
    line.find(';').map_or(line, |pos| &line[..pos])
}

/// Normalizes raw source text into non-blank lines.
#[must_use]
pub fn normalize_source(content: &str) -> Vec<SourceLine> {
    content
        .lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let text = strip_comment(raw).trim();
            (!text.is_empty()).then(|| SourceLine {
                text: text.to_string(),
                original_line: index + 1,
            })
        })
        .collect()
}
