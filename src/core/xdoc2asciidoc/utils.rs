//! Utility functions for xdoc to AsciiDoc conversion
//!
//! Helper functions for advancing through a line and escaping free text.

use crate::data::constants::{CLOSE_MARKER, ESCAPE_CHAR};

/// Escaping mode for free text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeMode {
    /// Only bracket escapes are resolved
    #[default]
    Default,
    /// Inside a table cell, where a bare pipe would start a new cell
    TableCell,
}

/// Return the part of `line` after `offset`, or `None` if nothing but
/// whitespace is left.
pub fn move_forward(line: &str, offset: usize) -> Option<&str> {
    let rest = line.get(offset..)?;
    if rest.trim().is_empty() {
        None
    } else {
        Some(rest)
    }
}

/// Like [`move_forward`], additionally skipping leading spaces and tabs.
pub fn move_forward_past_whitespace(line: &str, offset: usize) -> Option<&str> {
    move_forward(line, offset).map(trim_leading_whitespace)
}

/// Strip leading spaces and tabs (other whitespace is kept).
pub fn trim_leading_whitespace(text: &str) -> &str {
    text.trim_start_matches([' ', '\t'])
}

/// Resolve `\[` and `\]` escapes, and protect pipes inside table cells.
pub fn escape_text(text: &str, mode: EscapeMode) -> String {
    let text = match mode {
        EscapeMode::TableCell => text.replace('|', "\\|"),
        EscapeMode::Default => text.to_string(),
    };
    text.replace("\\[", "[").replace("\\]", "]")
}

/// Whether the line ends in a closing bracket that is not escaped.
pub fn ends_with_unescaped_close(line: &str) -> bool {
    let mut chars = line.chars().rev();
    match (chars.next(), chars.next()) {
        (Some(CLOSE_MARKER), Some(before)) => before != ESCAPE_CHAR,
        _ => false,
    }
}

/// Split `input` into lines ending at `\n`, `\r\n` or a lone `\r`.
/// A terminator at the very end does not start another line.
pub fn source_lines(input: &str) -> impl Iterator<Item = &str> {
    let mut rest = input;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = rest.find(['\n', '\r']).unwrap_or(rest.len());
        let (line, tail) = rest.split_at(end);
        rest = match tail.strip_prefix("\r\n") {
            Some(after) => after,
            None => tail.get(1..).unwrap_or(""),
        };
        Some(line)
    })
}

/// 1-based column of `fragment` inside `line`, given that fragments are
/// always suffixes of the line they were cut from.
pub fn column_of(line: &str, fragment: &str) -> usize {
    line.len().saturating_sub(fragment.len()) + 1
}
