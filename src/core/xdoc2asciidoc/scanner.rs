//! Reserved-token scanner
//!
//! Finds where free text stops: the leftmost reserved opening token, or
//! the leftmost closing bracket that is not escaped with a backslash.

use crate::data::constants::{CLOSE_MARKER, ESCAPE_CHAR, RESERVED_TOKENS};

/// Byte offset of the first reserved token in `line`, if any.
pub fn find_next_reserved_token(line: &str) -> Option<usize> {
    let opener = RESERVED_TOKENS
        .iter()
        .filter_map(|token| line.find(token))
        .min();

    let close = find_unescaped_close(line);

    match (opener, close) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Byte offset of the first `]` not directly preceded by a backslash.
pub fn find_unescaped_close(line: &str) -> Option<usize> {
    let mut previous_was_escape = false;
    for (i, c) in line.char_indices() {
        if c == CLOSE_MARKER && !previous_was_escape {
            return Some(i);
        }
        previous_was_escape = c == ESCAPE_CHAR;
    }
    None
}
