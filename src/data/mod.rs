//! Data layer - Static tables and constants
//!
//! This module contains all static data used for xdoc → AsciiDoc conversion:
//! - AsciiDoc delimiters and attribute lines
//! - Reserved xdoc tokens
//! - Keyword tables for sections, headers and prefix openers

pub mod constants;
pub mod keywords;

// Re-export commonly used items
pub use constants::{
    ASCIIDOC_EXTENSION, DEFAULT_MAX_DEPTH, INDEX_STUB_CONTENT, INDEX_STUB_FILE, RESERVED_TOKENS,
    XDOC_EXTENSION,
};
pub use keywords::{HeaderKind, Opener, SectionLevel, HEADER_KINDS, OPENERS, SECTION_LEVELS};
