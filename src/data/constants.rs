//! Constants for xdoc to AsciiDoc conversion
//!
//! This module contains the literal markers of both notations:
//! - AsciiDoc block delimiters and attribute lines emitted by the translator
//! - The reserved xdoc tokens searched for inside free text
//! - Names and contents of files synthesized next to the root document

// ============================================================================
// AsciiDoc Output
// ============================================================================

/// Delimiter line opening and closing a listing block
pub const CODE_DELIMITER: &str = "----";

/// Delimiter line opening and closing a table
pub const TABLE_DELIMITER: &str = "|========";

/// Prefix written in front of each table cell
pub const CELL_PREFIX: &str = "| ";

/// Attribute line emitted before every list
pub const LIST_OPTIONS: &str = "[options=\"compact\"]";

/// Attribute block written after the author line of the root document
pub const BOOK_ATTRIBUTES: &[&str] = &[
    ":doctype: book",
    ":encoding: utf-8",
    ":lang: en",
    ":toc: left",
    ":toclevels: 2",
    ":numbered:",
];

/// Attribute list attached to every image macro
pub const IMAGE_ATTRIBUTES: &str = "align=\"center\"";

// ============================================================================
// Root Document Companion Files
// ============================================================================

/// Index stub written next to the root document and included at its end
pub const INDEX_STUB_FILE: &str = "stunt_index.asc";

/// Content of the index stub
pub const INDEX_STUB_CONTENT: &str = "[index]\n== Dummy Index";

/// Header token a root document starts with
pub const ROOT_DOCUMENT_MARKER: &str = "document";

// ============================================================================
// xdoc Tokens
// ============================================================================

/// Default extension of xdoc input files
pub const XDOC_EXTENSION: &str = "xdoc";

/// Default extension of AsciiDoc output files
pub const ASCIIDOC_EXTENSION: &str = "asc";

/// Closing marker shared by every construct
pub const CLOSE_MARKER: char = ']';

/// Escape character protecting a bracket from being read as markup
pub const ESCAPE_CHAR: char = '\\';

/// Opening tokens recognised anywhere inside free text
///
/// Code openers and whole-line headers are deliberately absent: they only
/// take effect at the start of a fragment.
pub const RESERVED_TOKENS: &[&str] = &[
    "e[", "td[", "tr[", "table[", "ref:", "img[", "ol[", "ul[", "item[", "link[",
];

/// Default ceiling on processing steps for a single line
pub const DEFAULT_MAX_DEPTH: usize = 100;
