//! xdoc to AsciiDoc conversion module
//!
//! This module converts single xdoc documents to AsciiDoc. A document is
//! translated line by line; each line is consumed left to right in
//! fragments until nothing meaningful is left.
//!
//! # Module Structure
//!
//! - `context`: Options and per-document state (`X2AOptions`, `ConvertContext`)
//! - `tokens`: Whole-line constructs, openers and inline constructs
//! - `scanner`: Where free text stops
//! - `translator`: The fragment loop (`LineTranslator`)
//! - `utils`: Advancing through a line and escaping text
//!
//! # Example
//!
//! ```rust
//! use xdoc2asciidoc::core::xdoc2asciidoc::xdoc_to_asciidoc;
//!
//! let adoc = xdoc_to_asciidoc("chapter:intro[Introduction]\nSome e[bold] text").unwrap();
//! assert_eq!(adoc, "[id=\"intro\"]\n## Introduction\nSome *bold* text\n");
//! ```

pub mod context;
pub mod scanner;
pub mod tokens;
pub mod translator;
pub mod utils;

pub use context::{ConvertContext, MarkupContext, X2AOptions};
pub use translator::LineTranslator;

use crate::features::refs::ChapterTable;
use crate::utils::error::{ConversionOutput, ConversionResult};

/// Convert one document, registering its chapters in `chapters`.
///
/// `output_name` is the file the result will be written to; it is what
/// later `chapter-ref` lines resolve to.
pub fn convert_document(
    input: &str,
    output_name: &str,
    chapters: &mut ChapterTable,
    options: &X2AOptions,
) -> ConversionResult<ConversionOutput> {
    let mut translator = LineTranslator::new(chapters, options, output_name);
    translator.translate_all(input)?;
    Ok(translator.finish())
}

/// Convert a standalone document with custom options
pub fn xdoc_to_asciidoc_with_options(
    input: &str,
    options: &X2AOptions,
) -> ConversionResult<ConversionOutput> {
    let mut chapters = ChapterTable::with_policy(options.duplicate_chapters);
    convert_document(input, "", &mut chapters, options)
}

/// Convert a standalone document with default options
pub fn xdoc_to_asciidoc(input: &str) -> ConversionResult<String> {
    xdoc_to_asciidoc_with_options(input, &X2AOptions::default()).map(|out| out.content)
}
