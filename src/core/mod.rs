//! Core conversion modules
//!
//! This module contains the conversion engine and the run around it:
//! - `xdoc2asciidoc`: single-document xdoc to AsciiDoc translator
//! - `pipeline`: multi-document runs with root-document scheduling

pub mod pipeline;
pub mod xdoc2asciidoc;

// Re-export main types and functions from xdoc2asciidoc
pub use xdoc2asciidoc::{
    convert_document, xdoc_to_asciidoc, xdoc_to_asciidoc_with_options, ConvertContext,
    LineTranslator, MarkupContext, X2AOptions,
};

pub use pipeline::{ConvertedDocument, Converter, RunSummary};
