//! # xdoc2asciidoc
//!
//! Converter from xdoc, the bracket-based documentation markup, to
//! AsciiDoc.
//!
//! ## Features
//!
//! - **Line-oriented**: every line is translated in one left-to-right pass
//! - **Multi-file books**: chapters defined in one file are included by
//!   the root document through `chapter-ref`
//! - **Nesting**: emphasis, lists, tables and code blocks nest freely,
//!   tracked by an explicit context stack
//! - **Pluggable storage**: the filesystem or in-memory documents
//!
//! ## Usage Examples
//!
//! ### Single Document
//!
//! ```rust
//! use xdoc2asciidoc::xdoc_to_asciidoc;
//!
//! let adoc = xdoc_to_asciidoc("section[Usage]\nCall e[convert] once.").unwrap();
//! assert_eq!(adoc, "### Usage\nCall *convert* once.\n");
//! ```
//!
//! ### Whole Book
//!
//! ```rust
//! use xdoc2asciidoc::{Converter, MemoryDocumentStore, X2AOptions};
//!
//! let mut store = MemoryDocumentStore::new();
//! store.add_document("book.xdoc", "document[Manual]\nchapter-ref[intro]");
//! store.add_document("intro.xdoc", "chapter:intro[Introduction]");
//!
//! let mut converter = Converter::new(store, X2AOptions::default());
//! let summary = converter.execute().unwrap();
//! assert_eq!(summary.root.as_deref(), Some("book.xdoc"));
//!
//! let book = converter.store().output("book.asc").unwrap();
//! assert!(book.contains("include::intro.asc[]"));
//! ```

/// Core conversion modules
pub mod core;

/// Data layer - static tables and constants
pub mod data;

/// Feature modules - references, includes and images
pub mod features;

/// Utility modules
pub mod utils;

// Re-export core conversion functions
pub use core::xdoc2asciidoc;
pub use core::{
    convert_document, xdoc_to_asciidoc, xdoc_to_asciidoc_with_options, ConvertedDocument,
    Converter, RunSummary, X2AOptions,
};

// Re-export data modules
pub use data::constants;

// Re-export feature modules
pub use features::images;
pub use features::refs;
pub use features::{ChapterTable, DuplicateChapterPolicy};

// Re-export utilities
pub use utils::error::{
    ConversionError, ConversionOutput, ConversionResult, ConversionWarning, WarningKind,
};
pub use utils::files;
pub use utils::files::{DocumentStore, MemoryDocumentStore, StdDocumentStore, WriteMode};
