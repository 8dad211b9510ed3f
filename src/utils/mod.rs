//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error, warning and result types
//! - Document storage for multi-file runs

pub mod error;
pub mod files;

// Re-export commonly used items
pub use error::{
    ConversionError, ConversionOutput, ConversionResult, ConversionWarning, WarningKind,
};
pub use files::{
    is_root_document, output_file_name, DocumentStore, MemoryDocumentStore, StdDocumentStore,
    WriteMode,
};
