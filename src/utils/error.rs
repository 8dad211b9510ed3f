//! Error handling for xdoc conversions
//!
//! This module provides a unified error type and result type for the
//! line translator and the document orchestrator, plus the non-fatal
//! warning type collected while a document is translated.

use std::fmt;

/// Conversion error type
///
/// Every variant is fatal for the whole run: there is no partial-failure
/// isolation between documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Parse error - a construct could not be parsed
    ParseError {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },
    /// A single line needed more processing steps than the configured ceiling
    RecursionLimit { limit: usize, line: Option<usize> },
    /// Two input files both start with the `document` header
    DuplicateRoot { first: String, second: String },
    /// A chapter id was registered twice
    DuplicateChapter {
        id: String,
        first: String,
        second: String,
    },
    /// Invalid input (bad directories, bad options)
    InvalidInput { message: String },
    /// IO error (for file operations)
    IoError { message: String },
    /// Error raised while translating a specific document
    InDocument {
        document: String,
        source: Box<ConversionError>,
    },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::ParseError {
                message,
                line,
                column,
            } => {
                if let (Some(l), Some(c)) = (line, column) {
                    write!(f, "Parse error at line {}, column {}: {}", l, c, message)
                } else if let Some(l) = line {
                    write!(f, "Parse error at line {}: {}", l, message)
                } else {
                    write!(f, "Parse error: {}", message)
                }
            }
            ConversionError::RecursionLimit { limit, line } => {
                if let Some(l) = line {
                    write!(f, "Recursion limit of {} reached at line {}", limit, l)
                } else {
                    write!(f, "Recursion limit of {} reached", limit)
                }
            }
            ConversionError::DuplicateRoot { first, second } => write!(
                f,
                "Two or more files cannot start with 'document' in the same folder: {}, {}",
                first, second
            ),
            ConversionError::DuplicateChapter { id, first, second } => write!(
                f,
                "Chapter id '{}' defined in both {} and {}",
                id, first, second
            ),
            ConversionError::InvalidInput { message } => {
                write!(f, "Invalid input: {}", message)
            }
            ConversionError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
            ConversionError::InDocument { document, source } => {
                write!(f, "{}: {}", document, source)
            }
        }
    }
}

impl std::error::Error for ConversionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConversionError::InDocument { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        ConversionError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Kind of a non-fatal conversion issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// A closing bracket with no open context
    UnmatchedClose,
    /// Contexts still open when the document ended
    UnclosedContext,
    /// A `chapter-ref` whose id is not in the chapter table
    UnresolvedChapter,
    /// A chapter id registered twice while overwriting is allowed
    DuplicateChapter,
    /// A table closed without any row
    EmptyTable,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::UnmatchedClose => write!(f, "unmatched close"),
            WarningKind::UnclosedContext => write!(f, "unclosed context"),
            WarningKind::UnresolvedChapter => write!(f, "unresolved chapter"),
            WarningKind::DuplicateChapter => write!(f, "duplicate chapter"),
            WarningKind::EmptyTable => write!(f, "empty table"),
        }
    }
}

/// Conversion warnings (non-fatal issues)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionWarning {
    pub kind: WarningKind,
    pub message: String,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl ConversionWarning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            line: None,
            suggestion: None,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(l) = self.line {
            write!(f, "[{}] line {}: {}", self.kind, l, self.message)?;
        } else {
            write!(f, "[{}] {}", self.kind, self.message)?;
        }
        if let Some(ref sug) = self.suggestion {
            write!(f, " ({})", sug)?;
        }
        Ok(())
    }
}

/// Conversion output with optional warnings
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// The converted content
    pub content: String,
    /// Any warnings generated during conversion
    pub warnings: Vec<ConversionWarning>,
}

impl ConversionOutput {
    pub fn new(content: String) -> Self {
        Self {
            content,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(content: String, warnings: Vec<ConversionWarning>) -> Self {
        Self { content, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

// Convenience constructors for errors
impl ConversionError {
    pub fn parse(message: impl Into<String>) -> Self {
        ConversionError::ParseError {
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn parse_at(message: impl Into<String>, line: usize, column: usize) -> Self {
        ConversionError::ParseError {
            message: message.into(),
            line: Some(line),
            column: Some(column),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ConversionError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        ConversionError::IoError {
            message: message.into(),
        }
    }

    /// Attach the name of the document being translated
    pub fn in_document(self, document: impl Into<String>) -> Self {
        ConversionError::InDocument {
            document: document.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping document annotations
    pub fn root_cause(&self) -> &ConversionError {
        match self {
            ConversionError::InDocument { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
