//! Conversion context and options for xdoc to AsciiDoc conversion
//!
//! This module handles per-document state: the stack of open markup
//! contexts, the output buffer, collected warnings and the options that
//! govern a run.

use crate::data::constants::{ASCIIDOC_EXTENSION, DEFAULT_MAX_DEPTH, XDOC_EXTENSION};
use crate::features::refs::DuplicateChapterPolicy;
use crate::utils::error::{ConversionWarning, WarningKind};
use crate::utils::files::WriteMode;

use super::utils::EscapeMode;

/// Options for xdoc to AsciiDoc conversion
#[derive(Debug, Clone)]
pub struct X2AOptions {
    /// Maximum processing steps for a single line (default: 100)
    pub max_depth: usize,
    /// Treat a closing bracket with no open context as an error
    pub strict: bool,
    /// What to do when a chapter id is registered twice
    pub duplicate_chapters: DuplicateChapterPolicy,
    /// Extension of input files, without the dot
    pub input_extension: String,
    /// Extension of output files, without the dot
    pub output_extension: String,
    /// How existing output files are treated
    pub write_mode: WriteMode,
}

impl Default for X2AOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict: false,
            duplicate_chapters: DuplicateChapterPolicy::Error,
            input_extension: XDOC_EXTENSION.to_string(),
            output_extension: ASCIIDOC_EXTENSION.to_string(),
            write_mode: WriteMode::default(),
        }
    }
}

impl X2AOptions {
    /// Options that turn every questionable construct into an error
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Default::default()
        }
    }

    /// Options that replace existing outputs, keeping a backup of each
    pub fn overwriting(backup_suffix: Option<String>) -> Self {
        Self {
            write_mode: WriteMode {
                overwrite: true,
                backup_suffix,
            },
            ..Default::default()
        }
    }
}

/// An open markup context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupContext {
    Emphasis,
    Code,
    List { ordered: bool },
    ListItem,
    Table,
    TableRow,
    TableCell,
}

impl MarkupContext {
    pub fn name(&self) -> &'static str {
        match self {
            MarkupContext::Emphasis => "emphasis",
            MarkupContext::Code => "code block",
            MarkupContext::List { ordered: true } => "ordered list",
            MarkupContext::List { ordered: false } => "unordered list",
            MarkupContext::ListItem => "list item",
            MarkupContext::Table => "table",
            MarkupContext::TableRow => "table row",
            MarkupContext::TableCell => "table cell",
        }
    }
}

/// Initial capacity for output buffer (reduces reallocations)
const INITIAL_BUFFER_CAPACITY: usize = 4096;

/// Translation state for one document
#[derive(Debug)]
pub struct ConvertContext {
    /// Output buffer
    pub output: String,
    /// Stack of open contexts, innermost last
    pub stack: Vec<MarkupContext>,
    /// Rows seen since the current table was opened
    pub rows_in_table: usize,
    /// List nesting level
    pub list_depth: usize,
    /// 1-based number of the line being translated
    pub line: usize,
    /// Collected warnings during conversion
    pub warnings: Vec<ConversionWarning>,
}

impl Default for ConvertContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvertContext {
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(INITIAL_BUFFER_CAPACITY),
            stack: Vec::new(),
            rows_in_table: 0,
            list_depth: 0,
            line: 0,
            warnings: Vec::new(),
        }
    }

    // =========================================================================
    // Context Management
    // =========================================================================

    /// Push a new context onto the stack
    pub fn push_context(&mut self, context: MarkupContext) {
        match context {
            MarkupContext::List { .. } => self.list_depth += 1,
            MarkupContext::TableRow => self.rows_in_table += 1,
            MarkupContext::Table => self.rows_in_table = 0,
            _ => {}
        }
        self.stack.push(context);
    }

    /// Pop the innermost context from the stack
    pub fn pop_context(&mut self) -> Option<MarkupContext> {
        let context = self.stack.pop()?;
        if let MarkupContext::List { .. } = context {
            self.list_depth = self.list_depth.saturating_sub(1);
        }
        Some(context)
    }

    /// Innermost open context
    pub fn current(&self) -> Option<MarkupContext> {
        self.stack.last().copied()
    }

    pub fn in_code(&self) -> bool {
        self.current() == Some(MarkupContext::Code)
    }

    pub fn in_table_cell(&self) -> bool {
        self.stack.contains(&MarkupContext::TableCell)
    }

    /// Whether the innermost list is ordered
    pub fn in_ordered_list(&self) -> bool {
        self.stack
            .iter()
            .rev()
            .find_map(|c| match c {
                MarkupContext::List { ordered } => Some(*ordered),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn escape_mode(&self) -> EscapeMode {
        if self.in_table_cell() {
            EscapeMode::TableCell
        } else {
            EscapeMode::Default
        }
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// Push a string to the output buffer
    pub fn push(&mut self, s: &str) {
        self.output.push_str(s);
    }

    /// Push a string followed by a line break
    pub fn push_line(&mut self, s: &str) {
        self.output.push_str(s);
        self.output.push('\n');
    }

    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    /// Whether the buffer is empty or ends in whitespace
    pub fn at_word_boundary(&self) -> bool {
        self.output
            .chars()
            .last()
            .map_or(true, |c| c.is_whitespace())
    }

    /// Add a warning for the current line
    pub fn add_warning(&mut self, kind: WarningKind, message: impl Into<String>) {
        let warning = ConversionWarning::new(kind, message).at_line(self.line);
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Report every context still open at the end of the document
    pub fn report_unclosed(&mut self) {
        if self.stack.is_empty() {
            return;
        }
        let names: Vec<_> = self.stack.iter().map(MarkupContext::name).collect();
        let warning = ConversionWarning::new(
            WarningKind::UnclosedContext,
            format!("document ended inside: {}", names.join(" > ")),
        )
        .with_suggestion("add the missing closing brackets");
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }
}
