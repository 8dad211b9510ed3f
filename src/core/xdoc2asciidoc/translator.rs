//! Line translator
//!
//! Translates one xdoc line at a time. A line is consumed in *fragments*:
//! every step looks at the start of the current fragment, emits AsciiDoc
//! for what it recognises there, and hands back the untranslated suffix as
//! the next fragment. Steps are counted per line; reaching the configured
//! ceiling aborts the document.
//!
//! Open constructs live on an explicit stack in [`ConvertContext`], so a
//! closing bracket always terminates the innermost one.

use lazy_static::lazy_static;
use regex::Regex;

use crate::data::constants::{
    BOOK_ATTRIBUTES, CELL_PREFIX, CLOSE_MARKER, CODE_DELIMITER, LIST_OPTIONS, TABLE_DELIMITER,
};
use crate::data::keywords::{HeaderKind, Opener, SectionLevel, ORDERED_LIST_OPENER};
use crate::features::images::render_image;
use crate::features::refs::{
    render_anchor, render_cross_reference, render_include, render_link, ChapterTable,
    Registration,
};
use crate::utils::error::{ConversionError, ConversionOutput, ConversionResult, WarningKind};

use super::context::{ConvertContext, MarkupContext, X2AOptions};
use super::scanner::find_next_reserved_token;
use super::tokens::{
    match_opener, match_whole_line, parse_image, parse_link, parse_reference, InlineMatch,
    LineConstruct,
};
use super::utils::{
    column_of, ends_with_unescaped_close, escape_text, move_forward,
    move_forward_past_whitespace, source_lines, trim_leading_whitespace, EscapeMode,
};

lazy_static! {
    /// Language selector directly after a code opener, as in `code[Java][`
    static ref CODE_LANGUAGE: Regex = Regex::new(r"^\s*[\w+#.-]*\]\[").unwrap();
}

/// Translates the lines of one document
pub struct LineTranslator<'a> {
    ctx: ConvertContext,
    chapters: &'a mut ChapterTable,
    options: &'a X2AOptions,
    /// Output file name recorded for chapters defined in this document
    output_name: &'a str,
}

impl<'a> LineTranslator<'a> {
    pub fn new(chapters: &'a mut ChapterTable, options: &'a X2AOptions, output_name: &'a str) -> Self {
        Self {
            ctx: ConvertContext::new(),
            chapters,
            options,
            output_name,
        }
    }

    /// State accumulated so far
    pub fn context(&self) -> &ConvertContext {
        &self.ctx
    }

    /// Translate every line of `input`.
    pub fn translate_all(&mut self, input: &str) -> ConversionResult<()> {
        for line in source_lines(input) {
            self.translate_line(line)?;
        }
        Ok(())
    }

    /// Translate a single source line.
    pub fn translate_line(&mut self, line: &str) -> ConversionResult<()> {
        self.ctx.line += 1;

        let mut fragment = Some(line);
        let mut depth = 0;
        while let Some(current) = fragment {
            if depth >= self.options.max_depth {
                return Err(ConversionError::RecursionLimit {
                    limit: self.options.max_depth,
                    line: Some(self.ctx.line),
                });
            }
            log::trace!("line {} depth {}: {:?}", self.ctx.line, depth, current);
            fragment = self.step(line, current, depth)?;
            depth += 1;
        }
        Ok(())
    }

    /// Finish the document, reporting contexts left open.
    pub fn finish(mut self) -> ConversionOutput {
        self.ctx.report_unclosed();
        ConversionOutput::with_warnings(self.ctx.output, self.ctx.warnings)
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    fn step<'l>(
        &mut self,
        line: &'l str,
        fragment: &'l str,
        depth: usize,
    ) -> ConversionResult<Option<&'l str>> {
        if self.ctx.in_code() {
            return self.code_content(line, fragment);
        }

        let construct = match_whole_line(fragment).map_err(|e| self.locate(e, line, fragment))?;
        if let Some(construct) = construct {
            self.whole_line(construct)?;
            return Ok(None);
        }

        if let Some((opener, len)) = match_opener(fragment) {
            return self.open(opener, line, fragment, len, depth);
        }

        Ok(self.text(fragment, depth))
    }

    /// Fill in the position of a parse error raised for `fragment`.
    fn locate(&self, err: ConversionError, line: &str, fragment: &str) -> ConversionError {
        match err {
            ConversionError::ParseError {
                message,
                line: None,
                column: None,
            } => ConversionError::parse_at(message, self.ctx.line, column_of(line, fragment)),
            other => other,
        }
    }

    // =========================================================================
    // Whole-line constructs
    // =========================================================================

    fn whole_line(&mut self, construct: LineConstruct<'_>) -> ConversionResult<()> {
        match construct {
            LineConstruct::Section {
                level,
                id,
                title,
                explicit_id,
            } => self.section(level, id, title, explicit_id),
            LineConstruct::Header { kind, value } => {
                self.header(kind, value);
                Ok(())
            }
        }
    }

    fn section(
        &mut self,
        level: SectionLevel,
        id: &str,
        title: &str,
        explicit_id: bool,
    ) -> ConversionResult<()> {
        if explicit_id {
            self.ctx.push_line(&render_anchor(id));
        }
        if level.is_chapter() {
            if let Registration::Replaced(previous) = self.chapters.register(id, self.output_name)? {
                self.ctx.add_warning(
                    WarningKind::DuplicateChapter,
                    format!("chapter '{}' already defined in {}", id, previous),
                );
            }
        }
        self.ctx.push(level.heading_prefix());
        self.ctx.push_line(title);
        Ok(())
    }

    fn header(&mut self, kind: HeaderKind, value: &str) {
        match kind {
            HeaderKind::Document => {
                self.ctx.push("= ");
                self.ctx.push_line(value);
            }
            HeaderKind::Authors => {
                self.ctx.push_line(value);
                for attribute in BOOK_ATTRIBUTES {
                    self.ctx.push_line(attribute);
                }
                self.ctx.newline();
            }
            HeaderKind::ChapterRef => {
                let target = match self.chapters.resolve(value) {
                    Some(file) => file.to_string(),
                    None => {
                        self.ctx.add_warning(
                            WarningKind::UnresolvedChapter,
                            format!("no chapter with id '{}', including it by name", value),
                        );
                        value.to_string()
                    }
                };
                self.ctx.push_line(&render_include(&target));
            }
        }
    }

    // =========================================================================
    // Prefix constructs
    // =========================================================================

    fn open<'l>(
        &mut self,
        opener: Opener,
        line: &'l str,
        fragment: &'l str,
        len: usize,
        depth: usize,
    ) -> ConversionResult<Option<&'l str>> {
        let rest = match opener {
            Opener::Code => {
                self.ctx.push_line(CODE_DELIMITER);
                self.ctx.push_context(MarkupContext::Code);
                // Code starts after a `Lang][` selector; anything else on
                // the opener line is dropped.
                match move_forward(fragment, len) {
                    Some(rest) => match CODE_LANGUAGE.find(rest) {
                        Some(selector) => move_forward(rest, selector.end()),
                        None => {
                            log::debug!(
                                "line {}: dropped {:?} after code opener",
                                self.ctx.line,
                                rest
                            );
                            None
                        }
                    },
                    None => None,
                }
            }
            Opener::List => {
                let ordered = fragment.starts_with(ORDERED_LIST_OPENER)
                    && fragment[len..].trim().is_empty();
                self.ctx.push_line(LIST_OPTIONS);
                self.ctx.push_context(MarkupContext::List { ordered });
                move_forward_past_whitespace(fragment, len)
            }
            Opener::TableRow => {
                self.ctx.push_context(MarkupContext::TableRow);
                move_forward_past_whitespace(fragment, len)
            }
            Opener::Emphasis => {
                self.ctx.push("*");
                self.ctx.push_context(MarkupContext::Emphasis);
                move_forward_past_whitespace(fragment, len)
            }
            Opener::ListItem => {
                let marker = self.list_marker();
                self.ctx.push(&marker);
                self.ctx.push_context(MarkupContext::ListItem);
                move_forward_past_whitespace(fragment, len)
            }
            Opener::TableCell => {
                if !self.ctx.at_word_boundary() {
                    self.ctx.push(" ");
                }
                self.ctx.push(CELL_PREFIX);
                self.ctx.push_context(MarkupContext::TableCell);
                move_forward_past_whitespace(fragment, len)
            }
            Opener::Table => {
                self.ctx.push_line(TABLE_DELIMITER);
                self.ctx.push_context(MarkupContext::Table);
                move_forward_past_whitespace(fragment, len)
            }
            Opener::Reference => {
                let m = parse_reference(fragment).ok_or_else(|| {
                    self.locate(ConversionError::parse("Invalid reference pattern"), line, fragment)
                })?;
                self.inline(fragment, depth, &m, render_cross_reference(m.target, m.label))
            }
            Opener::Link => {
                let m = parse_link(fragment).ok_or_else(|| {
                    self.locate(
                        ConversionError::parse(format!("Invalid link pattern : {}", fragment)),
                        line,
                        fragment,
                    )
                })?;
                self.inline(fragment, depth, &m, render_link(m.target, m.label))
            }
            Opener::Image => {
                let m = parse_image(fragment).ok_or_else(|| {
                    self.locate(ConversionError::parse("Invalid images pattern"), line, fragment)
                })?;
                self.inline(fragment, depth, &m, render_image(m.target))
            }
            Opener::Close => return self.close(line, fragment),
        };
        Ok(rest)
    }

    /// Marker for a new list item, repeated once per nesting level
    fn list_marker(&self) -> String {
        let level = self.ctx.list_depth.max(1);
        match (self.ctx.in_ordered_list(), level) {
            (true, 1) => "1. ".to_string(),
            (true, n) => format!("{} ", ".".repeat(n)),
            (false, n) => format!("{} ", "*".repeat(n)),
        }
    }

    fn inline<'l>(
        &mut self,
        fragment: &'l str,
        depth: usize,
        m: &InlineMatch<'_>,
        rendered: String,
    ) -> Option<&'l str> {
        self.separate_cell_continuation(depth, &rendered);
        self.ctx.push(&rendered);
        let rest = move_forward(fragment, m.consumed);
        if rest.is_none() {
            self.ctx.newline();
        }
        rest
    }

    /// A table cell spanning several source lines gets one space between
    /// the content of consecutive lines.
    fn separate_cell_continuation(&mut self, depth: usize, text: &str) {
        if depth == 0 && !text.is_empty() && self.ctx.in_table_cell() && !self.ctx.at_word_boundary()
        {
            self.ctx.push(" ");
        }
    }

    // =========================================================================
    // Closing marker
    // =========================================================================

    fn close<'l>(&mut self, line: &'l str, fragment: &'l str) -> ConversionResult<Option<&'l str>> {
        let Some(context) = self.ctx.pop_context() else {
            if self.options.strict {
                return Err(ConversionError::parse_at(
                    "Closing bracket without an open context",
                    self.ctx.line,
                    column_of(line, fragment),
                ));
            }
            self.ctx.add_warning(
                WarningKind::UnmatchedClose,
                "closing bracket without an open context dropped",
            );
            let rest = move_forward_past_whitespace(fragment, 1);
            if rest.is_none() && !self.ctx.in_table_cell() {
                self.ctx.newline();
            }
            return Ok(rest);
        };

        let mut break_at_end = false;
        let mut keep_whitespace = false;
        match context {
            MarkupContext::Emphasis => {
                self.ctx.push("*");
                break_at_end = true;
                keep_whitespace = true;
            }
            MarkupContext::ListItem => break_at_end = true,
            MarkupContext::List { .. } => self.ctx.newline(),
            MarkupContext::TableCell => {}
            MarkupContext::TableRow => self.ctx.newline(),
            MarkupContext::Table => {
                if self.ctx.rows_in_table == 0 {
                    self.ctx
                        .add_warning(WarningKind::EmptyTable, "table closed without any row");
                }
                self.ctx.push_line(TABLE_DELIMITER);
            }
            MarkupContext::Code => self.ctx.push_line(CODE_DELIMITER),
        }

        let rest = if keep_whitespace {
            move_forward(fragment, CLOSE_MARKER.len_utf8())
        } else {
            move_forward_past_whitespace(fragment, CLOSE_MARKER.len_utf8())
        };
        if rest.is_none() && break_at_end {
            self.ctx.newline();
        }
        Ok(rest)
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// Inside a code block only the closing marker means anything.
    fn code_content<'l>(
        &mut self,
        line: &'l str,
        fragment: &'l str,
    ) -> ConversionResult<Option<&'l str>> {
        if fragment.starts_with(CLOSE_MARKER) {
            return self.close(line, fragment);
        }

        if ends_with_unescaped_close(fragment) {
            let split = fragment.len() - CLOSE_MARKER.len_utf8();
            self.ctx
                .push_line(&escape_text(&fragment[..split], EscapeMode::Default));
            return Ok(Some(&fragment[split..]));
        }

        self.ctx
            .push_line(&escape_text(fragment, EscapeMode::Default));
        Ok(None)
    }

    /// Free text up to the next reserved token.
    fn text<'l>(&mut self, fragment: &'l str, depth: usize) -> Option<&'l str> {
        let (head, tail) = match find_next_reserved_token(fragment) {
            Some(i) => (&fragment[..i], Some(&fragment[i..])),
            None => (fragment, None),
        };
        let head = if depth == 0 {
            trim_leading_whitespace(head)
        } else {
            head
        };

        self.separate_cell_continuation(depth, head);
        let escaped = escape_text(head, self.ctx.escape_mode());
        self.ctx.push(&escaped);

        if tail.is_none() && !self.ctx.in_table_cell() {
            self.ctx.newline();
        }
        tail
    }
}
