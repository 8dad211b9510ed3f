//! Multi-document runs
//!
//! A run converts every xdoc document of a store. Chapter documents are
//! converted first so that the root document (the one starting with
//! `document`) can resolve every `chapter-ref` it contains. The root is
//! converted last, after an index stub has been written next to it.

use crate::core::xdoc2asciidoc::{convert_document, X2AOptions};
use crate::data::constants::{INDEX_STUB_CONTENT, INDEX_STUB_FILE};
use crate::features::refs::{render_include, ChapterTable};
use crate::utils::error::{ConversionError, ConversionResult, ConversionWarning};
use crate::utils::files::{is_root_document, output_file_name, DocumentStore};

/// One converted document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedDocument {
    /// Input document name
    pub input: String,
    /// Output file name
    pub output: String,
    /// Warnings raised while translating it
    pub warnings: Vec<ConversionWarning>,
}

/// Result of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Converted documents, in conversion order
    pub converted: Vec<ConvertedDocument>,
    /// Input name of the root document, if there was one
    pub root: Option<String>,
    /// Number of warnings across all documents
    pub warnings: usize,
}

/// Converts all documents of a store
pub struct Converter<S: DocumentStore> {
    store: S,
    options: X2AOptions,
    chapters: ChapterTable,
}

impl<S: DocumentStore> Converter<S> {
    pub fn new(store: S, options: X2AOptions) -> Self {
        let chapters = ChapterTable::with_policy(options.duplicate_chapters);
        Self {
            store,
            options,
            chapters,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Chapters registered so far
    pub fn chapters(&self) -> &ChapterTable {
        &self.chapters
    }

    /// Convert every document; the first error aborts the run.
    pub fn execute(&mut self) -> ConversionResult<RunSummary> {
        if self.options.max_depth == 0 {
            return Err(ConversionError::invalid("max depth must be at least 1"));
        }

        let names = self.store.list_documents(&self.options.input_extension)?;
        log::debug!("Found {} documents", names.len());

        let mut chapters = Vec::with_capacity(names.len());
        let mut root: Option<(String, String)> = None;
        for name in names {
            let content = self
                .store
                .read_document(&name)
                .map_err(|e| e.in_document(&name))?;
            if !is_root_document(&content) {
                chapters.push((name, content));
                continue;
            }
            if let Some((first, _)) = &root {
                return Err(ConversionError::DuplicateRoot {
                    first: first.clone(),
                    second: name,
                });
            }
            root = Some((name, content));
        }

        let mut summary = RunSummary::default();

        log::debug!("Converting {} chapter documents", chapters.len());
        for (name, content) in &chapters {
            let converted = self.convert(name, content, None)?;
            summary.push(converted);
        }
        log::debug!("{} chapters registered", self.chapters.len());

        match root {
            Some((name, content)) => {
                log::debug!("Converting root document {}", name);
                self.store
                    .write_output(INDEX_STUB_FILE, INDEX_STUB_CONTENT, &self.options.write_mode)?;
                let trailer = render_include(INDEX_STUB_FILE);
                let converted = self.convert(&name, &content, Some(&trailer))?;
                summary.push(converted);
                summary.root = Some(name);
            }
            None => log::warn!("No document starts with 'document'; no root written"),
        }

        Ok(summary)
    }

    fn convert(
        &mut self,
        name: &str,
        content: &str,
        trailer: Option<&str>,
    ) -> ConversionResult<ConvertedDocument> {
        let output = output_file_name(
            name,
            &self.options.input_extension,
            &self.options.output_extension,
        );
        let mut result = convert_document(content, &output, &mut self.chapters, &self.options)
            .map_err(|e| e.in_document(name))?;
        if let Some(trailer) = trailer {
            result.content.push_str(trailer);
            result.content.push('\n');
        }

        self.store
            .write_output(&output, &result.content, &self.options.write_mode)
            .map_err(|e| e.in_document(name))?;
        log::info!("Processed {} -> {}", name, output);

        Ok(ConvertedDocument {
            input: name.to_string(),
            output,
            warnings: result.warnings,
        })
    }
}

impl RunSummary {
    fn push(&mut self, document: ConvertedDocument) {
        self.warnings += document.warnings.len();
        self.converted.push(document);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::files::MemoryDocumentStore;
    use pretty_assertions::assert_eq;

    fn store(documents: &[(&str, &str)]) -> MemoryDocumentStore {
        let mut store = MemoryDocumentStore::new();
        for (name, content) in documents {
            store.add_document(name, content);
        }
        store
    }

    #[test]
    fn test_root_is_converted_last() {
        let mut converter = Converter::new(
            store(&[
                ("a-book.xdoc", "document[Book]\nchapter-ref[intro]"),
                ("z intro.xdoc", "chapter:intro[Introduction]"),
            ]),
            X2AOptions::default(),
        );
        let summary = converter.execute().unwrap();

        let order: Vec<_> = summary.converted.iter().map(|d| d.input.as_str()).collect();
        assert_eq!(order, vec!["z intro.xdoc", "a-book.xdoc"]);
        assert_eq!(summary.root.as_deref(), Some("a-book.xdoc"));
        assert_eq!(converter.chapters().resolve("intro"), Some("z_intro.asc"));

        let store = converter.into_store();
        assert_eq!(
            store.output("a_book.asc"),
            Some("= Book\ninclude::z_intro.asc[]\ninclude::stunt_index.asc[]\n")
        );
        assert_eq!(store.output("stunt_index.asc"), Some("[index]\n== Dummy Index"));
    }

    #[test]
    fn test_two_roots_abort_the_run() {
        let mut converter = Converter::new(
            store(&[("a.xdoc", "document[A]"), ("b.xdoc", "document[B]")]),
            X2AOptions::default(),
        );
        let err = converter.execute().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Two or more files cannot start with 'document' in the same folder: a.xdoc, b.xdoc"
        );
        assert!(converter.store().outputs().is_empty());
    }

    #[test]
    fn test_without_root_no_stub_is_written() {
        let mut converter =
            Converter::new(store(&[("one.xdoc", "text")]), X2AOptions::default());
        let summary = converter.execute().unwrap();
        assert_eq!(summary.root, None);
        assert_eq!(converter.store().output("stunt_index.asc"), None);
        assert_eq!(converter.store().output("one.asc"), Some("text\n"));
    }

    #[test]
    fn test_failing_document_is_named_and_not_written() {
        let mut converter = Converter::new(
            store(&[("bad.xdoc", "ok\nref:broken"), ("good.xdoc", "fine")]),
            X2AOptions::default(),
        );
        let err = converter.execute().unwrap_err();
        assert!(matches!(&err, ConversionError::InDocument { document, .. } if document == "bad.xdoc"));
        assert_eq!(converter.store().output("bad.asc"), None);
    }

    #[test]
    fn test_zero_max_depth_is_rejected() {
        let options = X2AOptions {
            max_depth: 0,
            ..Default::default()
        };
        let mut converter = Converter::new(store(&[("a.xdoc", "text")]), options);
        assert!(matches!(
            converter.execute(),
            Err(ConversionError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_warnings_are_counted() {
        let mut converter = Converter::new(
            store(&[("a.xdoc", "stray]\ne[open")]),
            X2AOptions::default(),
        );
        let summary = converter.execute().unwrap();
        assert_eq!(summary.warnings, 2);
    }
}
