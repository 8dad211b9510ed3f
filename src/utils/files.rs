//! Document storage for multi-file conversion
//!
//! A run reads every xdoc document of one directory and writes one AsciiDoc
//! file per document into another. The `DocumentStore` trait hides where
//! those documents live:
//! - `StdDocumentStore`: input and output directories on the real filesystem
//! - `MemoryDocumentStore`: in-memory documents (testing, embedding)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::data::constants::ROOT_DOCUMENT_MARKER;
use crate::utils::error::{ConversionError, ConversionResult};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// How an output that already exists is treated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteMode {
    /// Replace existing outputs instead of failing
    pub overwrite: bool,
    /// Keep the replaced file under `name + suffix` (numbered if taken)
    pub backup_suffix: Option<String>,
}

/// Source of input documents and sink for converted ones
///
/// Documents are addressed by bare file name; the store decides which
/// directory that name lives in.
pub trait DocumentStore {
    /// Names of the input documents with the given extension, sorted
    fn list_documents(&self, extension: &str) -> ConversionResult<Vec<String>>;

    /// Content of an input document, without a leading byte-order mark
    fn read_document(&self, name: &str) -> ConversionResult<String>;

    /// Write an output file
    fn write_output(&mut self, name: &str, content: &str, mode: &WriteMode)
        -> ConversionResult<()>;
}

/// Output file name for an input document: the input extension is
/// stripped, spaces and dashes become underscores and the output extension
/// is appended.
pub fn output_file_name(input_name: &str, input_extension: &str, output_extension: &str) -> String {
    let suffix = format!(".{}", input_extension);
    let stem = input_name.strip_suffix(&suffix).unwrap_or(input_name);
    format!("{}.{}", stem.replace([' ', '-'], "_"), output_extension)
}

/// Whether a document is the root of the book (starts with `document`)
pub fn is_root_document(content: &str) -> bool {
    strip_bom(content).starts_with(ROOT_DOCUMENT_MARKER)
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content)
}

fn has_extension(name: &str, extension: &str) -> bool {
    Path::new(name).extension().and_then(|e| e.to_str()) == Some(extension)
}

// ============================================================================
// Filesystem
// ============================================================================

/// Directory-backed store
#[derive(Debug, Clone)]
pub struct StdDocumentStore {
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl StdDocumentStore {
    pub fn new(input_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        Self {
            input_dir: input_dir.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// First free backup path: `name+suffix`, then `name+suffix.1`, ...
    fn backup_path(&self, name: &str, suffix: &str) -> PathBuf {
        let base = format!("{}{}", name, suffix);
        let mut candidate = self.output_dir.join(&base);
        let mut n = 1;
        while candidate.exists() {
            candidate = self.output_dir.join(format!("{}.{}", base, n));
            n += 1;
        }
        candidate
    }
}

impl DocumentStore for StdDocumentStore {
    fn list_documents(&self, extension: &str) -> ConversionResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.input_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if has_extension(name, extension) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn read_document(&self, name: &str) -> ConversionResult<String> {
        let content = std::fs::read_to_string(self.input_dir.join(name))
            .map_err(|e| ConversionError::io(format!("{}: {}", name, e)))?;
        Ok(strip_bom(&content).to_string())
    }

    fn write_output(
        &mut self,
        name: &str,
        content: &str,
        mode: &WriteMode,
    ) -> ConversionResult<()> {
        let path = self.output_dir.join(name);
        if path.exists() {
            if !mode.overwrite {
                return Err(ConversionError::io(format!(
                    "{} already exists (use --overwrite to replace it)",
                    path.display()
                )));
            }
            match &mode.backup_suffix {
                Some(suffix) => {
                    let backup = self.backup_path(name, suffix);
                    log::debug!("Backing up {} to {}", path.display(), backup.display());
                    std::fs::rename(&path, &backup)?;
                }
                None => std::fs::remove_file(&path)?,
            }
        }
        std::fs::write(&path, content)
            .map_err(|e| ConversionError::io(format!("{}: {}", path.display(), e)))
    }
}

// ============================================================================
// Memory
// ============================================================================

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: BTreeMap<String, String>,
    outputs: BTreeMap<String, String>,
    backups: BTreeMap<String, String>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an input document
    pub fn add_document(&mut self, name: &str, content: &str) {
        self.documents.insert(name.to_string(), content.to_string());
    }

    /// Content written to `name`, if any
    pub fn output(&self, name: &str) -> Option<&str> {
        self.outputs.get(name).map(String::as_str)
    }

    /// Every output, by name
    pub fn outputs(&self) -> &BTreeMap<String, String> {
        &self.outputs
    }

    /// Outputs moved aside by an overwriting write, by backup name
    pub fn backups(&self) -> &BTreeMap<String, String> {
        &self.backups
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn list_documents(&self, extension: &str) -> ConversionResult<Vec<String>> {
        Ok(self
            .documents
            .keys()
            .filter(|name| has_extension(name, extension))
            .cloned()
            .collect())
    }

    fn read_document(&self, name: &str) -> ConversionResult<String> {
        self.documents
            .get(name)
            .map(|content| strip_bom(content).to_string())
            .ok_or_else(|| ConversionError::io(format!("{}: not found", name)))
    }

    fn write_output(
        &mut self,
        name: &str,
        content: &str,
        mode: &WriteMode,
    ) -> ConversionResult<()> {
        if let Some(previous) = self.outputs.get(name) {
            if !mode.overwrite {
                return Err(ConversionError::io(format!("{} already exists", name)));
            }
            if let Some(suffix) = &mode.backup_suffix {
                let base = format!("{}{}", name, suffix);
                let mut backup = base.clone();
                let mut n = 1;
                while self.backups.contains_key(&backup) {
                    backup = format!("{}.{}", base, n);
                    n += 1;
                }
                self.backups.insert(backup, previous.clone());
            }
        }
        self.outputs.insert(name.to_string(), content.to_string());
        Ok(())
    }
}
