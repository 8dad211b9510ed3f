//! Chapter and Cross-Reference Module
//!
//! This module keeps the run-wide table of chapter ids and the files that
//! define them, and renders the AsciiDoc forms of cross references, links
//! and chapter includes.

use indexmap::IndexMap;

use crate::utils::error::{ConversionError, ConversionResult};

/// What happens when a chapter id is registered a second time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateChapterPolicy {
    /// Fail the run
    #[default]
    Error,
    /// Keep the file seen last
    Overwrite,
}

/// Outcome of registering a chapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// First time this id was seen
    New,
    /// The id was already known; holds the file it pointed to before
    Replaced(String),
}

/// Chapter id to output file name, in registration order
#[derive(Debug, Clone, Default)]
pub struct ChapterTable {
    chapters: IndexMap<String, String>,
    policy: DuplicateChapterPolicy,
}

impl ChapterTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: DuplicateChapterPolicy) -> Self {
        Self {
            chapters: IndexMap::new(),
            policy,
        }
    }

    /// Record that `id` is defined in `file`.
    pub fn register(&mut self, id: &str, file: &str) -> ConversionResult<Registration> {
        match self.chapters.get(id) {
            Some(previous) if self.policy == DuplicateChapterPolicy::Error => {
                Err(ConversionError::DuplicateChapter {
                    id: id.to_string(),
                    first: previous.clone(),
                    second: file.to_string(),
                })
            }
            _ => {
                log::debug!("Chapter '{}' defined in {}", id, file);
                Ok(match self.chapters.insert(id.to_string(), file.to_string()) {
                    Some(previous) => Registration::Replaced(previous),
                    None => Registration::New,
                })
            }
        }
    }

    /// File defining `id`, if known
    pub fn resolve(&self, id: &str) -> Option<&str> {
        self.chapters.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// Registered chapters, in the order they were first seen
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.chapters.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// `<<id,text>>`
pub fn render_cross_reference(id: &str, text: &str) -> String {
    format!("<<{},{}>>", id, text)
}

/// `link:target[text]`
pub fn render_link(target: &str, text: &str) -> String {
    format!("link:{}[{}]", target, text)
}

/// `include::file[]`
pub fn render_include(file: &str) -> String {
    format!("include::{}[]", file)
}

/// `[id="id"]`
pub fn render_anchor(id: &str) -> String {
    format!("[id=\"{}\"]", id)
}
