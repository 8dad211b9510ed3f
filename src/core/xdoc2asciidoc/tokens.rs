//! Token matching for xdoc lines
//!
//! Two families of constructs are recognised here:
//!
//! - **Whole-line constructs** (section headings and document headers),
//!   matched against the entire fragment. Nothing follows them.
//! - **Prefix constructs** (openers, inline references, links, images and
//!   the closing marker), detected by a literal prefix test. They consume
//!   a known number of bytes and leave a remainder to be processed.

use lazy_static::lazy_static;
use regex::Regex;

use crate::data::keywords::{
    HeaderKind, Opener, SectionLevel, HEADER_KINDS, OPENERS, SECTION_LEVELS,
};
use crate::utils::error::{ConversionError, ConversionResult};

lazy_static! {
    /// `chapter:id[Title]`
    static ref SECTION_WITH_ID: Regex = Regex::new(
        r"^\s*(chapter|section|section2|section3):([^)]+)\[([^\]]+)\]\s*$"
    ).unwrap();

    /// `section[Title]`
    static ref SECTION: Regex = Regex::new(
        r"^\s*(chapter|section|section2|section3)\[([^\]]+)\]\s*$"
    ).unwrap();

    /// `document[Title]`, `authors[Names]`, `chapter-ref[id]`
    static ref HEADER: Regex = Regex::new(
        r"^(document|authors|chapter-ref)\[([^\[\]]+)\]\s*$"
    ).unwrap();

    /// `ref:id[text]remainder`
    static ref REFERENCE: Regex = Regex::new(
        r"^ref:([^\[\]]+)\[([^\[\]]+)\](.*)$"
    ).unwrap();

    /// `link[target] [text]remainder`
    static ref LINK: Regex = Regex::new(
        r"^link\[([^\[\]]+)\]\s*\[([^\[\]]+)\](.*)$"
    ).unwrap();

    /// `img[src][..][..][..]remainder`; only the source is used
    static ref IMAGE: Regex = Regex::new(
        r"^img\[([^\]]+)\]\[[^\]]*\]\[[^\]]*\]\[[^\]]*\](.*)$"
    ).unwrap();
}

/// A construct occupying an entire line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineConstruct<'a> {
    /// Chapter or section heading
    Section {
        level: SectionLevel,
        id: &'a str,
        title: &'a str,
        /// Whether the id was written out (`chapter:id[..]`)
        explicit_id: bool,
    },
    /// Document header item
    Header { kind: HeaderKind, value: &'a str },
}

/// An inline construct parsed from the start of a fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineMatch<'a> {
    /// Reference id, link target or image source
    pub target: &'a str,
    /// Display text (empty for images)
    pub label: &'a str,
    /// Number of bytes consumed from the fragment
    pub consumed: usize,
}

fn section_level(keyword: &str) -> ConversionResult<SectionLevel> {
    SECTION_LEVELS
        .get(keyword)
        .copied()
        .ok_or_else(|| ConversionError::parse(format!("Invalid type : {}", keyword)))
}

/// Match the whole-line constructs in priority order.
pub fn match_whole_line(line: &str) -> ConversionResult<Option<LineConstruct<'_>>> {
    if let Some(caps) = SECTION_WITH_ID.captures(line) {
        let (_, [keyword, id, title]) = caps.extract();
        return Ok(Some(LineConstruct::Section {
            level: section_level(keyword)?,
            id,
            title,
            explicit_id: true,
        }));
    }

    if let Some(caps) = SECTION.captures(line) {
        let (_, [keyword, title]) = caps.extract();
        return Ok(Some(LineConstruct::Section {
            level: section_level(keyword)?,
            id: title,
            title,
            explicit_id: false,
        }));
    }

    if let Some(caps) = HEADER.captures(line) {
        let (_, [keyword, value]) = caps.extract();
        let kind = HEADER_KINDS.get(keyword).copied().ok_or_else(|| {
            ConversionError::parse(format!("Invalid header item : {}", keyword))
        })?;
        return Ok(Some(LineConstruct::Header { kind, value }));
    }

    Ok(None)
}

/// Find the prefix opener a fragment starts with, and its length.
pub fn match_opener(fragment: &str) -> Option<(Opener, usize)> {
    OPENERS
        .iter()
        .find(|(literal, _)| fragment.starts_with(literal))
        .map(|(literal, opener)| (*opener, literal.len()))
}

fn inline_match<'a>(re: &Regex, fragment: &'a str, with_label: bool) -> Option<InlineMatch<'a>> {
    let caps = re.captures(fragment)?;
    let target = caps.get(1)?.as_str();
    let label = if with_label {
        caps.get(2)?.as_str()
    } else {
        ""
    };
    let remainder = caps.get(caps.len() - 1)?.as_str();
    Some(InlineMatch {
        target,
        label,
        consumed: fragment.len() - remainder.len(),
    })
}

/// Parse `ref:id[text]` at the start of a fragment.
pub fn parse_reference(fragment: &str) -> Option<InlineMatch<'_>> {
    inline_match(&REFERENCE, fragment, true)
}

/// Parse `link[target][text]` at the start of a fragment.
pub fn parse_link(fragment: &str) -> Option<InlineMatch<'_>> {
    inline_match(&LINK, fragment, true)
}

/// Parse `img[src][][][]` at the start of a fragment.
pub fn parse_image(fragment: &str) -> Option<InlineMatch<'_>> {
    inline_match(&IMAGE, fragment, false)
}
