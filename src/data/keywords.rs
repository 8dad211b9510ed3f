//! xdoc keyword tables
//!
//! Section levels, header kinds and the prefix openers of the notation,
//! mapped to the typed values the translator dispatches on.

use phf::phf_map;

/// Heading level of a `chapter`/`section*` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionLevel {
    Chapter,
    Section,
    Section2,
    Section3,
}

impl SectionLevel {
    /// AsciiDoc heading marker, one level below the document title
    pub fn heading_prefix(self) -> &'static str {
        match self {
            SectionLevel::Chapter => "## ",
            SectionLevel::Section => "### ",
            SectionLevel::Section2 => "#### ",
            SectionLevel::Section3 => "##### ",
        }
    }

    pub fn is_chapter(self) -> bool {
        self == SectionLevel::Chapter
    }
}

/// Kind of a document header line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    Document,
    Authors,
    ChapterRef,
}

/// Section keyword to level
pub static SECTION_LEVELS: phf::Map<&'static str, SectionLevel> = phf_map! {
    "chapter" => SectionLevel::Chapter,
    "section" => SectionLevel::Section,
    "section2" => SectionLevel::Section2,
    "section3" => SectionLevel::Section3,
};

/// Header keyword to kind
pub static HEADER_KINDS: phf::Map<&'static str, HeaderKind> = phf_map! {
    "document" => HeaderKind::Document,
    "authors" => HeaderKind::Authors,
    "chapter-ref" => HeaderKind::ChapterRef,
};

/// Construct introduced by a literal prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opener {
    Code,
    List,
    TableRow,
    Emphasis,
    ListItem,
    TableCell,
    Reference,
    Link,
    Image,
    Table,
    Close,
}

/// Prefix literals in the order they are tested
pub const OPENERS: &[(&str, Opener)] = &[
    ("on[", Opener::Code),
    ("code-raw[", Opener::Code),
    ("code[", Opener::Code),
    ("ol[", Opener::List),
    ("ul[", Opener::List),
    ("tr[", Opener::TableRow),
    ("e[", Opener::Emphasis),
    ("item[", Opener::ListItem),
    ("td[", Opener::TableCell),
    ("ref:", Opener::Reference),
    ("link[", Opener::Link),
    ("img[", Opener::Image),
    ("table[", Opener::Table),
    ("]", Opener::Close),
];

/// The list opener that produces an ordered list when nothing follows it
pub const ORDERED_LIST_OPENER: &str = "ol[";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_lookup() {
        assert_eq!(SECTION_LEVELS.get("chapter"), Some(&SectionLevel::Chapter));
        assert_eq!(SECTION_LEVELS.get("section3"), Some(&SectionLevel::Section3));
        assert!(SECTION_LEVELS.get("section4").is_none());
    }

    #[test]
    fn test_heading_prefixes_deepen() {
        let prefixes: Vec<_> = [
            SectionLevel::Chapter,
            SectionLevel::Section,
            SectionLevel::Section2,
            SectionLevel::Section3,
        ]
        .iter()
        .map(|level| level.heading_prefix())
        .collect();
        assert_eq!(prefixes, vec!["## ", "### ", "#### ", "##### "]);
    }

    #[test]
    fn test_header_lookup() {
        assert_eq!(HEADER_KINDS.get("chapter-ref"), Some(&HeaderKind::ChapterRef));
        assert!(HEADER_KINDS.get("title").is_none());
    }

    #[test]
    fn test_openers_do_not_shadow_each_other() {
        // A later prefix must never start with an earlier one
        for (i, (earlier, _)) in OPENERS.iter().enumerate() {
            for (later, _) in &OPENERS[i + 1..] {
                assert!(!later.starts_with(earlier), "{} shadows {}", earlier, later);
            }
        }
    }
}
