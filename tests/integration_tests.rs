//! Integration tests for xdoc to AsciiDoc conversion

use pretty_assertions::assert_eq;
use xdoc2asciidoc::{
    xdoc_to_asciidoc, xdoc_to_asciidoc_with_options, ConversionError, Converter,
    DocumentStore, MemoryDocumentStore, StdDocumentStore, WarningKind, X2AOptions,
};

fn memory_store(documents: &[(&str, &str)]) -> MemoryDocumentStore {
    let mut store = MemoryDocumentStore::new();
    for (name, content) in documents {
        store.add_document(name, content);
    }
    store
}

// ============================================================================
// Headings and Headers
// ============================================================================

mod headings {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_heading_levels() {
        let input = "chapter:c[Chapter]\nsection:s[Section]\nsection2[Sub]\nsection3[SubSub]";
        let expected = "\
[id=\"c\"]
## Chapter
[id=\"s\"]
### Section
#### Sub
##### SubSub
";
        assert_eq!(xdoc_to_asciidoc(input).unwrap(), expected);
    }

    #[test]
    fn test_root_header() {
        let input = "document[User Guide]\nauthors[A. Author, B. Author]";
        let expected = "\
= User Guide
A. Author, B. Author
:doctype: book
:encoding: utf-8
:lang: en
:toc: left
:toclevels: 2
:numbered:

";
        assert_eq!(xdoc_to_asciidoc(input).unwrap(), expected);
    }

    #[test]
    fn test_indented_heading() {
        assert_eq!(xdoc_to_asciidoc("   section[Indented]  ").unwrap(), "### Indented\n");
    }
}

// ============================================================================
// Inline Constructs
// ============================================================================

mod inline {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mixed_paragraph() {
        let input = "Read e[carefully]: ref:setup[Setup], link[https://asciidoc.org] [AsciiDoc] and img[logo.png][][][]";
        let expected = "Read *carefully*: <<setup,Setup>>, link:https://asciidoc.org[AsciiDoc] and image:logo.png[align=\"center\"]\n";
        assert_eq!(xdoc_to_asciidoc(input).unwrap(), expected);
    }

    #[test]
    fn test_emphasis_spanning_lines() {
        let input = "e[first\nsecond] after";
        assert_eq!(xdoc_to_asciidoc(input).unwrap(), "*first\nsecond* after\n");
    }

    #[test]
    fn test_escaped_brackets() {
        assert_eq!(
            xdoc_to_asciidoc(r"Use \[brackets\] freely").unwrap(),
            "Use [brackets] freely\n"
        );
    }
}

// ============================================================================
// Block Constructs
// ============================================================================

mod blocks {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_code_block_is_verbatim() {
        let input = "\
code[Java][
public int[] values() {
    return e[x];
}
]
After";
        let expected = "\
----
public int[] values() {
    return e[x];
}
----
After
";
        assert_eq!(xdoc_to_asciidoc(input).unwrap(), expected);
    }

    #[test]
    fn test_raw_code_block() {
        assert_eq!(
            xdoc_to_asciidoc("code-raw[\n<xml/>\n]").unwrap(),
            "----\n<xml/>\n----\n"
        );
    }

    #[test]
    fn test_lists() {
        let input = "\
ol[
  item[Install]
  item[Run e[x2a]]
]";
        let expected = "\
[options=\"compact\"]
1. Install
1. Run *x2a*

";
        assert_eq!(xdoc_to_asciidoc(input).unwrap(), expected);
    }

    #[test]
    fn test_table_with_escaped_pipe() {
        let input = "\
table[
  tr[ td[Flag] td[Meaning] ]
  tr[ td[a|b] td[either] ]
]";
        let expected = "\
|========
| Flag | Meaning
| a\\|b | either
|========
";
        assert_eq!(xdoc_to_asciidoc(input).unwrap(), expected);
    }

    #[test]
    fn test_table_on_one_line() {
        let out = xdoc_to_asciidoc("table[ tr[ td[a] td[b] ] ]").unwrap();
        assert!(out.starts_with("|========\n"));
        assert!(out.contains("| a | b\n"));
        assert!(out.ends_with("|========\n"));
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

mod diagnostics {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_warnings_carry_line_numbers() {
        let out = xdoc_to_asciidoc_with_options("fine\ntext]\n", &X2AOptions::default())
            .unwrap();
        assert_eq!(out.content, "fine\ntext\n");
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].kind, WarningKind::UnmatchedClose);
        assert_eq!(out.warnings[0].line, Some(2));
    }

    #[test]
    fn test_invalid_image() {
        let err = xdoc_to_asciidoc("img[a.png]").unwrap_err();
        assert_eq!(err, ConversionError::parse_at("Invalid images pattern", 1, 1));
    }

    #[test]
    fn test_recursion_limit_reports_line() {
        let input = format!("ok\n{}", "e[".repeat(150));
        let err = xdoc_to_asciidoc(&input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Recursion limit of 100 reached at line 2"
        );
    }
}

// ============================================================================
// Multi-document Runs
// ============================================================================

mod runs {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_book_in_memory() {
        let store = memory_store(&[
            ("00 book.xdoc", "document[Guide]\nauthors[Me]\nchapter-ref[start]\nchapter-ref[usage]"),
            ("getting-started.xdoc", "chapter:start[Getting Started]\nHello."),
            ("usage.xdoc", "chapter[usage]\nsection:opts[Options]\nSee ref:start[the start]."),
        ]);
        let mut converter = Converter::new(store, X2AOptions::default());
        let summary = converter.execute().unwrap();
        assert_eq!(summary.converted.len(), 3);
        assert_eq!(summary.root.as_deref(), Some("00 book.xdoc"));

        let store = converter.store();
        let book = store.output("00_book.asc").unwrap();
        assert!(book.starts_with("= Guide\nMe\n:doctype: book\n"));
        assert!(book.ends_with(
            "include::getting_started.asc[]\ninclude::usage.asc[]\ninclude::stunt_index.asc[]\n"
        ));
        assert_eq!(
            store.output("usage.asc"),
            Some("## usage\n[id=\"opts\"]\n### Options\nSee <<start,the start>>.\n")
        );
    }

    #[test]
    fn test_duplicate_chapter_across_documents() {
        let store = memory_store(&[("a.xdoc", "chapter:x[A]"), ("b.xdoc", "chapter:x[B]")]);
        let mut converter = Converter::new(store, X2AOptions::default());
        let err = converter.execute().unwrap_err();
        assert!(matches!(
            err.root_cause(),
            ConversionError::DuplicateChapter { id, .. } if id == "x"
        ));
    }

    #[test]
    fn test_custom_extensions() {
        let store = memory_store(&[("a.xd", "text"), ("b.xdoc", "ignored")]);
        let options = X2AOptions {
            input_extension: "xd".to_string(),
            output_extension: "adoc".to_string(),
            ..Default::default()
        };
        let mut converter = Converter::new(store, options);
        converter.execute().unwrap();
        assert_eq!(converter.store().output("a.adoc"), Some("text\n"));
        assert_eq!(converter.store().output("b.adoc"), None);
    }
}

// ============================================================================
// Filesystem Store
// ============================================================================

mod filesystem {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn dirs() -> (tempfile::TempDir, tempfile::TempDir) {
        (tempfile::tempdir().unwrap(), tempfile::tempdir().unwrap())
    }

    #[test]
    fn test_run_on_disk() {
        let (input, output) = dirs();
        fs::write(input.path().join("book.xdoc"), "document[Book]\nchapter-ref[one]").unwrap();
        fs::write(input.path().join("chapter one.xdoc"), "\u{feff}chapter:one[One]").unwrap();
        fs::write(input.path().join("notes.txt"), "not a document").unwrap();

        let store = StdDocumentStore::new(input.path(), output.path());
        let mut converter = Converter::new(store, X2AOptions::default());
        let summary = converter.execute().unwrap();
        assert_eq!(summary.converted.len(), 2);

        let book = fs::read_to_string(output.path().join("book.asc")).unwrap();
        assert_eq!(book, "= Book\ninclude::chapter_one.asc[]\ninclude::stunt_index.asc[]\n");
        let chapter = fs::read_to_string(output.path().join("chapter_one.asc")).unwrap();
        assert_eq!(chapter, "[id=\"one\"]\n## One\n");
        let stub = fs::read_to_string(output.path().join("stunt_index.asc")).unwrap();
        assert_eq!(stub, "[index]\n== Dummy Index");
    }

    #[test]
    fn test_existing_output_is_kept_by_default() {
        let (input, output) = dirs();
        fs::write(input.path().join("a.xdoc"), "new").unwrap();
        fs::write(output.path().join("a.asc"), "old").unwrap();

        let store = StdDocumentStore::new(input.path(), output.path());
        let mut converter = Converter::new(store, X2AOptions::default());
        assert!(converter.execute().is_err());
        assert_eq!(fs::read_to_string(output.path().join("a.asc")).unwrap(), "old");
    }

    #[test]
    fn test_overwrite_with_backups() {
        let (input, output) = dirs();
        fs::write(input.path().join("a.xdoc"), "new").unwrap();
        fs::write(output.path().join("a.asc"), "old").unwrap();
        fs::write(output.path().join("a.asc.bak"), "older").unwrap();

        let store = StdDocumentStore::new(input.path(), output.path());
        let options = X2AOptions::overwriting(Some(".bak".to_string()));
        let mut converter = Converter::new(store, options);
        converter.execute().unwrap();

        let read = |name: &str| fs::read_to_string(output.path().join(name)).unwrap();
        assert_eq!(read("a.asc"), "new\n");
        assert_eq!(read("a.asc.bak"), "older");
        assert_eq!(read("a.asc.bak.1"), "old");
    }

    #[test]
    fn test_list_documents_is_sorted() {
        let (input, output) = dirs();
        for name in ["c.xdoc", "a.xdoc", "b.xdoc"] {
            fs::write(input.path().join(name), "").unwrap();
        }
        let store = StdDocumentStore::new(input.path(), output.path());
        assert_eq!(
            store.list_documents("xdoc").unwrap(),
            vec!["a.xdoc", "b.xdoc", "c.xdoc"]
        );
    }
}
