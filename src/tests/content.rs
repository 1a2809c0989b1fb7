use super::{load_document, parse_document, split_identity, ContentError, DEFAULT_PORTFOLIO};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_split_identity() {
    assert_eq!(
        split_identity("About Me {#about}"),
        ("About Me".to_string(), Some("about".to_string()))
    );
    assert_eq!(
        split_identity("  Work_History {#work-history_2}  "),
        ("Work_History".to_string(), Some("work-history_2".to_string()))
    );
    assert_eq!(split_identity("Plain"), ("Plain".to_string(), None));
    assert_eq!(
        split_identity("Braces {#not valid}"),
        ("Braces {#not valid}".to_string(), None)
    );
    assert_eq!(split_identity("Empty {#}"), ("Empty {#}".to_string(), None));
}

#[test]
fn test_headings_become_blocks_with_bodies() {
    let doc = parse_document("Intro line\n\n# Home {#hero}\n\nHello\n\n## Notes\n\nA\n\n## About {#about}\n\nB\n")
        .unwrap();

    let summary: Vec<_> = doc
        .blocks
        .iter()
        .map(|b| (b.level, b.title.as_str(), b.id.as_deref(), b.body.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (0, "", None, "Intro line"),
            (1, "Home", Some("hero"), "Hello"),
            (2, "Notes", None, "A"),
            (2, "About", Some("about"), "B"),
        ]
    );
    assert_eq!(doc.section_ids().collect::<Vec<_>>(), vec!["hero", "about"]);
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let err = parse_document("## One {#a}\n\n## Two {#a}\n").unwrap_err();
    assert!(matches!(err, ContentError::DuplicateSection(ref id) if id == "a"));
}

#[test]
fn test_default_portfolio_has_all_navigation_targets() {
    let doc = parse_document(DEFAULT_PORTFOLIO).unwrap();
    assert_eq!(
        doc.section_ids().collect::<Vec<_>>(),
        vec!["hero", "about", "projects", "journey", "skills", "contact"]
    );
}

#[test]
fn test_load_document_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.md");
    assert!(matches!(
        load_document(&missing),
        Err(ContentError::Io { ref path, .. }) if *path == missing
    ));
}

#[test]
fn test_load_document_reads_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "## Skills {{#skills}}\n\n- Rust").unwrap();
    let doc = load_document(file.path()).unwrap();
    assert_eq!(doc.blocks[0].id.as_deref(), Some("skills"));
    assert_eq!(doc.blocks[0].body, "- Rust");
}
