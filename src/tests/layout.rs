use super::{layout_document, plain_text, wrap, LineKind};
use crate::content::{parse_document, DEFAULT_PORTFOLIO};
use crate::section::Region;

#[test]
fn test_wrap_respects_width() {
    assert_eq!(
        wrap("the quick brown fox jumps", 10),
        vec!["the quick", "brown fox", "jumps"]
    );
    assert_eq!(wrap("abcdefghij klm", 4), vec!["abcd", "efgh", "ij", "klm"]);
    assert!(wrap("   ", 8).is_empty());
}

#[test]
fn test_regions_cover_section_rows() {
    let doc = parse_document(
        "# Home {#hero}\n\nHi\n\n## Sub\n\ntext\n\n## About {#about}\n\nMore\n\n# Footer\n\nbye\n",
    )
    .unwrap();
    let layout = layout_document(&doc, 40);

    let rows: Vec<_> = layout.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(
        rows,
        vec![
            "Home", "", "Hi", "", "Sub", "", "text", "", "About", "", "More", "", "Footer", "",
            "bye", ""
        ]
    );
    assert_eq!(layout.lines[0].kind, LineKind::Heading(1));
    assert_eq!(layout.lines[2].kind, LineKind::Body);

    let hero = layout.registry.get("hero").unwrap();
    assert_eq!(hero.region, Region { top: 0, height: 8 });
    // The level-1 footer closes the level-2 about section.
    let about = layout.registry.get("about").unwrap();
    assert_eq!(about.region, Region { top: 8, height: 4 });
    assert!(layout.registry.section_at_row(14).is_none());
}

#[test]
fn test_lists_get_bullets_and_hanging_indent() {
    let doc = parse_document("## Skills {#skills}\n\n- one two three four\n- five\n").unwrap();
    let layout = layout_document(&doc, 10);
    let rows: Vec<_> = layout.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(rows, vec!["Skills", "", "• one two", "  three", "  four", "• five", ""]);
}

#[test]
fn test_narrower_layout_moves_regions_but_keeps_ids() {
    let doc = parse_document(DEFAULT_PORTFOLIO).unwrap();
    let wide = layout_document(&doc, 100);
    let narrow = layout_document(&doc, 30);

    assert_eq!(
        wide.registry.ids().collect::<Vec<_>>(),
        narrow.registry.ids().collect::<Vec<_>>()
    );
    assert!(narrow.height() > wide.height());
    let contact_wide = wide.registry.get("contact").unwrap().region.top;
    let contact_narrow = narrow.registry.get("contact").unwrap().region.top;
    assert!(contact_narrow > contact_wide);
    assert_eq!(wide.max_scroll(wide.height() + 5), 0);
}

#[test]
fn test_inline_markup_is_not_rendered() {
    assert_eq!(
        plain_text("**Mira** uses `rust`, see [the docs](https://example.com) [sic]"),
        "Mira uses rust, see the docs [sic]"
    );
    assert_eq!(plain_text("rapid_reader stays"), "rapid_reader stays");

    let doc = parse_document(DEFAULT_PORTFOLIO).unwrap();
    let layout = layout_document(&doc, 100);
    assert!(layout
        .lines
        .iter()
        .all(|l| !l.text.contains("**") && !l.text.contains('`')));
    assert!(layout.lines.iter().any(|l| l.text.starts_with("Mira Okafor:")));
}
