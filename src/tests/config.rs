use super::Config;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Config::load_from(&dir.path().join("folio.toml"));
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.observer_options().thresholds(), &[0.1, 0.3, 0.5, 0.7, 0.9]);
}

#[test]
fn test_empty_file_matches_default() {
    // Field-level defaults and `Config::default` describe the same settings.
    assert_eq!(Config::parse(""), Some(Config::default()));
}

#[test]
fn test_partial_file_overrides_only_given_keys() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "header_offset = 2\ntheme = \"light\"\nendpoint = \"http://example.test/contact\""
    )
    .unwrap();

    let cfg = Config::load_from(file.path());

    assert_eq!(cfg.header_offset, 2);
    assert_eq!(cfg.theme.as_deref(), Some("light"));
    assert_eq!(cfg.endpoint, "http://example.test/contact");
    assert_eq!(cfg.panel_close_delay_ms, 400);
    assert_eq!(cfg.status_dismiss_secs, 5);
}

#[test]
fn test_malformed_file_falls_back_to_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "header_offset = \"lots\"").unwrap();
    assert_eq!(Config::load_from(file.path()), Config::default());
}

#[test]
fn test_root_margins_are_bounded() {
    let cfg = Config {
        root_margin_top: 0.9,
        root_margin_bottom: -1.0,
        ..Config::default()
    };
    let options = cfg.observer_options();
    assert!((options.root_margin.top - 0.5).abs() < f64::EPSILON);
    assert!(options.root_margin.bottom.abs() < f64::EPSILON);
}
