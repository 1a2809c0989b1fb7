use super::{Theme, ThemeToggle};

#[test]
fn test_colorfgbg_background_decides_theme() {
    assert_eq!(Theme::from_colorfgbg("0;15"), Some(Theme::Light));
    assert_eq!(Theme::from_colorfgbg("0;default;7"), Some(Theme::Light));
    assert_eq!(Theme::from_colorfgbg("15;0"), Some(Theme::Dark));
    // Bright black is still a dark background.
    assert_eq!(Theme::from_colorfgbg("0;8"), Some(Theme::Dark));
    assert_eq!(Theme::from_colorfgbg("garbage"), None);
}

#[test]
fn test_parse_is_case_insensitive() {
    assert_eq!(Theme::parse(" Dark "), Some(Theme::Dark));
    assert_eq!(Theme::parse("LIGHT"), Some(Theme::Light));
    assert_eq!(Theme::parse("sepia"), None);
}

#[test]
fn test_toggle_flips_and_publishes() {
    let (mut toggle, theme) = ThemeToggle::new(Theme::Light);

    assert_eq!(toggle.toggle(), Theme::Dark);
    assert_eq!(theme.get(), Theme::Dark);
    assert_eq!(toggle.toggle(), Theme::Light);
    assert_eq!(theme.version(), 2);
}
