use super::Theme;

#[test]
fn test_theme_names_resolve() {
    assert_eq!(Theme::by_name("light"), Theme::light());
    assert_eq!(Theme::by_name(" Dark "), Theme::dark());
}

#[test]
fn test_unknown_theme_falls_back_to_dark() {
    assert_eq!(Theme::by_name("sepia"), Theme::dark());
}

#[test]
fn test_match_colours_differ_from_body() {
    for theme in [Theme::light(), Theme::dark()] {
        assert_ne!(theme.match_bg, theme.background);
        assert_ne!(theme.highlight_bg, theme.background);
    }
}
