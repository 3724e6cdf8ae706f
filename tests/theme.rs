use pyprint::config_paths;
use pyprint::syntax::{TokenCategory, CATEGORY_NAMES};
use pyprint::theme::{
    from_file, load_theme, Color, ColorTable, Theme, BUILTIN_THEMES, IDLE_DARK_YAML, IDLE_YAML,
};

#[test]
fn test_color_from_hex_6() {
    let color = Color::from_hex("#FEFDFD").unwrap();
    assert_eq!(color.r, 0xFE);
    assert_eq!(color.g, 0xFD);
    assert_eq!(color.b, 0xFD);
    assert_eq!(color.a, 255);
}

#[test]
fn test_color_from_hex_8() {
    let color = Color::from_hex("#1E1E1E80").unwrap();
    assert_eq!(color.r, 0x1E);
    assert_eq!(color.a, 0x80);
}

#[test]
fn test_named_colors() {
    assert_eq!(Color::parse("orange").unwrap(), Color::rgb(0xFF, 0xA5, 0x00));
    assert_eq!(Color::parse("darkcyan").unwrap(), Color::rgb(0x00, 0x8B, 0x8B));
    assert!(Color::parse("not-a-color").is_err());
}

#[test]
fn test_idle_yaml_parses() {
    let theme = Theme::from_yaml(IDLE_YAML).unwrap();
    assert_eq!(theme.name, "IDLE Classic");
    assert_eq!(theme.background, Color::rgb(0xFE, 0xFD, 0xFD));
    assert_eq!(theme.gutter, Color::parse("gray").unwrap());
}

#[test]
fn test_idle_dark_yaml_parses() {
    let theme = Theme::from_yaml(IDLE_DARK_YAML).unwrap();
    assert_eq!(theme.name, "IDLE Dark");
    assert_eq!(theme.background.r, 0x1E);
}

#[test]
fn test_idle_default_table() {
    let table = Theme::idle().syntax;
    let expect = |category: TokenCategory, name: &str| {
        assert_eq!(
            table.resolve(category),
            Color::parse(name).unwrap(),
            "{}",
            category
        );
    };

    expect(TokenCategory::Keyword, "orange");
    expect(TokenCategory::NameBuiltin, "purple");
    expect(TokenCategory::NameFunction, "blue");
    expect(TokenCategory::NameClass, "darkblue");
    expect(TokenCategory::String, "green");
    expect(TokenCategory::Comment, "red");
    expect(TokenCategory::Operator, "black");
    expect(TokenCategory::Number, "darkcyan");
    expect(TokenCategory::Name, "black");
}

#[test]
fn test_subcategories_inherit() {
    let table = Theme::idle().syntax;
    let same = |child: TokenCategory, parent: TokenCategory| {
        assert_eq!(table.resolve(child), table.resolve(parent), "{}", child);
    };

    same(TokenCategory::KeywordConstant, TokenCategory::Keyword);
    same(TokenCategory::StringDoc, TokenCategory::String);
    same(TokenCategory::CommentHashbang, TokenCategory::Comment);
    same(TokenCategory::NameBuiltinPseudo, TokenCategory::NameBuiltin);
    same(TokenCategory::NumberHex, TokenCategory::Number);
}

#[test]
fn test_every_category_resolves_deterministically() {
    let theme = Theme::idle();
    for (category, name) in CATEGORY_NAMES {
        assert_eq!(TokenCategory::from_name(name), Some(*category));
        let category = *category;
        assert_eq!(
            theme.syntax.resolve(category),
            theme.syntax.resolve(category)
        );
    }
}

#[test]
fn test_empty_table_uses_default() {
    let table = ColorTable::new(Color::rgb(1, 2, 3));
    assert_eq!(
        table.resolve(TokenCategory::NameFunctionMagic),
        Color::rgb(1, 2, 3)
    );
}

#[test]
fn test_from_builtin() {
    let theme = Theme::from_builtin("idle-dark").unwrap();
    assert_eq!(theme.name, "IDLE Dark");
    assert!(Theme::from_builtin("nonexistent").is_err());
}

#[test]
fn test_all_builtin_themes_parse() {
    for builtin in BUILTIN_THEMES {
        let theme = Theme::from_yaml(builtin.yaml)
            .unwrap_or_else(|e| panic!("Failed to parse theme '{}': {}", builtin.id, e));
        assert!(
            !theme.name.is_empty(),
            "Theme '{}' has empty name",
            builtin.id
        );
    }
}

#[test]
fn test_theme_requires_default() {
    let yaml = r#"
name: Broken
page:
  background: white
gutter:
  foreground: gray
syntax:
  keyword: orange
"#;
    let err = Theme::from_yaml(yaml).unwrap_err();
    assert!(err.contains("default"), "{}", err);
}

#[test]
fn test_theme_rejects_unknown_category() {
    let yaml = r#"
name: Broken
page:
  background: white
gutter:
  foreground: gray
syntax:
  default: black
  keyword.bogus: orange
"#;
    let err = Theme::from_yaml(yaml).unwrap_err();
    assert!(err.contains("keyword.bogus"), "{}", err);
}

#[test]
fn test_load_theme_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mono.yaml");
    std::fs::write(
        &path,
        "name: Mono\npage:\n  background: white\ngutter:\n  foreground: black\nsyntax:\n  default: black\n",
    )
    .unwrap();

    let theme = load_theme(&path.to_string_lossy()).unwrap();
    assert_eq!(theme.name, "Mono");
    assert_eq!(from_file(&path).unwrap(), theme);
    assert_eq!(
        theme.syntax.resolve(TokenCategory::Keyword),
        Color::rgb(0, 0, 0)
    );
}

#[test]
fn test_load_theme_missing_file() {
    assert!(load_theme("/nonexistent/theme.yaml").is_err());
}

#[test]
fn test_themes_dir_is_subdir_of_config() {
    if let (Some(config), Some(themes)) = (config_paths::config_dir(), config_paths::themes_dir())
    {
        assert!(themes.starts_with(&config));
    }
}
