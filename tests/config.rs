//! Configuration tests: config paths and print settings

use pyprint::config::PrintConfig;
use pyprint::config_paths;
use pyprint::document::{FontFamily, PageSize};
use pyprint::Theme;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("pyprint"));
    }
}

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(path) = config_paths::config_file() {
        assert!(path.to_string_lossy().ends_with("config.yaml"));
    }
}

#[test]
fn test_logs_dir_is_subdir_of_config() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(&config));
    }
}

// ========================================================================
// Print Config Tests
// ========================================================================

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = PrintConfig::load_from(&dir.path().join("config.yaml"));
    assert_eq!(config, PrintConfig::default());
}

#[test]
fn test_invalid_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "font_size: [not, a, number]\n").unwrap();

    assert_eq!(PrintConfig::load_from(&path), PrintConfig::default());
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        "theme: idle-dark\nfont: Courier-Oblique\nfont_size: 10\npage_size: letter\ntab_width: 2\n",
    )
    .unwrap();

    let config = PrintConfig::load_from(&path);
    assert_eq!(config.theme, "idle-dark");
    assert_eq!(config.font, FontFamily::CourierOblique);
    assert_eq!(config.font_size, 10.0);
    assert_eq!(config.page_size, PageSize::Letter);
    assert_eq!(config.tab_width, 2);
    assert_eq!(config.leading, 12.0);
}

#[test]
fn test_config_serialize_deserialize() {
    let config = PrintConfig {
        theme: "idle-dark".to_string(),
        ..PrintConfig::default()
    };
    let yaml = serde_yaml::to_string(&config).unwrap();
    let parsed: PrintConfig = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_margins_too_large_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "margins:\n  left: 300\n  right: 300\n").unwrap();

    let config = PrintConfig::load_from(&path);
    assert!(config.page_style(&Theme::idle()).is_err());
}
