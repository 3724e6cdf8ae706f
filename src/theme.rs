//! Theme system for printed documents
//!
//! Provides YAML-based theming support with compile-time embedded themes
//! and user-defined themes from config directories.
//!
//! Theme loading priority:
//! 1. Explicit path to a `.yaml`/`.yml` file
//! 2. User config: `~/.config/pyprint/themes/{id}.yaml`
//! 3. Embedded: Built-in themes compiled into binary

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;

use crate::syntax::TokenCategory;

// Embed theme YAML files at compile time
pub const IDLE_YAML: &str = include_str!("../themes/idle.yaml");
pub const IDLE_DARK_YAML: &str = include_str!("../themes/idle-dark.yaml");

/// Id of the theme used when nothing else is configured
pub const DEFAULT_THEME_ID: &str = "idle";

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier for config (e.g. "idle", "idle-dark")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "idle",
        yaml: IDLE_YAML,
    },
    BuiltinTheme {
        id: "idle-dark",
        yaml: IDLE_DARK_YAML,
    },
];

/// Where the theme came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    /// User-defined theme in ~/.config/pyprint/themes/
    User,
    /// Built-in theme embedded in binary
    Builtin,
}

/// Information about an available theme
#[derive(Debug, Clone)]
pub struct ThemeInfo {
    /// Stable identifier (e.g., "idle", "my-custom-theme")
    pub id: String,
    /// Display name from YAML (e.g., "IDLE Classic")
    pub name: String,
    /// Where this theme is loaded from
    pub source: ThemeSource,
}

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
}

fn looks_like_path(spec: &str) -> bool {
    let path = Path::new(spec);
    path.extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml")
        || path.components().count() > 1
}

/// Load theme by id or path with priority: path → user → builtin
pub fn load_theme(spec: &str) -> Result<Theme, String> {
    if looks_like_path(spec) {
        tracing::info!("Loading theme file {}", spec);
        return from_file(Path::new(spec));
    }

    if let Some(user_dir) = crate::config_paths::themes_dir() {
        let user_path = user_dir.join(format!("{}.yaml", spec));
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::debug!("Loading builtin theme: {}", spec);
    Theme::from_builtin(spec)
}

/// List all available themes from all sources
///
/// User themes override builtins with the same id.
pub fn list_available_themes() -> Vec<ThemeInfo> {
    let mut themes = Vec::new();
    let mut seen_ids = std::collections::HashSet::new();

    if let Some(user_dir) = crate::config_paths::themes_dir() {
        if let Ok(entries) = std::fs::read_dir(&user_dir) {
            let mut paths: Vec<_> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
            paths.sort();
            for path in paths {
                if path
                    .extension()
                    .is_some_and(|ext| ext == "yaml" || ext == "yml")
                {
                    if let Some(id) = path.file_stem().and_then(|s| s.to_str()) {
                        if seen_ids.insert(id.to_string()) {
                            let name = extract_theme_name(&path).unwrap_or_else(|| id.to_string());
                            themes.push(ThemeInfo {
                                id: id.to_string(),
                                name,
                                source: ThemeSource::User,
                            });
                        }
                    }
                }
            }
        }
    }

    for builtin in BUILTIN_THEMES {
        if seen_ids.insert(builtin.id.to_string()) {
            let name = Theme::from_yaml(builtin.yaml)
                .map(|t| t.name)
                .unwrap_or_else(|_| builtin.id.to_string());
            themes.push(ThemeInfo {
                id: builtin.id.to_string(),
                name,
                source: ThemeSource::Builtin,
            });
        }
    }

    themes
}

/// Extract theme name from YAML file without full parsing
fn extract_theme_name(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("name:") {
            let value = trimmed.strip_prefix("name:")?.trim();
            let value = value.trim_matches('"').trim_matches('\'');
            return Some(value.to_string());
        }
    }
    None
}

/// Named colors accepted in theme files
const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::rgb(0x00, 0x00, 0x00)),
    ("white", Color::rgb(0xFF, 0xFF, 0xFF)),
    ("gray", Color::rgb(0x80, 0x80, 0x80)),
    ("grey", Color::rgb(0x80, 0x80, 0x80)),
    ("lightgray", Color::rgb(0xD3, 0xD3, 0xD3)),
    ("darkgray", Color::rgb(0xA9, 0xA9, 0xA9)),
    ("red", Color::rgb(0xFF, 0x00, 0x00)),
    ("darkred", Color::rgb(0x8B, 0x00, 0x00)),
    ("maroon", Color::rgb(0x80, 0x00, 0x00)),
    ("green", Color::rgb(0x00, 0x80, 0x00)),
    ("darkgreen", Color::rgb(0x00, 0x64, 0x00)),
    ("olive", Color::rgb(0x80, 0x80, 0x00)),
    ("blue", Color::rgb(0x00, 0x00, 0xFF)),
    ("darkblue", Color::rgb(0x00, 0x00, 0x8B)),
    ("navy", Color::rgb(0x00, 0x00, 0x80)),
    ("cyan", Color::rgb(0x00, 0xFF, 0xFF)),
    ("darkcyan", Color::rgb(0x00, 0x8B, 0x8B)),
    ("teal", Color::rgb(0x00, 0x80, 0x80)),
    ("magenta", Color::rgb(0xFF, 0x00, 0xFF)),
    ("purple", Color::rgb(0x80, 0x00, 0x80)),
    ("orange", Color::rgb(0xFF, 0xA5, 0x00)),
    ("darkorange", Color::rgb(0xFF, 0x8C, 0x00)),
    ("yellow", Color::rgb(0xFF, 0xFF, 0x00)),
    ("brown", Color::rgb(0xA5, 0x2A, 0x2A)),
];

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Channels scaled to `0.0..=1.0` for PDF color operators
    pub fn to_rgb_f32(&self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }

    /// Format as lowercase `#rrggbb` (alpha is dropped)
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        if !s.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        match s.len() {
            6 => Ok(Color {
                r: u8::from_str_radix(&s[0..2], 16).map_err(|e| e.to_string())?,
                g: u8::from_str_radix(&s[2..4], 16).map_err(|e| e.to_string())?,
                b: u8::from_str_radix(&s[4..6], 16).map_err(|e| e.to_string())?,
                a: 255,
            }),
            8 => Ok(Color {
                r: u8::from_str_radix(&s[0..2], 16).map_err(|e| e.to_string())?,
                g: u8::from_str_radix(&s[2..4], 16).map_err(|e| e.to_string())?,
                b: u8::from_str_radix(&s[4..6], 16).map_err(|e| e.to_string())?,
                a: u8::from_str_radix(&s[6..8], 16).map_err(|e| e.to_string())?,
            }),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    /// Look up a named color (case-insensitive)
    pub fn named(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, color)| *color)
    }

    /// Parse a color name or a hex string
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.starts_with('#') {
            Self::from_hex(s)
        } else {
            Self::named(s).ok_or_else(|| format!("Unknown color: {}", s))
        }
    }
}

/// Mapping from token category to color with a mandatory default
///
/// Immutable once built. Lookups fall back along the category's ancestors
/// and end at the default, so every category resolves to exactly one color.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTable {
    entries: HashMap<TokenCategory, Color>,
    default: Color,
}

impl ColorTable {
    pub fn new(default: Color) -> Self {
        Self {
            entries: HashMap::new(),
            default,
        }
    }

    /// Builder-style insert
    pub fn with(mut self, category: TokenCategory, color: Color) -> Self {
        self.entries.insert(category, color);
        self
    }

    /// Color used when neither a category nor any ancestor has an entry
    pub fn default_color(&self) -> Color {
        self.default
    }

    /// Resolve the color of `category`
    pub fn resolve(&self, category: TokenCategory) -> Color {
        category
            .ancestors()
            .find_map(|c| self.entries.get(&c).copied())
            .unwrap_or(self.default)
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    /// Format version, `1` when omitted
    #[serde(default = "default_version")]
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub page: PageThemeData,
    pub gutter: GutterThemeData,
    /// Dotted category name → color, plus the required `default` key
    pub syntax: BTreeMap<String, String>,
}

fn default_version() -> u32 {
    1
}

/// Page colors (raw strings from YAML)
#[derive(Debug, Clone, Deserialize)]
pub struct PageThemeData {
    pub background: String,
}

/// Gutter (line numbers) colors
#[derive(Debug, Clone, Deserialize)]
pub struct GutterThemeData {
    pub foreground: String,
}

/// Resolved theme with parsed colors
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    /// Full-page fill painted beneath all content
    pub background: Color,
    /// Line number color, independent of the syntax colors
    pub gutter: Color,
    pub syntax: ColorTable,
}

impl Theme {
    /// Load theme from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        Theme::from_yaml(entry.yaml)
    }

    /// Convert raw theme data to resolved theme
    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        let default = data
            .syntax
            .get("default")
            .ok_or_else(|| "Theme syntax table has no 'default' entry".to_string())
            .and_then(|s| Color::parse(s))?;

        let mut syntax = ColorTable::new(default);
        for (key, value) in &data.syntax {
            if key == "default" {
                continue;
            }
            let category = TokenCategory::from_name(key)
                .ok_or_else(|| format!("Unknown token category in theme: {}", key))?;
            syntax = syntax.with(category, Color::parse(value)?);
        }

        Ok(Theme {
            name: data.name,
            background: Color::parse(&data.page.background)?,
            gutter: Color::parse(&data.gutter.foreground)?,
            syntax,
        })
    }

    /// IDLE-like light theme (YAML-backed with Rust fallback)
    pub fn idle() -> Self {
        match Theme::from_yaml(IDLE_YAML) {
            Ok(theme) => theme,
            Err(_) => Theme {
                name: "IDLE Classic".to_string(),
                background: Color::rgb(0xFE, 0xFD, 0xFD),
                gutter: Color::rgb(0x80, 0x80, 0x80),
                syntax: ColorTable::new(Color::rgb(0x00, 0x00, 0x00))
                    .with(TokenCategory::Keyword, Color::rgb(0xFF, 0xA5, 0x00))
                    .with(TokenCategory::NameBuiltin, Color::rgb(0x80, 0x00, 0x80))
                    .with(TokenCategory::NameFunction, Color::rgb(0x00, 0x00, 0xFF))
                    .with(TokenCategory::NameClass, Color::rgb(0x00, 0x00, 0x8B))
                    .with(TokenCategory::String, Color::rgb(0x00, 0x80, 0x00))
                    .with(TokenCategory::Comment, Color::rgb(0xFF, 0x00, 0x00))
                    .with(TokenCategory::Operator, Color::rgb(0x00, 0x00, 0x00))
                    .with(TokenCategory::Number, Color::rgb(0x00, 0x8B, 0x8B)),
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::idle()
    }
}
