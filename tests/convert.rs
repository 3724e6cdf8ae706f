//! End-to-end conversion tests: library API and the `pyprint` binary

use std::path::Path;
use std::process::Command;

use pyprint::convert::{convert_file, format_source, render_pdf, ConvertError};
use pyprint::document::PageStyle;
use pyprint::syntax::tokenize_source;
use pyprint::theme::Color;
use pyprint::Theme;

const SAMPLE: &str = r#"#!/usr/bin/env python3
"""Module docstring."""
import os


@dataclass
class Point:
    x: int = 0

    def __repr__(self):
        return f"Point({self.x})"


def main(args):
    if len(args) < 2 and not os.environ.get("DEBUG"):
        raise ValueError('need <two> & more')  # bail
    return 0x1F + 3.5e-2
"#;

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn write_input(dir: &Path, name: &str, source: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, source).unwrap();
    path
}

// ========================================================================
// Line formatting
// ========================================================================

#[test]
fn test_def_line_colors() {
    let theme = Theme::idle();
    let lines = format_source("def foo():\n", &theme);
    let line = &lines[0];

    assert_eq!(line.gutter.text, "   1  ");
    let texts: Vec<&str> = line.segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["def", " ", "foo", "(", ")", ":", "\n"]);

    let color = |name: &str| Color::parse(name).unwrap();
    let colors: Vec<Color> = line.segments.iter().take(6).map(|s| s.color).collect();
    assert_eq!(
        colors,
        vec![
            color("orange"),
            theme.syntax.default_color(),
            color("blue"),
            color("black"),
            color("black"),
            color("black"),
        ]
    );
}

#[test]
fn test_less_than_is_escaped_once() {
    let lines = format_source("a < b\n", &Theme::idle());
    let markup = lines[0].to_markup();

    assert!(markup.contains("&lt;"));
    assert!(!markup.contains("&amp;lt;"));
    assert!(markup.starts_with("<font color=\"#808080\">   1  </font>"));
}

#[test]
fn test_fragments_reconstruct_every_line() {
    let lines = tokenize_source(SAMPLE);
    let physical: Vec<&str> = SAMPLE.split_inclusive('\n').collect();
    assert_eq!(lines.len(), physical.len());

    for (tokens, expected) in lines.iter().zip(physical) {
        let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(joined, expected);
    }
}

#[test]
fn test_line_numbers_are_consecutive() {
    let lines = format_source(SAMPLE, &Theme::idle());
    for (index, line) in lines.iter().enumerate() {
        assert_eq!(line.line_number, index + 1);
    }
}

#[test]
fn test_multiline_string_keeps_color_on_every_line() {
    let theme = Theme::idle();
    let lines = format_source("x = \"\"\"one\ntwo\nthree\"\"\"\n", &theme);
    let green = Color::parse("green").unwrap();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1].segments[0].text, "two\n");
    assert_eq!(lines[1].segments[0].color, green);
    assert_eq!(lines[2].segments[0].color, green);
}

// ========================================================================
// PDF output
// ========================================================================

#[test]
fn test_convert_file_writes_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "sample.py", SAMPLE);
    let output = dir.path().join("sample.pdf");

    let summary =
        convert_file(&input, &output, &Theme::idle(), &PageStyle::default()).unwrap();

    assert_eq!(summary.lines, SAMPLE.lines().count());
    assert_eq!(summary.pages, 1);
    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(bytes.len(), summary.bytes);
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(contains(&bytes, b"(sample.py)"));
}

#[test]
fn test_conversion_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "sample.py", SAMPLE);
    let first = dir.path().join("first.pdf");
    let second = dir.path().join("second.pdf");

    let theme = Theme::idle();
    let style = PageStyle::default();
    convert_file(&input, &first, &theme, &style).unwrap();
    convert_file(&input, &second, &theme, &style).unwrap();

    assert_eq!(std::fs::read(first).unwrap(), std::fs::read(second).unwrap());
}

#[test]
fn test_missing_input_produces_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.py");
    let output = dir.path().join("missing.pdf");

    let err = convert_file(&input, &output, &Theme::idle(), &PageStyle::default()).unwrap_err();
    assert_eq!(err, ConvertError::InputNotFound(input.clone()));
    assert!(!output.exists());
}

#[test]
fn test_empty_input_is_valid_document() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "empty.py", "");
    let output = dir.path().join("empty.pdf");

    let summary = convert_file(&input, &output, &Theme::idle(), &PageStyle::default()).unwrap();
    assert_eq!(summary.lines, 0);
    assert_eq!(summary.pages, 1);

    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(contains(&bytes, b"/Count 1"));
    assert!(!contains(&bytes, b"Tj"));
    assert!(contains(&bytes, b" re"));
}

#[test]
fn test_long_file_paginates() {
    let source: String = (1..=200).map(|i| format!("value_{} = {}\n", i, i)).collect();
    let bytes = render_pdf(&source, &Theme::idle(), &PageStyle::default(), "long.py");
    // 62 rows per default A4 page
    assert!(contains(&bytes, b"/Count 4"));
}

#[test]
fn test_binary_input_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("blob.py");
    std::fs::write(&input, b"\x00\x01\x02").unwrap();
    let output = dir.path().join("blob.pdf");

    let err = convert_file(&input, &output, &Theme::idle(), &PageStyle::default()).unwrap_err();
    assert!(matches!(err, ConvertError::InputUnreadable { .. }));
    assert!(!output.exists());
}

// ========================================================================
// Binary
// ========================================================================

fn pyprint(config_home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pyprint"));
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("APPDATA", config_home)
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_converts_to_default_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "hello.py", "print('hello')\n");

    let out = pyprint(dir.path())
        .arg("convert")
        .arg(&input)
        .output()
        .unwrap();

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("Successfully converted"));
    assert!(dir.path().join("hello.pdf").exists());
}

#[test]
fn test_cli_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("nope.py");

    let out = pyprint(dir.path())
        .arg("convert")
        .arg(&input)
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error: The file"));
    assert!(stderr.contains("was not found."));
    assert!(!dir.path().join("nope.pdf").exists());
}

#[test]
fn test_cli_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = pyprint(dir.path()).arg("convert").output().unwrap();
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_cli_unknown_theme_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "a.py", "x = 1\n");

    let out = pyprint(dir.path())
        .args(["convert", "--theme", "no-such-theme"])
        .arg(&input)
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    assert!(!dir.path().join("a.pdf").exists());
}

#[test]
fn test_cli_tokens_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "a.py", "def f():\n    pass\n");

    let out = pyprint(dir.path())
        .args(["tokens", "--json"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(out.status.success());
    let lines: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(lines.as_array().unwrap().len(), 2);
    assert_eq!(lines[0][0]["category"], "keyword");
    assert_eq!(lines[0][2]["category"], "name.function");
}
