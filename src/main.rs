use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use pyprint::cli::{CliArgs, Command, ConvertArgs};
use pyprint::convert::{convert_file, format_source, read_source, ConvertError};
use pyprint::syntax::tokenize_source;
use pyprint::theme::{list_available_themes, load_theme, ThemeSource, DEFAULT_THEME_ID};
use pyprint::Theme;

fn main() -> ExitCode {
    // Usage errors exit with status 2 from inside clap
    let args = CliArgs::parse();

    pyprint::tracing::init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<()> {
    match args.command {
        Command::Convert(args) => run_convert(&args),
        Command::Themes => run_themes(),
        Command::Tokens { input, json } => run_tokens(&input, json),
        Command::Markup { input, theme } => run_markup(&input, theme.as_deref()),
    }
}

fn resolve_theme(spec: &str) -> Result<Theme, ConvertError> {
    load_theme(spec).map_err(ConvertError::Theme)
}

fn run_convert(args: &ConvertArgs) -> Result<()> {
    let config = args.resolve_config();
    let theme = resolve_theme(&config.theme)?;
    let style = config.page_style(&theme).map_err(ConvertError::Config)?;
    let output = args.output_path();

    tracing::debug!(
        input = %args.input.display(),
        output = %output.display(),
        theme = %theme.name,
        "Starting conversion"
    );

    let summary = convert_file(&args.input, &output, &theme, &style)?;
    tracing::info!(
        lines = summary.lines,
        pages = summary.pages,
        bytes = summary.bytes,
        "Conversion finished"
    );

    println!(
        "Successfully converted {} to {}",
        args.input.display(),
        summary.output.display()
    );
    Ok(())
}

fn run_themes() -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    for info in list_available_themes() {
        let source = match info.source {
            ThemeSource::User => "user",
            ThemeSource::Builtin => "builtin",
        };
        let marker = if info.id == DEFAULT_THEME_ID { " (default)" } else { "" };
        writeln!(stdout, "{:<16} {:<8} {}{}", info.id, source, info.name, marker)?;
    }
    Ok(())
}

fn run_tokens(input: &Path, json: bool) -> Result<()> {
    let source = read_source(input)?;
    let lines = tokenize_source(&source);
    let mut stdout = std::io::stdout().lock();

    if json {
        serde_json::to_writer_pretty(&mut stdout, &lines).context("Failed to encode tokens")?;
        writeln!(stdout)?;
        return Ok(());
    }

    for (index, tokens) in lines.iter().enumerate() {
        for token in tokens {
            writeln!(stdout, "{:>4}  {:<28} {:?}", index + 1, token.category, token.text)?;
        }
    }
    Ok(())
}

fn run_markup(input: &Path, theme: Option<&str>) -> Result<()> {
    let source = read_source(input)?;
    let theme = resolve_theme(theme.unwrap_or(DEFAULT_THEME_ID))?;
    let mut stdout = std::io::stdout().lock();

    for line in format_source(&source, &theme) {
        writeln!(stdout, "{}", line.to_markup())?;
    }
    Ok(())
}
