use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use lox_lexer::dump::{self, DumpFormat};
use lox_lexer::{ScanOptions, repl, scanner};

#[derive(Parser, Debug)]
#[command(name = "lox-lexer", version, about = "Scan Lox source into tokens")]
struct Cli {
    /// Lox source file to scan (omit for an interactive prompt)
    file: Option<PathBuf>,

    /// Token output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Let block comments nest: `/* a /* b */ c */`
    #[arg(long)]
    nested_comments: bool,

    /// Skip a leading `#!` interpreter line
    #[arg(long)]
    shebang: bool,

    /// Render errors as annotated source snippets
    #[arg(long)]
    fancy: bool,

    /// Enable debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}

/// Scan one file, print its tokens, and return whether any error was reported.
fn scan_file(path: &Path, options: ScanOptions, format: DumpFormat, fancy: bool) -> Result<bool> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("read source file '{}'", path.display()))?;
    debug!(path = %path.display(), bytes = source.len(), "scanning file");

    let (tokens, errors) = scanner::scan_collect(&source, options);
    let had_error = errors.had_error();
    print!("{}", dump::render(&tokens, format));
    for message in dump::render_errors(errors, &path.display().to_string(), &source, fancy) {
        eprintln!("{message}");
    }
    Ok(had_error)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format: DumpFormat = cli.format.parse().context("parse --format")?;
    let options = ScanOptions::new()
        .nested_comments(cli.nested_comments)
        .skip_shebang(cli.shebang);

    match &cli.file {
        Some(path) => {
            if scan_file(path, options, format, cli.fancy)? {
                return Ok(ExitCode::from(1));
            }
        }
        None => repl::run_repl(options, format, cli.fancy)?,
    }
    Ok(ExitCode::SUCCESS)
}
