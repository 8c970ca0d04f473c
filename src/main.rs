// minifront: single-pass parser and scope checker

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use minifront::AnalyzerConfig;

/// Parse a source file and report structural and semantic errors.
#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
struct Args {
    /// Source file to analyze
    file: PathBuf,

    /// Start with an empty root scope instead of predeclaring `System` and `println`
    #[arg(long)]
    no_builtins: bool,

    /// Log scope and parser activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read '{}'", args.file.display()))?;

    let config = if args.no_builtins {
        AnalyzerConfig::bare()
    } else {
        AnalyzerConfig::default()
    };

    eprintln!("Parsing {}...", args.file.display());
    let analysis = match minifront::analyze_with(&source, &config) {
        Ok(analysis) => analysis,
        Err(e) => {
            eprintln!("{e}");
            return Ok(ExitCode::from(2));
        }
    };

    for message in analysis.messages() {
        eprintln!("{message}");
    }

    if analysis.is_clean() {
        eprintln!(
            "Parsed successfully. Found {} top-level statements.",
            analysis.program.statements().len()
        );
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("Found {} semantic error(s).", analysis.errors.len());
        Ok(ExitCode::from(1))
    }
}
