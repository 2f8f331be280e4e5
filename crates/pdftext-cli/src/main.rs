use std::io::{Read, Write};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pdftext_core::config_file::{load_config, resolve_settings};
use pdftext_core::{ExtractError, Outcome, Report, Settings, run_with};
use pdftext_mupdf::MupdfBackend;

/// Exit status when the result line itself could not be written.
const EXIT_OUTPUT_FAILED: i32 = 2;

/// Extract text from a PDF. Reads `{"pdf_base64": "..."}` on stdin and
/// writes one JSON result line on stdout.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {}

fn main() {
    dotenvy::dotenv().ok();
    let _cli = Cli::parse();

    let settings = resolve_settings(&load_config(), |key| std::env::var(key).ok());
    init_logging(&settings.log_level);

    let code = match execute(&settings) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "could not report result");
            EXIT_OUTPUT_FAILED
        }
    };
    std::process::exit(code);
}

/// Logs go to stderr; stdout carries only the result line. `RUST_LOG`
/// takes precedence over the configured level.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn execute(settings: &Settings) -> anyhow::Result<i32> {
    let backend = MupdfBackend::new().with_max_pages(settings.max_pages);

    let mut input = Vec::new();
    let outcome = match std::io::stdin().lock().read_to_end(&mut input) {
        Ok(_) => run_with(&input, &backend, settings),
        Err(e) => Outcome::from(Report::failure(&ExtractError::InvalidInput(format!(
            "failed to read standard input: {e}"
        )))),
    };

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&outcome.output)
        .context("failed to write result to stdout")?;
    stdout.flush().context("failed to flush stdout")?;
    Ok(outcome.exit_code)
}
