//! `shima` binary: labels a raster file and prints the label grid.
//!
//! Diagnostics go to stderr through `tracing`; stdout carries only the
//! rendered summary, so the grid can be piped into other tools.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use shima_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use shima_core::LabelError;
use tracing::{error, field};

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    match label_and_render(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_failure(&err);
            ExitCode::FAILURE
        }
    }
}

fn label_and_render(cli: Cli) -> Result<()> {
    let summary = run_cli(cli).context("labelling failed")?;
    let mut out = BufWriter::new(io::stdout().lock());
    render_summary(&summary, &mut out).context("failed to write the label grid")?;
    out.flush().context("failed to flush the label grid")
}

/// Logs `err` with the stable codes of any labelling failure inside it.
fn log_failure(err: &anyhow::Error) {
    let core = match err.downcast_ref::<CliError>() {
        Some(CliError::Core(core)) => Some(core),
        _ => None,
    };
    let code = core.map(|core| field::display(core.code().as_str()));
    let raster_code = core
        .and_then(LabelError::raster_code)
        .map(|code| field::display(code.as_str()));

    error!(error = %err, code, raster_code, "labelling command failed");
}

#[expect(
    clippy::print_stderr,
    reason = "tracing is unavailable until logging initialises"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialise logging: {err}");
}
