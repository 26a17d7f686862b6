//! sshuf: streaming shuffle for delimiter-separated record streams
//!
//! Exit codes: 0 on success (including early pipe closure and interrupt),
//! 1 on invalid configuration or I/O failure, with a diagnostic on stderr.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use sshuf_cli::args::Cli;
use sshuf_cli::{input, output};
use sshuf_core::{shuffle_stream, CancelToken, ShuffleConfig};

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.init_logging();

    let config = match cli.shuffle_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::from(1);
        }
    };

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli, config: &ShuffleConfig) -> Result<()> {
    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel())
        .context("Failed to install interrupt handler")?;

    let source = input::open_input(cli.input.as_deref())?;
    let sink = output::open_output(cli.output.as_deref())?;

    debug!("running with {config:?}");
    let report = shuffle_stream(source, sink, config, cli.rng(), &cancel)?;

    if report.interrupted {
        // Clean termination: the consumer went away or we were interrupted.
        // Whatever was written stays written.
        info!(
            "stopped early after emitting {} of {} records",
            report.emitted, report.consumed
        );
    } else {
        info!("shuffled {} records", report.consumed);
    }

    Ok(())
}
