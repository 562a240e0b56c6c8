//! # tsc-e
//!
//! `tsc-e` reads the TypeScript compiler's plain-text diagnostics from stdin and
//! prints a compact, per-file error report instead of the raw stream.
//!
//! ## Quick Start
//! ```sh
//! cargo install tsc-e
//! npx tsc --noEmit --watch | tsc-e
//! ```
//!
//! Single-shot runs work too; the exit code is 1 when errors were reported:
//! ```sh
//! npx tsc --noEmit | tsc-e
//! ```

use anyhow::Context;
use clap::Parser;
use crossterm::{cursor, execute};
use std::time::Duration;
use tsc_e::prelude::*;
use tsc_e::{Cli, Spinner, StreamProcessor, TerminalRedraw};

pub fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let cli = Cli::parse();
    if cli.version {
        tsc_e::e_cli::print_version_and_features();
        exit(0);
    }
    register_ctrlc_handler().context("installing the Ctrl-C handler")?;

    let palette = cli.palette();
    debug!("{:?}, color = {}", cli, palette.uses_color);

    let mut spinner = Spinner::stderr(&cli.label, palette)
        .with_interval(Duration::from_millis(cli.interval));
    if cli.no_spinner {
        spinner = spinner.enabled(false);
    }

    let mut stdout = io::stdout();
    writeln!(stdout).context("writing to stdout")?;

    let mut processor = StreamProcessor::new(TerminalRedraw::stdout(), spinner, palette);
    let outcome = processor
        .run(io::stdin().lock())
        .context("processing the diagnostic stream")?;
    // restores the cursor before the process ends
    drop(processor);

    info!("exiting with {:?}", outcome);
    exit(outcome.exit_code());
}

/// Restores the cursor and exits with the conventional SIGINT status.
fn register_ctrlc_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        let _ = execute!(io::stderr(), cursor::Show);
        let _ = execute!(io::stdout(), cursor::Show);
        exit(130);
    })
}
