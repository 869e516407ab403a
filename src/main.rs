// Keeps Windows from opening a console next to the bar. Disable during development to see
// stdout.
#![cfg_attr(feature = "win", windows_subsystem = "windows")]

use anyhow::Result;
use tracing::error;
use workbar::cli::run_cli;

fn main() -> Result<()> {
    run_cli().inspect_err(|e| {
        error!("Error running workbar {e:?}");
    })?;
    Ok(())
}
