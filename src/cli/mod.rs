use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::Parser;
use tracing::level_filters::LevelFilter;

use crate::{
    app::{start_app, AppOptions, DEFAULT_TICK_PERIOD},
    utils::{
        dir::create_application_default_path, logging::enable_logging,
        runtime::single_thread_runtime,
    },
};

#[derive(Parser, Debug)]
#[command(name = "workbar", version, long_about = None)]
#[command(about = "Shows how far the workday has progressed as a thin bar at the top of the screen")]
pub struct Args {
    #[arg(
        long,
        short,
        help = "Configuration file. By default looks for config.toml next to the executable, in ~/.workbar and in the current directory"
    )]
    pub config: Option<PathBuf>,
    #[arg(
        long,
        default_value_t = DEFAULT_TICK_PERIOD.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Seconds between repaints"
    )]
    pub interval: u64,
    /// This option is for debugging purposes only.
    #[arg(long = "log-console")]
    pub log_console: bool,
    #[arg(long = "log-filter")]
    pub log: Option<LevelFilter>,
}

impl Args {
    pub fn app_options(&self) -> AppOptions {
        AppOptions {
            config: self.config.clone(),
            tick_period: Duration::from_secs(self.interval),
        }
    }
}

pub fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = create_application_default_path()?;
    enable_logging(&app_dir, args.log, args.log_console)?;

    single_thread_runtime()?.block_on(start_app(args.app_options()))
}
