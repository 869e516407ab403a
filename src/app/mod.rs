use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Result;
use bar::BarModule;
use context::AppContext;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::{
    config::discovery::{resolve, ConfigLocations},
    utils::clock::DefaultClock,
    window_api::{GenericSurface, Surface},
};

pub mod bar;
pub mod context;
pub mod shutdown;

pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Configuration file that overrides discovery.
    pub config: Option<PathBuf>,
    pub tick_period: Duration,
}

/// Represents the starting point for the bar. Resolves the configuration, opens the window and
/// repaints it until Ctrl-C or until the window goes away.
pub async fn start_app(options: AppOptions) -> Result<()> {
    let resolved = resolve(&ConfigLocations::from_environment(options.config))
        .inspect_err(|e| error!("Failed to load configuration {e:?}"))?;

    let surface = GenericSurface::new(resolved.configuration.bar_height)
        .inspect_err(|e| error!("Failed to create bar window {e:?}"))?;
    let screen = surface.screen_metrics();
    if resolved.created {
        info!("No configuration found, wrote defaults to {}", resolved.path.display());
    }
    info!(
        "Using configuration {} on a {}px wide screen, repainting every {:?}",
        resolved.path.display(),
        screen.width,
        options.tick_period
    );

    let context = AppContext::new(resolved.configuration, screen);
    let shutdown_token = CancellationToken::new();
    let module = BarModule::new(
        context,
        Box::new(surface),
        shutdown_token.clone(),
        options.tick_period,
        Arc::new(DefaultClock),
    );

    let (_, bar_result) = tokio::join!(shutdown::detect_shutdown(shutdown_token.clone()), async {
        let result = module.run().await;
        shutdown_token.cancel();
        result
    });

    if let Err(bar_result) = &bar_result {
        error!("Bar module got an error {:?}", bar_result);
    }

    bar_result
}
