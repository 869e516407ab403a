use chrono::NaiveTime;

use crate::{
    config::Configuration,
    progress::{Progress, ProgressEngine},
    render::BarLayout,
    window_api::ScreenMetrics,
};

/// Everything a tick needs: the configured workday and the screen the bar spans. Built once at
/// startup.
#[derive(Debug, Clone)]
pub struct AppContext {
    engine: ProgressEngine,
    screen: ScreenMetrics,
}

impl AppContext {
    pub fn new(config: Configuration, screen: ScreenMetrics) -> Self {
        Self {
            engine: ProgressEngine::new(config),
            screen,
        }
    }

    pub fn config(&self) -> &Configuration {
        self.engine.config()
    }

    /// Progress at `now` and the bar that shows it.
    pub fn frame_at(&self, now: NaiveTime) -> (Progress, BarLayout) {
        let progress = self.engine.sample(now);
        let config = self.config();
        let layout = BarLayout::new(
            self.screen.width,
            config.bar_height,
            progress,
            config.completed_color,
            config.uncompleted_color,
        );
        (progress, layout)
    }
}
