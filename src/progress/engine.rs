use chrono::{NaiveTime, TimeDelta};

use crate::{
    config::{BreakInterval, Configuration, WorkWindow},
    utils::time::anchor,
};

use super::sample::{duration_fraction, Progress};

/// Total length of the breaks taken out of the workday. Only excluded breaks lying completely
/// inside the work window count; anything else is ignored rather than clipped.
pub fn counted_break_duration(window: &WorkWindow, breaks: &[BreakInterval]) -> TimeDelta {
    breaks
        .iter()
        .filter(|interval| interval.exclude_from_progress && window.contains(interval))
        .map(BreakInterval::duration)
        .fold(TimeDelta::zero(), |total, duration| total + duration)
}

/// Computes how far into the workday `now` is.
///
/// The whole counted break time is subtracted from the elapsed time as soon as the workday
/// starts, whether or not the breaks already happened. Before and during a break the bar
/// therefore trails the clock, and it catches up once the last break is over.
pub fn compute_progress(now: NaiveTime, config: &Configuration) -> Progress {
    let window = &config.work_window;
    let start = anchor(window.start);
    let now = anchor(now);

    let total_break = counted_break_duration(window, &config.breaks);
    let total_work = window.duration() - total_break;
    let elapsed = ((now - start) - total_break).max(TimeDelta::zero());

    duration_fraction(elapsed, total_work)
}

/// Owns the configuration for the lifetime of the process and turns times of day into progress.
#[derive(Debug, Clone)]
pub struct ProgressEngine {
    config: Configuration,
}

impl ProgressEngine {
    pub fn new(config: Configuration) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn sample(&self, now: NaiveTime) -> Progress {
        compute_progress(now, &self.config)
    }
}
