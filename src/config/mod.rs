//! Typed configuration of the bar. It is read once at startup and never changes afterwards.

pub mod color;
pub mod discovery;
pub mod document;

use anyhow::{bail, Context, Error, Result};
use chrono::{NaiveTime, TimeDelta};
use color::Color;
use document::{BreakEntry, ConfigDocument};
use tracing::warn;

use crate::utils::time::{anchor, parse_time_of_day};

/// Start and end of the workday. The end is expected to come after the start; when it doesn't,
/// progress stays at zero instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl WorkWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> TimeDelta {
        anchor(self.end) - anchor(self.start)
    }

    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }

    /// Whether the break lies completely inside the window. A break that only overlaps the window
    /// is not inside it.
    pub fn contains(&self, interval: &BreakInterval) -> bool {
        let starts_inside = self.start <= interval.start && interval.start < self.end;
        let ends_inside = self.start < interval.end && interval.end <= self.end;
        starts_inside && ends_inside
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakInterval {
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// Only breaks with this flag are taken out of the workday.
    pub exclude_from_progress: bool,
}

impl BreakInterval {
    pub fn duration(&self) -> TimeDelta {
        anchor(self.end) - anchor(self.start)
    }
}

impl TryFrom<&BreakEntry> for BreakInterval {
    type Error = Error;

    fn try_from(entry: &BreakEntry) -> Result<Self> {
        let start = parse_time_of_day(&entry.start).context("Invalid break start")?;
        let end = parse_time_of_day(&entry.end).context("Invalid break end")?;
        if end < start {
            // Validation rule: an inverted break is refused instead of counting as negative
            // break time.
            bail!("Break {} - {} ends before it starts", entry.start, entry.end);
        }
        Ok(Self {
            start,
            end,
            exclude_from_progress: entry.exclude_from_progress,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub work_window: WorkWindow,
    pub breaks: Vec<BreakInterval>,
    /// Height of the bar in pixels. Always positive.
    pub bar_height: u16,
    pub completed_color: Color,
    pub uncompleted_color: Color,
}

impl TryFrom<ConfigDocument> for Configuration {
    type Error = Error;

    fn try_from(document: ConfigDocument) -> Result<Self> {
        let start = parse_time_of_day(&document.work_hours.start_time)
            .context("Invalid work_hours.start_time")?;
        let end = parse_time_of_day(&document.work_hours.end_time)
            .context("Invalid work_hours.end_time")?;
        let work_window = WorkWindow::new(start, end);
        if work_window.is_degenerate() {
            warn!("Work hours {start} - {end} are empty, progress will stay at 0");
        }

        let breaks = document
            .breaks
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                BreakInterval::try_from(entry).with_context(|| format!("Invalid break #{}", index + 1))
            })
            .collect::<Result<Vec<_>>>()?;

        let bar = &document.progress_bar;
        if bar.height == 0 {
            bail!("progress_bar.height must be at least 1 pixel");
        }
        let completed_color = bar
            .completed_color
            .parse::<Color>()
            .context("Invalid progress_bar.completed_color")?;
        let uncompleted_color = bar
            .uncompleted_color
            .parse::<Color>()
            .context("Invalid progress_bar.uncompleted_color")?;

        Ok(Self {
            work_window,
            breaks,
            bar_height: bar.height,
            completed_color,
            uncompleted_color,
        })
    }
}
