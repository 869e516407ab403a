//! Maps progress onto the two rectangles that make up the bar.

use crate::{config::color::Color, progress::Progress};

/// A filled rectangle starting at the top edge of the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub x: u32,
    pub width: u32,
    pub height: u16,
    pub color: Color,
}

impl Segment {
    pub fn end(&self) -> u32 {
        self.x + self.width
    }
}

/// The completed part followed by the remaining part. Together they cover the full width with
/// no gap and no overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarLayout {
    pub completed: Segment,
    pub remaining: Segment,
}

impl BarLayout {
    pub fn new(
        total_width: u32,
        height: u16,
        progress: Progress,
        completed_color: Color,
        uncompleted_color: Color,
    ) -> Self {
        let filled = filled_width(total_width, progress);
        Self {
            completed: Segment {
                x: 0,
                width: filled,
                height,
                color: completed_color,
            },
            remaining: Segment {
                x: filled,
                width: total_width - filled,
                height,
                color: uncompleted_color,
            },
        }
    }

    pub fn segments(&self) -> [Segment; 2] {
        [self.completed, self.remaining]
    }
}

/// `floor(total_width * progress)`, never wider than `total_width`.
pub fn filled_width(total_width: u32, progress: Progress) -> u32 {
    let filled = (f64::from(total_width) * progress.value()).floor();
    (filled as u32).min(total_width)
}
