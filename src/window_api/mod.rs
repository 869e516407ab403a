//! Contains the platform windows the bar is drawn into.
//! [GenericSurface] is the main artifact of this module that picks the backend the crate was
//! built with.

#[cfg(feature = "win")]
pub mod win;
#[cfg(feature = "x11")]
pub mod x11;

#[cfg(feature = "win")]
extern crate windows;

#[cfg(feature = "x11")]
extern crate xcb;

use anyhow::Result;

use crate::{config::color::Color, render::Segment};

/// Background color that is keyed out where the platform supports it.
pub const TRANSPARENT_COLOR: Color = Color::WHITE;

/// Dimensions of the screen the bar spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenMetrics {
    pub width: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// Part of the window was uncovered and needs to be painted again.
    Exposed,
    /// Another window now covers part of the bar.
    Obscured,
    /// The window is gone. Nothing can be drawn anymore.
    Closed,
}

/// Intended to serve as a contract windows and linux systems must implement. The window is a
/// borderless strip along the top edge of the screen that stays above other windows.
#[cfg_attr(test, mockall::automock)]
pub trait Surface {
    fn screen_metrics(&self) -> ScreenMetrics;

    /// Replaces the window contents with `segments`.
    fn draw(&mut self, segments: &[Segment]) -> Result<()>;

    /// Puts the window back above every other window.
    fn raise(&mut self) -> Result<()>;

    /// Drains pending window events. Never blocks.
    fn poll_events(&mut self) -> Result<Vec<SurfaceEvent>>;
}

/// Serves as a cross-compatible Surface implementation.
pub struct GenericSurface {
    inner: Box<dyn Surface>,
}

impl GenericSurface {
    pub fn new(height: u16) -> Result<Self> {
        cfg_if::cfg_if! {
            if #[cfg(feature = "win")] {
                use win::WindowsSurface;
                Ok(Self {
                    inner: Box::new(WindowsSurface::new(height, TRANSPARENT_COLOR)?),
                })
            }
            else if #[cfg(feature = "x11")] {
                use x11::LinuxSurface;
                Ok(Self {
                    inner: Box::new(LinuxSurface::new(height, TRANSPARENT_COLOR)?),
                })
            }
            else {
                let _ = height;
                Err(anyhow::anyhow!(
                    "No display backend was compiled in, rebuild with the `x11` or `win` feature"
                ))
            }
        }
    }
}

impl Surface for GenericSurface {
    fn screen_metrics(&self) -> ScreenMetrics {
        self.inner.screen_metrics()
    }

    fn draw(&mut self, segments: &[Segment]) -> Result<()> {
        self.inner.draw(segments)
    }

    fn raise(&mut self) -> Result<()> {
        self.inner.raise()
    }

    fn poll_events(&mut self) -> Result<Vec<SurfaceEvent>> {
        self.inner.poll_events()
    }
}
