//! Turns the configured workday and the current time of day into a [Progress] value.

pub mod engine;
pub mod sample;

pub use engine::{compute_progress, ProgressEngine};
pub use sample::Progress;
