//! Thin always-on-top bar that fills up as the workday goes by. Breaks marked in the
//! configuration are taken out of the workday.
//!

pub mod app;
pub mod cli;
pub mod config;
pub mod progress;
pub mod render;
pub mod utils;
pub mod window_api;
