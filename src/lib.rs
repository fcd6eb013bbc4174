//! Single-line terminal spinner.
//!
//! A [`Spinner`] redraws one console line in place with a rotating glyph, a
//! message and the time elapsed since it started, so the user can tell a
//! long-running operation is still alive. Drawing happens on a background
//! thread; stopping erases the line.

pub mod config;
pub mod error;
pub mod frames;
pub mod output;
pub mod render;
pub mod spinner;
mod worker;

pub use config::{FramesSetting, SpinnerConfig, Target};
pub use error::SpinnerError;
pub use frames::{FrameStyle, Frames};
pub use output::Output;
pub use spinner::{Spinner, SpinnerScope, with_spinner};
