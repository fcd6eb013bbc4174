//! Error types for spinner construction and configuration.

use std::path::PathBuf;

/// Errors raised while building a spinner or loading its configuration.
///
/// The render loop itself never surfaces errors; these only come from
/// validating inputs before anything is drawn.
#[derive(Debug, thiserror::Error)]
pub enum SpinnerError {
    #[error("Frame sequence must contain at least one glyph")]
    EmptyFrames,

    #[error("Frame {index} is an empty string")]
    EmptyGlyph { index: usize },

    #[error("Update interval must be greater than zero")]
    ZeroInterval,

    #[error("Unknown frame style '{0}' (expected braille, ascii or line)")]
    UnknownFrameStyle(String),

    #[error("Invalid config file {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SpinnerError>;
