//! Spinner settings loaded from YAML.
//!
//! Every field is optional in the file; anything missing falls back to the
//! defaults below.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, SpinnerError};
use crate::frames::{FrameStyle, Frames};
use crate::output::Output;
use crate::render::DEFAULT_CLEAR_WIDTH;

pub const DEFAULT_MESSAGE: &str = "Working";
pub const DEFAULT_INTERVAL_MS: u64 = 500;
pub const DEFAULT_STOP_TIMEOUT_MS: u64 = 1000;

/// Frame selection: a built-in style name or an explicit glyph list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FramesSetting {
    Style(String),
    Glyphs(Vec<String>),
}

impl Default for FramesSetting {
    fn default() -> Self {
        FramesSetting::Style("braille".to_string())
    }
}

impl FramesSetting {
    pub fn to_frames(&self) -> Result<Frames> {
        match self {
            FramesSetting::Style(name) => Ok(Frames::from_style(name.parse::<FrameStyle>()?)),
            FramesSetting::Glyphs(glyphs) => Frames::new(glyphs.iter().cloned()),
        }
    }
}

/// Stream the spinner draws on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Stdout,
    Stderr,
}

impl Target {
    pub fn output(self) -> Output {
        match self {
            Target::Stdout => Output::Stdout,
            Target::Stderr => Output::Stderr,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpinnerConfig {
    /// Label shown after the glyph
    pub message: String,

    /// Milliseconds between frames
    pub interval_ms: u64,

    pub frames: FramesSetting,

    /// Minimum spaces written when erasing the line
    pub clear_width: usize,

    pub target: Target,

    /// Skip drawing entirely when the target is not a terminal
    pub hide_when_piped: bool,

    /// Upper bound on how long stop waits for the render thread
    pub stop_timeout_ms: u64,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            interval_ms: DEFAULT_INTERVAL_MS,
            frames: FramesSetting::default(),
            clear_width: DEFAULT_CLEAR_WIDTH,
            target: Target::default(),
            hide_when_piped: false,
            stop_timeout_ms: DEFAULT_STOP_TIMEOUT_MS,
        }
    }
}

impl SpinnerConfig {
    /// Load settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content).map_err(|source| SpinnerError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty file deserializes to null rather than an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }

    /// Check the settings without building a spinner.
    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(SpinnerError::ZeroInterval);
        }
        self.frames.to_frames()?;
        Ok(())
    }
}
