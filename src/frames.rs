//! Glyph sequences for the spinner animation.

use std::str::FromStr;

use crate::error::{Result, SpinnerError};

/// Braille spinner frames, the default animation.
pub const BRAILLE_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Plain ASCII fallback for terminals without braille glyphs.
pub const ASCII_FRAMES: &[&str] = &["-", "\\", "|", "/"];

/// Quarter-circle frames.
pub const LINE_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Named built-in frame sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameStyle {
    #[default]
    Braille,
    Ascii,
    Line,
}

impl FrameStyle {
    pub fn glyphs(self) -> &'static [&'static str] {
        match self {
            FrameStyle::Braille => BRAILLE_FRAMES,
            FrameStyle::Ascii => ASCII_FRAMES,
            FrameStyle::Line => LINE_FRAMES,
        }
    }
}

impl FromStr for FrameStyle {
    type Err = SpinnerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "braille" => Ok(FrameStyle::Braille),
            "ascii" => Ok(FrameStyle::Ascii),
            "line" => Ok(FrameStyle::Line),
            other => Err(SpinnerError::UnknownFrameStyle(other.to_string())),
        }
    }
}

/// A non-empty, fixed sequence of glyphs.
///
/// Construction is the only place the sequence is checked, so every
/// `Frames` value can be indexed modulo its length without guarding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frames {
    glyphs: Vec<String>,
}

impl Frames {
    /// Build a frame sequence from custom glyphs.
    pub fn new<I, S>(glyphs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let glyphs: Vec<String> = glyphs.into_iter().map(Into::into).collect();
        if glyphs.is_empty() {
            return Err(SpinnerError::EmptyFrames);
        }
        if let Some(index) = glyphs.iter().position(|g| g.is_empty()) {
            return Err(SpinnerError::EmptyGlyph { index });
        }
        Ok(Self { glyphs })
    }

    pub fn from_style(style: FrameStyle) -> Self {
        Self {
            glyphs: style.glyphs().iter().map(|g| g.to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph for a frame counter, wrapping around the sequence.
    pub fn glyph(&self, index: usize) -> &str {
        &self.glyphs[index % self.glyphs.len()]
    }

    /// Index that follows `index`, wrapped into range.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.glyphs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.glyphs.iter().map(String::as_str)
    }
}

impl Default for Frames {
    fn default() -> Self {
        Self::from_style(FrameStyle::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_braille() {
        let frames = Frames::default();
        assert_eq!(frames.len(), 10);
        assert_eq!(frames.glyph(0), "⠋");
        assert_eq!(frames.glyph(9), "⠏");
    }

    #[test]
    fn test_rejects_empty_sequence() {
        let err = Frames::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, SpinnerError::EmptyFrames));
    }

    #[test]
    fn test_rejects_empty_glyph() {
        let err = Frames::new(["a", "", "c"]).unwrap_err();
        assert!(matches!(err, SpinnerError::EmptyGlyph { index: 1 }));
    }

    #[test]
    fn test_next_index_wraps_after_full_cycle() {
        let frames = Frames::from_style(FrameStyle::Ascii);
        let mut index = 0;
        let mut seen = Vec::new();
        for _ in 0..frames.len() {
            seen.push(frames.glyph(index).to_string());
            index = frames.next_index(index);
        }
        assert_eq!(seen, vec!["-", "\\", "|", "/"]);
        // Back at the first glyph
        assert_eq!(index, 0);
        assert_eq!(frames.glyph(index), "-");
    }

    #[test]
    fn test_glyph_wraps_out_of_range_counter() {
        let frames = Frames::new(["x", "y"]).unwrap();
        assert_eq!(frames.glyph(5), "y");
    }

    #[test]
    fn test_single_glyph_sequence_stays_at_zero() {
        let frames = Frames::new(["*"]).unwrap();
        assert_eq!(frames.next_index(0), 0);
    }

    #[test]
    fn test_style_parses_case_insensitively() {
        assert_eq!("ASCII".parse::<FrameStyle>().unwrap(), FrameStyle::Ascii);
        assert_eq!(" line ".parse::<FrameStyle>().unwrap(), FrameStyle::Line);
        assert!("dots".parse::<FrameStyle>().is_err());
    }
}
