//! Pure helpers for composing the spinner line.

use std::time::Duration;

use console::measure_text_width;

/// Minimum number of spaces written when erasing the spinner line.
pub const DEFAULT_CLEAR_WIDTH: usize = 50;

/// Format elapsed time with one decimal place and a seconds suffix.
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.1}s", elapsed.as_secs_f64())
}

/// Compose a single frame: `\r{glyph} {message}... {elapsed}`.
/// No trailing newline; the next frame overwrites this one in place.
pub fn compose_line(glyph: &str, message: &str, elapsed: Duration) -> String {
    format!("\r{} {}... {}", glyph, message, format_elapsed(elapsed))
}

/// Display width of a composed line, ignoring the leading carriage return.
pub fn line_width(line: &str) -> usize {
    measure_text_width(line.trim_start_matches('\r'))
}

/// Line that erases whatever was drawn: `\r`, spaces, `\r`.
pub fn blank_line(width: usize) -> String {
    format!("\r{}\r", " ".repeat(width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::ZERO), "0.0s");
        assert_eq!(format_elapsed(Duration::from_millis(2500)), "2.5s");
        assert_eq!(format_elapsed(Duration::from_secs(61)), "61.0s");
    }

    #[test]
    fn test_compose_line() {
        let line = compose_line("⠋", "Loading", Duration::from_millis(300));
        assert_eq!(line, "\r⠋ Loading... 0.3s");
        assert!(!line.ends_with('\n'));
    }

    #[test]
    fn test_line_width_counts_glyph_once() {
        let line = compose_line("⠋", "ab", Duration::ZERO);
        // "⠋ ab... 0.0s"
        assert_eq!(line_width(&line), 12);
    }

    #[test]
    fn test_blank_line() {
        let blank = blank_line(DEFAULT_CLEAR_WIDTH);
        assert!(blank.starts_with('\r'));
        assert!(blank.ends_with('\r'));
        assert_eq!(blank.len(), DEFAULT_CLEAR_WIDTH + 2);
        assert!(blank.trim_matches('\r').chars().all(|c| c == ' '));
    }
}
