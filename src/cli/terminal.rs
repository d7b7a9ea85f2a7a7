//! Terminal capability detection and utilities

use chrono::{DateTime, Utc};
use owo_colors::{colors::css, OwoColorize};
use studyspot::Status;

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Detects terminal width, returning None if not available
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(w, _)| w.0)
}

/// Check if terminal is narrow (< 60 columns)
pub fn is_narrow() -> bool {
    terminal_width().map_or(false, |w| w < 60)
}

/// Paints text in the colour of a status bucket.
pub fn paint(status: Status, text: &str) -> String {
    if !supports_color() {
        return text.to_string();
    }
    match status {
        Status::Green => text.fg::<css::Green>().to_string(),
        Status::Yellow => text.fg::<css::Gold>().to_string(),
        Status::Red => text.fg::<css::Red>().to_string(),
        Status::Grey => text.fg::<css::Gray>().to_string(),
    }
}

/// Status dot followed by the status label, painted.
pub fn status_dot(status: Status) -> String {
    paint(status, &format!("● {}", status.label()))
}

/// Formats the time since `then` as a short relative phrase.
///
/// Under a minute reads "Just now", under an hour "{m}m ago", and anything
/// longer "{h}h ago". Instants in the future read as now.
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else {
        format!("{}h ago", minutes / 60)
    }
}

/// Extension trait for colorizing output
pub trait Colorize {
    /// Color as success (green)
    fn success(&self) -> String;
    /// Color as warning (amber)
    fn warning(&self) -> String;
    /// Color as info (blue)
    fn info(&self) -> String;
    /// Dim the text
    fn dim(&self) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        if supports_color() {
            self.fg::<css::Green>().to_string()
        } else {
            self.to_string()
        }
    }

    fn warning(&self) -> String {
        if supports_color() {
            self.fg::<css::Orange>().to_string()
        } else {
            self.to_string()
        }
    }

    fn info(&self) -> String {
        if supports_color() {
            self.fg::<css::LightBlue>().to_string()
        } else {
            self.to_string()
        }
    }

    fn dim(&self) -> String {
        if supports_color() {
            self.dimmed().to_string()
        } else {
            self.to_string()
        }
    }
}

impl Colorize for String {
    fn success(&self) -> String {
        self.as_str().success()
    }

    fn warning(&self) -> String {
        self.as_str().warning()
    }

    fn info(&self) -> String {
        self.as_str().info()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use test_case::test_case;

    use super::*;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, hour, minute, 0).unwrap()
    }

    #[test_case(at(12, 0), "Just now"; "same instant")]
    #[test_case(at(11, 59), "1m ago"; "one minute")]
    #[test_case(at(11, 1), "59m ago"; "just under an hour")]
    #[test_case(at(11, 0), "1h ago"; "exactly an hour")]
    #[test_case(at(9, 55), "2h ago"; "hours truncate")]
    #[test_case(at(12, 30), "Just now"; "future stamps read as now")]
    fn relative_phrases(then: DateTime<Utc>, expected: &str) {
        assert_eq!(format_relative(then, at(12, 0)), expected);
    }
}
