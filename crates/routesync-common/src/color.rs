//! ANSI colours for terminal output.

use std::fmt;

const RESET: &str = "\x1b[0m";

/// Colours used to tag driver log lines by the kind of change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Creation.
    Cyan,
    /// Association and update.
    Green,
    /// Disassociation and deletion.
    Red,
    /// Drift in an ignored route.
    Yellow,
}

impl Color {
    /// Returns the ANSI SGR escape sequence for this colour.
    pub const fn ansi_code(&self) -> &'static str {
        match self {
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::Cyan => "\x1b[36m",
        }
    }

    /// Wraps `text` in this colour's escape sequence.
    pub fn paint(&self, text: &str) -> String {
        format!("{}{}{}", self.ansi_code(), text, RESET)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Color::Cyan => "cyan",
            Color::Green => "green",
            Color::Red => "red",
            Color::Yellow => "yellow",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint() {
        assert_eq!(Color::Red.paint("x"), "\x1b[31mx\x1b[0m");
        assert_eq!(Color::Cyan.paint(""), "\x1b[36m\x1b[0m");
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::Yellow.to_string(), "yellow");
    }
}
