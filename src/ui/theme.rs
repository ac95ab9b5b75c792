//! Theme configuration for console output.

use crossterm::style::{style, Color, Stylize};

/// Colour theme for the application
#[derive(Debug, Clone)]
pub struct Theme {
    pub heading: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub muted: Color,
    /// When false every helper returns the text untouched
    pub styled: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            heading: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            muted: Color::DarkGrey,
            styled: true,
        }
    }
}

impl Theme {
    /// A theme that emits no escape codes
    pub fn plain() -> Self {
        Theme {
            styled: false,
            ..Theme::default()
        }
    }

    pub fn heading(&self, text: &str) -> String {
        if self.styled {
            style(text).with(self.heading).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(text, self.success)
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, self.error)
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(text, self.warning)
    }

    pub fn muted(&self, text: &str) -> String {
        self.paint(text, self.muted)
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.styled {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }
}
