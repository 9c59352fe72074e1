//! Terminal styling for report lines: color, status markers, and whether
//! tables get Unicode borders.

use colored::*;
use std::env;
use std::io::IsTerminal;

/// When report lines are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Color only when stdout is a terminal that is not `TERM=dumb`.
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => stdout_supports_color(),
        }
    }

    /// Resolve the mode from the `NO_COLOR`, `CLICOLOR` and `CLICOLOR_FORCE`
    /// values. A forced color wins over any request to disable it.
    fn from_env_values(
        no_color: Option<&str>,
        clicolor: Option<&str>,
        clicolor_force: Option<&str>,
    ) -> Self {
        if clicolor_force == Some("1") {
            Self::Always
        } else if no_color.is_some() || clicolor == Some("0") {
            Self::Never
        } else {
            Self::Auto
        }
    }
}

/// Status markers printed in front of report lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Ok,
    Fail,
    Warn,
    Info,
}

impl Marker {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Ok => "✓",
            Self::Fail => "✗",
            Self::Warn => "⚠",
            Self::Info => "ℹ",
        }
    }

    pub fn fallback(&self) -> &'static str {
        match self {
            Self::Ok => "[OK]",
            Self::Fail => "[FAIL]",
            Self::Warn => "[WARN]",
            Self::Info => "[INFO]",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FormattingConfig {
    pub color: ColorMode,
    /// Use Unicode markers and table borders.
    pub unicode: bool,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            unicode: true,
        }
    }
}

impl FormattingConfig {
    pub fn new(color: ColorMode, unicode: bool) -> Self {
        Self { color, unicode }
    }

    /// Default Unicode styling with color chosen by the environment.
    pub fn from_env() -> Self {
        let var = |name: &str| env::var(name).ok();
        Self {
            color: ColorMode::from_env_values(
                var("NO_COLOR").as_deref(),
                var("CLICOLOR").as_deref(),
                var("CLICOLOR_FORCE").as_deref(),
            ),
            ..Self::default()
        }
    }

    /// ASCII markers and borders, never colored.
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
            unicode: false,
        }
    }
}

pub trait OutputFormatter {
    fn success(&self, text: &str) -> String;
    fn error(&self, text: &str) -> String;
    fn warning(&self, text: &str) -> String;
    fn info(&self, text: &str) -> String;
    fn header(&self, text: &str) -> String;
    fn marker(&self, marker: Marker) -> String;
    fn bold(&self, text: &str) -> String;
    fn dim(&self, text: &str) -> String;
    /// Whether tables should use Unicode borders.
    fn unicode(&self) -> bool;
}

/// Pick a formatter for `config`.
pub fn formatter_for(config: FormattingConfig) -> Box<dyn OutputFormatter> {
    if config.color == ColorMode::Never && !config.unicode {
        Box::new(PlainFormatter)
    } else {
        Box::new(ColoredFormatter::new(config))
    }
}

pub struct ColoredFormatter {
    config: FormattingConfig,
}

impl ColoredFormatter {
    pub fn new(config: FormattingConfig) -> Self {
        colored::control::set_override(config.color.should_use_color());
        Self { config }
    }

    fn paint(&self, text: &str, paint: impl FnOnce(&str) -> ColoredString) -> String {
        if self.config.color.should_use_color() {
            paint(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn success(&self, text: &str) -> String {
        self.paint(text, |t| t.green())
    }

    fn error(&self, text: &str) -> String {
        self.paint(text, |t| t.red())
    }

    fn warning(&self, text: &str) -> String {
        self.paint(text, |t| t.yellow())
    }

    fn info(&self, text: &str) -> String {
        self.paint(text, |t| t.cyan())
    }

    fn header(&self, text: &str) -> String {
        self.paint(text, |t| t.blue().bold())
    }

    fn marker(&self, marker: Marker) -> String {
        let text = if self.config.unicode {
            marker.symbol()
        } else {
            marker.fallback()
        };
        match marker {
            Marker::Ok => self.success(text),
            Marker::Fail => self.error(text),
            Marker::Warn => self.warning(text),
            Marker::Info => self.info(text),
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(text, |t| t.bold())
    }

    fn dim(&self, text: &str) -> String {
        self.paint(text, |t| t.dimmed())
    }

    fn unicode(&self) -> bool {
        self.config.unicode
    }
}

pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn success(&self, text: &str) -> String {
        text.to_string()
    }

    fn error(&self, text: &str) -> String {
        text.to_string()
    }

    fn warning(&self, text: &str) -> String {
        text.to_string()
    }

    fn info(&self, text: &str) -> String {
        text.to_string()
    }

    fn header(&self, text: &str) -> String {
        text.to_string()
    }

    fn marker(&self, marker: Marker) -> String {
        marker.fallback().to_string()
    }

    fn bold(&self, text: &str) -> String {
        text.to_string()
    }

    fn dim(&self, text: &str) -> String {
        text.to_string()
    }

    fn unicode(&self) -> bool {
        false
    }
}

fn stdout_supports_color() -> bool {
    env::var("TERM").map_or(true, |term| term != "dumb") && std::io::stdout().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_selects_color_mode() {
        assert_eq!(ColorMode::from_env_values(None, None, None), ColorMode::Auto);
        assert_eq!(ColorMode::from_env_values(Some(""), None, None), ColorMode::Never);
        assert_eq!(ColorMode::from_env_values(None, Some("0"), None), ColorMode::Never);
        assert_eq!(
            ColorMode::from_env_values(Some("1"), None, Some("1")),
            ColorMode::Always
        );
    }

    #[test]
    fn plain_formatter_uses_ascii_markers() {
        let formatter = formatter_for(FormattingConfig::plain());
        assert_eq!(formatter.marker(Marker::Warn), "[WARN]");
        assert_eq!(formatter.header("Scales"), "Scales");
        assert!(!formatter.unicode());
    }

    #[test]
    fn uncolored_unicode_formatter_keeps_symbols() {
        let formatter = ColoredFormatter::new(FormattingConfig::new(ColorMode::Never, true));
        assert_eq!(formatter.marker(Marker::Ok), "✓");
        assert_eq!(formatter.bold("x"), "x");
    }
}
