//! Theme palettes for the timeline.
//!
//! Provides the four app themes (light, dark, sepia, black) as ratatui colors.

use ratatui::style::{Color, Modifier, Style};
use std::fmt;
use std::str::FromStr;

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors on regardless of environment.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// True when colors should be used.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== ThemeName =====

/// Names of the available palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeName {
    /// Default palette.
    #[default]
    Light,
    /// Dark palette.
    Dark,
    /// Warm paper-like palette.
    Sepia,
    /// True black palette for OLED screens.
    Black,
}

/// Theme name not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme '{0}' (expected light, dark, sepia or black)")]
pub struct UnknownTheme(pub String);

impl ThemeName {
    /// Every theme in cycling order.
    pub const ALL: [ThemeName; 4] = [
        ThemeName::Light,
        ThemeName::Dark,
        ThemeName::Sepia,
        ThemeName::Black,
    ];

    /// Lowercase name used in config and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
            ThemeName::Sepia => "sepia",
            ThemeName::Black => "black",
        }
    }

    /// Next theme in cycling order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            ThemeName::Light => ThemeName::Dark,
            ThemeName::Dark => ThemeName::Sepia,
            ThemeName::Sepia => ThemeName::Black,
            ThemeName::Black => ThemeName::Light,
        }
    }
}

impl FromStr for ThemeName {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== Theme =====

/// Resolved palette used by every cell and chrome widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Palette name.
    pub name: ThemeName,
    /// Screen background.
    pub background: Color,
    /// Body text.
    pub primary_text: Color,
    /// Titles of secondary lines and timestamps.
    pub secondary_text: Color,
    /// User names.
    pub link: Color,
    /// Timeline dot and rail.
    pub accent: Color,
    /// Bytes added.
    pub positive: Color,
    /// Bytes removed.
    pub negative: Color,
    /// Article header background.
    pub header_background: Color,
}

impl Theme {
    /// Palette for `name`, or monochrome when colors are off.
    pub fn new(name: ThemeName, colors: ColorConfig) -> Self {
        if !colors.colors_enabled() {
            return Self::monochrome(name);
        }
        match name {
            ThemeName::Light => Self {
                name,
                background: Color::Rgb(255, 255, 255),
                primary_text: Color::Rgb(32, 33, 34),
                secondary_text: Color::Rgb(114, 119, 125),
                link: Color::Rgb(51, 102, 204),
                accent: Color::Rgb(51, 102, 204),
                positive: Color::Rgb(0, 175, 137),
                negative: Color::Rgb(210, 40, 48),
                header_background: Color::Rgb(248, 249, 250),
            },
            ThemeName::Dark => Self {
                name,
                background: Color::Rgb(39, 41, 45),
                primary_text: Color::Rgb(234, 236, 240),
                secondary_text: Color::Rgb(162, 169, 177),
                link: Color::Rgb(105, 147, 221),
                accent: Color::Rgb(105, 147, 221),
                positive: Color::Rgb(0, 175, 137),
                negative: Color::Rgb(255, 65, 83),
                header_background: Color::Rgb(32, 33, 34),
            },
            ThemeName::Sepia => Self {
                name,
                background: Color::Rgb(248, 241, 227),
                primary_text: Color::Rgb(51, 51, 51),
                secondary_text: Color::Rgb(100, 98, 94),
                link: Color::Rgb(51, 102, 204),
                accent: Color::Rgb(51, 102, 204),
                positive: Color::Rgb(0, 175, 137),
                negative: Color::Rgb(210, 40, 48),
                header_background: Color::Rgb(240, 230, 214),
            },
            ThemeName::Black => Self {
                name,
                background: Color::Black,
                primary_text: Color::Rgb(234, 236, 240),
                secondary_text: Color::Rgb(162, 169, 177),
                link: Color::Rgb(105, 147, 221),
                accent: Color::Rgb(105, 147, 221),
                positive: Color::Rgb(0, 175, 137),
                negative: Color::Rgb(255, 65, 83),
                header_background: Color::Black,
            },
        }
    }

    fn monochrome(name: ThemeName) -> Self {
        Self {
            name,
            background: Color::Reset,
            primary_text: Color::Reset,
            secondary_text: Color::Reset,
            link: Color::Reset,
            accent: Color::Reset,
            positive: Color::Reset,
            negative: Color::Reset,
            header_background: Color::Reset,
        }
    }

    /// Body text on the background.
    pub fn base(&self) -> Style {
        Style::default().fg(self.primary_text).bg(self.background)
    }

    /// Secondary text.
    pub fn secondary(&self) -> Style {
        Style::default().fg(self.secondary_text)
    }

    /// Bold body text.
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary_text)
            .add_modifier(Modifier::BOLD)
    }

    /// User names.
    pub fn link(&self) -> Style {
        Style::default().fg(self.link)
    }

    /// Timeline dot and rail.
    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Style for a byte delta: positive green, negative red, zero secondary.
    pub fn delta(&self, byte_delta: i64) -> Style {
        match byte_delta.signum() {
            1 => Style::default().fg(self.positive),
            -1 => Style::default().fg(self.negative),
            _ => self.secondary(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeName::default(), ColorConfig::enabled())
    }
}

// ===== Tests =====
