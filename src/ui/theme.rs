//! # Theme System
//!
//! Provides the two color themes used by the tooldeck TUI.
//!
//! ## Overview
//!
//! The [`Theme`] struct defines all colors used throughout the UI. Rendering
//! code references theme fields instead of hardcoding colors. The dark or
//! light theme is chosen by the `darkMode` preference and can be toggled at
//! runtime.

use crate::notify::NotificationKind;
use ratatui::style::Color;

/// All colors used by the tooldeck TUI, grouped by semantic role.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Human-readable name.
    pub name: &'static str,

    // -- Background colors --
    /// Main background color for panels.
    pub bg: Color,

    // -- Foreground / text colors --
    /// Primary text color (e.g. list items, descriptions).
    pub fg: Color,
    /// Muted/secondary text (e.g. separators, hints, footer).
    pub fg_dim: Color,

    // -- Accent / brand colors --
    /// Primary accent used for branding, focused borders, selected-item bg.
    pub accent: Color,
    /// Secondary accent for highlighted names and the search text.
    pub secondary: Color,

    // -- Notification colors --
    pub info: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Theme {
    pub fn dark() -> &'static Theme {
        &DARK
    }

    pub fn light() -> &'static Theme {
        &LIGHT
    }

    pub fn for_mode(dark_mode: bool) -> &'static Theme {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Border color for a notification of the given kind.
    pub fn notification_color(&self, kind: NotificationKind) -> Color {
        match kind {
            NotificationKind::Info => self.info,
            NotificationKind::Success => self.success,
            NotificationKind::Warning => self.warning,
            NotificationKind::Error => self.error,
        }
    }
}

static DARK: Theme = Theme {
    name: "Dark",
    bg: Color::Rgb(30, 30, 46),
    fg: Color::Rgb(205, 214, 244),
    fg_dim: Color::Rgb(108, 112, 134),
    accent: Color::Rgb(102, 126, 234),   // #667eea
    secondary: Color::Rgb(118, 75, 162), // #764ba2
    info: Color::Rgb(102, 126, 234),     // #667eea
    success: Color::Rgb(16, 185, 129),   // #10b981
    warning: Color::Rgb(245, 158, 11),   // #f59e0b
    error: Color::Rgb(239, 68, 68),      // #ef4444
};

static LIGHT: Theme = Theme {
    name: "Light",
    bg: Color::Rgb(239, 241, 245),
    fg: Color::Rgb(76, 79, 105),
    fg_dim: Color::Rgb(140, 143, 161),
    accent: Color::Rgb(102, 126, 234),
    secondary: Color::Rgb(118, 75, 162),
    info: Color::Rgb(102, 126, 234),
    success: Color::Rgb(16, 185, 129),
    warning: Color::Rgb(245, 158, 11),
    error: Color::Rgb(239, 68, 68),
};
