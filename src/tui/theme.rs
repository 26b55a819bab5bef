//! Switchable dark/light palette for the predex TUI.
//!
//! Views take a `&Theme` instead of using inline `Color::*` literals, so
//! the whole interface re-skins when the user toggles themes.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

use crate::core::catalog::Category;
use crate::core::prefs::ThemePref;

/// A full color palette plus the style helpers views render with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Primary accent — active items, focused borders.
    pub primary: Color,
    /// Lighter primary — highlights, hints, secondary focus.
    pub primary_light: Color,
    /// Accent — calls to action, important items.
    pub accent: Color,
    /// Base background.
    pub bg_base: Color,
    /// Elevated panels, code blocks.
    pub bg_surface: Color,
    /// Primary text.
    pub text: Color,
    /// Muted text — secondary labels.
    pub text_muted: Color,
    /// Dim text — disabled items, faint hints.
    pub text_dim: Color,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
    pub info: Color,
}

impl Theme {
    pub const fn dark() -> Self {
        Self {
            primary: Color::Rgb(0x7C, 0x3A, 0xED),
            primary_light: Color::Rgb(0xA7, 0x8B, 0xFA),
            accent: Color::Rgb(0xF5, 0x9E, 0x0B),
            bg_base: Color::Rgb(0x16, 0x16, 0x1E),
            bg_surface: Color::Rgb(0x20, 0x20, 0x2C),
            text: Color::Rgb(0xE4, 0xE4, 0xE7),
            text_muted: Color::Rgb(0x8A, 0x8A, 0x94),
            text_dim: Color::Rgb(0x52, 0x52, 0x5B),
            error: Color::Rgb(0xEF, 0x44, 0x44),
            success: Color::Rgb(0x22, 0xC5, 0x5E),
            warning: Color::Rgb(0xF5, 0x9E, 0x0B),
            info: Color::Rgb(0x3B, 0x82, 0xF6),
        }
    }

    pub const fn light() -> Self {
        Self {
            primary: Color::Rgb(0x6D, 0x28, 0xD9),
            primary_light: Color::Rgb(0x8B, 0x5C, 0xF6),
            accent: Color::Rgb(0xB4, 0x53, 0x09),
            bg_base: Color::Rgb(0xFA, 0xFA, 0xF9),
            bg_surface: Color::Rgb(0xEF, 0xEF, 0xEC),
            text: Color::Rgb(0x1C, 0x19, 0x17),
            text_muted: Color::Rgb(0x57, 0x53, 0x4E),
            text_dim: Color::Rgb(0xA8, 0xA2, 0x9E),
            error: Color::Rgb(0xB9, 0x1C, 0x1C),
            success: Color::Rgb(0x15, 0x80, 0x3D),
            warning: Color::Rgb(0xA1, 0x62, 0x07),
            info: Color::Rgb(0x1D, 0x4E, 0xD8),
        }
    }

    pub fn for_pref(pref: ThemePref) -> Self {
        match pref {
            ThemePref::Dark => Self::dark(),
            ThemePref::Light => Self::light(),
        }
    }

    /// Badge color for a category. Presentation grouping only.
    pub fn category_color(&self, category: Category) -> Color {
        match category {
            Category::Equality => self.info,
            Category::Comparison => self.success,
            Category::Pattern => self.primary_light,
            Category::Presence => self.warning,
            Category::Inclusion => self.accent,
            Category::Boolean => self.error,
        }
    }

    // ── Style helpers ───────────────────────────────────────────────────

    /// Accent-colored bold text (titles, active items).
    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Section header style.
    pub fn heading(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn border_default(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    /// Highlighted/selected item.
    pub fn highlight(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    /// Key hint style (e.g., "[q]:quit").
    pub fn key_hint(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    /// Status bar brand badge.
    pub fn brand_badge(&self) -> Style {
        Style::default()
            .fg(self.bg_base)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    // ── Block builders ──────────────────────────────────────────────────

    /// A bordered block with focused styling.
    pub fn block_focused<'a>(&self, title: &'a str) -> Block<'a> {
        Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(self.border_focused())
    }

    /// A bordered block with default (unfocused) styling.
    pub fn block_default<'a>(&self, title: &'a str) -> Block<'a> {
        Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(self.border_default())
    }
}
