//! Colours and styles for each [`ThemeMode`].

use ratatui::style::{Color, Modifier, Style};

use crate::theme::ThemeMode;

/// Colour set for one theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Primary foreground colour.
    pub fg: Color,
    /// Secondary foreground colour (dimmed text).
    pub fg_dim: Color,
    /// Background colour.
    pub bg: Color,
    /// Highlight colour for focused elements.
    pub highlight: Color,
    /// Colour of the user's own messages.
    pub own: Color,
    /// Colour of the other side's messages.
    pub other: Color,
    /// Unread and warning accents.
    pub accent: Color,
    /// High priority marker.
    pub urgent: Color,
    /// Status bar background.
    pub bar_bg: Color,
}

const LIGHT: Palette = Palette {
    fg: Color::Black,
    fg_dim: Color::Rgb(110, 110, 110),
    bg: Color::White,
    highlight: Color::Blue,
    own: Color::Rgb(30, 90, 200),
    other: Color::Rgb(40, 120, 60),
    accent: Color::Rgb(200, 120, 0),
    urgent: Color::Red,
    bar_bg: Color::Rgb(225, 225, 235),
};

const DARK: Palette = Palette {
    fg: Color::White,
    fg_dim: Color::Gray,
    bg: Color::Black,
    highlight: Color::Cyan,
    own: Color::LightBlue,
    other: Color::LightGreen,
    accent: Color::Yellow,
    urgent: Color::LightRed,
    bar_bg: Color::Rgb(30, 30, 50),
};

impl Palette {
    /// Palette for `mode`.
    #[must_use]
    pub const fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => LIGHT,
            ThemeMode::Dark => DARK,
        }
    }

    /// Normal text style.
    #[must_use]
    pub fn normal(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Dimmed text style (timestamps, metadata).
    #[must_use]
    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.fg_dim)
    }

    /// Bold text style.
    #[must_use]
    pub fn bold(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    /// Focused panel borders.
    #[must_use]
    pub fn highlighted(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Border style for a panel.
    #[must_use]
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.highlighted()
        } else {
            self.dimmed()
        }
    }

    /// Selected item in a list.
    #[must_use]
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Sender name style.
    #[must_use]
    pub fn sender(&self, is_user: bool) -> Style {
        let color = if is_user { self.own } else { self.other };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// Unread items and counters.
    #[must_use]
    pub fn unread(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// High priority marker.
    #[must_use]
    pub fn urgent(&self) -> Style {
        Style::default().fg(self.urgent).add_modifier(Modifier::BOLD)
    }

    /// Transient indicators (typing, loading).
    #[must_use]
    pub fn indicator(&self) -> Style {
        Style::default()
            .fg(self.fg_dim)
            .add_modifier(Modifier::ITALIC)
    }

    /// Status bar background.
    #[must_use]
    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bar_bg)
    }
}
