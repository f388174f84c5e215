//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme::Palette;
use crate::app::{App, PanelFocus};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let help_text = match app.focus {
        PanelFocus::Inbox => "↑↓/jk: navigate | Enter: open | f: filter | s: sort | Tab: panel",
        PanelFocus::Chat => "Enter: send | ↑↓ PgUp/PgDn: scroll | Ctrl-W: close | Tab: panel",
        PanelFocus::Assistant => "Enter: ask | 1-3: suggestion | ↑↓: scroll | Tab: panel",
    };

    let mut spans = vec![
        Span::styled(
            concat!("HelpDesk v", env!("CARGO_PKG_VERSION")),
            palette.bold(),
        ),
        Span::raw(" | "),
        Span::raw(format!("theme: {} (Ctrl-T)", app.theme_mode())),
        Span::raw(" | "),
    ];
    if let Some(notice) = &app.notice {
        spans.push(Span::styled(notice.as_str(), palette.urgent()));
        spans.push(Span::raw(" | "));
    }
    spans.push(Span::styled(help_text, palette.dimmed()));
    spans.push(Span::styled(" | Esc: quit", palette.dimmed()));

    let paragraph = Paragraph::new(Line::from(spans)).style(palette.status_bar());
    frame.render_widget(paragraph, area);
}
