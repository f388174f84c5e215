//! Terminal UI rendering.

pub mod assistant_panel;
pub mod chat_panel;
pub mod inbox_panel;
pub mod status_bar;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Block,
};

use crate::app::{App, ScreenLayout};
use self::theme::Palette;

/// Rows a feed panel spends on things other than messages: the status bar,
/// two list borders, the indicator line and the three-row input box.
const FEED_CHROME_ROWS: u16 = 1 + 2 + 1 + 3;

/// Number of message rows the chat and assistant panels can show in a
/// terminal `height` rows tall.
#[must_use]
pub fn message_rows(height: u16) -> usize {
    usize::from(height.saturating_sub(FEED_CHROME_ROWS).max(1))
}

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = Palette::for_mode(app.theme_mode());
    frame.render_widget(Block::default().style(palette.normal()), frame.area());

    // Create main layout with status bar at bottom
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let content_area = main_chunks[0];
    let status_area = main_chunks[1];

    match app.layout() {
        ScreenLayout::InboxAndAssistant => {
            let [inbox, assistant] = columns(content_area, [35, 65]);
            inbox_panel::render(frame, inbox, app, &palette);
            assistant_panel::render(frame, assistant, app, &palette);
        }
        ScreenLayout::ThreeColumn => {
            let [inbox, chat, assistant] = columns(content_area, [25, 50, 25]);
            inbox_panel::render(frame, inbox, app, &palette);
            chat_panel::render(frame, chat, app, &palette);
            assistant_panel::render(frame, assistant, app, &palette);
        }
    }

    status_bar::render(frame, status_area, app, &palette);
}

/// Split `area` horizontally by percentages.
fn columns<const N: usize>(area: Rect, percentages: [u16; N]) -> [Rect; N] {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(percentages.map(Constraint::Percentage))
        .areas(area)
}
