//! Assistant panel rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::ListItem,
};

use super::chat_panel::{message_item, render_indicator, render_input, render_list, split_feed_area};
use super::theme::Palette;
use crate::app::{App, PanelFocus};
use crate::assistant::{INTRO, SUGGESTED_QUESTIONS, TITLE};

/// Render the assistant panel: intro, suggestions, answers and input.
pub fn render(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let session = &app.assistant;
    let is_focused = app.focus == PanelFocus::Assistant;
    let [list_area, indicator_area, input_area] = split_feed_area(area);

    let mut items: Vec<ListItem> = Vec::new();
    if session.intro_visible() {
        items.push(ListItem::new(Line::from(Span::styled(
            INTRO,
            palette.indicator(),
        ))));
    }
    items.extend(
        session
            .feed()
            .visible_messages()
            .iter()
            .map(|m| message_item(m, palette)),
    );
    if session.suggestions_visible() {
        items.push(ListItem::new(Line::from(Span::styled(
            "Suggested questions:",
            palette.dimmed(),
        ))));
        items.extend(SUGGESTED_QUESTIONS.iter().enumerate().map(|(i, q)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {}. ", i + 1), palette.highlighted()),
                Span::styled(*q, palette.normal()),
            ]))
        }));
    }

    render_list(frame, list_area, TITLE, items, is_focused, palette);
    render_indicator(frame, indicator_area, session.feed(), palette);
    render_input(
        frame,
        input_area,
        &session.input,
        "Ask",
        "Ask a question...",
        is_focused,
        palette,
    );
}
