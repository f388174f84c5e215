//! Chat panel rendering (message list, indicator line and input box).
//!
//! The list and input helpers are shared with the assistant panel.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use helpdesk_proto::message::Message;

use super::theme::Palette;
use crate::app::{App, PanelFocus};
use crate::compose::ComposeInput;
use crate::feed::FeedController;

/// Render the chat panel. Draws nothing if no chat is open.
pub fn render(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let Some(chat) = app.chat.as_ref() else {
        return;
    };
    let is_focused = app.focus == PanelFocus::Chat;

    let [list_area, indicator_area, input_area] = split_feed_area(area);
    let items = chat
        .feed()
        .visible_messages()
        .iter()
        .map(|m| message_item(m, palette))
        .collect();
    render_list(frame, list_area, chat.title(), items, is_focused, palette);
    render_indicator(frame, indicator_area, chat.feed(), palette);
    render_input(
        frame,
        input_area,
        &chat.input,
        "Reply",
        "Type a reply...",
        is_focused,
        palette,
    );
}

/// Split a feed panel into list, indicator line and input box.
pub(super) fn split_feed_area(area: Rect) -> [Rect; 3] {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .areas(area)
}

/// One list row for a message.
pub(super) fn message_item<'a>(msg: &'a Message, palette: &Palette) -> ListItem<'a> {
    let mut spans = vec![
        Span::styled(&msg.timestamp, palette.dimmed()),
        Span::raw(" "),
        Span::styled(format!("[{}]", msg.avatar), palette.dimmed()),
        Span::raw(" "),
        Span::styled(&msg.sender, palette.sender(msg.is_user)),
        Span::raw(": "),
        Span::styled(&msg.content, palette.normal()),
    ];
    if msg.shows_seen() {
        spans.push(Span::styled(" ✓ Seen", palette.dimmed()));
    }
    ListItem::new(Line::from(spans))
}

/// Render a bordered message list.
pub(super) fn render_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: Vec<ListItem<'_>>,
    is_focused: bool,
    palette: &Palette,
) {
    let block = Block::default()
        .title(Span::styled(title.to_string(), palette.bold()))
        .borders(Borders::ALL)
        .border_style(palette.border(is_focused));

    frame.render_widget(List::new(items).block(block), area);
}

/// Render the line under the list: pagination progress or typing.
pub(super) fn render_indicator(
    frame: &mut Frame,
    area: Rect,
    feed: &FeedController,
    palette: &Palette,
) {
    let text = if feed.is_loading_older() {
        "Loading older messages…".to_string()
    } else if feed.is_typing() {
        format!("{} is typing…", feed.counterpart().name)
    } else if feed.has_older() && feed.viewport().is_at_top() {
        "↑ scroll up for older messages".to_string()
    } else if !feed.viewport().is_at_bottom() {
        "↓ newer messages below".to_string()
    } else {
        String::new()
    };
    let line = Line::from(Span::styled(format!(" {text}"), palette.indicator()));
    frame.render_widget(Paragraph::new(line), area);
}

/// Render a compose box with a block cursor when focused.
pub(super) fn render_input(
    frame: &mut Frame,
    area: Rect,
    input: &ComposeInput,
    title: &str,
    placeholder: &str,
    is_focused: bool,
    palette: &Palette,
) {
    let input_line = if input.text().is_empty() && !is_focused {
        Line::from(Span::styled(placeholder.to_string(), palette.dimmed()))
    } else if is_focused {
        Line::from(Span::styled(input.with_cursor('█'), palette.normal()))
    } else {
        Line::from(Span::styled(input.text().to_string(), palette.normal()))
    };

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(palette.border(is_focused));

    frame.render_widget(Paragraph::new(input_line).block(block), area);
}
