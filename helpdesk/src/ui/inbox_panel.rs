//! Inbox list rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use helpdesk_proto::inbox::InboxItem;

use super::theme::Palette;
use crate::app::{App, PanelFocus};

/// Preview length before truncation.
const PREVIEW_CHARS: usize = 28;

const SKELETON_ROW: &str = "░░░░░░░░ ░░░░░░░░░░░░";

/// Render the inbox with its filter/sort header.
pub fn render(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let is_focused = app.focus == PanelFocus::Inbox;
    let inbox = &app.inbox;

    let title = format!(
        "Inbox ({} open) [{}] [{}]",
        inbox.open_count(),
        inbox.filter().label(),
        inbox.sort().label()
    );
    let block = Block::default()
        .title(Span::styled(title, palette.bold()))
        .borders(Borders::ALL)
        .border_style(palette.border(is_focused));

    let items: Vec<ListItem> = if inbox.is_loading() {
        // Skeleton rows while the list "loads".
        (0..3)
            .map(|_| ListItem::new(Line::from(Span::styled(SKELETON_ROW, palette.dimmed()))))
            .collect()
    } else {
        let visible = inbox.visible_items();
        if visible.is_empty() {
            vec![ListItem::new(Line::from(Span::styled(
                "No conversations",
                palette.dimmed(),
            )))]
        } else {
            visible
                .into_iter()
                .enumerate()
                .map(|(idx, item)| {
                    let is_selected = idx == inbox.selected();
                    let style = if is_selected && is_focused {
                        palette.selected()
                    } else if is_selected {
                        palette.highlighted()
                    } else {
                        palette.normal()
                    };
                    ListItem::new(item_lines(item, palette)).style(style)
                })
                .collect()
        }
    };

    frame.render_widget(List::new(items).block(block), area);
}

/// Two lines per item: header and message preview.
fn item_lines<'a>(item: &'a InboxItem, palette: &Palette) -> Vec<Line<'a>> {
    let name_style = if item.is_read {
        palette.normal()
    } else {
        palette.unread()
    };

    let mut header = vec![
        Span::styled(format!("[{}] ", item.avatar), palette.dimmed()),
        Span::styled(&item.sender, name_style),
    ];
    if let Some(company) = &item.company {
        header.push(Span::styled(format!(" · {company}"), palette.dimmed()));
    }
    if item.is_flagged() {
        header.push(Span::styled(" !", palette.urgent()));
    }
    if item.has_attachment {
        header.push(Span::styled(" 📎", palette.dimmed()));
    }
    if item.unread > 0 {
        header.push(Span::styled(format!(" ({})", item.unread), palette.unread()));
    }
    header.push(Span::styled(format!("  {}", item.time), palette.dimmed()));

    let mut preview: String = item.message.chars().take(PREVIEW_CHARS).collect();
    if item.message.chars().count() > PREVIEW_CHARS {
        preview.push('…');
    }

    vec![
        Line::from(header),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(preview, palette.dimmed()),
        ]),
    ]
}
