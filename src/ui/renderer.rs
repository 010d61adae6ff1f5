use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::connectivity::Connectivity;
use crate::core::constants::NO_CONNECTION_MESSAGE;
use crate::core::conversation::Conversation;
use crate::ui::bubbles::message_lines;
use crate::ui::theme::Theme;

const INPUT_TITLE: &str = "Type a command (Enter to send, \"help\" for commands, Esc to quit)";
const TITLE_HEIGHT: u16 = 1;
const INPUT_HEIGHT: u16 = 3;

/// Everything one frame needs.
pub struct ChatView<'a> {
    pub conversation: &'a Conversation,
    pub input: &'a str,
    /// Lines scrolled up from the newest message.
    pub scroll_from_bottom: u16,
    pub connectivity: Connectivity,
    pub tick: usize,
    pub theme: &'a Theme,
}

/// Transcript lines, oldest message first, one blank line between bubbles.
pub fn build_display_lines(conversation: &Conversation, theme: &Theme, tick: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for message in conversation.chronological() {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.extend(message_lines(message, theme, tick));
    }
    lines
}

fn split_words(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut in_space = None;
    for (idx, ch) in text.char_indices() {
        let space = ch.is_whitespace();
        if in_space.is_some_and(|prev| prev != space) {
            pieces.push(&text[start..idx]);
            start = idx;
        }
        in_space = Some(space);
    }
    if start < text.len() {
        pieces.push(&text[start..]);
    }
    pieces
}

/// Split off the longest prefix that fits in `width` columns, always at
/// least one character.
fn split_at_width(text: &str, width: usize) -> (&str, &str) {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if idx > 0 && used + w > width {
            return text.split_at(idx);
        }
        used += w;
    }
    (text, "")
}

fn finish_row(row: &mut Vec<Span<'static>>, rows: &mut Vec<Vec<Span<'static>>>) {
    while row
        .last()
        .is_some_and(|span| span.content.trim().is_empty())
    {
        row.pop();
    }
    rows.push(std::mem::take(row));
}

/// Word-wrap `lines` to `width` columns. Every row keeps the style and
/// alignment of its source line; words wider than a row are split.
pub fn wrap_lines(lines: &[Line<'static>], width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width.max(1));
    let mut wrapped = Vec::new();

    for line in lines {
        let mut rows: Vec<Vec<Span<'static>>> = Vec::new();
        let mut row: Vec<Span<'static>> = Vec::new();
        let mut used = 0;

        for span in &line.spans {
            for piece in split_words(span.content.as_ref()) {
                let piece_width = piece.width();
                if used + piece_width <= width {
                    row.push(Span::styled(piece.to_string(), span.style));
                    used += piece_width;
                    continue;
                }
                if used > 0 {
                    finish_row(&mut row, &mut rows);
                    used = 0;
                }
                // Whitespace at a break is dropped.
                if piece.trim().is_empty() {
                    continue;
                }
                let mut rest = piece;
                while rest.width() > width {
                    let (head, tail) = split_at_width(rest, width);
                    row.push(Span::styled(head.to_string(), span.style));
                    finish_row(&mut row, &mut rows);
                    rest = tail;
                }
                if !rest.is_empty() {
                    row.push(Span::styled(rest.to_string(), span.style));
                    used = rest.width();
                }
            }
        }
        if !row.is_empty() || rows.is_empty() {
            rows.push(row);
        }

        wrapped.extend(rows.into_iter().map(|spans| {
            let mut wrapped_line = Line::from(spans).style(line.style);
            wrapped_line.alignment = line.alignment;
            wrapped_line
        }));
    }
    wrapped
}

/// Rows `lines` occupy once wrapped to `width` columns.
pub fn wrapped_line_count(lines: &[Line<'static>], width: u16) -> u16 {
    u16::try_from(wrap_lines(lines, width).len()).unwrap_or(u16::MAX)
}

/// Scroll offset from the top that keeps the view `scroll_from_bottom`
/// rows above the newest line.
pub fn scroll_offset(total: u16, visible: u16, scroll_from_bottom: u16) -> u16 {
    let max_offset = total.saturating_sub(visible);
    max_offset.saturating_sub(scroll_from_bottom)
}

/// Largest useful `scroll_from_bottom` for a terminal of the given size.
pub fn max_scroll_from_bottom(
    conversation: &Conversation,
    theme: &Theme,
    tick: usize,
    width: u16,
    height: u16,
) -> u16 {
    let visible = height.saturating_sub(TITLE_HEIGHT + INPUT_HEIGHT);
    let lines = build_display_lines(conversation, theme, tick);
    wrapped_line_count(&lines, width).saturating_sub(visible)
}

fn title_line(view: &ChatView<'_>) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("Recipe Bot v{}", env!("CARGO_PKG_VERSION")),
        view.theme.title_style,
    )];
    if !view.connectivity.is_online() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!(" {NO_CONNECTION_MESSAGE} "),
            view.theme.offline_banner_style,
        ));
    }
    Line::from(spans)
}

pub fn ui(f: &mut Frame, view: &ChatView<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(INPUT_HEIGHT),
        ])
        .split(f.area());

    f.render_widget(Paragraph::new(title_line(view)), chunks[0]);
    render_messages(f, view, chunks[1]);
    render_input(f, view, chunks[2]);
}

fn render_messages(f: &mut Frame, view: &ChatView<'_>, area: Rect) {
    let lines = build_display_lines(view.conversation, view.theme, view.tick);
    let rows = wrap_lines(&lines, area.width);
    let total = u16::try_from(rows.len()).unwrap_or(u16::MAX);
    let offset = scroll_offset(total, area.height, view.scroll_from_bottom);

    f.render_widget(Paragraph::new(rows).scroll((offset, 0)), area);
}

fn render_input(f: &mut Frame, view: &ChatView<'_>, area: Rect) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let input_width = view.input.width();
    // Keep the tail of long input visible.
    let visible: String = if input_width > inner_width.saturating_sub(1) {
        let mut kept = String::new();
        let mut used = 0;
        for ch in view.input.chars().rev() {
            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if used + w > inner_width.saturating_sub(1) {
                break;
            }
            used += w;
            kept.insert(0, ch);
        }
        kept
    } else {
        view.input.to_string()
    };

    let cursor_x = area.x + 1 + visible.width() as u16;
    let input = Paragraph::new(Span::styled(visible, view.theme.input_text_style)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(view.theme.input_border_style)
            .title(Span::styled(INPUT_TITLE, view.theme.input_title_style)),
    );
    f.render_widget(input, area);
    f.set_cursor_position(Position::new(
        cursor_x.min(area.right().saturating_sub(2)),
        area.y + 1,
    ));
}
