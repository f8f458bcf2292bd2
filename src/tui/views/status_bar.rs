//! Status bar view
//!
//! Active view, open request count and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::models::BookingStatus;
use crate::tui::app::{App, InputMode};

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let pending = app
        .storage
        .bookings
        .get_by_status(BookingStatus::Pending)
        .map(|b| b.len())
        .unwrap_or(0);

    let mut spans = vec![
        Span::styled(
            format!(" {} ", app.active_view.title()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::styled(
            format!("{} pending", pending),
            Style::default().fg(if pending > 0 { Color::Yellow } else { Color::Green }),
        ),
    ];

    if app.input_mode == InputMode::Editing {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            "typing: Enter to apply, Esc to stop",
            Style::default().fg(Color::Yellow),
        ));
    }

    let hints = " q:Quit  ?:Help  n:Book  1-5:Views ";
    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding = (area.width as usize).saturating_sub(left_len + hints.len());
    spans.push(Span::raw(" ".repeat(padding.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
