//! Help dialog
//!
//! Shows the global keys plus those of the active view

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{ActiveView, App};
use crate::tui::layout::centered_rect;

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_lines(app.active_view))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn help_lines(view: ActiveView) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Global Keys"),
        key_line("q", "Quit"),
        key_line("?", "Show/hide help"),
        key_line("1-5", "Catalog, Search, My Bookings, Provider, Admin"),
        key_line("Tab", "Switch sidebar/main focus"),
        key_line("j/k", "Move selection down/up"),
        key_line("n", "New booking"),
        Line::from(""),
    ];

    match view {
        ActiveView::Catalog => {
            lines.push(heading("Catalog"));
            lines.push(key_line("Enter/b", "Book the selected provider"));
            lines.push(key_line("Sidebar", "Pick a category to filter"));
        }
        ActiveView::Search => {
            lines.push(heading("Search"));
            lines.push(key_line("/ or i", "Edit search text"));
            lines.push(key_line("s", "Cycle sort order"));
            lines.push(key_line("v", "Toggle verified only"));
            lines.push(key_line("+/-", "Raise/lower minimum rating"));
            lines.push(key_line("[ / ]", "Lower/raise maximum rate"));
            lines.push(key_line("c", "Filter by sidebar category"));
            lines.push(key_line("x", "Clear filters"));
            lines.push(key_line("Enter/b", "Book the selected provider"));
        }
        ActiveView::UserDashboard => {
            lines.push(heading("My Bookings"));
            lines.push(key_line("h/l", "Previous/next section"));
            lines.push(key_line("c", "Cancel the selected upcoming booking"));
        }
        ActiveView::ProviderDashboard => {
            lines.push(heading("Provider Dashboard"));
            lines.push(key_line("h/l", "Previous/next section"));
            lines.push(key_line("p", "Show the next provider"));
            lines.push(key_line("a", "Accept the selected request"));
            lines.push(key_line("d", "Decline the selected request"));
            lines.push(key_line("c", "Mark the selected job completed"));
        }
        ActiveView::AdminDashboard => {
            lines.push(heading("Admin Dashboard"));
            lines.push(key_line("h/l", "Previous/next section"));
            lines.push(key_line("v", "Verify the selected provider"));
            lines.push(key_line("s", "Suspend the selected user"));
            lines.push(key_line("r", "Reinstate the selected user"));
            lines.push(key_line("c", "Cancel the selected booking"));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn heading(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    ))
}

fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>10}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}
