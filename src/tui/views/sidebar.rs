//! Sidebar view
//!
//! Category filter list and view switcher

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::services::CatalogService;
use crate::tui::app::{ActiveView, App, FocusedPanel};
use crate::tui::layout::SidebarLayout;

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let layout = SidebarLayout::new(area);

    render_header(frame, app, layout.header);
    render_categories(frame, app, layout.categories);
    render_view_switcher(frame, app, layout.view_switcher);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" ServiceHub ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let user = Paragraph::new(app.settings.current_user_email.as_str())
        .block(block)
        .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(user, area);
}

fn render_categories(frame: &mut Frame, app: &App, area: Rect) {
    let border_color = if app.focused_panel == FocusedPanel::Sidebar {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Categories ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let counts = CatalogService::new(app.storage)
        .category_counts()
        .unwrap_or_default();
    let total: usize = counts.iter().map(|(_, n)| n).sum();

    let mut items = vec![category_item("All", total)];
    items.extend(
        counts
            .iter()
            .map(|(category, n)| category_item(&category.name, *n)),
    );

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.category_index));

    frame.render_stateful_widget(list, area, &mut state);
}

fn category_item(name: &str, count: usize) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        Span::styled(
            format!("{:<18}", truncate(name, 18)),
            Style::default().fg(Color::White),
        ),
        Span::styled(format!("{:>3}", count), Style::default().fg(Color::DarkGray)),
    ]))
}

fn render_view_switcher(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Views ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let items: Vec<ListItem> = ActiveView::all()
        .iter()
        .map(|view| {
            let active = app.active_view == *view;
            let style = if active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(Line::from(vec![
                Span::styled(if active { "▶ " } else { "  " }, style),
                Span::styled(
                    format!("[{}] ", view.hotkey()),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(view.title(), style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Plumbing", 18), "Plumbing");
        assert_eq!(truncate("Catering & Events Planning", 10), "Catering …");
        assert_eq!(truncate("Café Crème", 5), "Café…");
    }
}
