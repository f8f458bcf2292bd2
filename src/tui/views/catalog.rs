//! Catalog view: providers in the sidebar's category plus a detail pane

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::models::Provider;
use crate::tui::app::{App, FocusedPanel};
use crate::tui::layout::CatalogLayout;

use super::format_money;

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let layout = CatalogLayout::new(area);
    let providers = app.catalog_providers();
    if app.provider_index >= providers.len() {
        app.provider_index = providers.len().saturating_sub(1);
    }

    let title = match app.selected_category() {
        Some(category) => format!(" {} ({}) ", category.name, providers.len()),
        None => format!(" All Providers ({}) ", providers.len()),
    };
    let focused = app.focused_panel == FocusedPanel::Main;
    render_provider_table(frame, app, &providers, app.provider_index, &title, focused, layout.list);
    render_details(frame, app, providers.get(app.provider_index), layout.details);
}

/// Provider table shared with the search view
pub(crate) fn render_provider_table(
    frame: &mut Frame,
    app: &App,
    providers: &[Provider],
    selected: usize,
    title: &str,
    focused: bool,
    area: Rect,
) {
    let block = Block::default()
        .title(title.to_string())
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { Color::Cyan } else { Color::White }));

    if providers.is_empty() {
        let text = Paragraph::new("No providers match")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(22),
        Constraint::Length(16),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(14),
        Constraint::Length(3),
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("Name").style(bold),
        Cell::from("Category").style(bold),
        Cell::from("City").style(bold),
        Cell::from("Rate/hr").style(bold),
        Cell::from("Rating").style(bold),
        Cell::from("✓").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow));

    let rows: Vec<Row> = providers
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(p.name.clone()),
                Cell::from(p.category.clone()),
                Cell::from(p.city.clone()),
                Cell::from(format_money(app, p.hourly_rate)),
                Cell::from(format!("{:.1} ({})", p.rating, p.review_count))
                    .style(Style::default().fg(Color::Yellow)),
                Cell::from(if p.verified { "✓" } else { "" })
                    .style(Style::default().fg(Color::Green)),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(table, area, &mut state);
}

pub(crate) fn render_details(frame: &mut Frame, app: &App, provider: Option<&Provider>, area: Rect) {
    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(p) = provider else {
        frame.render_widget(block, area);
        return;
    };

    let label = Style::default().fg(Color::Cyan);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                p.name.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(p.stars(), Style::default().fg(Color::Yellow)),
            Span::styled(
                if p.verified { "  verified" } else { "  not verified" },
                Style::default().fg(if p.verified { Color::Green } else { Color::DarkGray }),
            ),
        ]),
        Line::from(vec![
            Span::styled("Rate: ", label),
            Span::raw(format!("{}/hr", format_money(app, p.hourly_rate))),
            Span::styled("   Experience: ", label),
            Span::raw(format!("{} yrs", p.years_experience)),
            Span::styled("   City: ", label),
            Span::raw(p.city.clone()),
        ]),
    ];
    if !p.bio.is_empty() {
        lines.push(Line::from(p.bio.clone()));
    }
    lines.push(Line::from(Span::styled(
        "Enter or b to book",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
