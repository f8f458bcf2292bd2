//! Dashboard views
//!
//! Section tabs across the top, then the active section's table or summary.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState, Tabs},
    Frame,
};

use crate::models::{Booking, BookingStatus, UserStatus};
use crate::tui::app::{ActiveView, App};
use crate::tui::dashboards::{
    AdminSection, AdminView, DashboardState, ProviderSection, ProviderView, Section, UserSection,
    UserView,
};

use super::{format_date, format_money, render_error};

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    match app.active_view {
        ActiveView::UserDashboard => {
            render_tabs(frame, "My Bookings", &app.user_dashboard, chunks[0]);
            match app.user_view() {
                Ok(view) => render_user(frame, app, &view, chunks[1]),
                Err(e) => render_error(frame, chunks[1], "My Bookings", &e.to_string()),
            }
        }
        ActiveView::ProviderDashboard => match app.provider_view() {
            Ok(view) => {
                let title = format!("Provider: {}  (p: next provider)", view.provider.name);
                render_tabs(frame, &title, &app.provider_dashboard, chunks[0]);
                render_provider(frame, app, &view, chunks[1]);
            }
            Err(e) => render_error(frame, area, "Provider", &e.to_string()),
        },
        ActiveView::AdminDashboard => {
            render_tabs(frame, "Admin", &app.admin_dashboard, chunks[0]);
            match app.admin_view() {
                Ok(view) => render_admin(frame, app, &view, chunks[1]),
                Err(e) => render_error(frame, chunks[1], "Admin", &e.to_string()),
            }
        }
        ActiveView::Catalog | ActiveView::Search => {}
    }
}

fn render_tabs<S: Section>(frame: &mut Frame, title: &str, state: &DashboardState<S>, area: Rect) {
    let titles: Vec<Line> = S::all()
        .iter()
        .map(|s| Line::from(format!("{} {}", s.hotkey(), s.title())))
        .collect();
    let selected = S::all().iter().position(|s| *s == state.section).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(format!(" {} ", title))
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL),
        )
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .divider("│");

    frame.render_widget(tabs, area);
}

fn status_style(status: BookingStatus) -> Style {
    Style::default().fg(match status {
        BookingStatus::Pending => Color::Yellow,
        BookingStatus::Confirmed => Color::Cyan,
        BookingStatus::Completed => Color::Green,
        BookingStatus::Cancelled => Color::DarkGray,
    })
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn header_row(titles: &[&'static str]) -> Row<'static> {
    Row::new(titles.iter().map(|t| Cell::from(*t).style(bold())))
        .style(Style::default().fg(Color::Yellow))
}

/// Bookings table with a caller-chosen "party" column (provider or customer)
fn render_bookings(
    frame: &mut Frame,
    app: &App,
    bookings: &[Booking],
    party: &dyn Fn(&Booking) -> String,
    party_title: &'static str,
    selected: usize,
    area: Rect,
) {
    let block = Block::default().borders(Borders::ALL);
    if bookings.is_empty() {
        frame.render_widget(
            Paragraph::new("Nothing here yet")
                .block(block)
                .style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    }

    let widths = [
        Constraint::Length(13),
        Constraint::Length(11),
        Constraint::Length(12),
        Constraint::Length(16),
        Constraint::Length(20),
        Constraint::Length(10),
        Constraint::Length(10),
    ];
    let rows: Vec<Row> = bookings
        .iter()
        .map(|b| {
            Row::new(vec![
                Cell::from(b.id.to_string()),
                Cell::from(format_date(app, b.date)),
                Cell::from(b.time_slot.map(|t| t.to_string()).unwrap_or_else(|| "-".into())),
                Cell::from(b.category.clone().unwrap_or_else(|| "-".into())),
                Cell::from(party(b)),
                Cell::from(b.status.to_string()).style(status_style(b.status)),
                Cell::from(format_money(app, b.estimated_price)),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header_row(&["ID", "Date", "Time", "Category", party_title, "Status", "Price"]))
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_summary(frame: &mut Frame, title: &str, lines: Vec<Line<'static>>, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<20}", label), Style::default().fg(Color::Cyan)),
        Span::raw(value),
    ])
}

fn render_user(frame: &mut Frame, app: &App, view: &UserView, area: Rect) {
    let state = &app.user_dashboard;
    let provider = |b: &Booking| view.provider_name(b).to_string();
    match state.section {
        UserSection::Upcoming => {
            render_bookings(frame, app, &view.upcoming, &provider, "Provider", state.selected, area)
        }
        UserSection::History => {
            render_bookings(frame, app, &view.history, &provider, "Provider", state.selected, area)
        }
        UserSection::Profile => {
            let c = &view.customer;
            let lines = vec![
                field("Name", c.name.clone()),
                field("Email", c.email.clone()),
                field("Role", c.role.to_string()),
                field("Status", c.status.to_string()),
                field("Member since", c.joined_at.format("%Y-%m-%d").to_string()),
                Line::from(""),
                field("Upcoming bookings", view.upcoming.len().to_string()),
                field("Past bookings", view.history.len().to_string()),
                field("Total spent", format_money(app, view.total_spent())),
            ];
            render_summary(frame, "Profile", lines, area);
        }
    }
}

fn render_provider(frame: &mut Frame, app: &App, view: &ProviderView, area: Rect) {
    let state = &app.provider_dashboard;
    let city = |b: &Booking| {
        if b.address.city.is_empty() {
            "-".to_string()
        } else {
            b.address.city.clone()
        }
    };
    match state.section {
        ProviderSection::Requests => {
            render_bookings(frame, app, &view.requests, &city, "City", state.selected, area)
        }
        ProviderSection::Schedule => {
            render_bookings(frame, app, &view.schedule, &city, "City", state.selected, area)
        }
        ProviderSection::Earnings => {
            let e = &view.earnings;
            let lines = vec![
                field("Completed jobs", e.completed_jobs.to_string()),
                field("Earned", format_money(app, e.earned)),
                Line::from(""),
                field("Scheduled jobs", e.scheduled_jobs.to_string()),
                field("Scheduled value", format_money(app, e.scheduled_value)),
                field("Open requests", e.open_requests.to_string()),
                Line::from(""),
                field("Hourly rate", format_money(app, view.provider.hourly_rate)),
                field(
                    "Rating",
                    format!("{} ({} reviews)", view.provider.stars(), view.provider.review_count),
                ),
            ];
            render_summary(frame, "Earnings", lines, area);
        }
    }
}

fn render_admin(frame: &mut Frame, app: &App, view: &AdminView, area: Rect) {
    let state = &app.admin_dashboard;
    match state.section {
        AdminSection::Overview => {
            let s = &view.stats;
            let mut lines = vec![
                field("Users", s.users.to_string()),
                field("  Customers", s.customers.to_string()),
                field("  Provider accounts", s.provider_accounts.to_string()),
                field("  Admins", s.admins.to_string()),
                field("  Suspended", s.suspended_users.to_string()),
                Line::from(""),
                field(
                    "Providers",
                    format!(
                        "{} ({} verified, {} unverified)",
                        s.providers,
                        s.verified_providers,
                        s.unverified_providers()
                    ),
                ),
                Line::from(""),
                field("Bookings", s.total_bookings().to_string()),
            ];
            for (status, count) in &s.bookings_by_status {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:<18}", status.to_string()), status_style(*status)),
                    Span::raw(count.to_string()),
                ]));
            }
            lines.push(Line::from(""));
            lines.push(field("Completed revenue", format_money(app, s.completed_revenue)));
            render_summary(frame, "Overview", lines, area);
        }
        AdminSection::Users => {
            let rows: Vec<Row> = view
                .users
                .iter()
                .map(|u| {
                    let status_color = if u.status == UserStatus::Suspended {
                        Color::Red
                    } else {
                        Color::Green
                    };
                    Row::new(vec![
                        Cell::from(u.id.to_string()),
                        Cell::from(u.name.clone()),
                        Cell::from(u.email.clone()),
                        Cell::from(u.role.to_string()),
                        Cell::from(u.status.to_string()).style(Style::default().fg(status_color)),
                    ])
                })
                .collect();
            let widths = [
                Constraint::Length(13),
                Constraint::Length(20),
                Constraint::Length(30),
                Constraint::Length(10),
                Constraint::Length(10),
            ];
            render_table(
                frame,
                Table::new(rows, widths).header(header_row(&["ID", "Name", "Email", "Role", "Status"])),
                state.selected,
                area,
            );
        }
        AdminSection::Providers => {
            let rows: Vec<Row> = view
                .providers
                .iter()
                .map(|p| {
                    Row::new(vec![
                        Cell::from(p.name.clone()),
                        Cell::from(p.category.clone()),
                        Cell::from(p.city.clone()),
                        Cell::from(format!("{:.1}", p.rating)),
                        Cell::from(if p.verified { "verified" } else { "pending" }).style(
                            Style::default().fg(if p.verified { Color::Green } else { Color::Yellow }),
                        ),
                    ])
                })
                .collect();
            let widths = [
                Constraint::Length(22),
                Constraint::Length(16),
                Constraint::Length(12),
                Constraint::Length(7),
                Constraint::Length(10),
            ];
            render_table(
                frame,
                Table::new(rows, widths)
                    .header(header_row(&["Name", "Category", "City", "Rating", "Status"])),
                state.selected,
                area,
            );
        }
        AdminSection::Bookings => {
            let customer = |b: &Booking| view.customer_email(b).to_string();
            render_bookings(frame, app, &view.bookings, &customer, "Customer", state.selected, area);
        }
        AdminSection::Activity => {
            let items: Vec<ListItem> = view
                .activity
                .iter()
                .map(|entry| ListItem::new(entry.format_human_readable()))
                .collect();
            let list = List::new(items)
                .block(Block::default().title(" Recent Activity ").borders(Borders::ALL))
                .highlight_style(Style::default().bg(Color::DarkGray));
            let mut list_state = ListState::default();
            list_state.select(Some(state.selected));
            frame.render_stateful_widget(list, area, &mut list_state);
        }
    }
}

fn render_table(frame: &mut Frame, table: Table, selected: usize, area: Rect) {
    let table = table
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
    let mut state = TableState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(table, area, &mut state);
}
