//! TUI Views module
//!
//! Catalog, search and the three dashboards, plus the sidebar and status bar.

pub mod catalog;
pub mod dashboard;
pub mod search;
pub mod sidebar;
pub mod status_bar;

use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::Money;

use super::app::{ActiveDialog, ActiveView, App};
use super::dialogs;
use super::layout::{notification_rect, AppLayout};
use super::widgets::NotificationWidget;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    sidebar::render(frame, app, layout.sidebar);

    match app.active_view {
        ActiveView::Catalog => catalog::render(frame, app, layout.main),
        ActiveView::Search => search::render(frame, app, layout.main),
        ActiveView::UserDashboard
        | ActiveView::ProviderDashboard
        | ActiveView::AdminDashboard => dashboard::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    match app.active_dialog.clone() {
        ActiveDialog::None => {}
        ActiveDialog::Help => dialogs::help::render(frame, app),
        ActiveDialog::Confirm(command) => dialogs::confirm::render(frame, &command),
        ActiveDialog::BookingWizard => dialogs::booking::render(frame, app),
    }

    if let Some(notification) = app.notifications.current() {
        frame.render_widget(
            NotificationWidget::new(notification),
            notification_rect(frame.area()),
        );
    }
}

pub(crate) fn format_money(app: &App, amount: Money) -> String {
    amount.format_with_symbol(&app.settings.currency_symbol)
}

pub(crate) fn format_date(app: &App, date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(&app.settings.date_format).to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Shown in place of a view whose data failed to load
pub(crate) fn render_error(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let text = Paragraph::new(message.to_string())
        .block(block)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true });

    frame.render_widget(text, area);
}
