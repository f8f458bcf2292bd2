//! Layout definitions for the TUI
//!
//! Sidebar on the left, main panel on the right, one-line status bar below.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    /// Categories and view switcher
    pub sidebar: Rect,
    pub main: Rect,
    pub status_bar: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(28), Constraint::Min(40)])
            .split(vertical[0]);

        Self {
            sidebar: horizontal[0],
            main: horizontal[1],
            status_bar: vertical[1],
        }
    }
}

pub struct SidebarLayout {
    pub header: Rect,
    pub categories: Rect,
    pub view_switcher: Rect,
}

impl SidebarLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(7),
            ])
            .split(area);

        Self {
            header: chunks[0],
            categories: chunks[1],
            view_switcher: chunks[2],
        }
    }
}

/// Header line above a table or form
pub struct MainPanelLayout {
    pub header: Rect,
    pub content: Rect,
}

impl MainPanelLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(area);

        Self {
            header: chunks[0],
            content: chunks[1],
        }
    }
}

/// Catalog list with a detail pane underneath
pub struct CatalogLayout {
    pub list: Rect,
    pub details: Rect,
}

impl CatalogLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(8)])
            .split(area);

        Self {
            list: chunks[0],
            details: chunks[1],
        }
    }
}

/// Centered rect sized as a percentage of `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

/// Top-right corner slot for a toast notification
pub fn notification_rect(r: Rect) -> Rect {
    let width = 48.min(r.width);
    let height = 5.min(r.height);
    Rect::new(r.x + r.width - width, r.y, width, height)
}
