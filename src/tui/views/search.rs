//! Search view: free-text box, filter toggles and sorted results

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::Money;
use crate::services::SearchQuery;
use crate::tui::app::{App, FocusedPanel, InputMode};
use crate::tui::widgets::TextInput;

use super::catalog::{render_details, render_provider_table};

const MIN_RATING_FLOOR: f32 = 3.0;
const RATING_STEP: f32 = 0.5;
const RATE_STEP: Money = Money::from_units(10);
const RATE_CEILING: Money = Money::from_units(200);

#[derive(Debug, Clone)]
pub struct SearchState {
    pub input: TextInput,
    pub query: SearchQuery,
    /// Results table cursor
    pub selected: usize,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            input: TextInput::new()
                .label("Search")
                .placeholder("name, category, city or bio"),
            query: SearchQuery::new(),
            selected: 0,
        }
    }

    /// Copy the input box into the query
    pub fn sync_text(&mut self) {
        self.query.text = self.input.value().trim().to_string();
        self.selected = 0;
    }

    pub fn cycle_sort(&mut self) {
        self.query.sort = self.query.sort.next();
    }

    pub fn toggle_verified(&mut self) {
        self.query.verified_only = !self.query.verified_only;
        self.selected = 0;
    }

    /// Off, then 3.0 up to 5.0 in half stars
    pub fn raise_min_rating(&mut self) {
        self.query.min_rating = Some(match self.query.min_rating {
            None => MIN_RATING_FLOOR,
            Some(r) => (r + RATING_STEP).min(5.0),
        });
        self.selected = 0;
    }

    pub fn lower_min_rating(&mut self) {
        self.query.min_rating = self
            .query
            .min_rating
            .map(|r| r - RATING_STEP)
            .filter(|r| *r >= MIN_RATING_FLOOR);
        self.selected = 0;
    }

    /// Off, then the ceiling, down in steps to one step
    pub fn lower_max_rate(&mut self) {
        self.query.max_rate = Some(match self.query.max_rate {
            None => RATE_CEILING,
            Some(rate) if rate > RATE_STEP => rate - RATE_STEP,
            Some(rate) => rate,
        });
        self.selected = 0;
    }

    /// Raising past the ceiling turns the limit off
    pub fn raise_max_rate(&mut self) {
        self.query.max_rate = self
            .query
            .max_rate
            .map(|rate| rate + RATE_STEP)
            .filter(|rate| *rate <= RATE_CEILING);
        self.selected = 0;
    }

    /// Filter by `category`, or drop the filter if it is already set to it
    pub fn toggle_category(&mut self, category: Option<String>) {
        self.query.category = match (&self.query.category, category) {
            (Some(current), Some(new)) if current.eq_ignore_ascii_case(&new) => None,
            (_, new) => new,
        };
        self.selected = 0;
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.query = SearchQuery::new();
        self.selected = 0;
    }
}

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(5),
            Constraint::Length(8),
        ])
        .split(area);

    render_query(frame, app, chunks[0]);

    let results = app.search_results();
    if app.search.selected >= results.len() {
        app.search.selected = results.len().saturating_sub(1);
    }
    let title = format!(" Results ({}) ", results.len());
    let focused = app.focused_panel == FocusedPanel::Main && app.input_mode == InputMode::Normal;
    render_provider_table(frame, app, &results, app.search.selected, &title, focused, chunks[1]);
    render_details(frame, app, results.get(app.search.selected), chunks[2]);
}

fn render_query(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if editing { Color::Yellow } else { Color::White }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input = app.search.input.clone().focused(editing);
    frame.render_widget(&input, Rect::new(inner.x, inner.y, inner.width, 1));

    let filters = Line::from(vec![
        Span::styled("Filters: ", Style::default().fg(Color::Cyan)),
        Span::styled(app.search.query.describe(), Style::default().fg(Color::White)),
    ]);
    if inner.height > 1 {
        frame.render_widget(
            Paragraph::new(filters),
            Rect::new(inner.x, inner.y + 1, inner.width, 1),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SortOrder;

    #[test]
    fn test_min_rating_steps() {
        let mut state = SearchState::new();
        state.raise_min_rating();
        assert_eq!(state.query.min_rating, Some(3.0));
        for _ in 0..10 {
            state.raise_min_rating();
        }
        assert_eq!(state.query.min_rating, Some(5.0));

        let mut state = SearchState::new();
        state.raise_min_rating();
        state.raise_min_rating();
        state.lower_min_rating();
        assert_eq!(state.query.min_rating, Some(3.0));
        state.lower_min_rating();
        assert_eq!(state.query.min_rating, None);
    }

    #[test]
    fn test_max_rate_steps() {
        let mut state = SearchState::new();
        state.raise_max_rate();
        assert_eq!(state.query.max_rate, None);

        state.lower_max_rate();
        assert_eq!(state.query.max_rate, Some(RATE_CEILING));
        state.lower_max_rate();
        assert_eq!(state.query.max_rate, Some(Money::from_units(190)));

        state.raise_max_rate();
        state.raise_max_rate();
        assert_eq!(state.query.max_rate, None);
    }

    #[test]
    fn test_category_toggle_and_clear() {
        let mut state = SearchState::new();
        state.toggle_category(Some("Plumbing".into()));
        assert_eq!(state.query.category.as_deref(), Some("Plumbing"));
        state.toggle_category(Some("plumbing".into()));
        assert_eq!(state.query.category, None);

        state.input.set_value("  ace ");
        state.sync_text();
        state.cycle_sort();
        state.toggle_verified();
        assert_eq!(state.query.text, "ace");
        assert_eq!(state.query.sort, SortOrder::PriceLow);
        assert!(state.query.is_filtered());

        state.clear();
        assert!(!state.query.is_filtered());
        assert!(state.input.is_empty());
    }
}
