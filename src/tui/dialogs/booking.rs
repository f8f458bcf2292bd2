//! Booking wizard dialog
//!
//! One input box at a time over the fields of the current step. Enter or
//! Tab commits the field and moves on, rolling into the next step after the
//! last field. Shift+Tab goes back a step, as does Esc on an empty box.
//! Nothing here blocks progress: bad input is reported and the field keeps
//! its old value.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::models::Money;
use crate::services::BookingService;
use crate::tui::app::App;
use crate::tui::layout::centered_rect;
use crate::tui::widgets::TextInput;
use crate::wizard::{BookingStep, BookingWizard, ConfirmedBooking, DraftField};

/// What a key press did to the wizard
#[derive(Debug, Clone, PartialEq)]
pub enum WizardOutcome {
    Continue,
    /// Esc on an empty first field
    Cancelled,
    Confirmed(ConfirmedBooking),
}

#[derive(Debug, Clone, Default)]
pub struct WizardDialogState {
    pub wizard: BookingWizard,
    /// Index into `DraftField::for_step(step)`
    pub field_index: usize,
    pub input: TextInput,
    pub error: Option<String>,
    /// Shown in the title when booking a specific provider
    pub provider_name: Option<String>,
}

impl WizardDialogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, wizard: BookingWizard, provider_name: Option<String>) {
        *self = Self {
            wizard,
            provider_name,
            ..Self::default()
        };
        self.load_input();
    }

    pub fn step(&self) -> BookingStep {
        self.wizard.step()
    }

    pub fn current_field(&self) -> Option<DraftField> {
        DraftField::for_step(self.step())
            .get(self.field_index)
            .copied()
    }

    /// Enter / Tab
    pub fn next(&mut self, categories: &[String]) -> WizardOutcome {
        if self.wizard.is_at_confirm() {
            return match self.wizard.confirm() {
                Some(confirmed) => {
                    self.load_input();
                    WizardOutcome::Confirmed(confirmed)
                }
                None => WizardOutcome::Continue,
            };
        }

        if !self.commit(categories) {
            return WizardOutcome::Continue;
        }

        let fields = DraftField::for_step(self.step()).len();
        if self.field_index + 1 < fields {
            self.field_index += 1;
        } else {
            self.wizard.advance();
            self.field_index = 0;
        }
        self.load_input();
        WizardOutcome::Continue
    }

    /// Up arrow: previous field of this step
    pub fn previous_field(&mut self, categories: &[String]) {
        if self.field_index > 0 && self.commit(categories) {
            self.field_index -= 1;
            self.load_input();
        }
    }

    /// Shift+Tab
    pub fn back(&mut self, categories: &[String]) {
        // A half-typed value is kept only if it parses
        let _ = self.commit(categories);
        self.wizard.retreat();
        self.field_index = 0;
        self.load_input();
    }

    /// Esc: clear a typed value, otherwise step back or cancel at step 1
    pub fn escape(&mut self, categories: &[String]) -> WizardOutcome {
        if !self.input.is_empty() && !self.wizard.is_at_confirm() {
            self.input.clear();
            return WizardOutcome::Continue;
        }
        if self.step() == BookingStep::FIRST {
            self.wizard.reset();
            self.load_input();
            return WizardOutcome::Cancelled;
        }
        self.back(categories);
        WizardOutcome::Continue
    }

    /// Write the input box into the draft; false (with `error` set) on bad input
    fn commit(&mut self, categories: &[String]) -> bool {
        let Some(field) = self.current_field() else {
            return true;
        };
        let raw = self.input.value().trim().to_string();
        let value = match field {
            DraftField::Category => resolve_category(&raw, categories),
            _ => raw,
        };
        match self.wizard.set_field(field, &value) {
            Ok(()) => {
                self.error = None;
                true
            }
            Err(message) => {
                self.error = Some(message);
                false
            }
        }
    }

    fn load_input(&mut self) {
        self.input = match self.current_field() {
            Some(field) => TextInput::new()
                .label(field.label())
                .content(field.value(self.wizard.draft()))
                .focused(true),
            None => TextInput::new(),
        };
    }
}

/// A 1-based number picks from the list; names match case-insensitively
fn resolve_category(input: &str, categories: &[String]) -> String {
    if let Ok(n) = input.parse::<usize>() {
        if let Some(name) = n.checked_sub(1).and_then(|i| categories.get(i)) {
            return name.clone();
        }
    }
    categories
        .iter()
        .find(|c| c.eq_ignore_ascii_case(input))
        .cloned()
        .unwrap_or_else(|| input.to_string())
}

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect(70, 80, frame.area());
    frame.render_widget(Clear, area);

    let state = &app.wizard;
    let title = match &state.provider_name {
        Some(name) if state.wizard.has_provider() => format!(" Book {} ", name),
        _ => " New Booking ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(5),
            Constraint::Length(2),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(step_line(state.step())), chunks[0]);

    if state.wizard.is_at_confirm() {
        let estimate = BookingService::new(app.storage)
            .estimate(state.wizard.draft())
            .unwrap_or_else(|_| Money::zero());
        render_summary(frame, state, estimate, &app.settings.currency_symbol, chunks[1]);
    } else {
        let categories: Vec<String> = app.categories().into_iter().map(|c| c.name).collect();
        render_fields(frame, state, &categories, chunks[1]);
    }

    let hints = if state.wizard.is_at_confirm() {
        "Enter: submit booking  Shift+Tab/Esc: back"
    } else {
        "Enter/Tab: next  ↑: previous field  Shift+Tab: previous step  Esc: clear/back"
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}

/// "1 Service > 2 Time > ..." with the current step highlighted
fn step_line(current: BookingStep) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, step) in BookingStep::all().iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        }
        let style = if *step == current {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else if step.number() < current.number() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("{} {}", step.number(), step.title()), style));
    }
    Line::from(spans)
}

fn render_fields(frame: &mut Frame, state: &WizardDialogState, categories: &[String], area: Rect) {
    let draft = state.wizard.draft();
    let mut lines: Vec<Line> = Vec::new();

    for (i, field) in DraftField::for_step(state.step()).iter().enumerate() {
        if i == state.field_index {
            // Drawn by the input widget below
            lines.push(Line::from(""));
        } else {
            let value = field.value(draft);
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", field.label()), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    if value.is_empty() { "-".to_string() } else { value },
                    Style::default().fg(Color::White),
                ),
            ]));
        }
    }

    if let Some(field) = state.current_field() {
        let choices = match field {
            DraftField::Category => categories.to_vec(),
            _ => field.choices(),
        };
        if !choices.is_empty() {
            lines.push(Line::from(""));
            for (i, choice) in choices.iter().enumerate() {
                lines.push(Line::from(Span::styled(
                    format!("  {}. {}", i + 1, choice),
                    Style::default().fg(Color::Gray),
                )));
            }
        }
    }

    if let Some(error) = &state.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);

    let input_area = Rect::new(
        area.x,
        area.y + state.field_index as u16,
        area.width,
        1,
    );
    if input_area.y < area.y + area.height {
        frame.render_widget(&state.input, input_area);
    }
}

fn render_summary(
    frame: &mut Frame,
    state: &WizardDialogState,
    estimate: Money,
    currency_symbol: &str,
    area: Rect,
) {
    let summary = state.wizard.summary();
    let mut lines: Vec<Line> = summary
        .lines
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{:<14}", label), Style::default().fg(Color::Cyan)),
                Span::styled(value.clone(), Style::default().fg(Color::White)),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(format!("{:<14}", "Estimate"), Style::default().fg(Color::Cyan)),
        Span::styled(
            estimate.format_with_symbol(currency_symbol),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    ]));

    if !summary.warnings.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Not filled in: {}", summary.warnings.join(", ")),
            Style::default().fg(Color::Yellow),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<String> {
        vec!["Plumbing".into(), "Electrical".into(), "Cleaning".into()]
    }

    fn type_text(state: &mut WizardDialogState, text: &str) {
        state.input.clear();
        for c in text.chars() {
            state.input.insert(c);
        }
    }

    #[test]
    fn test_enter_walks_fields_then_steps() {
        let cats = categories();
        let mut state = WizardDialogState::new();
        state.start(BookingWizard::new(), None);
        assert_eq!(state.current_field(), Some(DraftField::Category));

        type_text(&mut state, "1");
        state.next(&cats);
        assert_eq!(state.wizard.draft().category.as_deref(), Some("Plumbing"));
        assert_eq!(state.current_field(), Some(DraftField::Description));

        state.next(&cats);
        state.next(&cats);
        assert_eq!(state.step(), BookingStep::Time);
        assert_eq!(state.field_index, 0);

        type_text(&mut state, "2025-08-01");
        state.next(&cats);
        state.next(&cats);
        assert_eq!(state.step(), BookingStep::Details);
    }

    #[test]
    fn test_bad_input_stays_on_field() {
        let cats = categories();
        let mut state = WizardDialogState::new();
        state.start(BookingWizard::new(), None);
        state.back(&cats);
        state.next(&cats);
        state.next(&cats);
        state.next(&cats);
        assert_eq!(state.step(), BookingStep::Time);

        type_text(&mut state, "next week");
        assert_eq!(state.next(&cats), WizardOutcome::Continue);
        assert_eq!(state.current_field(), Some(DraftField::Date));
        assert!(state.error.is_some());
        assert_eq!(state.wizard.draft().date, None);
    }

    #[test]
    fn test_escape_clears_then_retreats_then_cancels() {
        let cats = categories();
        let mut state = WizardDialogState::new();
        state.start(BookingWizard::new(), None);
        for _ in 0..3 {
            state.next(&cats);
        }
        assert_eq!(state.step(), BookingStep::Time);

        type_text(&mut state, "tomorrow");
        assert_eq!(state.escape(&cats), WizardOutcome::Continue);
        assert!(state.input.is_empty());
        assert_eq!(state.step(), BookingStep::Time);

        state.escape(&cats);
        assert_eq!(state.step(), BookingStep::Service);

        state.input.clear();
        assert_eq!(state.escape(&cats), WizardOutcome::Cancelled);
        assert!(state.wizard.draft().is_empty());
    }

    #[test]
    fn test_confirm_returns_draft_and_resets() {
        let cats = categories();
        let mut state = WizardDialogState::new();
        state.start(BookingWizard::new(), Some("Ace Plumbing".into()));
        type_text(&mut state, "plumbing");

        let mut outcome = WizardOutcome::Continue;
        for _ in 0..20 {
            outcome = state.next(&cats);
            if outcome != WizardOutcome::Continue {
                break;
            }
        }

        match outcome {
            WizardOutcome::Confirmed(confirmed) => {
                assert_eq!(confirmed.draft.category.as_deref(), Some("Plumbing"));
            }
            other => panic!("expected confirmation, got {:?}", other),
        }
        assert_eq!(state.step(), BookingStep::Service);
        assert!(state.wizard.draft().is_empty());
    }
}
