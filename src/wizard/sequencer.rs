//! Booking wizard state machine
//!
//! Holds the current step and the one draft all steps write into. Moving
//! between steps never validates: the summary lists missing fields as
//! warnings instead.

use chrono::{DateTime, Utc};

use crate::models::{BookingDraft, ProviderId};

use super::field::DraftField;
use super::step::BookingStep;

/// Read-only view of the draft shown on the confirm step
#[derive(Debug, Clone, PartialEq)]
pub struct WizardSummary {
    pub lines: Vec<(&'static str, String)>,
    /// Recommended fields that are still blank
    pub warnings: Vec<&'static str>,
}

impl WizardSummary {
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }
}

/// A draft frozen by `confirm()`
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmedBooking {
    pub draft: BookingDraft,
    pub confirmed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct BookingWizard {
    step: BookingStep,
    draft: BookingDraft,
}

impl BookingWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a booking for a specific provider (category is preset)
    pub fn for_provider(provider_id: ProviderId, category: impl Into<String>) -> Self {
        let mut wizard = Self::new();
        wizard.draft.provider_id = Some(provider_id);
        wizard.draft.category = Some(category.into());
        wizard
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn advance(&mut self) {
        self.step = self.step.next();
    }

    pub fn retreat(&mut self) {
        self.step = self.step.prev();
    }

    pub fn is_at_confirm(&self) -> bool {
        self.step == BookingStep::Confirm
    }

    /// Write one field of the draft from text input
    ///
    /// Picking a category other than the preselected provider's drops the
    /// provider, so a booking never names a provider outside its category.
    pub fn set_field(&mut self, field: DraftField, input: &str) -> Result<(), String> {
        let previous = self.draft.category.clone();
        field.apply(&mut self.draft, input)?;
        if self.draft.category != previous {
            self.release_provider();
        }
        Ok(())
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        let category = category.into();
        if self.draft.category.as_deref() != Some(category.as_str()) {
            self.release_provider();
        }
        self.draft.category = Some(category);
    }

    pub fn set_date(&mut self, date: chrono::NaiveDate) {
        self.draft.date = Some(date);
    }

    /// Whether the draft is still tied to the provider it started from
    pub fn has_provider(&self) -> bool {
        self.draft.provider_id.is_some()
    }

    fn release_provider(&mut self) {
        if let Some(provider) = self.draft.provider_id.take() {
            tracing::debug!(provider = %provider, "category changed, provider cleared");
        }
    }

    pub fn summary(&self) -> WizardSummary {
        WizardSummary {
            lines: self.draft.summary_lines(),
            warnings: self.draft.missing_fields(),
        }
    }

    /// Freeze the draft and start over at step 1
    ///
    /// Only the confirm step can confirm; elsewhere this returns `None` and
    /// leaves the wizard untouched.
    pub fn confirm(&mut self) -> Option<ConfirmedBooking> {
        if !self.is_at_confirm() {
            return None;
        }
        let draft = std::mem::take(&mut self.draft);
        self.step = BookingStep::FIRST;
        Some(ConfirmedBooking {
            draft,
            confirmed_at: Utc::now(),
        })
    }

    /// Drop the draft without confirming
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn wizard_at(step: u8) -> BookingWizard {
        let mut wizard = BookingWizard::new();
        for _ in 1..step {
            wizard.advance();
        }
        wizard
    }

    #[test]
    fn test_step_stays_in_range_for_any_sequence() {
        // Exhaustive over all move sequences of length 8
        for mask in 0u32..(1 << 8) {
            let mut wizard = BookingWizard::new();
            for bit in 0..8 {
                if mask & (1 << bit) != 0 {
                    wizard.advance();
                } else {
                    wizard.retreat();
                }
                let n = wizard.step().number();
                assert!((1..=5).contains(&n), "step {} out of range", n);
            }
        }
    }

    #[test]
    fn test_retreat_at_first_step_stays() {
        let mut wizard = BookingWizard::new();
        wizard.retreat();
        assert_eq!(wizard.step().number(), 1);
    }

    #[test]
    fn test_advance_at_last_step_stays() {
        let mut wizard = wizard_at(5);
        assert_eq!(wizard.step().number(), 5);
        wizard.advance();
        assert_eq!(wizard.step().number(), 5);
    }

    #[test]
    fn test_fields_reach_the_summary() {
        let mut wizard = BookingWizard::new();
        wizard.set_field(DraftField::Category, "Plumbing").unwrap();
        wizard.advance();
        wizard
            .set_field(DraftField::Date, "2025-08-01")
            .unwrap();
        wizard.advance();
        wizard.advance();
        wizard.advance();

        assert!(wizard.is_at_confirm());
        let summary = wizard.summary();
        assert_eq!(summary.value_of("Category"), Some("Plumbing"));
        assert_eq!(summary.value_of("Date"), Some("2025-08-01"));
        assert!(summary.warnings.contains(&"payment method"));
        assert!(!summary.warnings.contains(&"category"));
    }

    #[test]
    fn test_confirm_resets_to_empty_first_step() {
        let mut wizard = BookingWizard::new();
        wizard.set_category("Cleaning");
        wizard.set_date(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
        for _ in 0..4 {
            wizard.advance();
        }

        let confirmed = wizard.confirm().unwrap();
        assert_eq!(confirmed.draft.category.as_deref(), Some("Cleaning"));
        assert_eq!(wizard.step(), BookingStep::Service);
        assert!(wizard.draft().is_empty());
    }

    #[test]
    fn test_confirm_before_last_step_does_nothing() {
        let mut wizard = wizard_at(3);
        wizard.set_category("Tutoring");
        assert!(wizard.confirm().is_none());
        assert_eq!(wizard.step(), BookingStep::Details);
        assert_eq!(wizard.draft().category.as_deref(), Some("Tutoring"));
    }

    #[test]
    fn test_for_provider_presets_category() {
        let provider = ProviderId::new();
        let wizard = BookingWizard::for_provider(provider, "Electrical");
        assert_eq!(wizard.draft().provider_id, Some(provider));
        assert_eq!(wizard.draft().category.as_deref(), Some("Electrical"));
    }

    #[test]
    fn test_changing_category_drops_provider() {
        let provider = ProviderId::new();
        let mut wizard = BookingWizard::for_provider(provider, "Electrical");

        // Re-entering the same category keeps the provider
        wizard.set_field(DraftField::Category, "Electrical").unwrap();
        assert!(wizard.has_provider());

        wizard.set_field(DraftField::Category, "Tutoring").unwrap();
        assert!(!wizard.has_provider());
        assert_eq!(wizard.draft().category.as_deref(), Some("Tutoring"));

        let mut wizard = BookingWizard::for_provider(provider, "Electrical");
        wizard.set_category("Cleaning");
        assert_eq!(wizard.draft().provider_id, None);
    }
}
