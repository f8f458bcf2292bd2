//! Line-based booking flow for `servicehub book`
//!
//! Reads answers from any `BufRead` and writes prompts to any `Write`, so the
//! same flow runs on stdin/stdout and in tests. At any prompt `back` returns
//! to the previous step and `cancel` abandons the draft. A blank answer
//! keeps the current value; `-` clears it.

use std::io::{BufRead, Write};

use crate::error::{HubError, HubResult};
use crate::models::{BookingDraft, Money};

use super::field::DraftField;
use super::sequencer::{BookingWizard, ConfirmedBooking};
use super::step::BookingStep;

/// How the interactive flow ended
#[derive(Debug)]
pub enum PromptOutcome {
    Confirmed(ConfirmedBooking),
    Cancelled,
}

enum StepResult {
    Next,
    Back,
    Cancel,
}

pub struct BookingPrompt<R, W> {
    input: R,
    output: W,
    /// Category names offered on step 1
    categories: Vec<String>,
}

impl<R: BufRead, W: Write> BookingPrompt<R, W> {
    pub fn new(input: R, output: W, categories: Vec<String>) -> Self {
        Self {
            input,
            output,
            categories,
        }
    }

    /// Walk the wizard until the booking is confirmed or cancelled
    pub fn run(
        &mut self,
        wizard: &mut BookingWizard,
        estimate: impl Fn(&BookingDraft) -> Money,
    ) -> HubResult<PromptOutcome> {
        writeln!(self.output, "New booking (type 'back' or 'cancel' at any prompt)")?;

        loop {
            let step = wizard.step();
            writeln!(self.output)?;
            writeln!(self.output, "{}", step)?;
            writeln!(self.output, "{}", "=".repeat(step.to_string().len()))?;

            if step == BookingStep::Confirm {
                self.print_summary(wizard, &estimate)?;

                let Some(answer) = self.ask("Submit booking? (yes/no/back) [yes]: ")? else {
                    wizard.reset();
                    return Ok(PromptOutcome::Cancelled);
                };
                match answer.to_lowercase().as_str() {
                    "" | "y" | "yes" => {
                        let confirmed = wizard.confirm().ok_or_else(|| {
                            HubError::Validation("Booking can only be confirmed on the last step".into())
                        })?;
                        return Ok(PromptOutcome::Confirmed(confirmed));
                    }
                    "b" | "back" => wizard.retreat(),
                    _ => {
                        wizard.reset();
                        return Ok(PromptOutcome::Cancelled);
                    }
                }
                continue;
            }

            match self.fill_step(wizard)? {
                StepResult::Next => wizard.advance(),
                StepResult::Back => wizard.retreat(),
                StepResult::Cancel => {
                    wizard.reset();
                    writeln!(self.output, "Booking cancelled.")?;
                    return Ok(PromptOutcome::Cancelled);
                }
            }
        }
    }

    fn fill_step(&mut self, wizard: &mut BookingWizard) -> HubResult<StepResult> {
        for field in DraftField::for_step(wizard.step()) {
            let choices = match field {
                DraftField::Category => self.categories.clone(),
                other => other.choices(),
            };
            for (i, choice) in choices.iter().enumerate() {
                writeln!(self.output, "  {}. {}", i + 1, choice)?;
            }

            loop {
                let current = field.value(wizard.draft());
                let prompt = if current.is_empty() {
                    format!("{}: ", field.label())
                } else {
                    format!("{} [{}]: ", field.label(), current)
                };

                let Some(answer) = self.ask(&prompt)? else {
                    return Ok(StepResult::Cancel);
                };
                match answer.to_lowercase().as_str() {
                    "back" => return Ok(StepResult::Back),
                    "cancel" => return Ok(StepResult::Cancel),
                    "" => break,
                    _ => {}
                }

                let value = if answer == "-" {
                    String::new()
                } else if *field == DraftField::Category {
                    match self.resolve_category(&answer) {
                        Some(name) => name,
                        None => {
                            writeln!(self.output, "  ! Unknown category '{}'", answer)?;
                            continue;
                        }
                    }
                } else {
                    answer
                };

                let had_provider = wizard.has_provider();
                match wizard.set_field(*field, &value) {
                    Ok(()) => {
                        if had_provider && !wizard.has_provider() {
                            writeln!(
                                self.output,
                                "  Provider cleared, any {} provider can take the job",
                                value
                            )?;
                        }
                        break;
                    }
                    Err(e) => writeln!(self.output, "  ! {}", e)?,
                }
            }
        }
        Ok(StepResult::Next)
    }

    /// A 1-based index into the category list or a name from it
    fn resolve_category(&self, answer: &str) -> Option<String> {
        if self.categories.is_empty() {
            return Some(answer.to_string());
        }
        if let Ok(index) = answer.parse::<usize>() {
            return index
                .checked_sub(1)
                .and_then(|i| self.categories.get(i))
                .cloned();
        }
        self.categories
            .iter()
            .find(|c| c.eq_ignore_ascii_case(answer))
            .cloned()
    }

    fn print_summary(
        &mut self,
        wizard: &BookingWizard,
        estimate: &impl Fn(&BookingDraft) -> Money,
    ) -> HubResult<()> {
        let summary = wizard.summary();
        for (label, value) in &summary.lines {
            writeln!(self.output, "  {:<14} {}", format!("{}:", label), value)?;
        }
        let price = estimate(wizard.draft());
        if !price.is_zero() {
            writeln!(self.output, "  {:<14} {}", "Estimate:", price)?;
        }
        if !summary.warnings.is_empty() {
            writeln!(self.output)?;
            writeln!(self.output, "  Missing: {}", summary.warnings.join(", "))?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    /// `None` on end of input
    fn ask(&mut self, prompt: &str) -> HubResult<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaymentMethod, ProviderId, TimeSlot};
    use std::io::Cursor;

    fn categories() -> Vec<String> {
        vec!["Plumbing".into(), "Cleaning".into()]
    }

    fn run_script(script: &str, wizard: &mut BookingWizard) -> (PromptOutcome, String) {
        let mut output = Vec::new();
        let outcome = BookingPrompt::new(Cursor::new(script.to_string()), &mut output, categories())
            .run(wizard, |_| Money::from_units(110))
            .unwrap();
        (outcome, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_other_category_clears_provider() {
        let mut wizard = BookingWizard::for_provider(ProviderId::new(), "Plumbing");
        let (outcome, output) = run_script("2\ncancel\n", &mut wizard);

        assert!(matches!(outcome, PromptOutcome::Cancelled));
        assert!(output.contains("Provider cleared, any Cleaning provider can take the job"));
    }

    const FULL_RUN: &str = "1\nLeaky sink\n\n\
                            2025-08-01\n2\n\
                            12 Oak Street\nAustin\n\n\nJordan\n555-0100\n\n\
                            1\n\
                            yes\n";

    #[test]
    fn test_full_run_confirms() {
        let mut wizard = BookingWizard::new();
        let (outcome, output) = run_script(FULL_RUN, &mut wizard);

        let PromptOutcome::Confirmed(booking) = outcome else {
            panic!("expected a confirmed booking");
        };
        assert_eq!(booking.draft.category.as_deref(), Some("Plumbing"));
        assert_eq!(booking.draft.time_slot, Some(TimeSlot::LateMorning));
        assert_eq!(booking.draft.payment_method, Some(PaymentMethod::GatewayA));
        assert_eq!(booking.draft.address.city, "Austin");
        assert!(output.contains("Step 5/5: Confirm"));
        assert!(output.contains("Estimate:      $110.00"));
        assert_eq!(wizard.step(), BookingStep::Service);
        assert!(wizard.draft().is_empty());
    }

    #[test]
    fn test_back_returns_to_previous_step() {
        let script = "2\n\n\n\
                      back\n\
                      1\n\n\n\
                      cancel\n";
        let mut wizard = BookingWizard::new();
        let (outcome, output) = run_script(script, &mut wizard);

        assert!(matches!(outcome, PromptOutcome::Cancelled));
        assert_eq!(output.matches("Step 1/5: Service").count(), 2);
        assert!(output.contains("Category [Cleaning]: "));
    }

    #[test]
    fn test_invalid_answers_are_asked_again() {
        let script = "Gardening\n1\n\n\n\
                      08/01/2025\n2025-08-01\n\ncancel\n";
        let mut wizard = BookingWizard::new();
        let (_, output) = run_script(script, &mut wizard);

        assert!(output.contains("! Unknown category 'Gardening'"));
        assert!(output.contains("! Invalid date '08/01/2025'"));
    }

    #[test]
    fn test_end_of_input_cancels() {
        let mut wizard = BookingWizard::new();
        let (outcome, _) = run_script("1\n", &mut wizard);
        assert!(matches!(outcome, PromptOutcome::Cancelled));
        assert!(wizard.draft().is_empty());
    }
}
