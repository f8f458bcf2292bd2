//! Five-step booking wizard
//!
//! `BookingWizard` is the state machine (current step plus the shared
//! draft). `DraftField` describes the editable fields of each step so the
//! terminal UI dialog and the interactive `book` prompt edit the draft the
//! same way. `BookingPrompt` is the line-based rendition.

pub mod field;
pub mod prompt;
pub mod sequencer;
pub mod step;

pub use field::DraftField;
pub use prompt::{BookingPrompt, PromptOutcome};
pub use sequencer::{BookingWizard, ConfirmedBooking, WizardSummary};
pub use step::BookingStep;
