//! Editable draft fields, grouped by wizard step

use chrono::{Duration, Local, NaiveDate};

use crate::models::{BookingDraft, PaymentMethod, TimeSlot};

use super::step::BookingStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Category,
    Description,
    Coupon,
    Date,
    TimeSlot,
    Street,
    City,
    PostalCode,
    Instructions,
    ContactName,
    Phone,
    Email,
    Payment,
}

impl DraftField {
    /// Fields edited on `step`, in display order. `Confirm` has none.
    pub fn for_step(step: BookingStep) -> &'static [Self] {
        match step {
            BookingStep::Service => &[Self::Category, Self::Description, Self::Coupon],
            BookingStep::Time => &[Self::Date, Self::TimeSlot],
            BookingStep::Details => &[
                Self::Street,
                Self::City,
                Self::PostalCode,
                Self::Instructions,
                Self::ContactName,
                Self::Phone,
                Self::Email,
            ],
            BookingStep::Payment => &[Self::Payment],
            BookingStep::Confirm => &[],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Description => "Describe the job",
            Self::Coupon => "Coupon code",
            Self::Date => "Date (YYYY-MM-DD)",
            Self::TimeSlot => "Time slot",
            Self::Street => "Street",
            Self::City => "City",
            Self::PostalCode => "Postal code",
            Self::Instructions => "Access instructions",
            Self::ContactName => "Contact name",
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::Payment => "Payment method",
        }
    }

    /// Current value rendered for an input box
    pub fn value(&self, draft: &BookingDraft) -> String {
        match self {
            Self::Category => draft.category.clone().unwrap_or_default(),
            Self::Description => draft.description.clone(),
            Self::Coupon => draft.coupon_code.clone().unwrap_or_default(),
            Self::Date => draft
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            Self::TimeSlot => draft
                .time_slot
                .map(|t| t.label().to_string())
                .unwrap_or_default(),
            Self::Street => draft.address.street.clone(),
            Self::City => draft.address.city.clone(),
            Self::PostalCode => draft.address.postal_code.clone(),
            Self::Instructions => draft.address.instructions.clone(),
            Self::ContactName => draft.contact.name.clone(),
            Self::Phone => draft.contact.phone.clone(),
            Self::Email => draft.contact.email.clone(),
            Self::Payment => draft
                .payment_method
                .map(|p| p.label().to_string())
                .unwrap_or_default(),
        }
    }

    /// Parse `input` and write it into the draft. Blank input clears the field.
    pub fn apply(&self, draft: &mut BookingDraft, input: &str) -> Result<(), String> {
        let input = input.trim();
        let text = || input.to_string();
        let optional = || (!input.is_empty()).then(|| input.to_string());

        match self {
            Self::Category => draft.category = optional(),
            Self::Description => draft.description = text(),
            Self::Coupon => draft.coupon_code = optional().map(|c| c.to_uppercase()),
            Self::Date => {
                draft.date = if input.is_empty() {
                    None
                } else {
                    Some(parse_date(input)?)
                }
            }
            Self::TimeSlot => {
                draft.time_slot = if input.is_empty() {
                    None
                } else {
                    Some(input.parse::<TimeSlot>()?)
                }
            }
            Self::Street => draft.address.street = text(),
            Self::City => draft.address.city = text(),
            Self::PostalCode => draft.address.postal_code = text(),
            Self::Instructions => draft.address.instructions = text(),
            Self::ContactName => draft.contact.name = text(),
            Self::Phone => draft.contact.phone = text(),
            Self::Email => {
                if !input.is_empty() && !input.contains('@') {
                    return Err(format!("'{}' does not look like an e-mail address", input));
                }
                draft.contact.email = text()
            }
            Self::Payment => {
                draft.payment_method = if input.is_empty() {
                    None
                } else {
                    Some(parse_payment(input)?)
                }
            }
        }
        Ok(())
    }

    /// Numbered choices shown under the prompt, if the field has a fixed list
    pub fn choices(&self) -> Vec<String> {
        match self {
            Self::TimeSlot => TimeSlot::all().iter().map(|t| t.label().to_string()).collect(),
            Self::Payment => PaymentMethod::all()
                .iter()
                .map(|p| p.label().to_string())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// `YYYY-MM-DD`, `today` or `tomorrow`
fn parse_date(input: &str) -> Result<NaiveDate, String> {
    let today = Local::now().date_naive();
    match input.to_lowercase().as_str() {
        "today" => Ok(today),
        "tomorrow" => Ok(today + Duration::days(1)),
        _ => NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", input)),
    }
}

/// A 1-based index into [`PaymentMethod::all`] or a method name
fn parse_payment(input: &str) -> Result<PaymentMethod, String> {
    if let Ok(index) = input.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| PaymentMethod::all().get(i))
            .copied()
            .ok_or_else(|| format!("Choose 1-{}", PaymentMethod::all().len()));
    }
    input.parse()
}
