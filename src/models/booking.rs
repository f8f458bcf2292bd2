//! Booking model
//!
//! A booking is a submitted draft: it gets an ID, an owner, a status and a
//! price estimate. Status changes are restricted to a small forward-only graph.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::draft::{Address, BookingDraft, Contact, PaymentMethod, TimeSlot};
use super::ids::{BookingId, ProviderId, UserId};
use super::money::Money;

/// Lifecycle of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Submitted by the customer, waiting for the provider
    #[default]
    Pending,
    /// Accepted by the provider
    Confirmed,
    /// Job done
    Completed,
    /// Called off by customer, provider or admin
    Cancelled,
}

impl BookingStatus {
    pub fn all() -> &'static [Self] {
        &[Self::Pending, Self::Confirmed, Self::Completed, Self::Cancelled]
    }

    /// Whether `self -> next` is an allowed transition
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Completed)
                | (Self::Confirmed, Self::Cancelled)
        )
    }

    /// Pending or confirmed
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Confirmed => write!(f, "Confirmed"),
            Self::Completed => write!(f, "Completed"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// A submitted booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub customer_id: UserId,
    pub provider_id: Option<ProviderId>,
    pub category: Option<String>,
    #[serde(default)]
    pub description: String,
    pub coupon_code: Option<String>,
    pub date: Option<NaiveDate>,
    pub time_slot: Option<TimeSlot>,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub contact: Contact,
    pub payment_method: Option<PaymentMethod>,
    pub status: BookingStatus,
    /// Provider rate times slot length, zero when no provider is attached
    #[serde(default)]
    pub estimated_price: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Freeze a draft into a pending booking owned by `customer_id`
    pub fn from_draft(draft: BookingDraft, customer_id: UserId, estimated_price: Money) -> Self {
        let now = Utc::now();
        Self {
            id: BookingId::new(),
            customer_id,
            provider_id: draft.provider_id,
            category: draft.category,
            description: draft.description,
            coupon_code: draft.coupon_code,
            date: draft.date,
            time_slot: draft.time_slot,
            address: draft.address,
            contact: draft.contact,
            payment_method: draft.payment_method,
            status: BookingStatus::Pending,
            estimated_price,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move to `next`, returning the previous status
    pub fn transition(&mut self, next: BookingStatus) -> Result<BookingStatus, BookingStatus> {
        if !self.status.can_transition_to(next) {
            return Err(self.status);
        }
        let previous = self.status;
        self.status = next;
        self.updated_at = Utc::now();
        Ok(previous)
    }

    /// Short label such as "Plumbing on 2025-08-01 10:00-12:00"
    pub fn headline(&self) -> String {
        let category = self.category.as_deref().unwrap_or("Service");
        match (self.date, self.time_slot) {
            (Some(date), Some(slot)) => format!("{} on {} {}", category, date, slot),
            (Some(date), None) => format!("{} on {}", category, date),
            _ => format!("{} (date not set)", category),
        }
    }

    /// Whether the booking is scheduled on or after `today`
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.status.is_open() && self.date.map(|d| d >= today).unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_booking() -> Booking {
        let mut draft = BookingDraft::new();
        draft.category = Some("Cleaning".into());
        draft.date = NaiveDate::from_ymd_opt(2025, 8, 1);
        draft.time_slot = Some(TimeSlot::LateMorning);
        Booking::from_draft(draft, UserId::new(), Money::from_units(90))
    }

    #[test]
    fn test_from_draft_is_pending() {
        let booking = sample_booking();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.category.as_deref(), Some("Cleaning"));
        assert_eq!(booking.headline(), "Cleaning on 2025-08-01 10:00-12:00");
    }

    #[test]
    fn test_allowed_transitions() {
        let mut booking = sample_booking();
        assert_eq!(booking.transition(BookingStatus::Confirmed), Ok(BookingStatus::Pending));
        assert_eq!(booking.transition(BookingStatus::Completed), Ok(BookingStatus::Confirmed));
        assert_eq!(
            booking.transition(BookingStatus::Cancelled),
            Err(BookingStatus::Completed)
        );
        assert_eq!(booking.status, BookingStatus::Completed);
    }

    #[test]
    fn test_pending_cannot_complete() {
        assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::Completed));
        assert!(!BookingStatus::Cancelled.can_transition_to(BookingStatus::Pending));
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Cancelled));
    }

    #[test]
    fn test_is_upcoming() {
        let booking = sample_booking();
        let before = NaiveDate::from_ymd_opt(2025, 7, 30).unwrap();
        let after = NaiveDate::from_ymd_opt(2025, 8, 2).unwrap();
        assert!(booking.is_upcoming(before));
        assert!(!booking.is_upcoming(after));
    }
}
