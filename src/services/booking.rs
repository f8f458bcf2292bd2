//! Booking service
//!
//! Turns wizard drafts into persisted bookings and moves bookings through
//! their status lifecycle. Every mutation is saved immediately and recorded
//! in the activity log.

use crate::activity::{ActivityEntry, ActivityKind};
use crate::error::{HubError, HubResult};
use crate::models::{
    Booking, BookingDraft, BookingId, BookingStatus, Money, ProviderId, UserAccount, UserId,
};
use crate::storage::Storage;

/// Service for booking management
pub struct BookingService<'a> {
    storage: &'a Storage,
}

impl<'a> BookingService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Provider hourly rate times slot length; zero until both are known
    pub fn estimate(&self, draft: &BookingDraft) -> HubResult<Money> {
        let (Some(provider_id), Some(slot)) = (draft.provider_id, draft.time_slot) else {
            return Ok(Money::zero());
        };
        let provider = self
            .storage
            .providers
            .get(provider_id)?
            .ok_or_else(|| HubError::provider_not_found(provider_id.to_string()))?;
        Ok(provider.hourly_rate.times(slot.hours()))
    }

    /// Persist a draft as a pending booking
    ///
    /// Drafts are accepted with missing fields; those are logged as warnings.
    /// Only a suspended customer or an unknown provider is rejected. A booking
    /// with a provider always carries that provider's category.
    pub fn submit(&self, mut draft: BookingDraft, customer: &UserAccount) -> HubResult<Booking> {
        if !customer.is_active() {
            return Err(HubError::Validation(format!(
                "{} is suspended and cannot book services",
                customer.email
            )));
        }

        if let Some(provider_id) = draft.provider_id {
            let provider = self
                .storage
                .providers
                .get(provider_id)?
                .ok_or_else(|| HubError::provider_not_found(provider_id.to_string()))?;
            let mismatched = draft
                .category
                .as_deref()
                .is_some_and(|c| c != provider.category);
            if mismatched {
                tracing::warn!(
                    category = ?draft.category,
                    provider = %provider.name,
                    "draft category does not match provider, using provider's"
                );
            }
            if mismatched || draft.category.is_none() {
                draft.category = Some(provider.category);
            }
        }

        let missing = draft.missing_fields();
        if !missing.is_empty() {
            tracing::warn!(missing = ?missing, "submitting booking with incomplete draft");
        }

        let price = self.estimate(&draft)?;
        let booking = Booking::from_draft(draft, customer.id, price);

        self.storage.bookings.upsert(booking.clone())?;
        self.storage.bookings.save()?;
        self.storage.record(
            ActivityEntry::new(ActivityKind::BookingCreated, booking.id.to_string())
                .named(booking.headline())
                .by(customer.name.clone()),
        )?;

        tracing::info!(booking = %booking.id, price = %booking.estimated_price, "booking created");
        Ok(booking)
    }

    pub fn get(&self, id: BookingId) -> HubResult<Booking> {
        self.storage
            .bookings
            .get(id)?
            .ok_or_else(|| HubError::booking_not_found(id.to_string()))
    }

    /// Find a booking by display ID or full UUID
    pub fn find(&self, identifier: &str) -> HubResult<Booking> {
        self.storage
            .bookings
            .find(identifier)?
            .ok_or_else(|| HubError::booking_not_found(identifier))
    }

    pub fn list_for_customer(&self, customer_id: UserId) -> HubResult<Vec<Booking>> {
        self.storage.bookings.get_by_customer(customer_id)
    }

    pub fn list_for_provider(&self, provider_id: ProviderId) -> HubResult<Vec<Booking>> {
        self.storage.bookings.get_by_provider(provider_id)
    }

    pub fn cancel(&self, id: BookingId, actor: &str) -> HubResult<Booking> {
        self.transition(id, BookingStatus::Cancelled, ActivityKind::BookingCancelled, actor)
    }

    pub fn accept(&self, id: BookingId, actor: &str) -> HubResult<Booking> {
        self.transition(id, BookingStatus::Confirmed, ActivityKind::BookingAccepted, actor)
    }

    pub fn complete(&self, id: BookingId, actor: &str) -> HubResult<Booking> {
        self.transition(id, BookingStatus::Completed, ActivityKind::BookingCompleted, actor)
    }

    fn transition(
        &self,
        id: BookingId,
        next: BookingStatus,
        kind: ActivityKind,
        actor: &str,
    ) -> HubResult<Booking> {
        let mut booking = self.get(id)?;

        let previous = booking
            .transition(next)
            .map_err(|current| HubError::InvalidTransition {
                booking: id.to_string(),
                from: current.to_string(),
                to: next.to_string(),
            })?;

        self.storage.bookings.upsert(booking.clone())?;
        self.storage.bookings.save()?;
        self.storage.record(
            ActivityEntry::new(kind, id.to_string())
                .named(booking.headline())
                .by(actor)
                .with_detail(format!("{} -> {}", previous, next)),
        )?;

        tracing::info!(booking = %id, from = %previous, to = %next, "booking status changed");
        Ok(booking)
    }
}

/// Money and workload figures for one provider
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EarningsSummary {
    pub completed_jobs: usize,
    pub earned: Money,
    /// Confirmed, not yet completed
    pub scheduled_jobs: usize,
    pub scheduled_value: Money,
    pub open_requests: usize,
}

impl EarningsSummary {
    pub fn from_bookings(bookings: &[Booking], provider_id: ProviderId) -> Self {
        let mut summary = Self::default();
        for booking in bookings.iter().filter(|b| b.provider_id == Some(provider_id)) {
            match booking.status {
                BookingStatus::Completed => {
                    summary.completed_jobs += 1;
                    summary.earned += booking.estimated_price;
                }
                BookingStatus::Confirmed => {
                    summary.scheduled_jobs += 1;
                    summary.scheduled_value += booking.estimated_price;
                }
                BookingStatus::Pending => summary.open_requests += 1,
                BookingStatus::Cancelled => {}
            }
        }
        summary
    }
}
