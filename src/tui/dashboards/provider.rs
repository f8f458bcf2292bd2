//! Provider dashboard: incoming requests, confirmed schedule and earnings

use crate::error::HubResult;
use crate::models::{Booking, BookingStatus, Provider};
use crate::services::{EarningsSummary, MarketplaceCommand, MarketplaceSource};

use super::{DashboardState, Section};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderSection {
    #[default]
    Requests,
    Schedule,
    Earnings,
}

impl Section for ProviderSection {
    fn all() -> &'static [Self] {
        &[Self::Requests, Self::Schedule, Self::Earnings]
    }

    fn title(self) -> &'static str {
        match self {
            Self::Requests => "Requests",
            Self::Schedule => "Schedule",
            Self::Earnings => "Earnings",
        }
    }
}

pub type ProviderDashboard = DashboardState<ProviderSection>;

#[derive(Debug, Clone)]
pub struct ProviderView {
    pub provider: Provider,
    /// Pending bookings awaiting a decision
    pub requests: Vec<Booking>,
    /// Confirmed bookings, soonest first
    pub schedule: Vec<Booking>,
    pub earnings: EarningsSummary,
}

impl ProviderView {
    pub fn load(source: &dyn MarketplaceSource, provider: Provider) -> HubResult<Self> {
        let bookings = source.list_bookings()?;
        let earnings = EarningsSummary::from_bookings(&bookings, provider.id);

        let mine: Vec<&Booking> = bookings
            .iter()
            .filter(|b| b.provider_id == Some(provider.id))
            .collect();
        let with_status = |status: BookingStatus| -> Vec<Booking> {
            mine.iter()
                .filter(|b| b.status == status)
                .map(|b| (*b).clone())
                .collect()
        };
        let requests = with_status(BookingStatus::Pending);
        let mut schedule = with_status(BookingStatus::Confirmed);
        schedule.sort_by_key(|b| (b.date.is_none(), b.date, b.time_slot));

        Ok(Self {
            provider,
            requests,
            schedule,
            earnings,
        })
    }

    pub fn rows(&self, section: ProviderSection) -> usize {
        match section {
            ProviderSection::Requests => self.requests.len(),
            ProviderSection::Schedule => self.schedule.len(),
            ProviderSection::Earnings => 0,
        }
    }

    pub fn selected_booking(&self, state: &ProviderDashboard) -> Option<&Booking> {
        match state.section {
            ProviderSection::Requests => self.requests.get(state.selected),
            ProviderSection::Schedule => self.schedule.get(state.selected),
            ProviderSection::Earnings => None,
        }
    }

    pub fn accept_command(&self, state: &ProviderDashboard) -> Option<MarketplaceCommand> {
        if state.section != ProviderSection::Requests {
            return None;
        }
        self.selected_booking(state)
            .map(|b| MarketplaceCommand::AcceptBooking(b.id))
    }

    /// Turning down a request cancels it
    pub fn decline_command(&self, state: &ProviderDashboard) -> Option<MarketplaceCommand> {
        if state.section != ProviderSection::Requests {
            return None;
        }
        self.selected_booking(state)
            .map(|b| MarketplaceCommand::CancelBooking(b.id))
    }

    pub fn complete_command(&self, state: &ProviderDashboard) -> Option<MarketplaceCommand> {
        if state.section != ProviderSection::Schedule {
            return None;
        }
        self.selected_booking(state)
            .map(|b| MarketplaceCommand::CompleteBooking(b.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingDraft, Money, UserId};
    use crate::services::source::MemorySource;
    use crate::tui::dashboards::{reduce, DashboardAction};

    fn booking_for(provider: &Provider, status: BookingStatus) -> Booking {
        let mut draft = BookingDraft::new();
        draft.provider_id = Some(provider.id);
        let mut booking = Booking::from_draft(draft, UserId::new(), Money::from_units(110));
        booking.status = status;
        booking
    }

    fn view() -> ProviderView {
        let mut source = MemorySource::sample();
        let ace = source.providers[0].clone();
        let drain = source.providers[1].clone();
        source.bookings = vec![
            booking_for(&ace, BookingStatus::Pending),
            booking_for(&ace, BookingStatus::Pending),
            booking_for(&ace, BookingStatus::Confirmed),
            booking_for(&ace, BookingStatus::Completed),
            booking_for(&drain, BookingStatus::Pending),
        ];
        ProviderView::load(&source, ace).unwrap()
    }

    #[test]
    fn test_load_groups_by_status() {
        let view = view();
        assert_eq!(view.rows(ProviderSection::Requests), 2);
        assert_eq!(view.rows(ProviderSection::Schedule), 1);
        assert_eq!(view.earnings.completed_jobs, 1);
        assert_eq!(view.earnings.earned, Money::from_units(110));
        assert_eq!(view.earnings.open_requests, 2);
    }

    #[test]
    fn test_commands_follow_section() {
        let view = view();
        let requests = ProviderDashboard::new();
        assert_eq!(
            view.accept_command(&requests),
            Some(MarketplaceCommand::AcceptBooking(view.requests[0].id))
        );
        assert_eq!(
            view.decline_command(&requests),
            Some(MarketplaceCommand::CancelBooking(view.requests[0].id))
        );
        assert_eq!(view.complete_command(&requests), None);

        let schedule = reduce(requests, DashboardAction::NextSection);
        assert_eq!(view.accept_command(&schedule), None);
        assert_eq!(
            view.complete_command(&schedule),
            Some(MarketplaceCommand::CompleteBooking(view.schedule[0].id))
        );

        let earnings = reduce(schedule, DashboardAction::NextSection);
        assert!(view.selected_booking(&earnings).is_none());
    }
}
