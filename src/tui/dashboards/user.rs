//! Customer dashboard: upcoming bookings, history and profile

use chrono::NaiveDate;

use crate::error::{HubError, HubResult};
use crate::models::{Booking, Provider, UserAccount};
use crate::services::{MarketplaceCommand, MarketplaceSource};

use super::{DashboardState, Section};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSection {
    #[default]
    Upcoming,
    History,
    Profile,
}

impl Section for UserSection {
    fn all() -> &'static [Self] {
        &[Self::Upcoming, Self::History, Self::Profile]
    }

    fn title(self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming",
            Self::History => "History",
            Self::Profile => "Profile",
        }
    }
}

pub type UserDashboard = DashboardState<UserSection>;

/// Data behind the customer dashboard
#[derive(Debug, Clone)]
pub struct UserView {
    pub customer: UserAccount,
    /// Open bookings dated today or later, soonest first
    pub upcoming: Vec<Booking>,
    /// Everything else, newest first
    pub history: Vec<Booking>,
    providers: Vec<Provider>,
}

impl UserView {
    pub fn load(source: &dyn MarketplaceSource, email: &str, today: NaiveDate) -> HubResult<Self> {
        let customer = source
            .list_users()?
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .ok_or_else(|| HubError::user_not_found(email))?;

        let (mut upcoming, history): (Vec<_>, Vec<_>) = source
            .list_bookings()?
            .into_iter()
            .filter(|b| b.customer_id == customer.id)
            .partition(|b| b.is_upcoming(today));
        upcoming.sort_by_key(|b| (b.date.is_none(), b.date));

        Ok(Self {
            customer,
            upcoming,
            history,
            providers: source.list_providers()?,
        })
    }

    pub fn rows(&self, section: UserSection) -> usize {
        match section {
            UserSection::Upcoming => self.upcoming.len(),
            UserSection::History => self.history.len(),
            UserSection::Profile => 0,
        }
    }

    pub fn selected_booking(&self, state: &UserDashboard) -> Option<&Booking> {
        match state.section {
            UserSection::Upcoming => self.upcoming.get(state.selected),
            UserSection::History => self.history.get(state.selected),
            UserSection::Profile => None,
        }
    }

    /// Cancel the highlighted upcoming booking
    pub fn cancel_command(&self, state: &UserDashboard) -> Option<MarketplaceCommand> {
        if state.section != UserSection::Upcoming {
            return None;
        }
        self.selected_booking(state)
            .map(|b| MarketplaceCommand::CancelBooking(b.id))
    }

    pub fn provider_name(&self, booking: &Booking) -> &str {
        booking
            .provider_id
            .and_then(|id| self.providers.iter().find(|p| p.id == id))
            .map(|p| p.name.as_str())
            .unwrap_or("Unassigned")
    }

    pub fn total_spent(&self) -> crate::models::Money {
        self.history
            .iter()
            .filter(|b| b.status == crate::models::BookingStatus::Completed)
            .map(|b| b.estimated_price)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingDraft, BookingStatus, Money, UserRole};
    use crate::services::source::MemorySource;
    use crate::tui::dashboards::{reduce, DashboardAction};

    fn booking(customer: &UserAccount, date: &str, status: BookingStatus) -> Booking {
        let mut draft = BookingDraft::new();
        draft.category = Some("Plumbing".into());
        draft.date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok();
        let mut booking = Booking::from_draft(draft, customer.id, Money::from_units(110));
        booking.status = status;
        booking
    }

    fn source() -> (MemorySource, UserAccount) {
        let jordan = UserAccount::new("Jordan", "jordan@example.com", UserRole::Customer);
        let other = UserAccount::new("Priya", "priya@example.com", UserRole::Customer);
        let mut source = MemorySource::sample();
        source.bookings = vec![
            booking(&jordan, "2025-09-10", BookingStatus::Confirmed),
            booking(&jordan, "2025-08-01", BookingStatus::Pending),
            booking(&jordan, "2025-07-01", BookingStatus::Completed),
            booking(&jordan, "2025-09-01", BookingStatus::Cancelled),
            booking(&other, "2025-09-01", BookingStatus::Pending),
        ];
        source.users = vec![jordan.clone(), other];
        (source, jordan)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 15).unwrap()
    }

    #[test]
    fn test_splits_upcoming_and_history() {
        let (source, jordan) = source();
        let view = UserView::load(&source, "JORDAN@example.com", today()).unwrap();

        assert_eq!(view.customer.id, jordan.id);
        assert_eq!(view.rows(UserSection::Upcoming), 2);
        assert_eq!(view.rows(UserSection::History), 2);
        assert_eq!(view.rows(UserSection::Profile), 0);
        assert_eq!(
            view.upcoming[0].date,
            NaiveDate::from_ymd_opt(2025, 8, 1)
        );
        assert_eq!(view.total_spent(), Money::from_units(110));
    }

    #[test]
    fn test_cancel_command_only_on_upcoming() {
        let (source, _) = source();
        let view = UserView::load(&source, "jordan@example.com", today()).unwrap();

        let state = reduce(UserDashboard::new(), DashboardAction::RowsLoaded(2));
        let state = reduce(state, DashboardAction::MoveDown);
        assert_eq!(
            view.cancel_command(&state),
            Some(MarketplaceCommand::CancelBooking(view.upcoming[1].id))
        );

        let history = reduce(state, DashboardAction::Select(UserSection::History));
        assert!(view.selected_booking(&history).is_some());
        assert_eq!(view.cancel_command(&history), None);
    }

    #[test]
    fn test_unknown_customer() {
        let (source, _) = source();
        let err = UserView::load(&source, "nobody@example.com", today()).unwrap_err();
        assert!(err.is_not_found());
    }
}
