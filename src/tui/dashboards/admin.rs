//! Admin dashboard: platform overview and moderation lists

use crate::activity::ActivityEntry;
use crate::error::HubResult;
use crate::models::{Booking, Provider, UserAccount};
use crate::services::{MarketplaceCommand, MarketplaceSource, PlatformStats};

use super::{DashboardState, Section};

/// Activity entries shown in the Activity tab
pub const ACTIVITY_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminSection {
    #[default]
    Overview,
    Users,
    Providers,
    Bookings,
    Activity,
}

impl Section for AdminSection {
    fn all() -> &'static [Self] {
        &[
            Self::Overview,
            Self::Users,
            Self::Providers,
            Self::Bookings,
            Self::Activity,
        ]
    }

    fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Users => "Users",
            Self::Providers => "Providers",
            Self::Bookings => "Bookings",
            Self::Activity => "Activity",
        }
    }
}

pub type AdminDashboard = DashboardState<AdminSection>;

#[derive(Debug, Clone)]
pub struct AdminView {
    pub stats: PlatformStats,
    pub users: Vec<UserAccount>,
    pub providers: Vec<Provider>,
    pub bookings: Vec<Booking>,
    pub activity: Vec<ActivityEntry>,
}

impl AdminView {
    pub fn load(source: &dyn MarketplaceSource) -> HubResult<Self> {
        Ok(Self {
            stats: PlatformStats::collect(source)?,
            users: source.list_users()?,
            providers: source.list_providers()?,
            bookings: source.list_bookings()?,
            activity: source.recent_activity(ACTIVITY_LIMIT)?,
        })
    }

    pub fn rows(&self, section: AdminSection) -> usize {
        match section {
            AdminSection::Overview => 0,
            AdminSection::Users => self.users.len(),
            AdminSection::Providers => self.providers.len(),
            AdminSection::Bookings => self.bookings.len(),
            AdminSection::Activity => self.activity.len(),
        }
    }

    fn selected_user(&self, state: &AdminDashboard) -> Option<&UserAccount> {
        (state.section == AdminSection::Users)
            .then(|| self.users.get(state.selected))
            .flatten()
    }

    pub fn verify_command(&self, state: &AdminDashboard) -> Option<MarketplaceCommand> {
        if state.section != AdminSection::Providers {
            return None;
        }
        self.providers
            .get(state.selected)
            .map(|p| MarketplaceCommand::VerifyProvider(p.id))
    }

    pub fn suspend_command(&self, state: &AdminDashboard) -> Option<MarketplaceCommand> {
        self.selected_user(state)
            .map(|u| MarketplaceCommand::SuspendUser(u.id))
    }

    pub fn reinstate_command(&self, state: &AdminDashboard) -> Option<MarketplaceCommand> {
        self.selected_user(state)
            .map(|u| MarketplaceCommand::ReinstateUser(u.id))
    }

    pub fn cancel_command(&self, state: &AdminDashboard) -> Option<MarketplaceCommand> {
        if state.section != AdminSection::Bookings {
            return None;
        }
        self.bookings
            .get(state.selected)
            .filter(|b| b.status.is_open())
            .map(|b| MarketplaceCommand::CancelBooking(b.id))
    }

    pub fn provider_name(&self, booking: &Booking) -> &str {
        booking
            .provider_id
            .and_then(|id| self.providers.iter().find(|p| p.id == id))
            .map(|p| p.name.as_str())
            .unwrap_or("Unassigned")
    }

    pub fn customer_email(&self, booking: &Booking) -> &str {
        self.users
            .iter()
            .find(|u| u.id == booking.customer_id)
            .map(|u| u.email.as_str())
            .unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivityKind;
    use crate::models::{BookingDraft, BookingStatus, Money, UserRole};
    use crate::services::source::MemorySource;
    use crate::tui::dashboards::{reduce, DashboardAction};

    fn source() -> MemorySource {
        let jordan = UserAccount::new("Jordan", "jordan@example.com", UserRole::Customer);
        let mut completed = Booking::from_draft(BookingDraft::new(), jordan.id, Money::from_units(70));
        completed.status = BookingStatus::Completed;
        let pending = Booking::from_draft(BookingDraft::new(), jordan.id, Money::zero());

        let mut source = MemorySource::sample();
        source.users = vec![jordan];
        source.bookings = vec![completed, pending];
        source.activity = vec![ActivityEntry::new(ActivityKind::CatalogSeeded, "catalog")];
        source
    }

    #[test]
    fn test_load_and_rows() {
        let view = AdminView::load(&source()).unwrap();
        assert_eq!(view.rows(AdminSection::Overview), 0);
        assert_eq!(view.rows(AdminSection::Users), 1);
        assert_eq!(view.rows(AdminSection::Providers), 4);
        assert_eq!(view.rows(AdminSection::Bookings), 2);
        assert_eq!(view.rows(AdminSection::Activity), 1);
        assert_eq!(view.stats.completed_revenue, Money::from_units(70));
        assert_eq!(view.customer_email(&view.bookings[0]), "jordan@example.com");
    }

    #[test]
    fn test_commands_follow_section() {
        let view = AdminView::load(&source()).unwrap();
        let overview = AdminDashboard::new();
        assert_eq!(view.verify_command(&overview), None);
        assert_eq!(view.suspend_command(&overview), None);

        let users = reduce(overview, DashboardAction::Select(AdminSection::Users));
        assert_eq!(
            view.suspend_command(&users),
            Some(MarketplaceCommand::SuspendUser(view.users[0].id))
        );
        assert_eq!(
            view.reinstate_command(&users),
            Some(MarketplaceCommand::ReinstateUser(view.users[0].id))
        );

        let providers = reduce(users, DashboardAction::NextSection);
        assert_eq!(
            view.verify_command(&providers),
            Some(MarketplaceCommand::VerifyProvider(view.providers[0].id))
        );
    }

    #[test]
    fn test_cancel_skips_closed_bookings() {
        let view = AdminView::load(&source()).unwrap();
        let bookings = reduce(AdminDashboard::new(), DashboardAction::Select(AdminSection::Bookings));
        let bookings = reduce(bookings, DashboardAction::RowsLoaded(2));

        let first_open = view.bookings[0].status.is_open();
        assert_eq!(view.cancel_command(&bookings).is_some(), first_open);

        let second = reduce(bookings, DashboardAction::MoveDown);
        assert_eq!(view.cancel_command(&second).is_some(), view.bookings[1].status.is_open());
    }
}
