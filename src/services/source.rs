//! Read interface over marketplace data
//!
//! Views and read-only services depend on `MarketplaceSource` rather than on
//! `Storage`, so the JSON catalog can be swapped for a remote backend without
//! touching rendering code.

use crate::activity::ActivityEntry;
use crate::error::HubResult;
use crate::models::{Booking, Provider, ServiceCategory, UserAccount};
use crate::storage::Storage;

pub trait MarketplaceSource {
    /// Categories in display order
    fn list_categories(&self) -> HubResult<Vec<ServiceCategory>>;

    /// Every provider listing, sorted by name
    fn list_providers(&self) -> HubResult<Vec<Provider>>;

    /// Every booking, newest first
    fn list_bookings(&self) -> HubResult<Vec<Booking>>;

    fn list_users(&self) -> HubResult<Vec<UserAccount>>;

    /// The latest `limit` activity entries, newest first
    fn recent_activity(&self, limit: usize) -> HubResult<Vec<ActivityEntry>>;
}

impl MarketplaceSource for Storage {
    fn list_categories(&self) -> HubResult<Vec<ServiceCategory>> {
        self.categories.get_all()
    }

    fn list_providers(&self) -> HubResult<Vec<Provider>> {
        self.providers.get_all()
    }

    fn list_bookings(&self) -> HubResult<Vec<Booking>> {
        self.bookings.get_all()
    }

    fn list_users(&self) -> HubResult<Vec<UserAccount>> {
        self.users.get_all()
    }

    fn recent_activity(&self, limit: usize) -> HubResult<Vec<ActivityEntry>> {
        self.activity().read_recent(limit)
    }
}

/// In-memory source for view and reducer tests
#[cfg(test)]
#[derive(Default)]
pub struct MemorySource {
    pub categories: Vec<ServiceCategory>,
    pub providers: Vec<Provider>,
    pub bookings: Vec<Booking>,
    pub users: Vec<UserAccount>,
    pub activity: Vec<ActivityEntry>,
}

#[cfg(test)]
impl MemorySource {
    /// The demo categories plus a small provider list
    pub fn sample() -> Self {
        use crate::models::{DefaultCategory, Money};

        Self {
            categories: DefaultCategory::all()
                .iter()
                .enumerate()
                .map(|(i, c)| c.to_category(i as i32))
                .collect(),
            providers: vec![
                Provider::new("Ace Plumbing", "Plumbing", Money::from_units(55), "Austin")
                    .with_rating(4.8, 132)
                    .verified(),
                Provider::new("DrainPro Services", "Plumbing", Money::from_units(45), "Dallas")
                    .with_rating(4.3, 58),
                Provider::new("Spark Electric", "Electrical", Money::from_units(70), "Denver")
                    .with_rating(4.8, 210)
                    .verified(),
                Provider::new("Fresh Maids", "Cleaning", Money::from_units(35), "Austin")
                    .with_rating(4.7, 318)
                    .with_bio(8, "Eco-friendly home cleaning"),
            ],
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl MarketplaceSource for MemorySource {
    fn list_categories(&self) -> HubResult<Vec<ServiceCategory>> {
        Ok(self.categories.clone())
    }

    fn list_providers(&self) -> HubResult<Vec<Provider>> {
        Ok(self.providers.clone())
    }

    fn list_bookings(&self) -> HubResult<Vec<Booking>> {
        Ok(self.bookings.clone())
    }

    fn list_users(&self) -> HubResult<Vec<UserAccount>> {
        Ok(self.users.clone())
    }

    fn recent_activity(&self, limit: usize) -> HubResult<Vec<ActivityEntry>> {
        Ok(self.activity.iter().take(limit).cloned().collect())
    }
}
