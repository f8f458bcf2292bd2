//! Administration service
//!
//! Platform statistics plus the moderation actions available on the admin
//! dashboard: verifying providers and suspending or reinstating users.

use crate::activity::{ActivityEntry, ActivityKind};
use crate::error::{HubError, HubResult};
use crate::models::{BookingStatus, Money, Provider, ProviderId, UserAccount, UserId, UserRole};
use crate::storage::Storage;

use super::source::MarketplaceSource;

/// Headline numbers for the admin overview
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformStats {
    pub users: usize,
    pub customers: usize,
    pub provider_accounts: usize,
    pub admins: usize,
    pub suspended_users: usize,
    pub providers: usize,
    pub verified_providers: usize,
    /// Count per status, in `BookingStatus::all()` order
    pub bookings_by_status: Vec<(BookingStatus, usize)>,
    /// Sum of estimated prices of completed bookings
    pub completed_revenue: Money,
}

impl PlatformStats {
    pub fn collect(source: &dyn MarketplaceSource) -> HubResult<Self> {
        let users = source.list_users()?;
        let providers = source.list_providers()?;
        let bookings = source.list_bookings()?;

        let count_role = |role: UserRole| users.iter().filter(|u| u.role == role).count();

        Ok(Self {
            users: users.len(),
            customers: count_role(UserRole::Customer),
            provider_accounts: count_role(UserRole::Provider),
            admins: count_role(UserRole::Admin),
            suspended_users: users.iter().filter(|u| !u.is_active()).count(),
            providers: providers.len(),
            verified_providers: providers.iter().filter(|p| p.verified).count(),
            bookings_by_status: BookingStatus::all()
                .iter()
                .map(|s| (*s, bookings.iter().filter(|b| b.status == *s).count()))
                .collect(),
            completed_revenue: bookings
                .iter()
                .filter(|b| b.status == BookingStatus::Completed)
                .map(|b| b.estimated_price)
                .sum(),
        })
    }

    pub fn unverified_providers(&self) -> usize {
        self.providers - self.verified_providers
    }

    pub fn total_bookings(&self) -> usize {
        self.bookings_by_status.iter().map(|(_, n)| n).sum()
    }

    pub fn bookings_with(&self, status: BookingStatus) -> usize {
        self.bookings_by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

/// Service for moderation actions
pub struct AdminService<'a> {
    storage: &'a Storage,
}

impl<'a> AdminService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn stats(&self) -> HubResult<PlatformStats> {
        PlatformStats::collect(self.storage)
    }

    /// Find a user by e-mail or display ID
    pub fn find_user(&self, identifier: &str) -> HubResult<UserAccount> {
        self.storage
            .users
            .find(identifier)?
            .ok_or_else(|| HubError::user_not_found(identifier))
    }

    /// Find a provider by name or display ID
    pub fn find_provider(&self, identifier: &str) -> HubResult<Provider> {
        self.storage
            .providers
            .find(identifier)?
            .ok_or_else(|| HubError::provider_not_found(identifier))
    }

    pub fn verify_provider(&self, id: ProviderId, actor: &str) -> HubResult<Provider> {
        let mut provider = self
            .storage
            .providers
            .get(id)?
            .ok_or_else(|| HubError::provider_not_found(id.to_string()))?;

        if provider.verified {
            return Err(HubError::Validation(format!(
                "{} is already verified",
                provider.name
            )));
        }

        provider.verified = true;
        self.storage.providers.upsert(provider.clone())?;
        self.storage.providers.save()?;
        self.storage.record(
            ActivityEntry::new(ActivityKind::ProviderVerified, id.to_string())
                .named(provider.name.clone())
                .by(actor),
        )?;

        tracing::info!(provider = %id, "provider verified");
        Ok(provider)
    }

    pub fn suspend_user(&self, id: UserId, actor: &str) -> HubResult<UserAccount> {
        let mut user = self.get_user(id)?;

        if user.role == UserRole::Admin {
            return Err(HubError::Validation(
                "Administrator accounts cannot be suspended".into(),
            ));
        }
        if !user.is_active() {
            return Err(HubError::Validation(format!(
                "{} is already suspended",
                user.email
            )));
        }

        user.status = crate::models::UserStatus::Suspended;
        self.save_user(&user, ActivityKind::UserSuspended, actor)?;
        Ok(user)
    }

    pub fn reinstate_user(&self, id: UserId, actor: &str) -> HubResult<UserAccount> {
        let mut user = self.get_user(id)?;

        if user.is_active() {
            return Err(HubError::Validation(format!("{} is not suspended", user.email)));
        }

        user.status = crate::models::UserStatus::Active;
        self.save_user(&user, ActivityKind::UserReinstated, actor)?;
        Ok(user)
    }

    fn get_user(&self, id: UserId) -> HubResult<UserAccount> {
        self.storage
            .users
            .get(id)?
            .ok_or_else(|| HubError::user_not_found(id.to_string()))
    }

    fn save_user(&self, user: &UserAccount, kind: ActivityKind, actor: &str) -> HubResult<()> {
        self.storage.users.upsert(user.clone())?;
        self.storage.users.save()?;
        self.storage.record(
            ActivityEntry::new(kind, user.id.to_string())
                .named(user.email.clone())
                .by(actor),
        )?;
        tracing::info!(user = %user.id, status = %user.status, "user status changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::HubPaths;
    use crate::storage::init::{DEMO_ADMIN_EMAIL, DEMO_CUSTOMER_EMAIL};
    use crate::storage::initialize_storage;
    use tempfile::TempDir;

    fn seeded_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = HubPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_stats_on_seed_data() {
        let (_temp, storage) = seeded_storage();
        let stats = AdminService::new(&storage).stats().unwrap();

        assert_eq!(stats.providers, 12);
        assert_eq!(stats.verified_providers, 7);
        assert_eq!(stats.unverified_providers(), 5);
        assert_eq!(stats.admins, 1);
        assert_eq!(stats.provider_accounts, 4);
        assert_eq!(stats.total_bookings(), 4);
        assert_eq!(stats.bookings_with(BookingStatus::Completed), 1);
        assert_eq!(stats.completed_revenue, Money::from_units(70));
    }

    #[test]
    fn test_verify_provider_once() {
        let (_temp, storage) = seeded_storage();
        let admin = AdminService::new(&storage);
        let hank = admin.find_provider("Handy Hank").unwrap();

        assert!(admin.verify_provider(hank.id, "admin").unwrap().verified);
        assert!(admin.verify_provider(hank.id, "admin").unwrap_err().is_validation());
        assert_eq!(
            storage.activity().read_recent(1).unwrap()[0].kind,
            ActivityKind::ProviderVerified
        );
    }

    #[test]
    fn test_suspend_and_reinstate() {
        let (_temp, storage) = seeded_storage();
        let admin = AdminService::new(&storage);
        let jordan = admin.find_user(DEMO_CUSTOMER_EMAIL).unwrap();

        let suspended = admin.suspend_user(jordan.id, "admin").unwrap();
        assert!(!suspended.is_active());
        assert!(admin.suspend_user(jordan.id, "admin").is_err());

        let back = admin.reinstate_user(jordan.id, "admin").unwrap();
        assert!(back.is_active());
        assert!(admin.reinstate_user(jordan.id, "admin").is_err());
    }

    #[test]
    fn test_admin_cannot_be_suspended() {
        let (_temp, storage) = seeded_storage();
        let admin = AdminService::new(&storage);
        let root = admin.find_user(DEMO_ADMIN_EMAIL).unwrap();
        assert!(admin.suspend_user(root.id, "admin").unwrap_err().is_validation());
    }
}
