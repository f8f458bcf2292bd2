//! Dashboard commands
//!
//! Each mutating dashboard action is a `MarketplaceCommand` value. Executing
//! it returns a one-line outcome message that the TUI shows as a
//! notification and the CLI prints.

use std::fmt;

use crate::error::HubResult;
use crate::models::{BookingId, ProviderId, UserId};
use crate::storage::Storage;

use super::admin::AdminService;
use super::booking::BookingService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketplaceCommand {
    CancelBooking(BookingId),
    AcceptBooking(BookingId),
    CompleteBooking(BookingId),
    VerifyProvider(ProviderId),
    SuspendUser(UserId),
    ReinstateUser(UserId),
}

impl MarketplaceCommand {
    /// Run the command against storage on behalf of `actor`
    pub fn execute(&self, storage: &Storage, actor: &str) -> HubResult<String> {
        let bookings = BookingService::new(storage);
        let admin = AdminService::new(storage);

        match *self {
            Self::CancelBooking(id) => {
                let booking = bookings.cancel(id, actor)?;
                Ok(format!("Cancelled {} ({})", booking.id, booking.headline()))
            }
            Self::AcceptBooking(id) => {
                let booking = bookings.accept(id, actor)?;
                Ok(format!("Accepted {} ({})", booking.id, booking.headline()))
            }
            Self::CompleteBooking(id) => {
                let booking = bookings.complete(id, actor)?;
                Ok(format!(
                    "Completed {}, earned {}",
                    booking.id, booking.estimated_price
                ))
            }
            Self::VerifyProvider(id) => {
                let provider = admin.verify_provider(id, actor)?;
                Ok(format!("Verified {}", provider.name))
            }
            Self::SuspendUser(id) => {
                let user = admin.suspend_user(id, actor)?;
                Ok(format!("Suspended {}", user.email))
            }
            Self::ReinstateUser(id) => {
                let user = admin.reinstate_user(id, actor)?;
                Ok(format!("Reinstated {}", user.email))
            }
        }
    }

    /// Whether the TUI asks for confirmation before running it
    pub fn is_destructive(&self) -> bool {
        matches!(self, Self::CancelBooking(_) | Self::SuspendUser(_))
    }
}

impl fmt::Display for MarketplaceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CancelBooking(id) => write!(f, "Cancel booking {}", id),
            Self::AcceptBooking(id) => write!(f, "Accept booking {}", id),
            Self::CompleteBooking(id) => write!(f, "Mark booking {} completed", id),
            Self::VerifyProvider(id) => write!(f, "Verify provider {}", id),
            Self::SuspendUser(id) => write!(f, "Suspend user {}", id),
            Self::ReinstateUser(id) => write!(f, "Reinstate user {}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::HubPaths;
    use crate::error::HubError;
    use crate::models::BookingStatus;
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
    fn test_commands_return_messages() {
        let (_temp, storage) = seeded_storage();
        let pending = storage.bookings.get_by_status(BookingStatus::Pending).unwrap()[0].clone();

        let message = MarketplaceCommand::AcceptBooking(pending.id)
            .execute(&storage, "Ace Plumbing")
            .unwrap();
        assert!(message.starts_with("Accepted bkg-"));

        let message = MarketplaceCommand::CompleteBooking(pending.id)
            .execute(&storage, "Ace Plumbing")
            .unwrap();
        assert!(message.contains("earned $110.00"));
    }

    #[test]
    fn test_failed_command_is_an_error() {
        let (_temp, storage) = seeded_storage();
        let cancelled = storage.bookings.get_by_status(BookingStatus::Cancelled).unwrap()[0].clone();

        let err = MarketplaceCommand::CancelBooking(cancelled.id)
            .execute(&storage, "jordan")
            .unwrap_err();
        assert!(matches!(err, HubError::InvalidTransition { .. }));
    }

    #[test]
    fn test_destructive_flag() {
        assert!(MarketplaceCommand::SuspendUser(UserId::new()).is_destructive());
        assert!(!MarketplaceCommand::VerifyProvider(ProviderId::new()).is_destructive());
    }
}
