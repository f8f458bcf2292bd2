//! Storage layer for ServiceHub
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. Each entity type lives in its own file under `data/`.

pub mod bookings;
pub mod categories;
pub mod file_io;
pub mod init;
pub mod providers;
pub mod users;

pub use bookings::BookingRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, needs_initialization};
pub use providers::ProviderRepository;
pub use users::UserRepository;

use crate::activity::{ActivityEntry, ActivityLogger};
use crate::config::paths::HubPaths;
use crate::error::HubError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: HubPaths,
    pub categories: CategoryRepository,
    pub providers: ProviderRepository,
    pub bookings: BookingRepository,
    pub users: UserRepository,
    activity: ActivityLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: HubPaths) -> Result<Self, HubError> {
        paths.ensure_directories()?;

        Ok(Self {
            categories: CategoryRepository::new(paths.categories_file()),
            providers: ProviderRepository::new(paths.providers_file()),
            bookings: BookingRepository::new(paths.bookings_file()),
            users: UserRepository::new(paths.users_file()),
            activity: ActivityLogger::new(paths.activity_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &HubPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), HubError> {
        self.categories.load()?;
        self.providers.load()?;
        self.bookings.load()?;
        self.users.load()?;
        Ok(())
    }

    /// Append an event to the activity log
    pub fn record(&self, entry: ActivityEntry) -> Result<(), HubError> {
        tracing::debug!(kind = %entry.kind, subject = %entry.subject_id, "activity");
        self.activity.log(&entry)
    }

    pub fn activity(&self) -> &ActivityLogger {
        &self.activity
    }

    /// Check if storage has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivityKind;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HubPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(temp_dir.path().join("logs").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_seed_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HubPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();

        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        assert_eq!(storage.categories.count().unwrap(), 8);
        assert_eq!(storage.providers.count().unwrap(), 12);
        assert_eq!(storage.bookings.count().unwrap(), 4);

        storage
            .record(ActivityEntry::new(ActivityKind::CatalogSeeded, "catalog"))
            .unwrap();
        assert_eq!(storage.activity().read_recent(10).unwrap().len(), 1);
    }
}
