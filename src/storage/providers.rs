//! Provider repository for JSON storage
//!
//! Manages loading and saving provider listings to providers.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::HubError;
use crate::models::{Provider, ProviderId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable provider data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ProviderData {
    pub providers: Vec<Provider>,
}

/// Repository for provider persistence
pub struct ProviderRepository {
    path: PathBuf,
    data: RwLock<HashMap<ProviderId, Provider>>,
}

impl ProviderRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load providers from disk
    pub fn load(&self) -> Result<(), HubError> {
        let file_data: ProviderData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| HubError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for provider in file_data.providers {
            data.insert(provider.id, provider);
        }

        Ok(())
    }

    /// Save providers to disk
    pub fn save(&self) -> Result<(), HubError> {
        let providers = self.get_all()?;
        write_json_atomic(&self.path, &ProviderData { providers })
    }

    pub fn get(&self, id: ProviderId) -> Result<Option<Provider>, HubError> {
        let data = self
            .data
            .read()
            .map_err(|e| HubError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// All providers sorted by name
    pub fn get_all(&self) -> Result<Vec<Provider>, HubError> {
        let data = self
            .data
            .read()
            .map_err(|e| HubError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut providers: Vec<_> = data.values().cloned().collect();
        providers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(providers)
    }

    /// Get a provider by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Provider>, HubError> {
        let data = self
            .data
            .read()
            .map_err(|e| HubError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.trim().to_lowercase();
        Ok(data
            .values()
            .find(|p| p.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Find by short display ID ("pro-1a2b3c4d"), full UUID, or name
    pub fn find(&self, identifier: &str) -> Result<Option<Provider>, HubError> {
        if let Some(provider) = self.get_by_name(identifier)? {
            return Ok(Some(provider));
        }

        let data = self
            .data
            .read()
            .map_err(|e| HubError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .values()
            .find(|p| p.id.matches_short(identifier.trim()))
            .cloned())
    }

    /// Insert or update a provider
    pub fn upsert(&self, provider: Provider) -> Result<(), HubError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| HubError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(provider.id, provider);
        Ok(())
    }

    pub fn count(&self) -> Result<usize, HubError> {
        let data = self
            .data
            .read()
            .map_err(|e| HubError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ProviderRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ProviderRepository::new(temp_dir.path().join("providers.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_upsert_and_find() {
        let (_temp_dir, repo) = create_test_repo();
        let provider = Provider::new("Spark Electric", "Electrical", Money::from_units(70), "Denver");
        let id = provider.id;
        repo.upsert(provider).unwrap();

        assert_eq!(repo.get(id).unwrap().unwrap().name, "Spark Electric");
        assert_eq!(repo.find("spark electric").unwrap().unwrap().id, id);
        assert_eq!(repo.find(&id.to_string()).unwrap().unwrap().id, id);
        assert!(repo.find("pro-").unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        repo.upsert(Provider::new("Fresh Maids", "Cleaning", Money::from_units(35), "Austin"))
            .unwrap();
        repo.save().unwrap();

        let reloaded = ProviderRepository::new(temp_dir.path().join("providers.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 1);
    }
}
