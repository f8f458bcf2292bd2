//! User repository for JSON storage
//!
//! Manages loading and saving user accounts to users.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::HubError;
use crate::models::{ProviderId, UserAccount, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UserData {
    pub users: Vec<UserAccount>,
}

/// Repository for user persistence
pub struct UserRepository {
    path: PathBuf,
    data: RwLock<HashMap<UserId, UserAccount>>,
}

impl UserRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), HubError> {
        let file_data: UserData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| HubError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for user in file_data.users {
            data.insert(user.id, user);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), HubError> {
        let users = self.get_all()?;
        write_json_atomic(&self.path, &UserData { users })
    }

    pub fn get(&self, id: UserId) -> Result<Option<UserAccount>, HubError> {
        let data = self
            .data
            .read()
            .map_err(|e| HubError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// All users ordered by join date
    pub fn get_all(&self) -> Result<Vec<UserAccount>, HubError> {
        let data = self
            .data
            .read()
            .map_err(|e| HubError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut users: Vec<_> = data.values().cloned().collect();
        users.sort_by(|a, b| a.joined_at.cmp(&b.joined_at).then(a.email.cmp(&b.email)));
        Ok(users)
    }

    /// Get a user by e-mail (case-insensitive)
    pub fn get_by_email(&self, email: &str) -> Result<Option<UserAccount>, HubError> {
        let data = self
            .data
            .read()
            .map_err(|e| HubError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
            .cloned())
    }

    /// The account linked to a provider listing
    pub fn get_by_provider(&self, provider_id: ProviderId) -> Result<Option<UserAccount>, HubError> {
        let data = self
            .data
            .read()
            .map_err(|e| HubError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .values()
            .find(|u| u.provider_id == Some(provider_id))
            .cloned())
    }

    /// Find by e-mail or short display ID ("usr-1a2b3c4d")
    pub fn find(&self, identifier: &str) -> Result<Option<UserAccount>, HubError> {
        if let Some(user) = self.get_by_email(identifier)? {
            return Ok(Some(user));
        }

        let data = self
            .data
            .read()
            .map_err(|e| HubError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .values()
            .find(|u| u.id.matches_short(identifier.trim()))
            .cloned())
    }

    pub fn upsert(&self, user: UserAccount) -> Result<(), HubError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| HubError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(user.id, user);
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
