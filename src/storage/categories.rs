//! Service category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::HubError;
use crate::models::{CategoryId, ServiceCategory};

use super::file_io::{read_json, write_json_atomic};

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CategoryData {
    pub categories: Vec<ServiceCategory>,
}

/// Repository for service category persistence
pub struct CategoryRepository {
    path: PathBuf,
    data: RwLock<HashMap<CategoryId, ServiceCategory>>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), HubError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| HubError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for category in file_data.categories {
            data.insert(category.id, category);
        }

        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), HubError> {
        let categories = self.get_all()?;
        write_json_atomic(&self.path, &CategoryData { categories })
    }

    /// All categories in display order
    pub fn get_all(&self) -> Result<Vec<ServiceCategory>, HubError> {
        let data = self
            .data
            .read()
            .map_err(|e| HubError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = data.values().cloned().collect();
        list.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.name.cmp(&b.name)));
        Ok(list)
    }

    /// Get a category by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<ServiceCategory>, HubError> {
        let data = self
            .data
            .read()
            .map_err(|e| HubError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.values().find(|c| c.is_named(name)).cloned())
    }

    /// Insert or update a category
    pub fn upsert(&self, category: ServiceCategory) -> Result<(), HubError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| HubError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(category.id, category);
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
