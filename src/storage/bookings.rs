//! Booking repository for JSON storage
//!
//! Manages loading and saving bookings to bookings.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::HubError;
use crate::models::{Booking, BookingId, BookingStatus, ProviderId, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable booking data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct BookingData {
    pub bookings: Vec<Booking>,
}

/// Repository for booking persistence
pub struct BookingRepository {
    path: PathBuf,
    data: RwLock<HashMap<BookingId, Booking>>,
}

impl BookingRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load bookings from disk
    pub fn load(&self) -> Result<(), HubError> {
        let file_data: BookingData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| HubError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for booking in file_data.bookings {
            data.insert(booking.id, booking);
        }

        Ok(())
    }

    /// Save bookings to disk
    pub fn save(&self) -> Result<(), HubError> {
        let bookings = self.get_all()?;
        write_json_atomic(&self.path, &BookingData { bookings })
    }

    pub fn get(&self, id: BookingId) -> Result<Option<Booking>, HubError> {
        let data = self
            .data
            .read()
            .map_err(|e| HubError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Find by short display ID ("bkg-1a2b3c4d") or full UUID
    pub fn find(&self, identifier: &str) -> Result<Option<Booking>, HubError> {
        let data = self
            .data
            .read()
            .map_err(|e| HubError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .values()
            .find(|b| b.id.matches_short(identifier.trim()))
            .cloned())
    }

    /// All bookings, newest first
    pub fn get_all(&self) -> Result<Vec<Booking>, HubError> {
        let data = self
            .data
            .read()
            .map_err(|e| HubError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut bookings: Vec<_> = data.values().cloned().collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    pub fn get_by_customer(&self, customer_id: UserId) -> Result<Vec<Booking>, HubError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|b| b.customer_id == customer_id)
            .collect())
    }

    pub fn get_by_provider(&self, provider_id: ProviderId) -> Result<Vec<Booking>, HubError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|b| b.provider_id == Some(provider_id))
            .collect())
    }

    pub fn get_by_status(&self, status: BookingStatus) -> Result<Vec<Booking>, HubError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|b| b.status == status)
            .collect())
    }

    /// Insert or update a booking
    pub fn upsert(&self, booking: Booking) -> Result<(), HubError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| HubError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(booking.id, booking);
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
