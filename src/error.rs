//! Custom error types for ServiceHub
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for ServiceHub operations
#[derive(Error, Debug)]
pub enum HubError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// A booking was asked to move to a status it cannot reach
    #[error("Cannot move booking {booking} from {from} to {to}")]
    InvalidTransition {
        booking: String,
        from: String,
        to: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// Environment bootstrap errors
    #[error("Bootstrap error: {0}")]
    Bootstrap(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl HubError {
    /// Create a "not found" error for providers
    pub fn provider_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Provider",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for bookings
    pub fn booking_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Booking",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for HubError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for HubError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for HubError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

/// Result type alias for ServiceHub operations
pub type HubResult<T> = Result<T, HubError>;
