//! Provider model
//!
//! A provider is a service professional listed in the marketplace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ProviderId;
use super::money::Money;

/// A service professional
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,

    /// Display name (business or person)
    pub name: String,

    /// Name of the service category this provider works in
    pub category: String,

    /// Hourly rate
    pub hourly_rate: Money,

    /// Average review score, 0.0 to 5.0
    pub rating: f32,

    #[serde(default)]
    pub review_count: u32,

    pub city: String,

    /// Whether an admin has verified identity and credentials
    #[serde(default)]
    pub verified: bool,

    #[serde(default)]
    pub years_experience: u32,

    #[serde(default)]
    pub bio: String,

    pub created_at: DateTime<Utc>,
}

impl Provider {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        hourly_rate: Money,
        city: impl Into<String>,
    ) -> Self {
        Self {
            id: ProviderId::new(),
            name: name.into(),
            category: category.into(),
            hourly_rate,
            rating: 0.0,
            review_count: 0,
            city: city.into(),
            verified: false,
            years_experience: 0,
            bio: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Builder-style rating setter used by seed data and tests
    pub fn with_rating(mut self, rating: f32, review_count: u32) -> Self {
        self.rating = rating;
        self.review_count = review_count;
        self
    }

    pub fn with_bio(mut self, years_experience: u32, bio: impl Into<String>) -> Self {
        self.years_experience = years_experience;
        self.bio = bio.into();
        self
    }

    pub fn verified(mut self) -> Self {
        self.verified = true;
        self
    }

    /// Five-character star bar, e.g. "★★★★☆" for 4.2
    pub fn stars(&self) -> String {
        let filled = self.rating.round().clamp(0.0, 5.0) as usize;
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }

    pub fn validate(&self) -> Result<(), ProviderValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProviderValidationError::EmptyName);
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(ProviderValidationError::RatingOutOfRange(self.rating));
        }
        if self.hourly_rate.is_negative() {
            return Err(ProviderValidationError::NegativeRate);
        }
        Ok(())
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.category)
    }
}

/// Validation errors for providers
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderValidationError {
    EmptyName,
    RatingOutOfRange(f32),
    NegativeRate,
}

impl fmt::Display for ProviderValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Provider name cannot be empty"),
            Self::RatingOutOfRange(r) => write!(f, "Rating {} is outside 0-5", r),
            Self::NegativeRate => write!(f, "Hourly rate cannot be negative"),
        }
    }
}

impl std::error::Error for ProviderValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars() {
        let p = Provider::new("Ace", "Plumbing", Money::from_units(50), "Austin")
            .with_rating(4.4, 12);
        assert_eq!(p.stars(), "★★★★☆");

        let top = p.clone().with_rating(4.6, 12);
        assert_eq!(top.stars(), "★★★★★");
    }

    #[test]
    fn test_validation() {
        let p = Provider::new("Ace", "Plumbing", Money::from_units(50), "Austin");
        assert!(p.validate().is_ok());

        let bad = p.clone().with_rating(7.0, 1);
        assert_eq!(
            bad.validate(),
            Err(ProviderValidationError::RatingOutOfRange(7.0))
        );

        let mut negative = p;
        negative.hourly_rate = Money::from_cents(-1);
        assert_eq!(negative.validate(), Err(ProviderValidationError::NegativeRate));
    }
}
