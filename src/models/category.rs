//! Service category model
//!
//! Categories are the coarse classification shown on the catalog screen and
//! used to filter providers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// A service category (e.g. "Plumbing", "Catering & Events")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub id: CategoryId,

    pub name: String,

    /// One-line description shown on the catalog card
    #[serde(default)]
    pub description: String,

    /// Single glyph rendered next to the name
    #[serde(default)]
    pub icon: String,

    /// Sort order for display
    pub sort_order: i32,

    pub created_at: DateTime<Utc>,
}

impl ServiceCategory {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            description: description.into(),
            icon: String::new(),
            sort_order: 0,
            created_at: Utc::now(),
        }
    }

    /// Case-insensitive name comparison
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }
        Ok(())
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Categories written to a fresh catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultCategory {
    Plumbing,
    Electrical,
    Cleaning,
    CateringEvents,
    BeautyWellness,
    HomeRepair,
    MovingDelivery,
    Tutoring,
}

impl DefaultCategory {
    pub fn all() -> &'static [Self] {
        &[
            Self::Plumbing,
            Self::Electrical,
            Self::Cleaning,
            Self::CateringEvents,
            Self::BeautyWellness,
            Self::HomeRepair,
            Self::MovingDelivery,
            Self::Tutoring,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Plumbing => "Plumbing",
            Self::Electrical => "Electrical",
            Self::Cleaning => "Cleaning",
            Self::CateringEvents => "Catering & Events",
            Self::BeautyWellness => "Beauty & Wellness",
            Self::HomeRepair => "Home Repair",
            Self::MovingDelivery => "Moving & Delivery",
            Self::Tutoring => "Tutoring",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::Plumbing => "Leaks, installations and drain cleaning",
            Self::Electrical => "Wiring, fixtures and safety inspections",
            Self::Cleaning => "Home, office and move-out cleaning",
            Self::CateringEvents => "Catering, decoration and event staff",
            Self::BeautyWellness => "Hair, makeup and massage at home",
            Self::HomeRepair => "Carpentry, painting and general handyman jobs",
            Self::MovingDelivery => "Packing, moving and same-day delivery",
            Self::Tutoring => "School subjects, languages and music lessons",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Self::Plumbing => "P",
            Self::Electrical => "E",
            Self::Cleaning => "C",
            Self::CateringEvents => "K",
            Self::BeautyWellness => "B",
            Self::HomeRepair => "H",
            Self::MovingDelivery => "M",
            Self::Tutoring => "T",
        }
    }

    pub fn to_category(&self, sort_order: i32) -> ServiceCategory {
        let mut category = ServiceCategory::new(self.name(), self.description());
        category.icon = self.icon().to_string();
        category.sort_order = sort_order;
        category
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}
