//! User account model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ProviderId, UserId};

/// What a user can do in the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Provider,
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Customer => write!(f, "Customer"),
            Self::Provider => write!(f, "Provider"),
            Self::Admin => write!(f, "Admin"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Suspended,
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Suspended => write!(f, "Suspended"),
        }
    }
}

/// A registered marketplace user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub status: UserStatus,
    /// Set for provider accounts
    #[serde(default)]
    pub provider_id: Option<ProviderId>,
    pub joined_at: DateTime<Utc>,
}

impl UserAccount {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
            role,
            status: UserStatus::Active,
            provider_id: None,
            joined_at: Utc::now(),
        }
    }

    /// Link this account to a provider listing
    pub fn for_provider(mut self, provider_id: ProviderId) -> Self {
        self.provider_id = Some(provider_id);
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

impl fmt::Display for UserAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
