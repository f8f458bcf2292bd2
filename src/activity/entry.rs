//! Activity entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    BookingCreated,
    BookingAccepted,
    BookingCompleted,
    BookingCancelled,
    ProviderVerified,
    UserSuspended,
    UserReinstated,
    CatalogSeeded,
}

impl ActivityKind {
    /// Whether the subject of this event is a booking
    pub fn is_booking(&self) -> bool {
        matches!(
            self,
            Self::BookingCreated
                | Self::BookingAccepted
                | Self::BookingCompleted
                | Self::BookingCancelled
        )
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityKind::BookingCreated => write!(f, "BOOKED"),
            ActivityKind::BookingAccepted => write!(f, "ACCEPTED"),
            ActivityKind::BookingCompleted => write!(f, "COMPLETED"),
            ActivityKind::BookingCancelled => write!(f, "CANCELLED"),
            ActivityKind::ProviderVerified => write!(f, "VERIFIED"),
            ActivityKind::UserSuspended => write!(f, "SUSPENDED"),
            ActivityKind::UserReinstated => write!(f, "REINSTATED"),
            ActivityKind::CatalogSeeded => write!(f, "SEEDED"),
        }
    }
}

/// A single activity log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// When the event occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub kind: ActivityKind,

    /// Display ID of the affected entity ("bkg-1a2b3c4d", "pro-...", "usr-...")
    pub subject_id: String,

    /// Human-readable label of the subject
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_name: Option<String>,

    /// Who triggered it, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,

    /// Free-form detail, e.g. "Pending -> Confirmed"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ActivityEntry {
    pub fn new(kind: ActivityKind, subject_id: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            subject_id: subject_id.into(),
            subject_name: None,
            actor: None,
            detail: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.subject_name = Some(name.into());
        self
    }

    pub fn by(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Format the entry for the activity feed
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.kind,
            self.subject_id
        );

        if let Some(name) = &self.subject_name {
            output.push_str(&format!(" ({})", name));
        }
        if let Some(actor) = &self.actor {
            output.push_str(&format!(" by {}", actor));
        }
        if let Some(detail) = &self.detail {
            output.push_str(&format!(": {}", detail));
        }

        output
    }
}
