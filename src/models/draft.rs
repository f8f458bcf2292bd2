//! Booking draft model
//!
//! The draft is the in-progress booking accumulated across wizard steps. It has
//! no identity until it is submitted and every field may be empty; the wizard
//! never blocks on missing fields, it only reports them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::ProviderId;

/// How the customer intends to pay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Card payments through the first payment gateway
    GatewayA,
    /// Bank and UPI transfers through the second payment gateway
    GatewayB,
    /// In-app wallet balance
    Wallet,
}

impl PaymentMethod {
    pub fn all() -> &'static [Self] {
        &[Self::GatewayA, Self::GatewayB, Self::Wallet]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::GatewayA => "Gateway A (card)",
            Self::GatewayB => "Gateway B (bank transfer)",
            Self::Wallet => "Wallet",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(&['-', '_', ' '][..], "").as_str() {
            "gatewaya" | "a" | "card" => Ok(Self::GatewayA),
            "gatewayb" | "b" | "bank" => Ok(Self::GatewayB),
            "wallet" | "w" => Ok(Self::Wallet),
            other => Err(format!("Unknown payment method: {}", other)),
        }
    }
}

/// Fixed two-hour appointment windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "08:00-10:00")]
    EarlyMorning,
    #[serde(rename = "10:00-12:00")]
    LateMorning,
    #[serde(rename = "12:00-14:00")]
    Midday,
    #[serde(rename = "14:00-16:00")]
    Afternoon,
    #[serde(rename = "16:00-18:00")]
    LateAfternoon,
    #[serde(rename = "18:00-20:00")]
    Evening,
}

impl TimeSlot {
    pub fn all() -> &'static [Self] {
        &[
            Self::EarlyMorning,
            Self::LateMorning,
            Self::Midday,
            Self::Afternoon,
            Self::LateAfternoon,
            Self::Evening,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::EarlyMorning => "08:00-10:00",
            Self::LateMorning => "10:00-12:00",
            Self::Midday => "12:00-14:00",
            Self::Afternoon => "14:00-16:00",
            Self::LateAfternoon => "16:00-18:00",
            Self::Evening => "18:00-20:00",
        }
    }

    /// Every slot is two hours long
    pub const fn hours(&self) -> u32 {
        2
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TimeSlot {
    type Err = String;

    /// Accepts the full label ("10:00-12:00"), its start time ("10:00")
    /// or a 1-based index into [`TimeSlot::all`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            if let Some(slot) = index.checked_sub(1).and_then(|i| Self::all().get(i)) {
                return Ok(*slot);
            }
        }
        Self::all()
            .iter()
            .find(|slot| slot.label() == s || slot.label().starts_with(&format!("{}-", s)))
            .copied()
            .ok_or_else(|| format!("Unknown time slot: {}", s))
    }
}

/// Where the job takes place
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    /// Gate codes, parking notes and similar
    pub instructions: String,
}

/// Who the provider should contact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// The in-progress booking record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub category: Option<String>,
    pub provider_id: Option<ProviderId>,
    pub description: String,
    pub coupon_code: Option<String>,
    pub date: Option<NaiveDate>,
    pub time_slot: Option<TimeSlot>,
    pub address: Address,
    pub contact: Contact,
    pub payment_method: Option<PaymentMethod>,
}

impl BookingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field has been written
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Recommended fields that are still unset, in wizard order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.category.is_none() {
            missing.push("category");
        }
        if self.date.is_none() {
            missing.push("date");
        }
        if self.time_slot.is_none() {
            missing.push("time slot");
        }
        if self.address.street.trim().is_empty() {
            missing.push("street");
        }
        if self.address.city.trim().is_empty() {
            missing.push("city");
        }
        if self.contact.name.trim().is_empty() {
            missing.push("contact name");
        }
        if self.contact.phone.trim().is_empty() && self.contact.email.trim().is_empty() {
            missing.push("phone or email");
        }
        if self.payment_method.is_none() {
            missing.push("payment method");
        }
        missing
    }

    /// Label/value pairs for the read-only confirmation summary
    pub fn summary_lines(&self) -> Vec<(&'static str, String)> {
        fn or_dash(value: &str) -> String {
            if value.trim().is_empty() {
                "-".to_string()
            } else {
                value.to_string()
            }
        }

        vec![
            ("Category", self.category.clone().unwrap_or_else(|| "-".into())),
            ("Description", or_dash(&self.description)),
            ("Coupon", self.coupon_code.clone().unwrap_or_else(|| "-".into())),
            (
                "Date",
                self.date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".into()),
            ),
            (
                "Time",
                self.time_slot
                    .map(|t| t.label().to_string())
                    .unwrap_or_else(|| "-".into()),
            ),
            ("Street", or_dash(&self.address.street)),
            ("City", or_dash(&self.address.city)),
            ("Postal code", or_dash(&self.address.postal_code)),
            ("Instructions", or_dash(&self.address.instructions)),
            ("Contact", or_dash(&self.contact.name)),
            ("Phone", or_dash(&self.contact.phone)),
            ("Email", or_dash(&self.contact.email)),
            (
                "Payment",
                self.payment_method
                    .map(|p| p.label().to_string())
                    .unwrap_or_else(|| "-".into()),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_slot_parsing() {
        assert_eq!("10:00-12:00".parse::<TimeSlot>().unwrap(), TimeSlot::LateMorning);
        assert_eq!("14:00".parse::<TimeSlot>().unwrap(), TimeSlot::Afternoon);
        assert_eq!("1".parse::<TimeSlot>().unwrap(), TimeSlot::EarlyMorning);
        assert_eq!("6".parse::<TimeSlot>().unwrap(), TimeSlot::Evening);
        assert!("7".parse::<TimeSlot>().is_err());
        assert!("09:00".parse::<TimeSlot>().is_err());
    }

    #[test]
    fn test_time_slot_serializes_as_label() {
        let json = serde_json::to_string(&TimeSlot::Midday).unwrap();
        assert_eq!(json, "\"12:00-14:00\"");
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("gateway-a".parse::<PaymentMethod>().unwrap(), PaymentMethod::GatewayA);
        assert_eq!("Gateway B".parse::<PaymentMethod>().unwrap(), PaymentMethod::GatewayB);
        assert_eq!("wallet".parse::<PaymentMethod>().unwrap(), PaymentMethod::Wallet);
        assert!("cash".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_empty_draft_reports_everything_missing() {
        let draft = BookingDraft::new();
        assert!(draft.is_empty());
        let missing = draft.missing_fields();
        assert_eq!(missing.first(), Some(&"category"));
        assert!(missing.contains(&"payment method"));
    }

    #[test]
    fn test_summary_shows_written_fields() {
        let mut draft = BookingDraft::new();
        draft.category = Some("Plumbing".into());
        draft.date = NaiveDate::from_ymd_opt(2025, 8, 1);
        assert!(!draft.is_empty());

        let summary = draft.summary_lines();
        assert!(summary.contains(&("Category", "Plumbing".to_string())));
        assert!(summary.contains(&("Date", "2025-08-01".to_string())));
        assert!(summary.contains(&("Time", "-".to_string())));
    }
}
