//! Display formatting for terminal output
//!
//! Formats catalog, booking and admin data as plain-text tables and detail
//! blocks for the CLI.

pub mod admin;
pub mod booking;
pub mod category;
pub mod provider;

pub use admin::{format_activity, format_earnings, format_stats, format_user_table};
pub use booking::{format_booking_details, format_booking_list};
pub use category::format_category_list;
pub use provider::{format_provider_details, format_provider_list};
