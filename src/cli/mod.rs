//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod admin;
pub mod booking;
pub mod catalog;
pub mod ops;
pub mod provider;

pub use admin::{handle_admin_command, AdminCommands};
pub use booking::{current_customer, handle_book_command, handle_booking_command, BookingCommands};
pub use catalog::{handle_catalog_command, CatalogCommands};
pub use ops::{handle_bootstrap_command, handle_deploy_guide, handle_smoke_test};
pub use provider::{handle_provider_command, ProviderCommands};
