//! Service layer for ServiceHub
//!
//! Business logic on top of the storage layer. Read-only services take a
//! `&dyn MarketplaceSource`; services that mutate data take `&Storage`.

pub mod admin;
pub mod booking;
pub mod catalog;
pub mod commands;
pub mod search;
pub mod source;

pub use admin::{AdminService, PlatformStats};
pub use booking::{BookingService, EarningsSummary};
pub use catalog::CatalogService;
pub use commands::MarketplaceCommand;
pub use search::{SearchQuery, SortOrder};
pub use source::MarketplaceSource;
