//! ServiceHub - Terminal marketplace for local services
//!
//! This library provides the core functionality for the ServiceHub
//! application: customers browse a catalog of local service providers and
//! book jobs through a five-step wizard, while providers and administrators
//! manage those bookings from their own dashboards.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (providers, bookings, users, drafts, etc.)
//! - `storage`: JSON file storage layer and demo catalog seeding
//! - `services`: Business logic layer and dashboard commands
//! - `wizard`: Booking wizard step machine and line prompt
//! - `activity`: Append-only activity log
//! - `bootstrap`: Backend environment bootstrap (`.env`, upload dirs)
//! - `smoke`: API smoke test
//! - `deploy`: Deployment guide
//! - `cli` / `display`: Command handlers and table formatting
//! - `tui`: Interactive terminal interface
//!
//! # Example
//!
//! ```rust,ignore
//! use servicehub::config::{paths::HubPaths, settings::Settings};
//!
//! let paths = HubPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod activity;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod deploy;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod smoke;
pub mod storage;
pub mod tui;
pub mod wizard;

pub use error::{HubError, HubResult};
