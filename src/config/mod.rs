//! Configuration module for ServiceHub
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::HubPaths;
pub use settings::Settings;
