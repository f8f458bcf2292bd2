//! Terminal User Interface module
//!
//! A ratatui front end over the same services the CLI uses: catalog and
//! search views, the booking wizard dialog and the customer, provider and
//! admin dashboards.

pub mod app;
pub mod dashboards;
pub mod dialogs;
pub mod event;
pub mod handler;
pub mod layout;
pub mod terminal;
pub mod views;
pub mod widgets;

pub use app::App;
pub use terminal::run_tui;
