//! Modal dialogs for the TUI

pub mod booking;
pub mod confirm;
pub mod help;
