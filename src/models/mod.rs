//! Core data models for ServiceHub
//!
//! This module contains the data structures of the marketplace domain:
//! service categories, providers, users, bookings and the booking draft.

pub mod booking;
pub mod category;
pub mod draft;
pub mod ids;
pub mod money;
pub mod provider;
pub mod user;

pub use booking::{Booking, BookingStatus};
pub use category::{DefaultCategory, ServiceCategory};
pub use draft::{Address, BookingDraft, Contact, PaymentMethod, TimeSlot};
pub use ids::{BookingId, CategoryId, ProviderId, UserId};
pub use money::Money;
pub use provider::Provider;
pub use user::{UserAccount, UserRole, UserStatus};
