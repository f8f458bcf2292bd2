//! Provider CLI commands
//!
//! The provider side of bookings: incoming requests, accepting and
//! completing jobs, and earnings.

use clap::Subcommand;

use crate::display::{format_booking_list, format_earnings};
use crate::error::{HubError, HubResult};
use crate::models::{BookingStatus, Provider};
use crate::services::{BookingService, CatalogService, EarningsSummary, MarketplaceCommand};
use crate::storage::Storage;

/// Provider subcommands
#[derive(Subcommand)]
pub enum ProviderCommands {
    /// Pending booking requests for a provider
    Requests {
        /// Provider name or ID
        provider: String,
    },
    /// Accept a pending booking
    Accept {
        /// Booking ID
        booking: String,
    },
    /// Mark a confirmed booking as completed
    Complete {
        /// Booking ID
        booking: String,
    },
    /// Earnings and workload summary
    Earnings {
        /// Provider name or ID
        provider: String,
    },
}

/// Handle a provider command
pub fn handle_provider_command(storage: &Storage, cmd: ProviderCommands) -> HubResult<()> {
    let catalog = CatalogService::new(storage);
    let bookings = BookingService::new(storage);

    match cmd {
        ProviderCommands::Requests { provider } => {
            let provider = catalog.find_provider(&provider)?;
            let requests: Vec<_> = bookings
                .list_for_provider(provider.id)?
                .into_iter()
                .filter(|b| b.status == BookingStatus::Pending)
                .collect();
            println!("Pending requests for {}", provider.name);
            println!();
            println!("{}", format_booking_list(&requests, &[provider]));
        }

        ProviderCommands::Accept { booking } => {
            let booking = bookings.find(&booking)?;
            let actor = assigned_provider(storage, booking.provider_id)?;
            let message =
                MarketplaceCommand::AcceptBooking(booking.id).execute(storage, &actor.name)?;
            println!("{}", message);
        }

        ProviderCommands::Complete { booking } => {
            let booking = bookings.find(&booking)?;
            let actor = assigned_provider(storage, booking.provider_id)?;
            let message =
                MarketplaceCommand::CompleteBooking(booking.id).execute(storage, &actor.name)?;
            println!("{}", message);
        }

        ProviderCommands::Earnings { provider } => {
            let provider = catalog.find_provider(&provider)?;
            let summary = EarningsSummary::from_bookings(&storage.bookings.get_all()?, provider.id);
            println!("{}", format_earnings(&provider, &summary));
        }
    }

    Ok(())
}

/// Bookings without a provider cannot be accepted or completed
fn assigned_provider(
    storage: &Storage,
    provider_id: Option<crate::models::ProviderId>,
) -> HubResult<Provider> {
    let id = provider_id
        .ok_or_else(|| HubError::Validation("Booking has no provider assigned".into()))?;
    storage
        .providers
        .get(id)?
        .ok_or_else(|| HubError::provider_not_found(id.to_string()))
}
