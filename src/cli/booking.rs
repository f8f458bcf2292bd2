//! Booking CLI commands
//!
//! `book` runs the interactive five-step wizard; `bookings` lists and manages
//! the current customer's bookings.

use std::io;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_booking_details, format_booking_list};
use crate::error::{HubError, HubResult};
use crate::models::{BookingStatus, Money, UserAccount};
use crate::services::{BookingService, CatalogService, MarketplaceCommand};
use crate::storage::Storage;
use crate::wizard::{BookingPrompt, BookingWizard, PromptOutcome};

/// Booking subcommands
#[derive(Subcommand)]
pub enum BookingCommands {
    /// List your bookings
    List {
        /// Include completed and cancelled bookings
        #[arg(short, long)]
        all: bool,
    },
    /// Show booking details
    Show {
        /// Booking ID (e.g. bkg-1a2b3c4d)
        booking: String,
    },
    /// Cancel a pending or confirmed booking
    Cancel {
        /// Booking ID
        booking: String,
    },
}

/// The customer account named by `current_user_email` in settings
pub fn current_customer(storage: &Storage, settings: &Settings) -> HubResult<UserAccount> {
    storage
        .users
        .get_by_email(&settings.current_user_email)?
        .ok_or_else(|| HubError::user_not_found(&settings.current_user_email))
}

/// Run the interactive booking wizard on stdin/stdout
pub fn handle_book_command(
    storage: &Storage,
    settings: &Settings,
    provider: Option<String>,
) -> HubResult<()> {
    let customer = current_customer(storage, settings)?;
    let catalog = CatalogService::new(storage);
    let service = BookingService::new(storage);

    let mut wizard = match provider {
        Some(identifier) => {
            let provider = catalog.find_provider(&identifier)?;
            println!("Booking {} ({})", provider.name, provider.category);
            BookingWizard::for_provider(provider.id, provider.category)
        }
        None => BookingWizard::new(),
    };

    let categories = catalog
        .list_categories()?
        .into_iter()
        .map(|c| c.name)
        .collect();

    let stdin = io::stdin();
    let mut prompt = BookingPrompt::new(stdin.lock(), io::stdout(), categories);
    let outcome = prompt.run(&mut wizard, |draft| {
        service.estimate(draft).unwrap_or_else(|_| Money::zero())
    })?;

    match outcome {
        PromptOutcome::Confirmed(confirmed) => {
            let booking = service.submit(confirmed.draft, &customer)?;
            println!();
            println!("Booking {} submitted: {}", booking.id, booking.headline());
            println!("Status: {}. The provider will confirm shortly.", booking.status);
        }
        PromptOutcome::Cancelled => println!("No booking was made."),
    }

    Ok(())
}

/// Handle a bookings command
pub fn handle_booking_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BookingCommands,
) -> HubResult<()> {
    let customer = current_customer(storage, settings)?;
    let service = BookingService::new(storage);
    let providers = storage.providers.get_all()?;

    match cmd {
        BookingCommands::List { all } => {
            let bookings: Vec<_> = service
                .list_for_customer(customer.id)?
                .into_iter()
                .filter(|b| all || b.status.is_open())
                .collect();
            println!("Bookings for {}", customer);
            println!();
            println!("{}", format_booking_list(&bookings, &providers));
        }

        BookingCommands::Show { booking } => {
            let booking = service.find(&booking)?;
            let provider = booking
                .provider_id
                .and_then(|id| providers.iter().find(|p| p.id == id));
            println!("{}", format_booking_details(&booking, provider));
        }

        BookingCommands::Cancel { booking } => {
            let booking = service.find(&booking)?;
            if booking.customer_id != customer.id {
                return Err(HubError::Validation(format!(
                    "Booking {} belongs to another customer",
                    booking.id
                )));
            }
            if booking.status == BookingStatus::Cancelled {
                println!("Booking {} is already cancelled.", booking.id);
                return Ok(());
            }
            let message =
                MarketplaceCommand::CancelBooking(booking.id).execute(storage, &customer.name)?;
            println!("{}", message);
        }
    }

    Ok(())
}
