//! Storage initialization
//!
//! Handles first-run setup: writes a demo catalog (categories, providers,
//! users and a handful of bookings) for every data file that is absent.

use chrono::{Duration, Local};

use crate::config::paths::HubPaths;
use crate::error::HubError;
use crate::models::{
    Address, Booking, BookingDraft, BookingStatus, Contact, DefaultCategory, Money, PaymentMethod,
    Provider, TimeSlot, UserAccount, UserRole,
};

use super::bookings::BookingData;
use super::categories::CategoryData;
use super::file_io::write_json_if_absent;
use super::providers::ProviderData;
use super::users::UserData;

/// E-mail of the seeded customer the CLI and TUI act as by default
pub const DEMO_CUSTOMER_EMAIL: &str = "jordan@example.com";

/// E-mail of the seeded administrator
pub const DEMO_ADMIN_EMAIL: &str = "admin@servicehub.local";

/// Initialize storage for a fresh installation
///
/// Returns the number of data files that were written. Existing files are
/// never touched.
pub fn initialize_storage(paths: &HubPaths) -> Result<usize, HubError> {
    paths.ensure_directories()?;

    let seed = SeedCatalog::build();
    let mut written = 0;

    if write_json_if_absent(
        paths.categories_file(),
        &CategoryData {
            categories: seed.categories,
        },
    )? {
        written += 1;
    }
    if write_json_if_absent(
        paths.providers_file(),
        &ProviderData {
            providers: seed.providers,
        },
    )? {
        written += 1;
    }
    if write_json_if_absent(paths.users_file(), &UserData { users: seed.users })? {
        written += 1;
    }
    if write_json_if_absent(
        paths.bookings_file(),
        &BookingData {
            bookings: seed.bookings,
        },
    )? {
        written += 1;
    }

    if written > 0 {
        tracing::info!(files = written, dir = %paths.data_dir().display(), "seeded demo catalog");
    }

    Ok(written)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &HubPaths) -> bool {
    [
        paths.categories_file(),
        paths.providers_file(),
        paths.users_file(),
        paths.bookings_file(),
    ]
    .iter()
    .any(|p| !p.exists())
}

struct SeedCatalog {
    categories: Vec<crate::models::ServiceCategory>,
    providers: Vec<Provider>,
    users: Vec<UserAccount>,
    bookings: Vec<Booking>,
}

impl SeedCatalog {
    fn build() -> Self {
        let categories = DefaultCategory::all()
            .iter()
            .enumerate()
            .map(|(i, c)| c.to_category(i as i32))
            .collect();

        let providers = vec![
            Provider::new("Ace Plumbing", "Plumbing", Money::from_units(55), "Austin")
                .with_rating(4.8, 132)
                .with_bio(12, "Licensed plumber for leaks, heaters and remodels")
                .verified(),
            Provider::new("DrainPro Services", "Plumbing", Money::from_units(45), "Dallas")
                .with_rating(4.3, 58)
                .with_bio(6, "Drain cleaning and camera inspections"),
            Provider::new("Spark Electric", "Electrical", Money::from_units(70), "Denver")
                .with_rating(4.9, 210)
                .with_bio(15, "Panel upgrades, EV chargers and lighting")
                .verified(),
            Provider::new("BrightWire Co", "Electrical", Money::from_units(60), "Austin")
                .with_rating(4.1, 37)
                .with_bio(4, "Residential wiring and fixture installs"),
            Provider::new("Fresh Maids", "Cleaning", Money::from_units(35), "Austin")
                .with_rating(4.7, 318)
                .with_bio(8, "Recurring home cleaning with eco products")
                .verified(),
            Provider::new("Spotless Move-Out", "Cleaning", Money::from_units(40), "Houston")
                .with_rating(4.4, 91)
                .with_bio(5, "Deep cleans for move-in and move-out"),
            Provider::new("Feast & Co", "Catering & Events", Money::from_units(85), "Dallas")
                .with_rating(4.6, 74)
                .with_bio(10, "Full-service catering for up to 300 guests")
                .verified(),
            Provider::new("Glow Studio", "Beauty & Wellness", Money::from_units(50), "Houston")
                .with_rating(4.9, 156)
                .with_bio(7, "Bridal makeup and at-home hair styling")
                .verified(),
            Provider::new("Handy Hank", "Home Repair", Money::from_units(48), "Denver")
                .with_rating(4.5, 122)
                .with_bio(20, "Carpentry, drywall and odd jobs"),
            Provider::new("Two Guys Moving", "Moving & Delivery", Money::from_units(65), "Austin")
                .with_rating(4.2, 204)
                .with_bio(9, "Local moves with truck and two movers")
                .verified(),
            Provider::new("MathMentor", "Tutoring", Money::from_units(30), "Remote")
                .with_rating(5.0, 44)
                .with_bio(3, "Algebra through calculus, test prep"),
            Provider::new("Lingua Lessons", "Tutoring", Money::from_units(30), "Houston")
                .with_rating(4.6, 63)
                .with_bio(11, "Spanish and French for all levels")
                .verified(),
        ];

        let jordan = UserAccount::new("Jordan Lee", DEMO_CUSTOMER_EMAIL, UserRole::Customer);
        let mut users = vec![
            jordan.clone(),
            UserAccount::new("Priya Shah", "priya@example.com", UserRole::Customer),
            UserAccount::new("Sam Ortiz", "sam@example.com", UserRole::Customer),
            UserAccount::new("Admin", DEMO_ADMIN_EMAIL, UserRole::Admin),
        ];
        for provider in providers.iter().take(4) {
            let email = format!(
                "{}@pros.example.com",
                provider.name.to_lowercase().replace(&[' ', '&'][..], "")
            );
            users.push(
                UserAccount::new(provider.name.clone(), email, UserRole::Provider)
                    .for_provider(provider.id),
            );
        }

        let today = Local::now().date_naive();
        let contact = Contact {
            name: jordan.name.clone(),
            phone: "555-0100".into(),
            email: jordan.email.clone(),
        };
        let address = Address {
            street: "12 Oak Street".into(),
            city: "Austin".into(),
            postal_code: "78701".into(),
            instructions: String::new(),
        };

        let mut bookings = Vec::new();
        let plans = [
            (0usize, 3i64, TimeSlot::LateMorning, "Kitchen sink leak", BookingStatus::Pending),
            (2, 7, TimeSlot::Afternoon, "Install EV charger", BookingStatus::Confirmed),
            (4, -10, TimeSlot::EarlyMorning, "Deep clean before guests", BookingStatus::Completed),
            (1, -4, TimeSlot::Midday, "Slow shower drain", BookingStatus::Cancelled),
        ];
        for (provider_idx, offset, slot, description, status) in plans {
            let provider = &providers[provider_idx];
            let draft = BookingDraft {
                category: Some(provider.category.clone()),
                provider_id: Some(provider.id),
                description: description.into(),
                coupon_code: None,
                date: Some(today + Duration::days(offset)),
                time_slot: Some(slot),
                address: address.clone(),
                contact: contact.clone(),
                payment_method: Some(PaymentMethod::GatewayA),
            };
            let price = provider.hourly_rate.times(slot.hours());
            let mut booking = Booking::from_draft(draft, jordan.id, price);
            booking.status = status;
            bookings.push(booking);
        }

        Self {
            categories,
            providers,
            users,
            bookings,
        }
    }
}
