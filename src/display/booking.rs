//! Booking display formatting

use crate::models::{Booking, Provider};

fn provider_name(booking: &Booking, providers: &[Provider]) -> String {
    booking
        .provider_id
        .and_then(|id| providers.iter().find(|p| p.id == id))
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "(any provider)".to_string())
}

/// Table of bookings; provider names are looked up in `providers`
pub fn format_booking_list(bookings: &[Booking], providers: &[Provider]) -> String {
    if bookings.is_empty() {
        return "No bookings found.".to_string();
    }

    let names: Vec<String> = bookings
        .iter()
        .map(|b| provider_name(b, providers))
        .collect();
    let provider_width = names.iter().map(|n| n.chars().count()).max().unwrap_or(8).max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<11}  {:<provider_width$}  {:<18}  {:>9}  {}\n",
        "ID",
        "Date",
        "Time",
        "Provider",
        "Category",
        "Estimate",
        "Status",
        provider_width = provider_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<10}  {:-<11}  {:-<provider_width$}  {:-<18}  {:->9}  {:-<9}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        provider_width = provider_width,
    ));

    for (booking, name) in bookings.iter().zip(&names) {
        output.push_str(&format!(
            "{:<12}  {:<10}  {:<11}  {:<provider_width$}  {:<18}  {:>9}  {}\n",
            booking.id.to_string(),
            booking
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".into()),
            booking
                .time_slot
                .map(|t| t.label().to_string())
                .unwrap_or_else(|| "-".into()),
            name,
            booking.category.as_deref().unwrap_or("-"),
            booking.estimated_price.to_string(),
            booking.status,
            provider_width = provider_width,
        ));
    }

    output
}

pub fn format_booking_details(booking: &Booking, provider: Option<&Provider>) -> String {
    let mut output = String::new();

    output.push_str(&format!("Booking {}\n", booking.id));
    output.push_str(&format!("  Status:       {}\n", booking.status));
    output.push_str(&format!(
        "  Provider:     {}\n",
        provider
            .map(|p| p.name.as_str())
            .unwrap_or("(any provider)")
    ));
    output.push_str(&format!("  Estimate:     {}\n", booking.estimated_price));
    output.push_str(&format!(
        "  Created:      {}\n",
        booking.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    let draft_lines = [
        ("Category", booking.category.clone().unwrap_or_default()),
        ("Description", booking.description.clone()),
        ("Coupon", booking.coupon_code.clone().unwrap_or_default()),
        (
            "Date",
            booking
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        ),
        (
            "Time",
            booking
                .time_slot
                .map(|t| t.label().to_string())
                .unwrap_or_default(),
        ),
        ("Street", booking.address.street.clone()),
        ("City", booking.address.city.clone()),
        ("Postal code", booking.address.postal_code.clone()),
        ("Instructions", booking.address.instructions.clone()),
        ("Contact", booking.contact.name.clone()),
        ("Phone", booking.contact.phone.clone()),
        ("Email", booking.contact.email.clone()),
        (
            "Payment",
            booking
                .payment_method
                .map(|p| p.label().to_string())
                .unwrap_or_default(),
        ),
    ];

    for (label, value) in draft_lines {
        if !value.trim().is_empty() {
            output.push_str(&format!("  {:<13} {}\n", format!("{}:", label), value));
        }
    }

    output
}
