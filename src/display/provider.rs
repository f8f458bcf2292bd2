//! Provider display formatting

use crate::models::Provider;

/// Table of providers in the given order
pub fn format_provider_list(providers: &[Provider]) -> String {
    if providers.is_empty() {
        return "No providers match.".to_string();
    }

    let name_width = providers
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);
    let category_width = providers
        .iter()
        .map(|p| p.category.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {:<category_width$}  {:>8}  {:<11}  {:<10}  {}\n",
        "ID",
        "Name",
        "Category",
        "Rate/h",
        "Rating",
        "City",
        "",
        name_width = name_width,
        category_width = category_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:-<category_width$}  {:->8}  {:-<11}  {:-<10}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
        category_width = category_width,
    ));

    for provider in providers {
        output.push_str(&format!(
            "{:<12}  {:<name_width$}  {:<category_width$}  {:>8}  {} {:.1}  {:<10}  {}\n",
            provider.id.to_string(),
            provider.name,
            provider.category,
            provider.hourly_rate.to_string(),
            provider.stars(),
            provider.rating,
            provider.city,
            if provider.verified { "✔ verified" } else { "" },
            name_width = name_width,
            category_width = category_width,
        ));
    }

    output.push_str(&format!("\n{} provider(s)\n", providers.len()));
    output
}

pub fn format_provider_details(provider: &Provider) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", provider.name));
    output.push_str(&format!("  ID:          {}\n", provider.id));
    output.push_str(&format!("  Category:    {}\n", provider.category));
    output.push_str(&format!("  City:        {}\n", provider.city));
    output.push_str(&format!("  Rate:        {} per hour\n", provider.hourly_rate));
    output.push_str(&format!(
        "  Rating:      {} {:.1} ({} reviews)\n",
        provider.stars(),
        provider.rating,
        provider.review_count
    ));
    output.push_str(&format!(
        "  Experience:  {} year(s)\n",
        provider.years_experience
    ));
    output.push_str(&format!(
        "  Verified:    {}\n",
        if provider.verified { "Yes" } else { "No" }
    ));
    if !provider.bio.is_empty() {
        output.push_str(&format!("\n  {}\n", provider.bio));
    }

    output
}
