//! Catalog CLI commands
//!
//! Browse categories and providers, and run provider searches.

use clap::Subcommand;

use crate::display::{format_category_list, format_provider_details, format_provider_list};
use crate::error::HubResult;
use crate::models::Money;
use crate::services::{CatalogService, SearchQuery, SortOrder};
use crate::storage::Storage;

/// Catalog subcommands
#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List service categories with provider counts
    Categories,
    /// List providers, optionally within one category
    Providers {
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Search providers
    Search {
        /// Text matched against name, category, city and bio
        text: Option<String>,
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Minimum rating (0-5)
        #[arg(long)]
        min_rating: Option<f32>,
        /// Maximum hourly rate, e.g. 50 or 49.99
        #[arg(long)]
        max_rate: Option<Money>,
        /// Only verified providers
        #[arg(long)]
        verified: bool,
        /// rating, price-low, price-high, reviews or name
        #[arg(short, long, default_value = "rating")]
        sort: SortOrder,
    },
    /// Show provider details
    Show {
        /// Provider name or ID
        provider: String,
    },
}

/// Handle a catalog command
pub fn handle_catalog_command(storage: &Storage, cmd: CatalogCommands) -> HubResult<()> {
    let catalog = CatalogService::new(storage);

    match cmd {
        CatalogCommands::Categories => {
            println!("{}", format_category_list(&catalog.category_counts()?));
        }

        CatalogCommands::Providers { category } => {
            let providers = match category {
                Some(name) => catalog.providers_in_category(&name)?,
                None => catalog.list_providers()?,
            };
            println!("{}", format_provider_list(&providers));
        }

        CatalogCommands::Search {
            text,
            category,
            min_rating,
            max_rate,
            verified,
            sort,
        } => {
            let query = SearchQuery {
                text: text.unwrap_or_default(),
                category,
                min_rating,
                max_rate,
                verified_only: verified,
                sort,
            };
            let results = catalog.search(&query)?;
            println!("Search: {}", query.describe());
            println!();
            println!("{}", format_provider_list(&results));
        }

        CatalogCommands::Show { provider } => {
            let provider = catalog.find_provider(&provider)?;
            println!("{}", format_provider_details(&provider));
            println!("Book with: servicehub book --provider \"{}\"", provider.name);
        }
    }

    Ok(())
}
