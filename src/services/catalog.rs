//! Catalog service
//!
//! Read-only queries over categories and providers.

use crate::error::{HubError, HubResult};
use crate::models::{Provider, ServiceCategory};

use super::search::SearchQuery;
use super::source::MarketplaceSource;

/// Service for browsing the catalog
pub struct CatalogService<'a> {
    source: &'a dyn MarketplaceSource,
}

impl<'a> CatalogService<'a> {
    pub fn new(source: &'a dyn MarketplaceSource) -> Self {
        Self { source }
    }

    pub fn list_categories(&self) -> HubResult<Vec<ServiceCategory>> {
        self.source.list_categories()
    }

    pub fn list_providers(&self) -> HubResult<Vec<Provider>> {
        self.source.list_providers()
    }

    /// Providers offering `category`, best rated first
    pub fn providers_in_category(&self, category: &str) -> HubResult<Vec<Provider>> {
        let known = self
            .list_categories()?
            .into_iter()
            .find(|c| c.is_named(category))
            .ok_or_else(|| HubError::category_not_found(category))?;

        Ok(SearchQuery::new()
            .in_category(known.name)
            .apply(self.list_providers()?))
    }

    /// Each category with the number of providers listed under it
    pub fn category_counts(&self) -> HubResult<Vec<(ServiceCategory, usize)>> {
        let providers = self.list_providers()?;
        Ok(self
            .list_categories()?
            .into_iter()
            .map(|c| {
                let count = providers
                    .iter()
                    .filter(|p| c.is_named(&p.category))
                    .count();
                (c, count)
            })
            .collect())
    }

    pub fn search(&self, query: &SearchQuery) -> HubResult<Vec<Provider>> {
        Ok(query.apply(self.list_providers()?))
    }

    /// Find a provider by name or display ID
    pub fn find_provider(&self, identifier: &str) -> HubResult<Provider> {
        let identifier = identifier.trim();
        self.list_providers()?
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(identifier) || p.id.matches_short(identifier))
            .ok_or_else(|| HubError::provider_not_found(identifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::source::MemorySource;

    #[test]
    fn test_providers_in_category() {
        let source = MemorySource::sample();
        let catalog = CatalogService::new(&source);

        let plumbers = catalog.providers_in_category("PLUMBING").unwrap();
        assert_eq!(plumbers.len(), 2);
        assert_eq!(plumbers[0].name, "Ace Plumbing");

        assert!(catalog.providers_in_category("Tutoring").unwrap().is_empty());
        assert!(catalog
            .providers_in_category("Astrology")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_category_counts() {
        let source = MemorySource::sample();
        let counts = CatalogService::new(&source).category_counts().unwrap();
        assert_eq!(counts.len(), 8);
        assert_eq!(counts[0].0.name, "Plumbing");
        assert_eq!(counts[0].1, 2);
    }

    #[test]
    fn test_find_provider() {
        let source = MemorySource::sample();
        let catalog = CatalogService::new(&source);
        let spark = catalog.find_provider("spark electric").unwrap();
        assert_eq!(catalog.find_provider(&spark.id.to_string()).unwrap().id, spark.id);
        assert!(catalog.find_provider("Nobody").is_err());
    }
}
