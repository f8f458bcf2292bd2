//! Provider search: filtering and sort order
//!
//! All filters of a `SearchQuery` combine with AND. Sorting is stable, so
//! providers that tie on the sort key keep their incoming (name) order.

use std::fmt;
use std::str::FromStr;

use crate::models::{Money, Provider};

/// Sort order for search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Highest rating first
    #[default]
    Rating,
    /// Cheapest hourly rate first
    PriceLow,
    /// Most expensive hourly rate first
    PriceHigh,
    /// Most reviews first
    Reviews,
    /// Alphabetical
    Name,
}

impl SortOrder {
    pub fn all() -> &'static [Self] {
        &[
            Self::Rating,
            Self::PriceLow,
            Self::PriceHigh,
            Self::Reviews,
            Self::Name,
        ]
    }

    /// The order after this one, wrapping around (TUI `s` key)
    pub fn next(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|s| *s == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rating => write!(f, "rating"),
            Self::PriceLow => write!(f, "price-low"),
            Self::PriceHigh => write!(f, "price-high"),
            Self::Reviews => write!(f, "reviews"),
            Self::Name => write!(f, "name"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rating" | "top" => Ok(Self::Rating),
            "price-low" | "price_low" | "cheapest" => Ok(Self::PriceLow),
            "price-high" | "price_high" => Ok(Self::PriceHigh),
            "reviews" | "popular" => Ok(Self::Reviews),
            "name" => Ok(Self::Name),
            other => Err(format!(
                "Unknown sort order '{}'. Use rating, price-low, price-high, reviews or name",
                other
            )),
        }
    }
}

/// Filter and sort options for the provider list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    /// Case-insensitive substring of name, category, city or bio
    pub text: String,
    pub category: Option<String>,
    pub min_rating: Option<f32>,
    /// Upper bound on the hourly rate
    pub max_rate: Option<Money>,
    pub verified_only: bool,
    pub sort: SortOrder,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn min_rating(mut self, rating: f32) -> Self {
        self.min_rating = Some(rating);
        self
    }

    pub fn max_rate(mut self, rate: Money) -> Self {
        self.max_rate = Some(rate);
        self
    }

    pub fn verified_only(mut self) -> Self {
        self.verified_only = true;
        self
    }

    pub fn sorted_by(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Whether any filter is set
    pub fn is_filtered(&self) -> bool {
        !self.text.trim().is_empty()
            || self.category.is_some()
            || self.min_rating.is_some()
            || self.max_rate.is_some()
            || self.verified_only
    }

    pub fn matches(&self, provider: &Provider) -> bool {
        let text = self.text.trim().to_lowercase();
        if !text.is_empty() {
            let hit = [
                &provider.name,
                &provider.category,
                &provider.city,
                &provider.bio,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&text));
            if !hit {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if !provider.category.eq_ignore_ascii_case(category.trim()) {
                return false;
            }
        }

        if let Some(min) = self.min_rating {
            if provider.rating < min {
                return false;
            }
        }

        if let Some(max) = self.max_rate {
            if provider.hourly_rate > max {
                return false;
            }
        }

        !self.verified_only || provider.verified
    }

    /// Filter `providers` and sort the survivors
    pub fn apply(&self, providers: Vec<Provider>) -> Vec<Provider> {
        let mut results: Vec<Provider> = providers.into_iter().filter(|p| self.matches(p)).collect();

        match self.sort {
            SortOrder::Rating => results.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            SortOrder::PriceLow => results.sort_by(|a, b| a.hourly_rate.cmp(&b.hourly_rate)),
            SortOrder::PriceHigh => results.sort_by(|a, b| b.hourly_rate.cmp(&a.hourly_rate)),
            SortOrder::Reviews => results.sort_by(|a, b| b.review_count.cmp(&a.review_count)),
            SortOrder::Name => results.sort_by_key(|p| p.name.to_lowercase()),
        }

        results
    }

    /// One-line description for headers, e.g. `"plumb" in Plumbing, >= 4.5★`
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if !self.text.trim().is_empty() {
            parts.push(format!("\"{}\"", self.text.trim()));
        }
        if let Some(category) = &self.category {
            parts.push(format!("in {}", category));
        }
        if let Some(min) = self.min_rating {
            parts.push(format!(">= {:.1}★", min));
        }
        if let Some(max) = self.max_rate {
            parts.push(format!("<= {}/h", max));
        }
        if self.verified_only {
            parts.push("verified".to_string());
        }
        if parts.is_empty() {
            format!("all providers, by {}", self.sort)
        } else {
            format!("{}, by {}", parts.join(", "), self.sort)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::source::{MarketplaceSource, MemorySource};

    fn providers() -> Vec<Provider> {
        MemorySource::sample().list_providers().unwrap()
    }

    fn names(list: &[Provider]) -> Vec<&str> {
        list.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_empty_query_keeps_everyone() {
        let results = SearchQuery::new().apply(providers());
        assert_eq!(results.len(), 4);
        assert!(!SearchQuery::new().is_filtered());
    }

    #[test]
    fn test_text_matches_city_and_bio() {
        let by_city = SearchQuery::new().text("austin").apply(providers());
        assert_eq!(by_city.len(), 2);

        let by_bio = SearchQuery::new().text("ECO").apply(providers());
        assert_eq!(names(&by_bio), vec!["Fresh Maids"]);
    }

    #[test]
    fn test_filters_compose() {
        let query = SearchQuery::new()
            .in_category("plumbing")
            .min_rating(4.5)
            .max_rate(Money::from_units(60));
        assert_eq!(names(&query.apply(providers())), vec!["Ace Plumbing"]);

        let none = SearchQuery::new()
            .in_category("Plumbing")
            .max_rate(Money::from_units(40));
        assert!(none.apply(providers()).is_empty());

        let verified = SearchQuery::new().verified_only().text("a");
        assert!(verified.apply(providers()).iter().all(|p| p.verified));
    }

    #[test]
    fn test_rating_ties_keep_input_order() {
        // Ace Plumbing and Spark Electric are both 4.8
        let results = SearchQuery::new().apply(providers());
        assert_eq!(
            names(&results),
            vec!["Ace Plumbing", "Spark Electric", "Fresh Maids", "DrainPro Services"]
        );
    }

    #[test]
    fn test_price_sorts() {
        let low = SearchQuery::new().sorted_by(SortOrder::PriceLow).apply(providers());
        assert_eq!(low[0].name, "Fresh Maids");
        let high = SearchQuery::new().sorted_by(SortOrder::PriceHigh).apply(providers());
        assert_eq!(high[0].name, "Spark Electric");
    }

    #[test]
    fn test_sort_order_parse_and_cycle() {
        assert_eq!("price-low".parse::<SortOrder>().unwrap(), SortOrder::PriceLow);
        assert!("random".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::Name.next(), SortOrder::Rating);
        assert_eq!(SortOrder::Rating.next(), SortOrder::PriceLow);
    }

    #[test]
    fn test_describe() {
        assert_eq!(SearchQuery::new().describe(), "all providers, by rating");
        let query = SearchQuery::new().text("plumb").verified_only();
        assert_eq!(query.describe(), "\"plumb\", verified, by rating");
    }
}
