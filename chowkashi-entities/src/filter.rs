use strum::{Display, EnumString};

use crate::price::PriceTier;

/// Ordering requested for a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum SortKey {
    #[strum(serialize = "rating")]
    Rating,
    #[strum(serialize = "distance")]
    Distance,
    #[strum(to_string = "reviewCount", serialize = "review_count", serialize = "reviews")]
    ReviewCount,
    #[strum(serialize = "newest")]
    Newest,
}

impl SortKey {
    /// Unknown keys yield `None`, i.e. no reordering.
    pub fn parse_lossy(s: &str) -> Option<Self> {
        s.trim().parse().ok()
    }
}

/// User adjustable search filters. Defaults never exclude anything.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSet {
    pub radius_km: f64,
    pub min_rating: f64,
    pub price_tier: Option<PriceTier>,
    pub open_now: bool,
    pub category: Option<String>,
    pub sort: Option<SortKey>,
}

impl FilterSet {
    pub const DEFAULT_RADIUS_KM: f64 = 50.0;
    pub const DEFAULT_MIN_RATING: f64 = 0.0;
}

impl Default for FilterSet {
    fn default() -> Self {
        Self {
            radius_km: Self::DEFAULT_RADIUS_KM,
            min_rating: Self::DEFAULT_MIN_RATING,
            price_tier: None,
            open_now: false,
            category: None,
            sort: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sort_keys() {
        assert_eq!(SortKey::parse_lossy("rating"), Some(SortKey::Rating));
        assert_eq!(SortKey::parse_lossy(" distance "), Some(SortKey::Distance));
        assert_eq!(SortKey::parse_lossy("reviewCount"), Some(SortKey::ReviewCount));
        assert_eq!(SortKey::parse_lossy("review_count"), Some(SortKey::ReviewCount));
        assert_eq!(SortKey::parse_lossy("newest"), Some(SortKey::Newest));
        assert_eq!(SortKey::parse_lossy("popularity"), None);
        assert_eq!(SortKey::ReviewCount.to_string(), "reviewCount");
    }

    #[test]
    fn default_filters_are_not_restrictive() {
        let f = FilterSet::default();
        assert_eq!(f.radius_km, 50.0);
        assert_eq!(f.min_rating, 0.0);
        assert!(f.price_tier.is_none());
        assert!(!f.open_now);
        assert!(f.category.is_none());
    }
}
