use super::prelude::*;

/// Predicates that are evaluated after annotation.
///
/// Listings with unknown distance or without a price range
/// are never excluded by the corresponding filter.
pub fn passes_client_filters(item: &AnnotatedListing, filters: &FilterSet) -> bool {
    let within_radius = item
        .distance_km()
        .map_or(true, |km| km <= filters.radius_km);
    let rating = item.listing.rating.unwrap_or(0.0);
    let rated_enough = rating >= filters.min_rating;
    let price_matches = match (filters.price_tier, item.listing.price_range) {
        (Some(tier), Some(range)) => range.tier() == tier,
        _ => true,
    };
    within_radius && rated_enough && price_matches
}

pub fn apply_client_filters(
    items: Vec<AnnotatedListing>,
    filters: &FilterSet,
) -> Vec<AnnotatedListing> {
    items
        .into_iter()
        .filter(|item| passes_client_filters(item, filters))
        .collect()
}

/// Predicates that are pushed down to the backend.
pub fn listing_query(text: &str, postal_code: Option<&str>, filters: &FilterSet) -> ListingQuery {
    let text = text.trim();
    ListingQuery {
        text: (!text.is_empty()).then(|| text.to_string()),
        category: filters
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(ToString::to_string),
        postal_code: postal_code.map(ToString::to_string),
        open_now: filters.open_now,
        limit: None,
    }
}
