use std::cmp::Reverse;

use crate::entities::*;

/// Attributes a result list can be ordered by.
pub trait Ranked {
    fn rating(&self) -> f64;
    fn review_count(&self) -> u32;
    fn created_at(&self) -> Timestamp;
    fn distance_km(&self) -> Option<f64>;
    fn distance_label(&self) -> Option<&str>;
}

impl Ranked for BusinessListing {
    fn rating(&self) -> f64 {
        self.rating.filter(|r| r.is_finite()).unwrap_or(0.0)
    }
    fn review_count(&self) -> u32 {
        self.review_count.unwrap_or(0)
    }
    fn created_at(&self) -> Timestamp {
        self.created_at.unwrap_or_else(Timestamp::epoch)
    }
    fn distance_km(&self) -> Option<f64> {
        None
    }
    fn distance_label(&self) -> Option<&str> {
        None
    }
}

impl Ranked for AnnotatedListing {
    fn rating(&self) -> f64 {
        self.listing.rating()
    }
    fn review_count(&self) -> u32 {
        self.listing.review_count()
    }
    fn created_at(&self) -> Timestamp {
        Ranked::created_at(&self.listing)
    }
    fn distance_km(&self) -> Option<f64> {
        AnnotatedListing::distance_km(self)
    }
    fn distance_label(&self) -> Option<&str> {
        self.distance_label.as_deref()
    }
}

/// The leading numeric token of a label like `"2.4 km away"`.
pub fn leading_number(label: &str) -> Option<f64> {
    let label = label.trim_start();
    let end = label
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || *c == '.' || (*i == 0 && *c == '-')))
        .map_or(label.len(), |(i, _)| i);
    label[..end].parse().ok()
}

fn distance_key<T: Ranked>(x: &T) -> f64 {
    x.distance_km()
        .or_else(|| x.distance_label().and_then(leading_number))
        .filter(|d| !d.is_nan())
        .unwrap_or(f64::INFINITY)
}

/// Returns a sorted copy of `listings`.
///
/// The sort is stable, i.e. ties keep their input order. Without
/// a sort key the listings are returned unchanged.
pub fn sort_listings<T: Ranked + Clone>(listings: &[T], key: Option<SortKey>) -> Vec<T> {
    let mut sorted = listings.to_vec();
    match key {
        Some(SortKey::Rating) => sorted.sort_by(|a, b| b.rating().total_cmp(&a.rating())),
        Some(SortKey::Distance) => {
            sorted.sort_by(|a, b| distance_key(a).total_cmp(&distance_key(b)))
        }
        Some(SortKey::ReviewCount) => sorted.sort_by_key(|x| Reverse(x.review_count())),
        Some(SortKey::Newest) => sorted.sort_by_key(|x| Reverse(x.created_at())),
        None => {}
    }
    sorted
}

/// Like [`sort_listings`] but with a textual key; unknown keys keep the order.
pub fn sort_listings_by<T: Ranked + Clone>(listings: &[T], key: &str) -> Vec<T> {
    sort_listings(listings, SortKey::parse_lossy(key))
}
