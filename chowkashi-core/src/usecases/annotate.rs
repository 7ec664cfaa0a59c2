use super::prelude::*;
use crate::util::map_link::parse_map_link;

pub const FALLBACK_ORIGIN_LAT_DEG: f64 = 12.9716;
pub const FALLBACK_ORIGIN_LNG_DEG: f64 = 77.5946;
const FALLBACK_SPREAD_DEG: f64 = 0.05;

/// A deterministic pseudo position derived from the listing id.
///
/// This is an approximation for listings without any known
/// coordinates and not a measurement: the position is spread
/// within ±0.05° around a fixed origin.
pub fn fallback_position(id: &Id) -> MapPoint {
    let hash = id.stable_hash();
    let unit = |bits: u32| f64::from(bits) / f64::from(u16::MAX) * 2.0 - 1.0;
    MapPoint::from_lat_lng_deg(
        FALLBACK_ORIGIN_LAT_DEG + unit(hash & 0xffff) * FALLBACK_SPREAD_DEG,
        FALLBACK_ORIGIN_LNG_DEG + unit(hash >> 16) * FALLBACK_SPREAD_DEG,
    )
}

/// Coordinates that are known without any lookup.
pub fn known_position(listing: &BusinessListing) -> Option<(MapPoint, CoordinateSource)> {
    if let Some(pos) = listing.map_link.as_deref().and_then(parse_map_link) {
        return Some((pos, CoordinateSource::MapLink));
    }
    listing
        .pos
        .filter(|pos| pos.is_valid())
        .map(|pos| (pos, CoordinateSource::Stored))
}

pub fn listing_position(listing: &BusinessListing) -> (MapPoint, CoordinateSource) {
    known_position(listing).unwrap_or_else(|| {
        (
            fallback_position(&listing.id),
            CoordinateSource::IdentifierFallback,
        )
    })
}

pub fn distance_label(distance: Distance) -> String {
    format!("{:.1} km away", distance.to_km())
}

pub fn annotate_with_position(
    listing: BusinessListing,
    user_pos: MapPoint,
    pos: MapPoint,
    source: CoordinateSource,
) -> AnnotatedListing {
    match MapPoint::distance(user_pos, pos) {
        Some(distance) => AnnotatedListing {
            listing,
            distance: Some(distance),
            distance_label: Some(distance_label(distance)),
            coordinate_source: Some(source),
        },
        None => listing.into(),
    }
}

/// Decorates a listing with its distance to the user.
///
/// Without a (valid) user location the listing is returned
/// without any distance information.
pub fn annotate_listing(listing: BusinessListing, user_pos: Option<MapPoint>) -> AnnotatedListing {
    let Some(user_pos) = user_pos.filter(|pos| pos.is_valid()) else {
        return listing.into();
    };
    let (pos, source) = listing_position(&listing);
    annotate_with_position(listing, user_pos, pos, source)
}

pub fn annotate_listings(
    listings: Vec<BusinessListing>,
    user_pos: Option<MapPoint>,
) -> Vec<AnnotatedListing> {
    listings
        .into_iter()
        .map(|listing| annotate_listing(listing, user_pos))
        .collect()
}
