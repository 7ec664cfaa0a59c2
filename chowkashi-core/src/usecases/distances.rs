use std::collections::HashMap;

use futures::future::join_all;

use super::{
    annotate::{fallback_position, known_position},
    prelude::*,
};
use crate::cache::LocationCache;

/// Resolves the position of every listing and computes its distance to `user_pos`.
///
/// Addresses without cached coordinates are geocoded concurrently and
/// the result is only returned after all lookups have settled. Listings
/// that cannot be located get their fallback position, so the returned
/// map is complete for valid user positions.
pub async fn compute_distances<G>(
    listings: &[BusinessListing],
    user_pos: MapPoint,
    geocoder: &G,
    cache: &mut LocationCache,
    now: Timestamp,
) -> HashMap<Id, Distance>
where
    G: GeoCodingGateway,
{
    let mut distances = HashMap::with_capacity(listings.len());
    if !user_pos.is_valid() {
        return distances;
    }
    cache.update_location(user_pos);
    cache.purge_expired(now);

    let mut pending = Vec::new();
    for listing in listings {
        let pos = if let Some((pos, _)) = known_position(listing) {
            pos
        } else if let Some(query) = listing
            .address
            .as_ref()
            .map(Address::to_query_string)
            .filter(|q| !q.is_empty())
        {
            match cache.geocoded(&query, now) {
                Some(pos) => pos,
                None => {
                    pending.push((listing, query));
                    continue;
                }
            }
        } else {
            fallback_position(&listing.id)
        };
        if let Some(d) = cache.distance(user_pos, pos, now) {
            distances.insert(listing.id.clone(), d);
        }
    }

    if !pending.is_empty() {
        log::debug!("Geocoding {} listing addresses", pending.len());
    }
    let lookups = pending
        .iter()
        .map(|(_, query)| geocoder.resolve_text(query));
    let resolved = join_all(lookups).await;

    for ((listing, query), pos) in pending.into_iter().zip(resolved) {
        let pos = match pos {
            Some(pos) => {
                cache.insert_geocoded(query, pos, now);
                pos
            }
            None => {
                log::debug!("No coordinates for listing {}", listing.id);
                fallback_position(&listing.id)
            }
        };
        if let Some(d) = cache.distance(user_pos, pos, now) {
            distances.insert(listing.id.clone(), d);
        }
    }
    distances
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use chowkashi_entities::builders::*;
    use futures::executor::block_on;

    fn user() -> MapPoint {
        MapPoint::from_lat_lng_deg(12.9716, 77.5946)
    }

    fn listings() -> Vec<BusinessListing> {
        vec![
            BusinessListing::build()
                .id("linked")
                .map_link("https://maps.google.com/?q=12.9816,77.6046")
                .finish(),
            BusinessListing::build()
                .id("addressed")
                .address(Address::build().area("Indiranagar").city("Bengaluru").finish())
                .finish(),
            BusinessListing::build()
                .id("unknown-address")
                .address(Address::build().street("Nowhere Lane").finish())
                .finish(),
            BusinessListing::build().id("bare").finish(),
        ]
    }

    #[test]
    fn complete_distance_map() {
        let db = MockDb::default();
        let indiranagar = MapPoint::from_lat_lng_deg(12.9784, 77.6408);
        db.geocodes
            .lock()
            .unwrap()
            .insert("Indiranagar, Bengaluru".into(), indiranagar);
        let mut cache = LocationCache::default();
        let listings = listings();
        let distances = block_on(compute_distances(
            &listings,
            user(),
            &db,
            &mut cache,
            Timestamp::now(),
        ));
        assert_eq!(distances.len(), listings.len());
        assert_eq!(
            distances[&Id::from("addressed")],
            MapPoint::distance(user(), indiranagar).unwrap()
        );
        assert_eq!(
            distances[&Id::from("bare")],
            MapPoint::distance(user(), fallback_position(&"bare".into())).unwrap()
        );
        assert_eq!(db.geocode_requests.lock().unwrap().len(), 2);
    }

    #[test]
    fn geocoding_results_are_cached() {
        let db = MockDb::default();
        db.geocodes.lock().unwrap().insert(
            "Indiranagar, Bengaluru".into(),
            MapPoint::from_lat_lng_deg(12.9784, 77.6408),
        );
        let mut cache = LocationCache::default();
        let listings = listings();
        let now = Timestamp::now();
        let first = block_on(compute_distances(&listings, user(), &db, &mut cache, now));
        let second = block_on(compute_distances(&listings, user(), &db, &mut cache, now));
        assert_eq!(first, second);
        // only the unresolvable address is looked up again
        assert_eq!(db.geocode_requests.lock().unwrap().len(), 3);
    }

    #[test]
    fn invalid_user_position() {
        let db = MockDb::default();
        let mut cache = LocationCache::default();
        let distances = block_on(compute_distances(
            &listings(),
            MapPoint::default(),
            &db,
            &mut cache,
            Timestamp::now(),
        ));
        assert!(distances.is_empty());
    }

    #[test]
    fn expired_entries_are_removed() {
        let db = MockDb::default();
        db.geocodes.lock().unwrap().insert(
            "Indiranagar, Bengaluru".into(),
            MapPoint::from_lat_lng_deg(12.9784, 77.6408),
        );
        let mut cache = LocationCache::default();
        let start = Timestamp::try_from_secs(1_700_000_000).unwrap();
        block_on(compute_distances(&listings(), user(), &db, &mut cache, start));
        let filled = cache.len();
        assert!(filled > 0);

        let later = start + LocationCache::DEFAULT_TTL + Duration::minutes(1);
        let linked = &listings()[..1];
        block_on(compute_distances(linked, user(), &db, &mut cache, later));
        // only the fresh distance of the linked listing is left
        assert_eq!(cache.len(), 1);
        assert!(cache.len() < filled);
    }
}
