use std::{borrow::Borrow, collections::HashMap, hash::Hash};

use crate::entities::*;

/// A map whose entries expire after a fixed time to live.
///
/// The current time is always passed in explicitly.
#[derive(Debug, Clone)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, (V, Timestamp)>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn get<Q>(&self, key: &Q, now: Timestamp) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries
            .get(key)
            .filter(|(_, inserted_at)| now - *inserted_at < self.ttl)
            .map(|(value, _)| value.clone())
    }

    pub fn insert(&mut self, key: K, value: V, now: Timestamp) {
        self.entries.insert(key, (value, now));
    }

    pub fn purge_expired(&mut self, now: Timestamp) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, (_, inserted_at)| now - *inserted_at < ttl);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn has_moved_significantly(from: MapPoint, to: MapPoint, threshold: Distance) -> bool {
    MapPoint::distance(from, to).is_some_and(|d| d > threshold)
}

/// Caches distances (keyed by coordinate pairs) and geocoding
/// results (keyed by query text) for the current user location.
#[derive(Debug, Clone)]
pub struct LocationCache {
    anchor: Option<MapPoint>,
    moved_threshold: Distance,
    distances: TtlCache<(MapPoint, MapPoint), Distance>,
    geocodes: TtlCache<String, MapPoint>,
}

impl Default for LocationCache {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_TTL,
            Distance::from_km(Self::DEFAULT_MOVED_THRESHOLD_KM),
        )
    }
}

impl LocationCache {
    pub const DEFAULT_TTL: Duration = Duration::minutes(30);
    pub const DEFAULT_MOVED_THRESHOLD_KM: f64 = 5.0;

    pub fn new(ttl: Duration, moved_threshold: Distance) -> Self {
        Self {
            anchor: None,
            moved_threshold,
            distances: TtlCache::new(ttl),
            geocodes: TtlCache::new(ttl),
        }
    }

    pub fn anchor(&self) -> Option<MapPoint> {
        self.anchor
    }

    /// Records the current user location.
    ///
    /// Returns `true` if the location moved further than the
    /// threshold from the previous anchor and all entries were dropped.
    pub fn update_location(&mut self, pos: MapPoint) -> bool {
        let Some(anchor) = self.anchor else {
            self.anchor = Some(pos);
            return false;
        };
        if has_moved_significantly(anchor, pos, self.moved_threshold) {
            log::debug!("Location moved from {anchor} to {pos}: clearing location cache");
            self.clear();
            self.anchor = Some(pos);
            true
        } else {
            false
        }
    }

    /// The cached or freshly computed distance between two points.
    pub fn distance(&mut self, from: MapPoint, to: MapPoint, now: Timestamp) -> Option<Distance> {
        if let Some(d) = self.distances.get(&(from, to), now) {
            return Some(d);
        }
        let d = MapPoint::distance(from, to)?;
        self.distances.insert((from, to), d, now);
        Some(d)
    }

    pub fn geocoded(&self, query: &str, now: Timestamp) -> Option<MapPoint> {
        self.geocodes.get(query, now)
    }

    pub fn insert_geocoded(&mut self, query: String, pos: MapPoint, now: Timestamp) {
        self.geocodes.insert(query, pos, now);
    }

    pub fn purge_expired(&mut self, now: Timestamp) {
        self.distances.purge_expired(now);
        self.geocodes.purge_expired(now);
    }

    pub fn clear(&mut self) {
        self.distances.clear();
        self.geocodes.clear();
    }

    pub fn len(&self) -> usize {
        self.distances.len() + self.geocodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
