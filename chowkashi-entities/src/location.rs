use crate::geo::MapPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    Device,
    Geocoded,
}

/// The user's current position together with a display label.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub pos: MapPoint,
    pub label: String,
    pub source: LocationSource,
}

impl ResolvedLocation {
    pub const NEAR_ME_LABEL: &'static str = "Near me";

    pub fn near_me(pos: MapPoint) -> Self {
        Self {
            pos,
            label: Self::NEAR_ME_LABEL.to_string(),
            source: LocationSource::Device,
        }
    }

    pub fn geocoded(pos: MapPoint, label: impl Into<String>) -> Self {
        Self {
            pos,
            label: label.into(),
            source: LocationSource::Geocoded,
        }
    }
}
