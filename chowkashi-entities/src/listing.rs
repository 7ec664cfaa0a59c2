use std::str::FromStr;

use strum::{Display, EnumString};

use crate::{address::*, geo::*, id::*, price::*, time::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ListingStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OpeningHours(String);

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OpeningHoursParseError;

impl OpeningHours {
    pub const fn min_len() -> usize {
        4
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for OpeningHours {
    type Err = OpeningHoursParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() < Self::min_len() {
            return Err(OpeningHoursParseError);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl From<OpeningHours> for String {
    fn from(from: OpeningHours) -> Self {
        from.0
    }
}

/// A provider or service record as shown in search results.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessListing {
    pub id: Id,
    pub name: String,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub address: Option<Address>,
    /// Geocoded position, if the provider supplied one.
    pub pos: Option<MapPoint>,
    /// Deep link into a mapping service; may embed coordinates.
    pub map_link: Option<String>,
    pub price_range: Option<PriceRange>,
    pub opening_hours: Option<OpeningHours>,
    pub hidden_gem: bool,
    pub must_visit: bool,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub created_at: Option<Timestamp>,
    pub status: ListingStatus,
}

impl BusinessListing {
    pub fn is_approved(&self) -> bool {
        self.status == ListingStatus::Approved
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.address.as_ref()?.postal_code.as_deref()
    }
}

/// Where the coordinates used for a distance came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSource {
    MapLink,
    Stored,
    Geocoded,
    /// Derived from the identifier: an approximation, not a measurement.
    IdentifierFallback,
}

/// A listing augmented at read time with its distance to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedListing {
    pub listing: BusinessListing,
    pub distance: Option<Distance>,
    pub distance_label: Option<String>,
    pub coordinate_source: Option<CoordinateSource>,
}

impl AnnotatedListing {
    pub fn distance_km(&self) -> Option<f64> {
        self.distance.map(Distance::to_km)
    }
}

impl From<BusinessListing> for AnnotatedListing {
    fn from(listing: BusinessListing) -> Self {
        Self {
            listing,
            distance: None,
            distance_label: None,
            coordinate_source: None,
        }
    }
}
