//! Wire records of the backend and their normalization into entities.
//!
//! Every field of a record is optional. Records are normalized exactly
//! once, when they are converted into the corresponding entity.

use chowkashi_core::entities::*;
use serde::{Deserialize, Serialize};

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn parse_timestamp(s: Option<&str>) -> Option<Timestamp> {
    let s = s?;
    s.parse()
        .map_err(|err| log::debug!("Ignoring invalid timestamp '{s}': {err}"))
        .ok()
}

fn rating_value(value: Option<i64>) -> Option<RatingValue> {
    value
        .and_then(|v| u8::try_from(v).ok())
        .map(RatingValue::from)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListingRecord {
    pub id: String,
    #[serde(alias = "business_name", alias = "businessName")]
    pub name: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    #[serde(alias = "address")]
    pub street: Option<String>,
    pub area: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    #[serde(alias = "postalCode", alias = "pincode")]
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(alias = "mapLink", alias = "map_url")]
    pub map_link: Option<String>,
    #[serde(alias = "priceRange")]
    pub price_range: Option<String>,
    #[serde(alias = "openingHours", alias = "hours")]
    pub opening_hours: Option<String>,
    #[serde(alias = "hiddenGem")]
    pub hidden_gem: Option<bool>,
    #[serde(alias = "mustVisit")]
    pub must_visit: Option<bool>,
    pub rating: Option<f64>,
    #[serde(alias = "reviewCount", alias = "reviews_count")]
    pub review_count: Option<u32>,
    #[serde(alias = "createdAt")]
    pub created_at: Option<String>,
    #[serde(alias = "approval_status")]
    pub status: Option<String>,
}

impl From<ListingRecord> for BusinessListing {
    fn from(from: ListingRecord) -> Self {
        let ListingRecord {
            id,
            name,
            category,
            subcategory,
            street,
            area,
            city,
            state,
            postal_code,
            country,
            latitude,
            longitude,
            map_link,
            price_range,
            opening_hours,
            hidden_gem,
            must_visit,
            rating,
            review_count,
            created_at,
            status,
        } = from;
        let address = Address {
            street: non_empty(street),
            area: non_empty(area),
            city: non_empty(city),
            state: non_empty(state),
            postal_code: non_empty(postal_code),
            country: non_empty(country),
        };
        let pos = latitude
            .zip(longitude)
            .and_then(|(lat, lng)| MapPoint::try_from_lat_lng_deg(lat, lng));
        // Records of the search function carry no status,
        // it only returns approved listings.
        let status = match non_empty(status) {
            Some(s) => s.parse().unwrap_or_else(|_| {
                log::debug!("Unknown status '{s}' of listing {id}");
                ListingStatus::default()
            }),
            None => ListingStatus::Approved,
        };
        Self {
            name: non_empty(name).unwrap_or_default(),
            category: non_empty(category),
            subcategory: non_empty(subcategory),
            address: (!address.is_empty()).then_some(address),
            pos,
            map_link: non_empty(map_link),
            price_range: non_empty(price_range).and_then(|s| s.parse().ok()),
            opening_hours: non_empty(opening_hours).and_then(|s| s.parse().ok()),
            hidden_gem: hidden_gem.unwrap_or(false),
            must_visit: must_visit.unwrap_or(false),
            rating: rating.filter(|r| r.is_finite()),
            review_count,
            created_at: parse_timestamp(created_at.as_deref()),
            status,
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReviewRecord {
    pub id: String,
    #[serde(alias = "business_id")]
    pub listing_id: String,
    #[serde(alias = "user_name", alias = "reviewer_name")]
    pub author: Option<String>,
    pub rating: Option<i64>,
    pub comment: Option<String>,
    pub quality_rating: Option<i64>,
    pub service_rating: Option<i64>,
    pub value_rating: Option<i64>,
    pub punctuality_rating: Option<i64>,
    pub created_at: Option<String>,
}

impl From<ReviewRecord> for Review {
    fn from(from: ReviewRecord) -> Self {
        let criteria = [
            (ReviewCriterion::Quality, from.quality_rating),
            (ReviewCriterion::Service, from.service_rating),
            (ReviewCriterion::Value, from.value_rating),
            (ReviewCriterion::Punctuality, from.punctuality_rating),
        ]
        .into_iter()
        .filter_map(|(criterion, value)| rating_value(value).map(|v| (criterion, v)))
        .collect();
        Self {
            id: from.id.into(),
            listing_id: from.listing_id.into(),
            author: non_empty(from.author),
            // missing values are rejected during validation
            value: rating_value(from.rating).unwrap_or_default(),
            comment: non_empty(from.comment),
            criteria,
            created_at: parse_timestamp(from.created_at.as_deref()).unwrap_or_else(Timestamp::epoch),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryRecord {
    pub id: String,
    pub name: String,
    pub subcategories: Option<Vec<String>>,
}

impl From<CategoryRecord> for Category {
    fn from(from: CategoryRecord) -> Self {
        Self {
            id: from.id.into(),
            name: from.name.trim().to_string(),
            subcategories: from
                .subcategories
                .unwrap_or_default()
                .into_iter()
                .filter_map(|s| non_empty(Some(s)))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceRequestRecord {
    pub id: String,
    #[serde(alias = "user_id")]
    pub requester_id: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub postal_code: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

impl From<ServiceRequestRecord> for ServiceRequest {
    fn from(from: ServiceRequestRecord) -> Self {
        Self {
            id: from.id.into(),
            requester: from.requester_id.into(),
            category: non_empty(from.category),
            description: non_empty(from.description).unwrap_or_default(),
            postal_code: non_empty(from.postal_code),
            // unknown states never accept new quotations
            status: from
                .status
                .as_deref()
                .map_or(RequestStatus::Open, |s| s.parse().unwrap_or(RequestStatus::Closed)),
            created_at: parse_timestamp(from.created_at.as_deref()).unwrap_or_else(Timestamp::epoch),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct QuotationRecord {
    pub id: String,
    pub request_id: String,
    pub provider_id: String,
    /// Rupees
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl From<QuotationRecord> for Quotation {
    fn from(from: QuotationRecord) -> Self {
        let paise = (from.amount * 100.0).round();
        Self {
            id: from.id.into(),
            request_id: from.request_id.into(),
            provider_id: from.provider_id.into(),
            amount: Amount::from_paise(if paise.is_finite() && paise > 0.0 {
                paise as u64
            } else {
                0
            }),
            message: non_empty(from.message),
            valid_until: parse_timestamp(from.valid_until.as_deref()),
            // unknown states are treated as settled
            status: from
                .status
                .as_deref()
                .map_or(QuotationStatus::Pending, |s| {
                    s.parse().unwrap_or(QuotationStatus::Rejected)
                }),
            created_at: parse_timestamp(from.created_at.as_deref()).unwrap_or_else(Timestamp::epoch),
        }
    }
}

impl From<&Quotation> for QuotationRecord {
    fn from(from: &Quotation) -> Self {
        Self {
            id: from.id.to_string(),
            request_id: from.request_id.to_string(),
            provider_id: from.provider_id.to_string(),
            amount: from.amount.paise() as f64 / 100.0,
            message: from.message.clone(),
            valid_until: from.valid_until.map(Timestamp::to_rfc3339),
            status: Some(from.status.to_string()),
            created_at: Some(from.created_at.to_rfc3339()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusPatch {
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceSearchBody {
    pub query: String,
    pub near_me: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnhanceSearchReply {
    pub enhanced_query: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSearchBody {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub open_now: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LocationRecord {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationSearchReply {
    pub providers: Vec<ListingRecord>,
    pub user_location: Option<LocationRecord>,
}
