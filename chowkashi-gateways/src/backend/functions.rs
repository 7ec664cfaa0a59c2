use chowkashi_core::{
    entities::*,
    gateways::search::*,
    repositories::{Error, Result},
};

use super::*;

pub const ENHANCE_SEARCH_FUNCTION: &str = "enhance-search";
pub const LOCATION_SEARCH_FUNCTION: &str = "location-search";

impl SearchFunctions for BackendClient {
    async fn enhance_query(&self, request: &EnhanceQueryRequest) -> Result<String> {
        let (latitude, longitude) = request.location.map(MapPoint::to_lat_lng_deg).unzip();
        let body = EnhanceSearchBody {
            query: request.query.clone(),
            near_me: request.near_me,
            latitude,
            longitude,
        };
        let reply: EnhanceSearchReply = self.invoke(ENHANCE_SEARCH_FUNCTION, &body).await?;
        reply
            .enhanced_query
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .ok_or_else(|| Error::Rejected("empty enhanced query".to_string()))
    }

    async fn location_search(
        &self,
        request: &LocationSearchRequest,
    ) -> Result<LocationSearchResponse> {
        let (latitude, longitude) = request.location.map(MapPoint::to_lat_lng_deg).unzip();
        let body = LocationSearchBody {
            query: request.query.clone(),
            category: request.category.clone(),
            latitude,
            longitude,
            postal_code: request.postal_code.clone(),
            open_now: request.open_now,
        };
        let reply: LocationSearchReply = self.invoke(LOCATION_SEARCH_FUNCTION, &body).await?;
        let user_location = reply
            .user_location
            .and_then(|l| MapPoint::try_from_lat_lng_deg(l.latitude, l.longitude));
        Ok(LocationSearchResponse {
            listings: reply.providers.into_iter().map(Into::into).collect(),
            user_location,
        })
    }
}
