use std::future::Future;

use crate::{entities::*, repositories::Result};

#[derive(Debug, Clone, PartialEq)]
pub struct EnhanceQueryRequest {
    pub query: String,
    pub near_me: bool,
    pub location: Option<MapPoint>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationSearchRequest {
    pub query: String,
    pub category: Option<String>,
    pub location: Option<MapPoint>,
    pub postal_code: Option<String>,
    pub open_now: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationSearchResponse {
    pub listings: Vec<BusinessListing>,
    /// The location the backend actually searched around.
    pub user_location: Option<MapPoint>,
}

/// Serverless search functions hosted by the backend.
pub trait SearchFunctions {
    fn enhance_query(
        &self,
        request: &EnhanceQueryRequest,
    ) -> impl Future<Output = Result<String>> + Send;

    fn location_search(
        &self,
        request: &LocationSearchRequest,
    ) -> impl Future<Output = Result<LocationSearchResponse>> + Send;
}
