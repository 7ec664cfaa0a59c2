use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use super::prelude::*;
use crate::repositories;

type RepoResult<T> = repositories::Result<T>;

/// In-memory backend and gateways for use case tests.
#[derive(Debug, Default)]
pub struct MockDb {
    pub offline: bool,
    pub listings: Mutex<Vec<BusinessListing>>,
    pub reviews: Mutex<Vec<Review>>,
    pub categories: Mutex<Vec<Category>>,
    pub service_requests: Mutex<Vec<ServiceRequest>>,
    pub quotations: Mutex<Vec<Quotation>>,

    pub listing_queries: Mutex<Vec<ListingQuery>>,
    pub postal_queries: Mutex<Vec<String>>,
    pub location_searches: Mutex<Vec<LocationSearchRequest>>,
    pub enhancement: Mutex<Option<String>>,
    pub backend_location: Mutex<Option<MapPoint>>,

    pub geocodes: Mutex<HashMap<String, MapPoint>>,
    pub geocode_requests: Mutex<Vec<String>>,
    pub device: Mutex<Option<std::result::Result<MapPoint, DeviceLocationError>>>,
    pub device_requests: AtomicUsize,
    pub notices: Mutex<Vec<Notice>>,
}

impl MockDb {
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Default::default()
        }
    }

    fn check_online(&self) -> RepoResult<()> {
        if self.offline {
            return Err(repositories::Error::Other(anyhow::anyhow!("offline")));
        }
        Ok(())
    }

    fn matching_listings(&self, query: &ListingQuery) -> Vec<BusinessListing> {
        let text = query.text.as_deref().map(str::to_lowercase);
        self.listings
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.is_approved())
            .filter(|l| {
                query
                    .category
                    .as_ref()
                    .map_or(true, |c| l.category.as_ref() == Some(c))
            })
            .filter(|l| {
                query
                    .postal_code
                    .as_deref()
                    .map_or(true, |p| l.postal_code() == Some(p))
            })
            .filter(|l| {
                text.as_deref().map_or(true, |t| {
                    l.name.to_lowercase().contains(t)
                        || l.category
                            .as_deref()
                            .is_some_and(|c| c.to_lowercase().contains(t))
                })
            })
            .cloned()
            .collect()
    }
}

impl ListingRepo for MockDb {
    async fn query_listings(&self, query: &ListingQuery) -> RepoResult<Vec<BusinessListing>> {
        self.listing_queries.lock().unwrap().push(query.clone());
        self.check_online()?;
        Ok(self.matching_listings(query))
    }

    async fn search_by_postal_code(&self, postal_code: &str) -> RepoResult<Vec<BusinessListing>> {
        self.postal_queries
            .lock()
            .unwrap()
            .push(postal_code.to_string());
        self.check_online()?;
        let query = ListingQuery {
            postal_code: Some(postal_code).filter(|p| !p.is_empty()).map(Into::into),
            ..Default::default()
        };
        Ok(self.matching_listings(&query))
    }

    async fn get_listing(&self, id: &str) -> RepoResult<BusinessListing> {
        self.check_online()?;
        self.listings
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id.as_str() == id)
            .cloned()
            .ok_or(repositories::Error::NotFound)
    }
}

impl ReviewRepo for MockDb {
    async fn reviews_of_listing(&self, listing_id: &str) -> RepoResult<Vec<Review>> {
        self.check_online()?;
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.listing_id.as_str() == listing_id)
            .cloned()
            .collect())
    }
}

impl CategoryRepo for MockDb {
    async fn all_categories(&self) -> RepoResult<Vec<Category>> {
        self.check_online()?;
        Ok(self.categories.lock().unwrap().clone())
    }
}

impl QuotationRepo for MockDb {
    async fn get_service_request(&self, id: &str) -> RepoResult<ServiceRequest> {
        self.check_online()?;
        self.service_requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id.as_str() == id)
            .cloned()
            .ok_or(repositories::Error::NotFound)
    }

    async fn update_service_request_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> RepoResult<()> {
        self.check_online()?;
        let mut requests = self.service_requests.lock().unwrap();
        let request = requests
            .iter_mut()
            .find(|r| r.id.as_str() == id)
            .ok_or(repositories::Error::NotFound)?;
        request.status = status;
        Ok(())
    }

    async fn get_quotation(&self, id: &str) -> RepoResult<Quotation> {
        self.check_online()?;
        self.quotations
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.id.as_str() == id)
            .cloned()
            .ok_or(repositories::Error::NotFound)
    }

    async fn quotations_of_request(&self, request_id: &str) -> RepoResult<Vec<Quotation>> {
        self.check_online()?;
        Ok(self
            .quotations
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.request_id.as_str() == request_id)
            .cloned()
            .collect())
    }

    async fn create_quotation(&self, quotation: Quotation) -> RepoResult<()> {
        self.check_online()?;
        let mut quotations = self.quotations.lock().unwrap();
        if quotations.iter().any(|q| q.id == quotation.id) {
            return Err(repositories::Error::AlreadyExists);
        }
        quotations.push(quotation);
        Ok(())
    }

    async fn update_quotation_status(&self, id: &str, status: QuotationStatus) -> RepoResult<()> {
        self.check_online()?;
        let mut quotations = self.quotations.lock().unwrap();
        let quotation = quotations
            .iter_mut()
            .find(|q| q.id.as_str() == id)
            .ok_or(repositories::Error::NotFound)?;
        quotation.status = status;
        Ok(())
    }
}

impl SearchFunctions for MockDb {
    async fn enhance_query(&self, _: &EnhanceQueryRequest) -> RepoResult<String> {
        self.check_online()?;
        self.enhancement
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| repositories::Error::Rejected("enhancement unavailable".into()))
    }

    async fn location_search(
        &self,
        request: &LocationSearchRequest,
    ) -> RepoResult<LocationSearchResponse> {
        self.location_searches.lock().unwrap().push(request.clone());
        self.check_online()?;
        let query = ListingQuery {
            text: Some(request.query.clone()).filter(|q| !q.is_empty()),
            category: request.category.clone(),
            postal_code: request.postal_code.clone(),
            open_now: request.open_now,
            limit: None,
        };
        let user_location = request
            .location
            .or(*self.backend_location.lock().unwrap());
        Ok(LocationSearchResponse {
            listings: self.matching_listings(&query),
            user_location,
        })
    }
}

impl GeoCodingGateway for MockDb {
    async fn resolve_text(&self, text: &str) -> Option<MapPoint> {
        self.geocode_requests.lock().unwrap().push(text.to_string());
        self.geocodes.lock().unwrap().get(text).copied()
    }
}

impl DeviceLocator for MockDb {
    async fn current_position(&self) -> std::result::Result<MapPoint, DeviceLocationError> {
        self.device_requests.fetch_add(1, Ordering::SeqCst);
        let device = *self.device.lock().unwrap();
        device.unwrap_or(Err(DeviceLocationError::Unsupported))
    }
}

impl NoticeGateway for MockDb {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}
