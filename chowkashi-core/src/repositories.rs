// Backend access traits.
// Each repository is responsible for a single table of the
// directory backend. Related entities are only referenced
// by their id and never loaded by another repository.

use std::{future::Future, io};

use thiserror::Error;

use crate::entities::*;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error("The backend rejected the request: {0}")]
    Rejected(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Predicates that are pushed down to the backend.
///
/// Only approved listings are ever returned, regardless
/// of the query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingQuery {
    pub text: Option<String>,
    pub category: Option<String>,
    pub postal_code: Option<String>,
    pub open_now: bool,
    pub limit: Option<usize>,
}

pub trait ListingRepo {
    fn query_listings(
        &self,
        query: &ListingQuery,
    ) -> impl Future<Output = Result<Vec<BusinessListing>>> + Send;

    /// An empty postal code matches all approved listings.
    fn search_by_postal_code(
        &self,
        postal_code: &str,
    ) -> impl Future<Output = Result<Vec<BusinessListing>>> + Send;

    fn get_listing(&self, id: &str) -> impl Future<Output = Result<BusinessListing>> + Send;
}

pub trait ReviewRepo {
    fn reviews_of_listing(
        &self,
        listing_id: &str,
    ) -> impl Future<Output = Result<Vec<Review>>> + Send;
}

pub trait CategoryRepo {
    fn all_categories(&self) -> impl Future<Output = Result<Vec<Category>>> + Send;
}

pub trait QuotationRepo {
    fn get_service_request(&self, id: &str) -> impl Future<Output = Result<ServiceRequest>> + Send;
    fn update_service_request_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> impl Future<Output = Result<()>> + Send;

    fn get_quotation(&self, id: &str) -> impl Future<Output = Result<Quotation>> + Send;
    fn quotations_of_request(
        &self,
        request_id: &str,
    ) -> impl Future<Output = Result<Vec<Quotation>>> + Send;
    fn create_quotation(&self, quotation: Quotation) -> impl Future<Output = Result<()>> + Send;
    fn update_quotation_status(
        &self,
        id: &str,
        status: QuotationStatus,
    ) -> impl Future<Output = Result<()>> + Send;
}
