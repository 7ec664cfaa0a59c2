use thiserror::Error;

use crate::{
    local_state, repositories,
    util::validate::{QuotationInvalidation, ReviewInvalidation},
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Postal code must consist of exactly 6 digits")]
    InvalidPostalCode,
    #[error("Empty category name")]
    EmptyCategoryName,
    #[error("The service request is closed")]
    RequestClosed,
    #[error("The provider already has a pending quotation for this request")]
    DuplicateQuotation,
    #[error("The quotation is no longer pending")]
    QuotationNotPending,
    #[error("The quotation has expired")]
    QuotationExpired,
    #[error("This is not allowed")]
    Forbidden,
    #[error(transparent)]
    Quotation(#[from] QuotationInvalidation),
    #[error(transparent)]
    Review(#[from] ReviewInvalidation),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
    #[error(transparent)]
    LocalState(#[from] local_state::Error),
}
