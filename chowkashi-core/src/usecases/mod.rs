mod annotate;
mod categories;
mod distances;
mod error;
mod filter_listings;
mod postal_code;
mod quotations;
mod resolve_location;
mod reviews;
mod search;

#[cfg(test)]
pub mod tests;

pub use self::{
    annotate::*, categories::*, distances::*, error::Error, filter_listings::*, postal_code::*,
    quotations::*, resolve_location::*, reviews::*, search::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{
        entities::*,
        gateways::{device::*, geocode::*, notice::*, search::*},
        repositories::{CategoryRepo, ListingQuery, ListingRepo, QuotationRepo, ReviewRepo},
    };
}
