#[macro_use]
extern crate log;

mod generation;
mod session;

pub mod prelude {
    pub use super::{generation::*, session::*};
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use chowkashi_core::{
    cache::LocationCache,
    entities::*,
    gateways::{device::*, geocode::*, notice::*, search::*},
    repositories::ListingRepo,
    usecases,
};
