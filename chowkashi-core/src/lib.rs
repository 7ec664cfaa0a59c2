pub mod cache;
pub mod gateways;
pub mod local_state;
pub mod rating;
pub mod repositories;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use chowkashi_entities::{
        address::*, category::*, filter::*, geo::*, id::*, listing::*, location::*, price::*,
        quotation::*, review::*, time::*,
    };
}
