#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # chowkashi-entities
//!
//! Reusable, agnostic domain entities for the Chowkashi business directory.
//!
//! The entities only contain generic functionality that does not reveal any
//! application-specific business logic.

pub mod address;
pub mod category;
pub mod filter;
pub mod geo;
pub mod id;
pub mod listing;
pub mod location;
pub mod price;
pub mod quotation;
pub mod review;
pub mod time;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
