//! Adapters that connect the directory core to the outside world:
//! the hosted backend, the OpenCage geocoder and the local file system.

pub mod backend;
pub mod device;
pub mod json_store;
pub mod notice;
pub mod opencage;
