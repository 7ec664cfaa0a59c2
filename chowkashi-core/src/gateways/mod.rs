pub mod device;
pub mod geocode;
pub mod notice;
pub mod search;
