use std::future::Future;

use crate::entities::*;

pub trait GeoCodingGateway {
    /// Forward geocoding of free text. Failures are reported as `None`.
    fn resolve_text(&self, text: &str) -> impl Future<Output = Option<MapPoint>> + Send;
}
