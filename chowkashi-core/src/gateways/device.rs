use std::future::Future;

use thiserror::Error;

use crate::entities::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeviceLocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Geolocation is not supported")]
    Unsupported,
    #[error("Position unavailable")]
    Unavailable,
}

/// Source of the device's own position.
pub trait DeviceLocator {
    fn current_position(
        &self,
    ) -> impl Future<Output = Result<MapPoint, DeviceLocationError>> + Send;
}
