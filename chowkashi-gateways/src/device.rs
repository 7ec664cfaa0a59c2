use chowkashi_core::{entities::*, gateways::device::*};

/// A device position that is known up front, e.g. from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDeviceLocator {
    pos: Option<MapPoint>,
}

impl FixedDeviceLocator {
    pub const fn new(pos: Option<MapPoint>) -> Self {
        Self { pos }
    }
}

impl DeviceLocator for FixedDeviceLocator {
    async fn current_position(&self) -> Result<MapPoint, DeviceLocationError> {
        match self.pos {
            Some(pos) if pos.is_valid() => Ok(pos),
            Some(_) => Err(DeviceLocationError::Unavailable),
            None => Err(DeviceLocationError::Unsupported),
        }
    }
}
