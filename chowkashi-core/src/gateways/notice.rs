use std::fmt;

use super::device::DeviceLocationError;

/// A short user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    DeviceLocation(DeviceLocationError),
    GeocodingFailed { query: String },
    SearchFailed,
    InvalidPostalCode,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::DeviceLocation(DeviceLocationError::PermissionDenied) => write!(
                f,
                "Location access was denied. Please enter your location manually."
            ),
            Self::DeviceLocation(DeviceLocationError::Unsupported) => {
                write!(f, "Geolocation is not supported on this device.")
            }
            Self::DeviceLocation(DeviceLocationError::Unavailable) => {
                write!(f, "Your current location could not be determined.")
            }
            Self::GeocodingFailed { query } => {
                write!(f, "Could not find the location \"{query}\".")
            }
            Self::SearchFailed => write!(f, "Search failed. Please try again."),
            Self::InvalidPostalCode => write!(f, "Please enter a valid 6-digit postal code."),
        }
    }
}

pub trait NoticeGateway {
    fn notify(&self, notice: Notice);
}
