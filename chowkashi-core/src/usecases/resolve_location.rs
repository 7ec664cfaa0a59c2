use super::prelude::*;

/// Phrases that ask for the device position instead of a place name.
pub const NEAR_ME_PHRASES: [&str; 2] = ["near me", "current location"];

pub fn is_near_me(input: &str) -> bool {
    let input = input.trim();
    NEAR_ME_PHRASES
        .iter()
        .any(|phrase| input.eq_ignore_ascii_case(phrase))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationInput {
    Device,
    Text(String),
}

impl LocationInput {
    pub fn from_text(text: &str) -> Self {
        if is_near_me(text) {
            Self::Device
        } else {
            Self::Text(text.trim().to_string())
        }
    }
}

/// Asks the device for its position.
///
/// A failure is returned as the notice to show the user.
/// It is never retried.
pub async fn try_locate_device<D>(device: &D) -> std::result::Result<ResolvedLocation, Notice>
where
    D: DeviceLocator,
{
    match device.current_position().await {
        Ok(pos) if pos.is_valid() => Ok(ResolvedLocation::near_me(pos)),
        Ok(pos) => {
            log::warn!("Device reported an invalid position: {pos:?}");
            Err(Notice::DeviceLocation(DeviceLocationError::Unavailable))
        }
        Err(err) => {
            log::info!("Device location unavailable: {err}");
            Err(Notice::DeviceLocation(err))
        }
    }
}

/// Like [try_locate_device] but reports a failure to the user.
pub async fn locate_device<D, N>(device: &D, notices: &N) -> Option<ResolvedLocation>
where
    D: DeviceLocator,
    N: NoticeGateway,
{
    try_locate_device(device)
        .await
        .map_err(|notice| notices.notify(notice))
        .ok()
}

/// Resolves a location input without notifying anybody.
///
/// Empty text resolves to nothing, a failed lookup yields
/// the notice that describes it.
pub async fn try_resolve_location<D, G>(
    device: &D,
    geocoder: &G,
    input: &LocationInput,
) -> std::result::Result<Option<ResolvedLocation>, Notice>
where
    D: DeviceLocator,
    G: GeoCodingGateway,
{
    let text = match input {
        LocationInput::Device => return try_locate_device(device).await.map(Some),
        LocationInput::Text(text) => text.trim(),
    };
    if text.is_empty() {
        return Ok(None);
    }
    if is_near_me(text) {
        return try_locate_device(device).await.map(Some);
    }
    match geocoder.resolve_text(text).await {
        Some(pos) => Ok(Some(ResolvedLocation::geocoded(pos, text))),
        None => {
            log::info!("Could not geocode '{text}'");
            Err(Notice::GeocodingFailed {
                query: text.to_string(),
            })
        }
    }
}

pub async fn resolve_location<D, G, N>(
    device: &D,
    geocoder: &G,
    notices: &N,
    input: &LocationInput,
) -> Option<ResolvedLocation>
where
    D: DeviceLocator,
    G: GeoCodingGateway,
    N: NoticeGateway,
{
    try_resolve_location(device, geocoder, input)
        .await
        .unwrap_or_else(|notice| {
            notices.notify(notice);
            None
        })
}
