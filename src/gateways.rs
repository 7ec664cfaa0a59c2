use anyhow::Result;
use chowkashi_core::{
    cache::LocationCache,
    entities::{Distance, MapPoint},
    gateways::geocode::GeoCodingGateway,
    local_state::LocalState,
};
use chowkashi_gateways::{
    backend::BackendClient, device::FixedDeviceLocator, json_store::JsonFileStore,
    opencage::OpenCage,
};

use crate::config::{self, Config, GeocodingGateway};

pub fn backend(cfg: &config::Backend) -> Result<BackendClient> {
    if cfg.api_key.is_empty() {
        log::warn!("No backend API key configured");
    }
    BackendClient::new(&cfg.url, &cfg.api_key, cfg.timeout)
}

pub fn geocoding_gateway(cfg: &config::Geocoding) -> Result<Geocoder> {
    match &cfg.gateway {
        Some(GeocodingGateway::OpenCage { api_key }) => {
            log::debug!("Use OpenCage geocoding gateway");
            Ok(Geocoder::OpenCage(OpenCage::new(api_key, cfg.timeout)?))
        }
        None => {
            log::info!("No geocoding gateway configured");
            Ok(Geocoder::Dummy)
        }
    }
}

pub fn device_locator(position: Option<MapPoint>) -> FixedDeviceLocator {
    FixedDeviceLocator::new(position)
}

pub fn location_cache(cfg: &config::Cache) -> Result<LocationCache> {
    let ttl = time::Duration::try_from(cfg.ttl)?;
    Ok(LocationCache::new(ttl, Distance::from_km(cfg.moved_threshold_km)))
}

pub fn local_state(cfg: &config::LocalState) -> Result<LocalState<JsonFileStore>> {
    let store = JsonFileStore::try_new(&cfg.dir)?;
    log::debug!("Local state is stored in {}", store.path().display());
    Ok(LocalState::new(store))
}

pub struct Gateways {
    pub backend: BackendClient,
    pub geocoder: Geocoder,
    pub device: FixedDeviceLocator,
}

impl Gateways {
    pub fn try_new(cfg: &Config, position: Option<MapPoint>) -> Result<Self> {
        Ok(Self {
            backend: backend(&cfg.backend)?,
            geocoder: geocoding_gateway(&cfg.geocoding)?,
            device: device_locator(position),
        })
    }
}

#[derive(Debug)]
pub enum Geocoder {
    OpenCage(OpenCage),
    Dummy,
}

impl GeoCodingGateway for Geocoder {
    async fn resolve_text(&self, text: &str) -> Option<MapPoint> {
        match self {
            Self::OpenCage(gw) => gw.resolve_text(text).await,
            Self::Dummy => {
                log::debug!("Cannot geocode '{text}' because no geocoding gateway was configured");
                None
            }
        }
    }
}
