use std::time::Duration;

use chowkashi_core::{entities::*, gateways::geocode::GeoCodingGateway};
use reqwest::{Client, Url};
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://api.opencagedata.com/";

/// Forward geocoding with the OpenCage API.
#[derive(Debug, Clone)]
pub struct OpenCage {
    client: Client,
    api_key: String,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct ForwardResponse {
    #[serde(default)]
    results: Vec<ForwardResult>,
}

#[derive(Debug, Deserialize)]
struct ForwardResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    lat: f64,
    lng: f64,
}

impl OpenCage {
    pub fn new(api_key: &str, timeout: Duration) -> anyhow::Result<Self> {
        Self::with_base_url(api_key, timeout, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, timeout: Duration, base_url: &str) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;
        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    async fn forward(&self, query: &str) -> anyhow::Result<Option<MapPoint>> {
        let url = self.base_url.join("geocode/v1/json")?;
        let response: ForwardResponse = self
            .client
            .get(url)
            .query(&[
                ("q", query),
                ("key", self.api_key.as_str()),
                ("limit", "1"),
                ("no_annotations", "1"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response
            .results
            .into_iter()
            .next()
            .and_then(|r| MapPoint::try_from_lat_lng_deg(r.geometry.lat, r.geometry.lng)))
    }
}

impl GeoCodingGateway for OpenCage {
    async fn resolve_text(&self, text: &str) -> Option<MapPoint> {
        let query = text.trim();
        if query.is_empty() {
            return None;
        }
        match self.forward(query).await {
            Ok(Some(pos)) => {
                log::debug!("Resolved location '{query}': {pos}");
                Some(pos)
            }
            Ok(None) => {
                log::info!("No location found for '{query}'");
                None
            }
            Err(err) => {
                log::warn!("Failed to resolve location '{query}': {err}");
                None
            }
        }
    }
}
