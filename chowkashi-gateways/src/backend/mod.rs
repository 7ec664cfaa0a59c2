//! Client of the hosted backend: REST tables and serverless functions.

use std::time::Duration;

use chowkashi_core::repositories::{Error, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};

mod dto;
mod functions;
mod repos;

pub use self::dto::*;

pub const LISTINGS_TABLE: &str = "business_listings";
pub const REVIEWS_TABLE: &str = "reviews";
pub const CATEGORIES_TABLE: &str = "categories";
pub const SERVICE_REQUESTS_TABLE: &str = "service_requests";
pub const QUOTATIONS_TABLE: &str = "quotations";

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

/// `column=eq.value` filter
pub fn eq(value: impl AsRef<str>) -> String {
    format!("eq.{}", value.as_ref())
}

fn transport_error(err: impl Into<anyhow::Error>) -> Error {
    Error::Other(err.into())
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::NOT_FOUND => Error::NotFound,
        StatusCode::CONFLICT => Error::AlreadyExists,
        _ => Error::Rejected(format!("{status}: {body}")),
    })
}

impl BackendClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("chowkashi/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;
        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_owned(),
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(transport_error)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(transport_error)?;
        check_status(response).await
    }

    pub(crate) async fn select<T>(&self, table: &str, filters: &[(&str, String)]) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.url(&format!("rest/v1/{table}"))?;
        let request = self
            .client
            .get(url)
            .query(&[("select", "*")])
            .query(filters);
        let rows = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(transport_error)?;
        Ok(rows)
    }

    pub(crate) async fn select_by_id<T>(&self, table: &str, id: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let filters = [("id", eq(id)), ("limit", "1".to_string())];
        self.select(table, &filters)
            .await?
            .into_iter()
            .next()
            .ok_or(Error::NotFound)
    }

    pub(crate) async fn insert<T>(&self, table: &str, row: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let url = self.url(&format!("rest/v1/{table}"))?;
        let request = self
            .client
            .post(url)
            .header("Prefer", "return=minimal")
            .json(row);
        self.send(request).await?;
        Ok(())
    }

    pub(crate) async fn update_by_id<T>(&self, table: &str, id: &str, patch: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let url = self.url(&format!("rest/v1/{table}"))?;
        let request = self
            .client
            .patch(url)
            .query(&[("id", eq(id))])
            .header("Prefer", "return=representation")
            .json(patch);
        let updated: Vec<serde_json::Value> = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(transport_error)?;
        if updated.is_empty() {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    pub(crate) async fn invoke<Req, Res>(&self, function: &str, body: &Req) -> Result<Res>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let url = self.url(&format!("functions/v1/{function}"))?;
        let request = self.client.post(url).json(body);
        self.send(request)
            .await?
            .json()
            .await
            .map_err(transport_error)
    }
}
