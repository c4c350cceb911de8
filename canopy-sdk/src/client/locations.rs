//! Community-map locations API client.

use reqwest::Client;
use url::Url;

use super::{ClientError, parse_response};
use crate::objects::locations::{MapLocation, NewLocation};

/// Typed HTTP client for the map locations API.
#[derive(Debug, Clone)]
pub struct LocationsClient {
    http: Client,
    base_url: Url,
}

impl LocationsClient {
    /// Create a new `LocationsClient` against the backend root URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `GET /locations` – list green-action sites for the map.
    pub async fn list(&self) -> Result<Vec<MapLocation>, ClientError> {
        let url = self.base_url.join("/locations")?;

        let resp = self.http.get(url).send().await?;

        parse_response(resp).await
    }

    /// `POST /locations` – add a site, returning the stored record.
    pub async fn create(&self, location: &NewLocation) -> Result<MapLocation, ClientError> {
        let url = self.base_url.join("/locations")?;

        let resp = self.http.post(url).json(location).send().await?;

        parse_response(resp).await
    }
}
