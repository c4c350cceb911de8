//! Geocoding client for a Nominatim-compatible search endpoint.
//!
//! Used by the location board to resolve a place name into coordinates when
//! the submitter leaves them blank. The service returns coordinates as
//! decimal strings; a best match that fails to parse is treated the same as
//! no match.

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{ClientError, parse_response};

/// A resolved coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

/// Typed HTTP client for the geocoding service.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: Client,
    endpoint: Url,
}

impl GeocodeClient {
    /// Create a new `GeocodeClient` against the service root URL.
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: Client::new(),
            endpoint,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `GET {endpoint}/search` – best match for a free-form query, if any.
    pub async fn search(&self, query: &str) -> Result<Option<GeoPoint>, ClientError> {
        let url = self.endpoint.join("/search")?;

        let resp = self
            .http
            .get(url)
            .query(&[
                ("format", "json"),
                ("q", query),
                ("limit", "1"),
                ("addressdetails", "1"),
            ])
            .send()
            .await?;

        let hits: Vec<SearchHit> = parse_response(resp).await?;

        Ok(hits.into_iter().next().and_then(|hit| {
            let latitude = hit.lat.parse().ok()?;
            let longitude = hit.lon.parse().ok()?;
            Some(GeoPoint {
                latitude,
                longitude,
            })
        }))
    }
}
