//! Waste-bank partners API client.

use reqwest::Client;
use url::Url;

use super::{ClientError, parse_response};
use crate::objects::partners::{Partner, PartnerSignup};

/// Typed HTTP client for the partners API.
#[derive(Debug, Clone)]
pub struct PartnersClient {
    http: Client,
    base_url: Url,
}

impl PartnersClient {
    /// Create a new `PartnersClient` against the backend root URL.
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

    /// `GET /partners` – list registered waste-bank partners.
    pub async fn list(&self) -> Result<Vec<Partner>, ClientError> {
        let url = self.base_url.join("/partners")?;

        let resp = self.http.get(url).send().await?;

        parse_response(resp).await
    }

    /// `POST /partners` – submit a signup, returning the stored record.
    pub async fn signup(&self, signup: &PartnerSignup) -> Result<Partner, ClientError> {
        let url = self.base_url.join("/partners")?;

        let resp = self.http.post(url).json(signup).send().await?;

        parse_response(resp).await
    }
}
