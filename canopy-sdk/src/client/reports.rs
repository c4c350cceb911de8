//! Environmental-damage reports API client.

use reqwest::Client;
use url::Url;

use super::{ClientError, parse_response};
use crate::objects::reports::{DamageReport, ReportDraft};

/// Typed HTTP client for the reports API.
#[derive(Debug, Clone)]
pub struct ReportsClient {
    http: Client,
    base_url: Url,
}

impl ReportsClient {
    /// Create a new `ReportsClient` against the backend root URL.
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

    /// `GET /reports` – list filed reports, newest first.
    pub async fn list(&self) -> Result<Vec<DamageReport>, ClientError> {
        let url = self.base_url.join("/reports")?;

        let resp = self.http.get(url).send().await?;

        parse_response(resp).await
    }

    /// `POST /reports` – file a report, returning the stored record.
    pub async fn submit(&self, draft: &ReportDraft) -> Result<DamageReport, ClientError> {
        let url = self.base_url.join("/reports")?;

        let resp = self.http.post(url).json(draft).send().await?;

        parse_response(resp).await
    }
}
