//! Events API client.
//!
//! Covers the tree-planting calendar: listing, moderated create/delete,
//! participant registration, and a reachability probe. The client keeps no
//! local cache; after a create or delete, callers re-list to pick up
//! server-side defaults and validation results.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use super::{ClientError, api_error, parse_response};
use crate::objects::Confirmation;
use crate::objects::events::{Event, EventDraft, RegistrationDraft, RegistrationReceipt};

/// How long to wait for the event list before aborting the request.
pub const LIST_TIMEOUT: Duration = Duration::from_secs(10);

/// Typed HTTP client for the events API.
#[derive(Debug, Clone)]
pub struct EventsClient {
    http: Client,
    base_url: Url,
}

impl EventsClient {
    /// Create a new `EventsClient` against the backend root URL.
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

    /// `GET /events` – the full event collection.
    ///
    /// Bounded by [`LIST_TIMEOUT`]; on expiry the in-flight request is
    /// aborted and the call resolves as [`ClientError::Timeout`]. Yields
    /// the whole list or an error, never a truncated list.
    pub async fn list(&self) -> Result<Vec<Event>, ClientError> {
        let url = self.base_url.join("/events")?;

        let resp = self.http.get(url).timeout(LIST_TIMEOUT).send().await?;

        parse_response(resp).await
    }

    /// `POST /events` – create an event, returning the backend-assigned
    /// record.
    pub async fn create(&self, draft: &EventDraft) -> Result<Event, ClientError> {
        let url = self.base_url.join("/events")?;

        let resp = self.http.post(url).json(draft).send().await?;

        parse_response(resp).await
    }

    /// `DELETE /events/{id}` – remove an event.
    pub async fn delete(&self, id: i64) -> Result<Confirmation, ClientError> {
        let url = self.base_url.join(&format!("/events/{id}"))?;

        let resp = self.http.delete(url).send().await?;

        parse_response(resp).await
    }

    /// `POST /events/{id}/registrations` – register a participant.
    ///
    /// The receipt carries the event's new registration count.
    pub async fn register(
        &self,
        id: i64,
        draft: &RegistrationDraft,
    ) -> Result<RegistrationReceipt, ClientError> {
        let url = self.base_url.join(&format!("/events/{id}/registrations"))?;

        let resp = self.http.post(url).json(draft).send().await?;

        parse_response(resp).await
    }

    /// `GET /` – connectivity probe. Any 2xx means the backend is
    /// reachable; the body is ignored.
    pub async fn ping(&self) -> Result<(), ClientError> {
        let url = self.base_url.join("/")?;

        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(api_error(status, body))
        }
    }
}
