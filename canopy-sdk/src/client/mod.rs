//! HTTP clients for the Canopy backend APIs.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types do not pull in `reqwest`.

mod events;
mod geocode;
mod locations;
mod partners;
mod reports;

pub use events::{EventsClient, LIST_TIMEOUT};
pub use geocode::{GeoPoint, GeocodeClient};
pub use locations::LocationsClient;
pub use partners::PartnersClient;
pub use reports::ReportsClient;

pub use reqwest::StatusCode;

use crate::objects::ApiErrorBody;

/// Errors produced by the HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection refused, …).
    #[error("http error: {0}")]
    Http(reqwest::Error),

    /// No response within the request's deadline; the in-flight request
    /// was aborted.
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-2xx status.
    #[error("server error {status}: {message}")]
    Api {
        status: StatusCode,
        message: String,
    },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Http(err)
        }
    }
}

impl ClientError {
    /// True when the failure is a transport-level connectivity problem
    /// rather than a server-side rejection.
    pub fn is_connect(&self) -> bool {
        matches!(self, ClientError::Http(e) if e.is_connect())
    }
}

/// Parse a 2xx response body as JSON, or map a non-2xx response to
/// [`ClientError::Api`].
async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(api_error(status, body));
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}

/// Build an [`ClientError::Api`], preferring the backend's `{error}` message
/// over the raw body when the body carries one.
fn api_error(status: StatusCode, body: String) -> ClientError {
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or(body);
    ClientError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_extracts_backend_message() {
        let err = api_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":"title is required"}"#.to_string(),
        );
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "title is required");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn api_error_falls_back_to_raw_body() {
        let err = api_error(StatusCode::BAD_GATEWAY, "upstream offline".to_string());
        match err {
            ClientError::Api { message, .. } => assert_eq!(message, "upstream offline"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
