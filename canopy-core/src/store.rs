//! Event persistence boundary.
//!
//! The event board talks to the backend through this trait so tests can
//! drive it with a scripted in-memory store. The remote implementation is
//! [`EventsClient`]; it carries no business rules and keeps no cache.

use async_trait::async_trait;
use canopy_sdk::client::{ClientError, EventsClient};
use canopy_sdk::objects::Confirmation;
use canopy_sdk::objects::events::{Event, EventDraft, RegistrationDraft, RegistrationReceipt};

/// Network I/O for events.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Fetch the full ordered event collection. Whole-list-or-error; a
    /// failure never yields partial data.
    async fn list(&self) -> Result<Vec<Event>, ClientError>;

    /// Insert a new event and return the backend-assigned record.
    async fn create(&self, draft: &EventDraft) -> Result<Event, ClientError>;

    /// Remove an event by id.
    async fn delete(&self, id: i64) -> Result<Confirmation, ClientError>;

    /// Register a participant; the receipt carries the new count.
    async fn register(
        &self,
        id: i64,
        draft: &RegistrationDraft,
    ) -> Result<RegistrationReceipt, ClientError>;

    /// Reachability probe against the API root.
    async fn ping(&self) -> Result<(), ClientError>;
}

#[async_trait]
impl EventStore for EventsClient {
    async fn list(&self) -> Result<Vec<Event>, ClientError> {
        EventsClient::list(self).await
    }

    async fn create(&self, draft: &EventDraft) -> Result<Event, ClientError> {
        EventsClient::create(self, draft).await
    }

    async fn delete(&self, id: i64) -> Result<Confirmation, ClientError> {
        EventsClient::delete(self, id).await
    }

    async fn register(
        &self,
        id: i64,
        draft: &RegistrationDraft,
    ) -> Result<RegistrationReceipt, ClientError> {
        EventsClient::register(self, id, draft).await
    }

    async fn ping(&self) -> Result<(), ClientError> {
        EventsClient::ping(self).await
    }
}
