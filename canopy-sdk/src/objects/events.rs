//! Event wire types: the tree-planting calendar and its registrations.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::ValidationError;

/// A schedulable community activity with a capacity and a registration count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Backend-assigned identifier, immutable once created.
    pub id: i64,
    pub title: String,
    pub location: String,
    pub description: String,
    /// Calendar timestamp of the event, ISO-8601 on the wire.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// Maximum registrations, set at creation.
    pub capacity: u32,
    /// Current registration count. The backend may let this exceed
    /// `capacity`; clients display it as-is and never clamp it.
    pub registered: u32,
}

impl Event {
    /// Whether registration is closed: `registered >= capacity`.
    pub fn is_full(&self) -> bool {
        self.registered >= self.capacity
    }
}

/// Payload for creating a new event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub location: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub capacity: u32,
}

impl EventDraft {
    /// Form-level validation, run before any network call.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        if self.location.trim().is_empty() {
            return Err(ValidationError::MissingField("location"));
        }
        if self.capacity == 0 {
            return Err(ValidationError::ZeroCapacity);
        }
        Ok(())
    }
}

/// Participant details submitted by the registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl RegistrationDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        if self.phone.trim().is_empty() {
            return Err(ValidationError::MissingField("phone"));
        }
        Ok(())
    }
}

/// Returned by the registration endpoint: the event's new registration count.
///
/// Consumers patch this count into their held copy of the event verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationReceipt {
    pub event_id: i64,
    pub registered: u32,
}
