//! Environmental-damage report wire types.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use super::ValidationError;

/// A filed environmental-damage report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageReport {
    pub id: i64,
    pub reporter_name: String,
    pub location: String,
    pub damage_type: String,
    pub description: String,
    /// Day the damage was observed, `YYYY-MM-DD` on the wire.
    pub incident_date: Date,
    /// When the report was filed, assigned by the backend.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Form payload for filing a new report. Every field is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDraft {
    pub reporter_name: String,
    pub location: String,
    pub damage_type: String,
    pub description: String,
    pub incident_date: Date,
}

impl ReportDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.reporter_name.trim().is_empty() {
            return Err(ValidationError::MissingField("reporter name"));
        }
        if self.location.trim().is_empty() {
            return Err(ValidationError::MissingField("location"));
        }
        if self.damage_type.trim().is_empty() {
            return Err(ValidationError::MissingField("damage type"));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingField("description"));
        }
        Ok(())
    }
}
