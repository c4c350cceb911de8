//! Waste-bank partner wire types.

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A registered waste-bank partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Signup form for a new partner. Address and message are optional free
/// text; the backend stores them as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerSignup {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub message: String,
}

impl PartnerSignup {
    /// Name, email, and phone are required; the rest may be blank.
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
