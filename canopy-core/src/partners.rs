//! Waste-bank partner directory: the public list plus the signup flow.
//!
//! Unlike the event board, a successful signup inserts the stored record at
//! the top of the held list instead of refetching.

use tracing::warn;

use canopy_sdk::client::{ClientError, PartnersClient};
use canopy_sdk::objects::partners::{Partner, PartnerSignup};

use crate::notify::{NotificationChannel, NotificationKind};
use crate::outcome::{LoadPhase, SubmitError};

pub struct PartnerDirectory {
    client: PartnersClient,
    partners: Vec<Partner>,
    phase: LoadPhase,
    notifications: NotificationChannel,
}

impl PartnerDirectory {
    pub fn new(client: PartnersClient) -> Self {
        Self {
            client,
            partners: Vec::new(),
            phase: LoadPhase::Loading,
            notifications: NotificationChannel::new(),
        }
    }

    pub fn partners(&self) -> &[Partner] {
        &self.partners
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn notifications(&self) -> &NotificationChannel {
        &self.notifications
    }

    /// Fetch the partner list.
    pub async fn load(&mut self) {
        match self.client.list().await {
            Ok(partners) => {
                self.partners = partners;
                self.phase = LoadPhase::Ready;
            }
            Err(err) => {
                warn!(error = %err, "failed to load partner list");
                self.phase = LoadPhase::Failed {
                    message: "Could not load the partner list. Please try again.".to_string(),
                };
            }
        }
    }

    /// Submit a signup; the created partner is prepended to the list.
    pub async fn submit_signup(&mut self, signup: PartnerSignup) -> Result<(), SubmitError> {
        if let Err(err) = signup.validate() {
            self.notifications.notify(
                "Name, email, and phone number are required.",
                NotificationKind::Error,
            );
            return Err(err.into());
        }

        match self.client.signup(&signup).await {
            Ok(partner) => {
                self.partners.insert(0, partner);
                self.notifications
                    .notify("Signup submitted!", NotificationKind::Success);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to submit partner signup");
                self.notifications
                    .notify(signup_failure_message(&err), NotificationKind::Error);
                Err(err.into())
            }
        }
    }
}

fn signup_failure_message(err: &ClientError) -> String {
    match err {
        ClientError::Api { message, .. } => format!("Signup failed: {message}"),
        _ => "Something went wrong. Please try again.".to_string(),
    }
}
