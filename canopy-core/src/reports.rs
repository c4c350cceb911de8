//! Environmental-damage reports: the public feed plus the filing flow.
//!
//! Same shape as the partner directory: a successful submission prepends
//! the stored record rather than refetching the feed.

use tracing::warn;

use canopy_sdk::client::ReportsClient;
use canopy_sdk::objects::reports::{DamageReport, ReportDraft};

use crate::notify::{NotificationChannel, NotificationKind};
use crate::outcome::{LoadPhase, SubmitError};

pub struct ReportDesk {
    client: ReportsClient,
    reports: Vec<DamageReport>,
    phase: LoadPhase,
    notifications: NotificationChannel,
}

impl ReportDesk {
    pub fn new(client: ReportsClient) -> Self {
        Self {
            client,
            reports: Vec::new(),
            phase: LoadPhase::Loading,
            notifications: NotificationChannel::new(),
        }
    }

    pub fn reports(&self) -> &[DamageReport] {
        &self.reports
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn notifications(&self) -> &NotificationChannel {
        &self.notifications
    }

    /// Fetch the report feed.
    pub async fn load(&mut self) {
        match self.client.list().await {
            Ok(reports) => {
                self.reports = reports;
                self.phase = LoadPhase::Ready;
            }
            Err(err) => {
                warn!(error = %err, "failed to load report feed");
                self.phase = LoadPhase::Failed {
                    message: "Could not load the reports. Please try again.".to_string(),
                };
            }
        }
    }

    /// File a report; every field is required. The stored record is
    /// prepended to the feed.
    pub async fn submit(&mut self, draft: ReportDraft) -> Result<(), SubmitError> {
        if let Err(err) = draft.validate() {
            self.notifications
                .notify("Every marked field must be filled in.", NotificationKind::Error);
            return Err(err.into());
        }

        match self.client.submit(&draft).await {
            Ok(report) => {
                self.reports.insert(0, report);
                self.notifications.notify(
                    "Report filed! Thank you for your contribution.",
                    NotificationKind::Success,
                );
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to file report");
                self.notifications.notify(
                    "The report could not be filed. Please try again.",
                    NotificationKind::Error,
                );
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;
    use url::Url;

    use super::*;

    #[tokio::test]
    async fn incomplete_report_is_rejected_before_any_network_call() {
        let base = Url::parse("http://localhost:3001").unwrap();
        let mut desk = ReportDesk::new(ReportsClient::new(base));

        let draft = ReportDraft {
            reporter_name: "Budi".to_string(),
            location: String::new(),
            damage_type: "water pollution".to_string(),
            description: "Oil sheen on the surface".to_string(),
            incident_date: date!(2026 - 07 - 30),
        };
        let result = desk.submit(draft).await;

        assert!(matches!(result, Err(SubmitError::Validation(_))));
        assert!(desk.reports().is_empty());
        assert_eq!(
            desk.notifications().current().unwrap().kind,
            NotificationKind::Error
        );
    }
}
