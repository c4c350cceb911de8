//! Community map locations, with geocoding fallback on submission.
//!
//! Adding a location is one linear sequence: resolve coordinates (querying
//! the geocoding service when the form left them blank), then submit. No
//! retries, no backoff, no concurrent requests. Progress is reported
//! through the notification channel with a shorter window than the other
//! flows; failures stay visible until the next attempt.

use std::time::Duration;

use tracing::warn;

use canopy_sdk::client::{ClientError, GeoPoint, GeocodeClient, LocationsClient};
use canopy_sdk::objects::ValidationError;
use canopy_sdk::objects::locations::{LocationDraft, MapLocation, NewLocation};

use crate::notify::{NotificationChannel, NotificationKind};
use crate::outcome::{LoadPhase, SubmitError};

/// Status window for map submissions.
const STATUS_TTL: Duration = Duration::from_secs(3);

pub struct LocationBoard {
    client: LocationsClient,
    geocoder: GeocodeClient,
    locations: Vec<MapLocation>,
    phase: LoadPhase,
    notifications: NotificationChannel,
}

impl LocationBoard {
    pub fn new(client: LocationsClient, geocoder: GeocodeClient) -> Self {
        Self {
            client,
            geocoder,
            locations: Vec::new(),
            phase: LoadPhase::Loading,
            notifications: NotificationChannel::with_ttl(STATUS_TTL),
        }
    }

    pub fn locations(&self) -> &[MapLocation] {
        &self.locations
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn notifications(&self) -> &NotificationChannel {
        &self.notifications
    }

    /// Fetch the sites shown on the map.
    pub async fn load(&mut self) {
        match self.client.list().await {
            Ok(locations) => {
                self.locations = locations;
                self.phase = LoadPhase::Ready;
            }
            Err(err) => {
                warn!(error = %err, "failed to load map locations");
                self.phase = LoadPhase::Failed {
                    message: "Could not load the map locations. Please try again.".to_string(),
                };
            }
        }
    }

    /// Submit a new location, geocoding the name first when the form left
    /// the coordinates blank (or unusable).
    pub async fn add_location(&mut self, draft: LocationDraft) -> Result<MapLocation, SubmitError> {
        let point = match (draft.latitude, draft.longitude) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => GeoPoint {
                latitude: lat,
                longitude: lon,
            },
            _ => self.resolve_coordinates(&draft.name).await?,
        };

        self.notifications
            .notify("Submitting location…", NotificationKind::Info);

        let record = NewLocation {
            name: draft.name,
            description: draft.description,
            latitude: point.latitude,
            longitude: point.longitude,
        };

        match self.client.create(&record).await {
            Ok(created) => {
                self.locations.insert(0, created.clone());
                self.notifications
                    .notify("Location added!", NotificationKind::Success);
                Ok(created)
            }
            Err(err) => {
                warn!(error = %err, "failed to add map location");
                self.notifications
                    .notify_sticky(add_failure_message(&err), NotificationKind::Error);
                Err(err.into())
            }
        }
    }

    /// Resolve a place name to coordinates via the geocoding service.
    async fn resolve_coordinates(&mut self, name: &str) -> Result<GeoPoint, SubmitError> {
        if name.trim().is_empty() {
            self.notifications.notify_sticky(
                "A location name is required for automatic geocoding.",
                NotificationKind::Error,
            );
            return Err(ValidationError::MissingField("name").into());
        }

        self.notifications
            .notify("Looking up coordinates…", NotificationKind::Info);

        match self.geocoder.search(name).await {
            Ok(Some(point)) => Ok(point),
            Ok(None) => {
                self.notifications.notify_sticky(
                    "Location not found. Try a more specific name.",
                    NotificationKind::Error,
                );
                Err(SubmitError::GeocodeMiss)
            }
            Err(err) => {
                warn!(error = %err, "geocoding lookup failed");
                self.notifications
                    .notify_sticky(add_failure_message(&err), NotificationKind::Error);
                Err(err.into())
            }
        }
    }
}

fn add_failure_message(err: &ClientError) -> String {
    match err {
        ClientError::Api { message, .. } => format!("Failed: {message}"),
        _ => "Could not add the location. Please try again.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;

    fn board() -> LocationBoard {
        let base = Url::parse("http://localhost:3001").unwrap();
        let geo = Url::parse("https://nominatim.openstreetmap.org").unwrap();
        LocationBoard::new(LocationsClient::new(base), GeocodeClient::new(geo))
    }

    #[tokio::test]
    async fn blank_name_without_coordinates_is_rejected_locally() {
        let mut board = board();

        let draft = LocationDraft {
            name: "  ".to_string(),
            description: "Community nursery".to_string(),
            latitude: None,
            longitude: None,
        };
        let result = board.add_location(draft).await;

        assert!(matches!(result, Err(SubmitError::Validation(_))));
        let note = board.notifications().current().unwrap();
        assert_eq!(note.kind, NotificationKind::Error);
        assert!(board.locations().is_empty());
    }

    #[tokio::test]
    async fn partial_coordinates_still_require_a_name() {
        let mut board = board();

        let draft = LocationDraft {
            name: String::new(),
            description: String::new(),
            latitude: Some(3.58),
            longitude: None,
        };
        let result = board.add_location(draft).await;

        assert!(matches!(result, Err(SubmitError::Validation(_))));
    }
}
