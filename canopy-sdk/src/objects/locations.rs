//! Community-map location wire types.

use serde::{Deserialize, Serialize};

/// A green-action site shown on the community map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLocation {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Form input for a new map location.
///
/// Coordinates may be left blank; the location board geocodes the name
/// before submitting, so only [`NewLocation`] ever reaches the wire.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocationDraft {
    pub name: String,
    pub description: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationDraft {
    /// Both coordinates present and finite, so no geocoding is needed.
    pub fn has_coordinates(&self) -> bool {
        matches!(
            (self.latitude, self.longitude),
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite()
        )
    }
}

/// Payload actually POSTed once coordinates are known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLocation {
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_coordinate_presence() {
        let mut draft = LocationDraft {
            name: "Riverside nursery".to_string(),
            ..LocationDraft::default()
        };
        assert!(!draft.has_coordinates());

        draft.latitude = Some(3.58);
        assert!(!draft.has_coordinates());

        draft.longitude = Some(98.67);
        assert!(draft.has_coordinates());

        draft.latitude = Some(f64::NAN);
        assert!(!draft.has_coordinates());
    }
}
