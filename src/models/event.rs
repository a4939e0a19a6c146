use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{deserialize_id, deserialize_nullable_string};

/// An event as returned by `GET /events/` and `GET /events/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub description: String,
    /// Display name of the hosting user.
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub host: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub location_text: String,
    pub date_time: DateTime<Utc>,
    pub ticket_capacity: u32,
}

impl Event {
    /// `(latitude, longitude)`.
    pub fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// Body of `POST /events/`. The server assigns `id` and `host`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location_text: String,
    pub date_time: DateTime<Utc>,
    pub ticket_capacity: u32,
}

/// A `NewEvent` field that fails local checks.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required text field is blank.
    MissingField(&'static str),
    /// Coordinates outside the valid range.
    InvalidCoordinates { latitude: f64, longitude: f64 },
    /// Capacity must be positive.
    ZeroCapacity,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField(field) => write!(f, "Missing required field: {}", field),
            ValidationError::InvalidCoordinates {
                latitude,
                longitude,
            } => write!(f, "Invalid coordinates: ({}, {})", latitude, longitude),
            ValidationError::ZeroCapacity => write!(f, "Ticket capacity must be at least 1"),
        }
    }
}

impl std::error::Error for ValidationError {}

impl NewEvent {
    /// Check that every field is filled in before sending.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("location_text", &self.location_text),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(name));
            }
        }

        let lat_ok = self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude);
        let lng_ok = self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude);
        if !lat_ok || !lng_ok {
            return Err(ValidationError::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            });
        }

        if self.ticket_capacity == 0 {
            return Err(ValidationError::ZeroCapacity);
        }

        Ok(())
    }
}
