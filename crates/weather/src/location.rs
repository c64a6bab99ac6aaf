//! Geographic location value object.

use serde::Serialize;
use thiserror::Error;

use stratus_core::{DomainError, LocationId, ValueObject};

pub const MIN_LATITUDE: f32 = -90.0;
pub const MAX_LATITUDE: f32 = 90.0;
pub const MIN_LONGITUDE: f32 = -180.0;
pub const MAX_LONGITUDE: f32 = 180.0;
pub const MAX_NAME_LEN: usize = 1000;

/// Location construction failure; one variant per violated constraint.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LocationError {
    #[error("location id must be a non-negative integer, but found {0}")]
    NegativeId(i32),

    #[error("latitude must be between -90 and 90 degrees, but found {0}")]
    LatitudeOutOfRange(f32),

    #[error("longitude must be between -180 and 180 degrees, but found {0}")]
    LongitudeOutOfRange(f32),

    #[error("location name cannot be empty")]
    EmptyName,

    #[error("location name must be at most 1000 characters, but found {0}")]
    NameTooLong(usize),
}

impl From<LocationError> for DomainError {
    fn from(err: LocationError) -> Self {
        DomainError::Validation(err.to_string())
    }
}

/// A named point on the globe. Bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    id: LocationId,
    latitude: f32,
    longitude: f32,
    name: String,
}

impl ValueObject for Location {}

impl Location {
    pub fn new(
        id: LocationId,
        latitude: f32,
        longitude: f32,
        name: impl Into<String>,
    ) -> Result<Self, LocationError> {
        let name = name.into();

        if id.get() < 0 {
            return Err(LocationError::NegativeId(id.get()));
        }
        // `contains` is false for NaN, so NaN coordinates are rejected too.
        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
            return Err(LocationError::LatitudeOutOfRange(latitude));
        }
        if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
            return Err(LocationError::LongitudeOutOfRange(longitude));
        }
        if name.is_empty() {
            return Err(LocationError::EmptyName);
        }
        let len = name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(LocationError::NameTooLong(len));
        }

        Ok(Self {
            id,
            latitude,
            longitude,
            name,
        })
    }

    pub fn id(&self) -> LocationId {
        self.id
    }

    pub fn latitude(&self) -> f32 {
        self.latitude
    }

    pub fn longitude(&self) -> f32 {
        self.longitude
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
