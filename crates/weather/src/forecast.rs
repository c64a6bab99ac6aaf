//! WeatherForecast aggregate.

use chrono::NaiveDate;
use serde::Serialize;

use stratus_core::{DomainError, DomainResult, Entity, ForecastId};

use crate::location::Location;
use crate::temperature::{Scale, Temperature};

pub const MAX_SUMMARY_LEN: usize = 1000;

/// A forecast for one location on one calendar day.
///
/// The aggregate owns its `Location` and `Temperature`; updates replace the
/// whole record, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherForecast {
    id: ForecastId,
    location: Location,
    date: NaiveDate,
    temperature: Temperature,
    summary: String,
}

impl Entity for WeatherForecast {
    type Id = ForecastId;

    fn id(&self) -> ForecastId {
        self.id
    }
}

impl WeatherForecast {
    pub fn new(
        id: ForecastId,
        location: Location,
        date: NaiveDate,
        temperature: Temperature,
        summary: impl Into<String>,
    ) -> DomainResult<Self> {
        let summary = summary.into();
        validate_summary(&summary)?;
        Ok(Self {
            id,
            location,
            date,
            temperature,
            summary,
        })
    }

    pub fn id(&self) -> ForecastId {
        self.id
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// The forecast temperature expressed in `scale`.
    pub fn temperature_in(&self, scale: Scale) -> DomainResult<Temperature> {
        Ok(self.temperature.to_scale(scale)?)
    }

    /// Re-check every invariant of the aggregate, including those of the
    /// owned value objects, before a full replace is persisted.
    pub fn validate(&self) -> DomainResult<()> {
        if !self.id.is_positive() {
            return Err(DomainError::invalid_request(format!(
                "forecast id must be a positive integer, but found {}",
                self.id
            )));
        }
        validate_summary(&self.summary)?;

        let loc = &self.location;
        Location::new(loc.id(), loc.latitude(), loc.longitude(), loc.name())?;
        Temperature::new(self.temperature.value(), self.temperature.scale())?;

        Ok(())
    }
}

/// Summaries are required and bounded to 1..=1000 characters.
pub fn validate_summary(summary: &str) -> DomainResult<()> {
    if summary.is_empty() {
        return Err(DomainError::validation("summary cannot be empty"));
    }
    let len = summary.chars().count();
    if len > MAX_SUMMARY_LEN {
        return Err(DomainError::validation(format!(
            "summary must be at most {MAX_SUMMARY_LEN} characters, but found {len}"
        )));
    }
    Ok(())
}
