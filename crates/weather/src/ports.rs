//! Storage-facing ports: the record shapes persisted by a forecast store and
//! the reader/writer capabilities the service consumes.
//!
//! Records are deliberately flat and primitive (plain integer ids, the date as
//! an `M/D/YYYY` string, the temperature as a Celsius decimal). Domain types
//! are rebuilt, and re-validated, on the way out.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stratus_core::{DomainResult, ForecastId, LocationId};

use crate::date::{parse_month_day_year, to_month_day_year};
use crate::forecast::WeatherForecast;
use crate::location::Location;
use crate::temperature::Temperature;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: i32,
    pub latitude: f32,
    pub longitude: f32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub id: i32,
    pub location: LocationRecord,
    /// Always `M/D/YYYY`, no zero padding.
    pub date: String,
    pub summary: String,
    pub temperature_c: Decimal,
}

impl From<&Location> for LocationRecord {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id().get(),
            latitude: location.latitude(),
            longitude: location.longitude(),
            name: location.name().to_string(),
        }
    }
}

impl TryFrom<LocationRecord> for Location {
    type Error = stratus_core::DomainError;

    fn try_from(record: LocationRecord) -> Result<Self, Self::Error> {
        Ok(Location::new(
            LocationId::new(record.id),
            record.latitude,
            record.longitude,
            record.name,
        )?)
    }
}

impl ForecastRecord {
    /// Flatten a domain forecast for storage; the temperature is stored in Celsius.
    pub fn from_forecast(forecast: &WeatherForecast) -> DomainResult<Self> {
        Ok(Self {
            id: forecast.id().get(),
            location: LocationRecord::from(forecast.location()),
            date: to_month_day_year(forecast.date()),
            summary: forecast.summary().to_string(),
            temperature_c: forecast.temperature().to_celsius()?.value(),
        })
    }

    /// Rebuild the domain forecast (temperature in Celsius).
    pub fn into_forecast(self) -> DomainResult<WeatherForecast> {
        let date = parse_month_day_year(&self.date)?;
        let temperature = Temperature::celsius(self.temperature_c)?;
        let location = Location::try_from(self.location)?;
        WeatherForecast::new(
            ForecastId::new(self.id),
            location,
            date,
            temperature,
            self.summary,
        )
    }
}

/// Read side of forecast storage.
#[async_trait]
pub trait ForecastReader: Send + Sync {
    async fn list_forecasts(&self) -> DomainResult<Vec<ForecastRecord>>;

    /// Fails with `DomainError::NotFound` when no record has `id`.
    async fn get_by_id(&self, id: ForecastId) -> DomainResult<ForecastRecord>;

    /// Absence is `Ok(None)`, not an error.
    async fn get_by_location_and_date(
        &self,
        location_id: LocationId,
        date: &str,
    ) -> DomainResult<Option<ForecastRecord>>;
}

/// Write side of forecast storage.
#[async_trait]
pub trait ForecastWriter: Send + Sync {
    /// Persist a new forecast; the store assigns the id.
    async fn create(
        &self,
        location: LocationRecord,
        date: String,
        summary: String,
        temperature_c: Decimal,
    ) -> DomainResult<ForecastRecord>;

    /// Create-or-replace keyed by `record.id`.
    async fn update(&self, record: ForecastRecord) -> DomainResult<ForecastRecord>;

    async fn delete(&self, id: ForecastId) -> DomainResult<bool>;
}

#[async_trait]
impl<T> ForecastReader for Arc<T>
where
    T: ForecastReader + ?Sized,
{
    async fn list_forecasts(&self) -> DomainResult<Vec<ForecastRecord>> {
        (**self).list_forecasts().await
    }

    async fn get_by_id(&self, id: ForecastId) -> DomainResult<ForecastRecord> {
        (**self).get_by_id(id).await
    }

    async fn get_by_location_and_date(
        &self,
        location_id: LocationId,
        date: &str,
    ) -> DomainResult<Option<ForecastRecord>> {
        (**self).get_by_location_and_date(location_id, date).await
    }
}

#[async_trait]
impl<T> ForecastWriter for Arc<T>
where
    T: ForecastWriter + ?Sized,
{
    async fn create(
        &self,
        location: LocationRecord,
        date: String,
        summary: String,
        temperature_c: Decimal,
    ) -> DomainResult<ForecastRecord> {
        (**self).create(location, date, summary, temperature_c).await
    }

    async fn update(&self, record: ForecastRecord) -> DomainResult<ForecastRecord> {
        (**self).update(record).await
    }

    async fn delete(&self, id: ForecastId) -> DomainResult<bool> {
        (**self).delete(id).await
    }
}
