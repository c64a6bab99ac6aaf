//! Forecast application service.
//!
//! Validates and converts on the way in (every temperature is persisted in
//! Celsius, every date as `M/D/YYYY`), delegates to the injected reader and
//! writer, and rebuilds domain values on the way out.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use stratus_core::{DomainError, DomainResult, ForecastId, LocationId};

use crate::date::to_month_day_year;
use crate::forecast::{WeatherForecast, validate_summary};
use crate::location::Location;
use crate::ports::{ForecastReader, ForecastRecord, ForecastWriter, LocationRecord};
use crate::temperature::Temperature;

#[derive(Debug, Clone)]
pub struct ForecastService<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> ForecastService<R, W>
where
    R: ForecastReader,
    W: ForecastWriter,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    #[instrument(skip(self, location, summary), fields(location_id = %location.id()), err)]
    pub async fn create_forecast(
        &self,
        location: Location,
        date: NaiveDate,
        temperature: Decimal,
        scale_token: &str,
        summary: &str,
    ) -> DomainResult<WeatherForecast> {
        let celsius = Temperature::from_value(temperature, scale_token)?.to_celsius()?;
        validate_summary(summary)?;

        let record = self
            .writer
            .create(
                LocationRecord::from(&location),
                to_month_day_year(date),
                summary.to_string(),
                celsius.value(),
            )
            .await?;

        info!(forecast_id = record.id, "forecast created");
        record.into_forecast()
    }

    #[instrument(skip(self), err)]
    pub async fn get_forecast_for_date(
        &self,
        location_id: LocationId,
        date: NaiveDate,
    ) -> DomainResult<Option<WeatherForecast>> {
        let found = self
            .reader
            .get_by_location_and_date(location_id, &to_month_day_year(date))
            .await?;

        debug!(found = found.is_some(), "forecast lookup by date");
        found.map(ForecastRecord::into_forecast).transpose()
    }

    #[instrument(skip(self), err)]
    pub async fn get_forecast_by_id(&self, id: ForecastId) -> DomainResult<WeatherForecast> {
        require_positive(id)?;
        self.reader.get_by_id(id).await?.into_forecast()
    }

    pub async fn list_forecasts(&self) -> DomainResult<Vec<WeatherForecast>> {
        self.reader
            .list_forecasts()
            .await?
            .into_iter()
            .map(ForecastRecord::into_forecast)
            .collect()
    }

    /// Full replace keyed by the forecast id; creates the record if it does
    /// not exist yet.
    #[instrument(skip(self, forecast), fields(forecast_id = %forecast.id()), err)]
    pub async fn update_forecast(
        &self,
        forecast: WeatherForecast,
    ) -> DomainResult<WeatherForecast> {
        forecast.validate()?;
        let record = ForecastRecord::from_forecast(&forecast)?;
        let stored = self.writer.update(record).await?;
        info!("forecast updated");
        stored.into_forecast()
    }

    #[instrument(skip(self), err)]
    pub async fn delete_forecast(&self, id: ForecastId) -> DomainResult<bool> {
        require_positive(id)?;
        let deleted = self.writer.delete(id).await?;
        info!(deleted, "forecast delete");
        Ok(deleted)
    }
}

fn require_positive(id: ForecastId) -> DomainResult<()> {
    if id.is_positive() {
        Ok(())
    } else {
        Err(DomainError::invalid_request(format!(
            "forecast id must be a positive integer, but found {id}"
        )))
    }
}
