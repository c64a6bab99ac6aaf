//! Flag-aware storage backend.
//!
//! `ForecastBackend` is what the forecast service talks to. It rejects
//! malformed requests before they reach storage, enforces the
//! by-date feature flag, and routes each call to the standard or the
//! experimental store according to [`FeatureFlags`].

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use stratus_core::{DomainError, DomainResult, ForecastId, LocationId};
use stratus_weather::{ForecastReader, ForecastRecord, ForecastWriter, LocationRecord};

use crate::config::FeatureFlags;
use crate::store::ForecastRepository;

pub const GET_FORECAST_BY_DATE_FEATURE: &str = "allow_get_forecast_by_date";

#[derive(Clone)]
pub struct ForecastBackend {
    standard: Arc<dyn ForecastRepository>,
    experimental: Arc<dyn ForecastRepository>,
    flags: FeatureFlags,
}

impl std::fmt::Debug for ForecastBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastBackend")
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl ForecastBackend {
    pub fn new(
        standard: Arc<dyn ForecastRepository>,
        experimental: Arc<dyn ForecastRepository>,
        flags: FeatureFlags,
    ) -> Self {
        Self {
            standard,
            experimental,
            flags,
        }
    }

    /// The store serving the current call.
    fn repository(&self) -> &dyn ForecastRepository {
        if self.flags.use_experimental_repository {
            debug!(repository = "experimental", "selected forecast repository");
            self.experimental.as_ref()
        } else {
            debug!(repository = "standard", "selected forecast repository");
            self.standard.as_ref()
        }
    }
}

fn require_positive(what: &str, id: i32) -> DomainResult<()> {
    if id > 0 {
        Ok(())
    } else {
        Err(DomainError::invalid_request(format!(
            "{what} must be a positive integer, but found {id}"
        )))
    }
}

fn require_date(date: &str) -> DomainResult<()> {
    if date.trim().is_empty() {
        Err(DomainError::invalid_request("date is required"))
    } else {
        Ok(())
    }
}

#[async_trait]
impl ForecastReader for ForecastBackend {
    #[instrument(skip(self), err)]
    async fn list_forecasts(&self) -> DomainResult<Vec<ForecastRecord>> {
        self.repository().list()
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&self, id: ForecastId) -> DomainResult<ForecastRecord> {
        require_positive("forecast id", id.get())?;
        self.repository().get_by_id(id)
    }

    #[instrument(skip(self), err)]
    async fn get_by_location_and_date(
        &self,
        location_id: LocationId,
        date: &str,
    ) -> DomainResult<Option<ForecastRecord>> {
        if !self.flags.allow_get_forecast_by_date {
            return Err(DomainError::FeatureDisabled(GET_FORECAST_BY_DATE_FEATURE));
        }
        require_positive("location id", location_id.get())?;
        require_date(date)?;
        self.repository().get_by_location_and_date(location_id, date)
    }
}

#[async_trait]
impl ForecastWriter for ForecastBackend {
    #[instrument(skip(self, location, summary), fields(location_id = location.id), err)]
    async fn create(
        &self,
        location: LocationRecord,
        date: String,
        summary: String,
        temperature_c: Decimal,
    ) -> DomainResult<ForecastRecord> {
        require_positive("location id", location.id)?;
        require_date(&date)?;
        self.repository().create(location, date, summary, temperature_c)
    }

    #[instrument(skip(self, record), fields(forecast_id = record.id), err)]
    async fn update(&self, record: ForecastRecord) -> DomainResult<ForecastRecord> {
        require_positive("forecast id", record.id)?;
        require_date(&record.date)?;
        require_positive("location id", record.location.id)?;
        self.repository().update(record)
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: ForecastId) -> DomainResult<bool> {
        require_positive("forecast id", id.get())?;
        self.repository().delete(id)
    }
}
