//! Forecast record storage.
//!
//! Two interchangeable in-memory implementations sit behind
//! [`ForecastRepository`]; which one serves a call is decided by the
//! [`ForecastBackend`](crate::backend::ForecastBackend).

use std::sync::Arc;

use rust_decimal::Decimal;

use stratus_core::{DomainResult, ForecastId, LocationId};
use stratus_weather::{ForecastRecord, LocationRecord};

pub mod experimental;
pub mod in_memory;

pub use experimental::ExperimentalForecastStore;
pub use in_memory::InMemoryForecastStore;

/// Summaries used by the sample data set, coldest first.
pub const SAMPLE_SUMMARIES: [&str; 10] = [
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

/// The record `seed_sample` installs under id 1.
pub fn sample_record() -> ForecastRecord {
    ForecastRecord {
        id: 1,
        location: LocationRecord {
            id: 1,
            latitude: 42.166_679,
            longitude: -83.781_319,
            name: "Saline, MI".to_string(),
        },
        date: "5/29/2020".to_string(),
        summary: SAMPLE_SUMMARIES[4].to_string(),
        temperature_c: Decimal::from(20),
    }
}

/// Synchronous forecast record store.
///
/// Implementations must be safe to share across threads without any external
/// locking by callers.
pub trait ForecastRepository: Send + Sync {
    /// Insert a new record under `max(existing ids) + 1` (or 1 when empty).
    fn create(
        &self,
        location: LocationRecord,
        date: String,
        summary: String,
        temperature_c: Decimal,
    ) -> DomainResult<ForecastRecord>;

    fn get_by_id(&self, id: ForecastId) -> DomainResult<ForecastRecord>;

    /// Last match in id order wins when several records share the pair.
    fn get_by_location_and_date(
        &self,
        location_id: LocationId,
        date: &str,
    ) -> DomainResult<Option<ForecastRecord>>;

    fn list(&self) -> DomainResult<Vec<ForecastRecord>>;

    /// Create-or-replace keyed by `record.id`.
    fn update(&self, record: ForecastRecord) -> DomainResult<ForecastRecord>;

    /// `Ok(false)` when no record had the id.
    fn delete(&self, id: ForecastId) -> DomainResult<bool>;

    /// Install the sample record if id 1 is free. Idempotent.
    fn seed_sample(&self) -> DomainResult<()>;
}

impl<S> ForecastRepository for Arc<S>
where
    S: ForecastRepository + ?Sized,
{
    fn create(
        &self,
        location: LocationRecord,
        date: String,
        summary: String,
        temperature_c: Decimal,
    ) -> DomainResult<ForecastRecord> {
        (**self).create(location, date, summary, temperature_c)
    }

    fn get_by_id(&self, id: ForecastId) -> DomainResult<ForecastRecord> {
        (**self).get_by_id(id)
    }

    fn get_by_location_and_date(
        &self,
        location_id: LocationId,
        date: &str,
    ) -> DomainResult<Option<ForecastRecord>> {
        (**self).get_by_location_and_date(location_id, date)
    }

    fn list(&self) -> DomainResult<Vec<ForecastRecord>> {
        (**self).list()
    }

    fn update(&self, record: ForecastRecord) -> DomainResult<ForecastRecord> {
        (**self).update(record)
    }

    fn delete(&self, id: ForecastId) -> DomainResult<bool> {
        (**self).delete(id)
    }

    fn seed_sample(&self) -> DomainResult<()> {
        (**self).seed_sample()
    }
}
