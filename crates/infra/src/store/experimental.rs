use rust_decimal::Decimal;

use stratus_core::{DomainError, DomainResult, ForecastId, LocationId};
use stratus_weather::forecast::validate_summary;
use stratus_weather::location::MAX_NAME_LEN;
use stratus_weather::{ForecastRecord, LocationRecord};

use super::{ForecastRepository, InMemoryForecastStore, sample_record};

/// Drop-in alternative to [`InMemoryForecastStore`] that marks every summary
/// it writes with a configured suffix, so records from the two stores can be
/// told apart.
#[derive(Debug)]
pub struct ExperimentalForecastStore {
    inner: InMemoryForecastStore,
    suffix: String,
}

impl ExperimentalForecastStore {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            inner: InMemoryForecastStore::new(),
            suffix: suffix.into(),
        }
    }

    /// `summary` with the suffix appended, validated as a stored summary.
    fn marked_summary(&self, summary: &str) -> DomainResult<String> {
        let marked = format!("{summary}{}", self.suffix);
        validate_summary(&marked)?;
        Ok(marked)
    }
}

impl ForecastRepository for ExperimentalForecastStore {
    fn create(
        &self,
        location: LocationRecord,
        date: String,
        summary: String,
        temperature_c: Decimal,
    ) -> DomainResult<ForecastRecord> {
        let summary = self.marked_summary(&summary)?;
        self.inner.create(location, date, summary, temperature_c)
    }

    fn get_by_id(&self, id: ForecastId) -> DomainResult<ForecastRecord> {
        self.inner.get_by_id(id)
    }

    fn get_by_location_and_date(
        &self,
        location_id: LocationId,
        date: &str,
    ) -> DomainResult<Option<ForecastRecord>> {
        self.inner.get_by_location_and_date(location_id, date)
    }

    fn list(&self) -> DomainResult<Vec<ForecastRecord>> {
        self.inner.list()
    }

    fn update(&self, mut record: ForecastRecord) -> DomainResult<ForecastRecord> {
        record.summary = self.marked_summary(&record.summary)?;
        self.inner.update(record)
    }

    fn delete(&self, id: ForecastId) -> DomainResult<bool> {
        self.inner.delete(id)
    }

    /// The sample's location name, not its summary, carries the suffix.
    fn seed_sample(&self) -> DomainResult<()> {
        let mut record = sample_record();
        record.location.name.push_str(&self.suffix);
        let len = record.location.name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(DomainError::validation(format!(
                "seeded location name must be at most {MAX_NAME_LEN} characters, but found {len}"
            )));
        }
        self.inner.insert_if_absent(record)?;
        Ok(())
    }
}
