use std::collections::BTreeMap;
use std::sync::RwLock;

use rust_decimal::Decimal;
use tracing::warn;

use stratus_core::{DomainError, DomainResult, ForecastId, LocationId};
use stratus_weather::{ForecastRecord, LocationRecord};

use super::{ForecastRepository, sample_record};

/// In-memory forecast store.
///
/// Records are keyed by id in a `BTreeMap`, so scans run in ascending id
/// order. Each instance owns its map; nothing is shared between instances.
#[derive(Debug, Default)]
pub struct InMemoryForecastStore {
    records: RwLock<BTreeMap<i32, ForecastRecord>>,
}

impl InMemoryForecastStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record` unless its id is already taken. Returns whether it was
    /// inserted.
    pub(crate) fn insert_if_absent(&self, record: ForecastRecord) -> DomainResult<bool> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        if records.contains_key(&record.id) {
            return Ok(false);
        }
        records.insert(record.id, record);
        Ok(true)
    }

    fn next_id(records: &BTreeMap<i32, ForecastRecord>) -> DomainResult<i32> {
        match records.keys().next_back() {
            None => Ok(1),
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| DomainError::storage("forecast id space exhausted")),
        }
    }
}

fn poisoned() -> DomainError {
    DomainError::storage("lock poisoned")
}

impl ForecastRepository for InMemoryForecastStore {
    fn create(
        &self,
        location: LocationRecord,
        date: String,
        summary: String,
        temperature_c: Decimal,
    ) -> DomainResult<ForecastRecord> {
        // Id assignment and insertion share one write guard.
        let mut records = self.records.write().map_err(|_| poisoned())?;
        let id = Self::next_id(&records)?;
        let record = ForecastRecord {
            id,
            location,
            date,
            summary,
            temperature_c,
        };
        records.insert(id, record.clone());
        Ok(record)
    }

    fn get_by_id(&self, id: ForecastId) -> DomainResult<ForecastRecord> {
        let records = self.records.read().map_err(|_| poisoned())?;
        records
            .get(&id.get())
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("forecast with id {id} does not exist")))
    }

    fn get_by_location_and_date(
        &self,
        location_id: LocationId,
        date: &str,
    ) -> DomainResult<Option<ForecastRecord>> {
        let records = self.records.read().map_err(|_| poisoned())?;
        let mut found = None;
        for record in records.values() {
            if record.location.id == location_id.get() && record.date == date {
                found = Some(record);
            }
        }
        Ok(found.cloned())
    }

    fn list(&self) -> DomainResult<Vec<ForecastRecord>> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.values().cloned().collect())
    }

    fn update(&self, record: ForecastRecord) -> DomainResult<ForecastRecord> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        if records.insert(record.id, record.clone()).is_none() {
            warn!(forecast_id = record.id, "update created a previously unknown forecast");
        }
        Ok(record)
    }

    fn delete(&self, id: ForecastId) -> DomainResult<bool> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        Ok(records.remove(&id.get()).is_some())
    }

    fn seed_sample(&self) -> DomainResult<()> {
        self.insert_if_absent(sample_record())?;
        Ok(())
    }
}
