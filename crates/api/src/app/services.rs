use std::sync::Arc;

use tracing::info;

use stratus_core::DomainResult;
use stratus_infra::store::ForecastRepository;
use stratus_infra::{
    AppConfig, ExperimentalForecastStore, FeatureFlags, ForecastBackend, InMemoryForecastStore,
};
use stratus_weather::ForecastService;

pub type Forecasts = ForecastService<ForecastBackend, ForecastBackend>;

/// Everything the HTTP handlers need, built once at startup.
#[derive(Debug)]
pub struct AppServices {
    pub forecasts: Forecasts,
    pub flags: FeatureFlags,
}

/// Construct both stores, seed them when configured, and wire the backend
/// into the forecast service.
pub fn build_services(config: &AppConfig) -> DomainResult<AppServices> {
    let standard = Arc::new(InMemoryForecastStore::new());
    let experimental = Arc::new(ExperimentalForecastStore::new(
        config.experimental_repository.summary_suffix.clone(),
    ));

    if config.seed_sample_data {
        standard.seed_sample()?;
        experimental.seed_sample()?;
        info!("seeded sample forecast data");
    }

    let backend = ForecastBackend::new(standard, experimental, config.features);

    Ok(AppServices {
        forecasts: ForecastService::new(backend.clone(), backend),
        flags: config.features,
    })
}
