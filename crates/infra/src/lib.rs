//! Infrastructure layer: forecast stores, the flag-aware backend, config.

pub mod backend;
pub mod config;
pub mod store;

pub use backend::ForecastBackend;
pub use config::{AppConfig, ConfigError, ExperimentalRepositorySettings, FeatureFlags};
pub use store::{ExperimentalForecastStore, ForecastRepository, InMemoryForecastStore};
