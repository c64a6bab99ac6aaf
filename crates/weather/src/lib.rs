//! Weather forecast domain.
//!
//! - Value objects: [`Temperature`] (with exact decimal scale conversions) and
//!   [`Location`]
//! - Aggregate: [`WeatherForecast`]
//! - Storage ports: [`ForecastReader`] / [`ForecastWriter`] over flat
//!   [`ForecastRecord`]s
//! - Application service: [`ForecastService`]
//!
//! This crate performs no IO. Stores live in `stratus-infra`.

pub mod date;
pub mod forecast;
pub mod location;
pub mod ports;
pub mod service;
pub mod temperature;

pub use forecast::{MAX_SUMMARY_LEN, WeatherForecast};
pub use location::{Location, LocationError};
pub use ports::{ForecastReader, ForecastRecord, ForecastWriter, LocationRecord};
pub use service::ForecastService;
pub use temperature::{Scale, Temperature, TemperatureError};
