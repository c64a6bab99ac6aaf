use axum::http::StatusCode;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stratus_core::{DomainResult, ForecastId, LocationId};
use stratus_weather::{Location, Scale, Temperature, WeatherForecast};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct LocationRequest {
    pub id: i32,
    pub latitude: f32,
    pub longitude: f32,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateForecastRequest {
    pub location: LocationRequest,
    pub date: NaiveDate,
    pub temperature: Decimal,
    pub scale: String,
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateForecastRequest {
    pub id: i32,
    pub location: LocationRequest,
    pub date: NaiveDate,
    pub temperature: Decimal,
    pub scale: String,
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct ForecastByDateQuery {
    pub location_id: i32,
    pub date: NaiveDate,
}

impl LocationRequest {
    pub fn into_location(self) -> DomainResult<Location> {
        Ok(Location::new(
            LocationId::new(self.id),
            self.latitude,
            self.longitude,
            self.name,
        )?)
    }
}

impl UpdateForecastRequest {
    pub fn into_forecast(self) -> DomainResult<WeatherForecast> {
        let temperature = Temperature::from_value(self.temperature, &self.scale)?;
        WeatherForecast::new(
            ForecastId::new(self.id),
            self.location.into_location()?,
            self.date,
            temperature,
            self.summary,
        )
    }
}

/// Reject unknown scale tokens at the edge with a dedicated error code.
pub fn check_scale(token: &str) -> Result<(), axum::response::Response> {
    let normalized = token.trim().to_ascii_lowercase();
    if Scale::TOKENS.iter().any(|t| *t == normalized) {
        Ok(())
    } else {
        Err(errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_scale",
            "scale must be one of: c, celsius, f, fahrenheit, k, kelvin",
        ))
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, Serialize)]
pub struct LocationView {
    pub id: i32,
    pub latitude: f32,
    pub longitude: f32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastView {
    pub id: i32,
    pub summary: String,
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub temperature: Decimal,
    pub scale: Scale,
    pub location: LocationView,
}

impl From<&Location> for LocationView {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id().get(),
            latitude: location.latitude(),
            longitude: location.longitude(),
            name: location.name().to_string(),
        }
    }
}

impl From<&WeatherForecast> for ForecastView {
    fn from(forecast: &WeatherForecast) -> Self {
        let temperature = forecast.temperature();
        Self {
            id: forecast.id().get(),
            summary: forecast.summary().to_string(),
            date: forecast.date(),
            temperature: temperature.value().normalize(),
            scale: temperature.scale(),
            location: LocationView::from(forecast.location()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub forecast: ForecastView,
}

#[derive(Debug, Serialize)]
pub struct ForecastListResponse {
    pub weather_forecasts: Vec<ForecastView>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

impl ForecastResponse {
    pub fn new(forecast: &WeatherForecast) -> Self {
        Self {
            forecast: ForecastView::from(forecast),
        }
    }
}
