//! Scale-aware temperature value object.
//!
//! A `Temperature` is a decimal value tagged with the scale it was measured
//! in. It can only be constructed at or above absolute zero for its scale, and
//! conversions produce new, independently validated values. All arithmetic is
//! done on `rust_decimal::Decimal` so that conversions round-trip exactly
//! (`20 °C -> 68 °F -> 20 °C`).

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stratus_core::{DomainError, ValueObject};

/// 273.15, the offset between Kelvin and Celsius.
const KELVIN_OFFSET: Decimal = Decimal::from_parts(27315, 0, 0, false, 2);
/// 459.67, the offset between Rankine and Fahrenheit.
const RANKINE_OFFSET: Decimal = Decimal::from_parts(45967, 0, 0, false, 2);
const FREEZING_F: Decimal = Decimal::from_parts(32, 0, 0, false, 0);
const NINE: Decimal = Decimal::from_parts(9, 0, 0, false, 0);
const FIVE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Unit system a temperature value is expressed in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl Scale {
    pub const ALL: [Scale; 3] = [Scale::Celsius, Scale::Fahrenheit, Scale::Kelvin];

    /// Tokens accepted by [`Scale::from_str`] (compared case-insensitively).
    pub const TOKENS: [&'static str; 6] = ["c", "celsius", "f", "fahrenheit", "k", "kelvin"];

    /// Absolute zero expressed in this scale; the inclusive lower bound of any
    /// valid reading.
    pub const fn absolute_zero(self) -> Decimal {
        match self {
            Scale::Celsius => Decimal::from_parts(27315, 0, 0, true, 2),
            Scale::Fahrenheit => Decimal::from_parts(45967, 0, 0, true, 2),
            Scale::Kelvin => Decimal::ZERO,
        }
    }

    /// Lowercase long name (`"celsius"`), as used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Scale::Celsius => "celsius",
            Scale::Fahrenheit => "fahrenheit",
            Scale::Kelvin => "kelvin",
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Scale::Celsius => "°C",
            Scale::Fahrenheit => "°F",
            Scale::Kelvin => "K",
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scale::Celsius => "Celsius",
            Scale::Fahrenheit => "Fahrenheit",
            Scale::Kelvin => "Kelvin",
        };
        f.write_str(name)
    }
}

impl FromStr for Scale {
    type Err = TemperatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "celsius" => Ok(Scale::Celsius),
            "f" | "fahrenheit" => Ok(Scale::Fahrenheit),
            "k" | "kelvin" => Ok(Scale::Kelvin),
            _ => Err(TemperatureError::UnknownScale(s.to_string())),
        }
    }
}

/// Temperature construction/conversion failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemperatureError {
    #[error(
        "temperature value {value} is below the minimum value for a temperature reading using the {scale} scale"
    )]
    BelowAbsoluteZero { value: Decimal, scale: Scale },

    #[error("converting {value} {from} to {to} exceeds the representable range")]
    Overflow { value: Decimal, from: Scale, to: Scale },

    #[error(
        "'{0}' is not a valid scale; valid values are 'k', 'kelvin', 'f', 'fahrenheit', 'c', 'celsius' (case insensitive)"
    )]
    UnknownScale(String),
}

impl From<TemperatureError> for DomainError {
    fn from(err: TemperatureError) -> Self {
        DomainError::Validation(err.to_string())
    }
}

/// A validated temperature reading.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Temperature {
    value: Decimal,
    scale: Scale,
}

impl ValueObject for Temperature {}

impl Temperature {
    /// Validate and construct. Rejects values below absolute zero for `scale`
    /// (the bound itself is accepted).
    pub fn new(value: Decimal, scale: Scale) -> Result<Self, TemperatureError> {
        if value < scale.absolute_zero() {
            return Err(TemperatureError::BelowAbsoluteZero { value, scale });
        }
        Ok(Self { value, scale })
    }

    pub fn celsius(value: Decimal) -> Result<Self, TemperatureError> {
        Self::new(value, Scale::Celsius)
    }

    pub fn fahrenheit(value: Decimal) -> Result<Self, TemperatureError> {
        Self::new(value, Scale::Fahrenheit)
    }

    pub fn kelvin(value: Decimal) -> Result<Self, TemperatureError> {
        Self::new(value, Scale::Kelvin)
    }

    /// Construct from a raw value and a scale token (`"c"`, `"Fahrenheit"`, ...).
    pub fn from_value(value: Decimal, scale_token: &str) -> Result<Self, TemperatureError> {
        let scale = scale_token.parse::<Scale>()?;
        Self::new(value, scale)
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn to_celsius(&self) -> Result<Self, TemperatureError> {
        let v = self.value;
        let raw = match self.scale {
            Scale::Celsius => return Ok(*self),
            Scale::Fahrenheit => v
                .checked_sub(FREEZING_F)
                .and_then(|d| d.checked_mul(FIVE))
                .and_then(|d| d.checked_div(NINE)),
            Scale::Kelvin => v.checked_sub(KELVIN_OFFSET),
        };
        self.converted(raw, Scale::Celsius)
    }

    pub fn to_fahrenheit(&self) -> Result<Self, TemperatureError> {
        let v = self.value;
        let raw = match self.scale {
            Scale::Celsius => v
                .checked_mul(NINE)
                .and_then(|d| d.checked_div(FIVE))
                .and_then(|d| d.checked_add(FREEZING_F)),
            Scale::Fahrenheit => return Ok(*self),
            Scale::Kelvin => v
                .checked_mul(NINE)
                .and_then(|d| d.checked_div(FIVE))
                .and_then(|d| d.checked_sub(RANKINE_OFFSET)),
        };
        self.converted(raw, Scale::Fahrenheit)
    }

    pub fn to_kelvin(&self) -> Result<Self, TemperatureError> {
        let v = self.value;
        let raw = match self.scale {
            Scale::Celsius => v.checked_add(KELVIN_OFFSET),
            Scale::Fahrenheit => v
                .checked_add(RANKINE_OFFSET)
                .and_then(|d| d.checked_mul(FIVE))
                .and_then(|d| d.checked_div(NINE)),
            Scale::Kelvin => return Ok(*self),
        };
        self.converted(raw, Scale::Kelvin)
    }

    pub fn to_scale(&self, scale: Scale) -> Result<Self, TemperatureError> {
        match scale {
            Scale::Celsius => self.to_celsius(),
            Scale::Fahrenheit => self.to_fahrenheit(),
            Scale::Kelvin => self.to_kelvin(),
        }
    }

    fn converted(&self, raw: Option<Decimal>, to: Scale) -> Result<Self, TemperatureError> {
        let value = raw.ok_or(TemperatureError::Overflow {
            value: self.value,
            from: self.scale,
            to,
        })?;
        Self::new(value, to)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value.normalize(), self.scale.symbol())
    }
}
