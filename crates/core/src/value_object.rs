//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are validated once, at construction, and never mutated
/// afterwards. A "changed" value (a temperature converted to another scale,
/// say) is a new instance that went through the same validation.
///
/// - **Value Object**: `Temperature`, `Location` (compared by attributes)
/// - **Entity**: `WeatherForecast` (compared by id)
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
