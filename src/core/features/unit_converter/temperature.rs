// Temperature scales differ in origin as well as in step size, so they are
// converted with affine maps pivoting through Celsius.

use super::units::{Category, TemperatureUnit};
use super::ConvertError;

const KELVIN_OFFSET: f64 = 273.15;

pub fn to_celsius(value: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => value,
        TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        TemperatureUnit::Kelvin => value - KELVIN_OFFSET,
    }
}

pub fn from_celsius(celsius: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => celsius,
        // Explicit parentheses: (c * 9/5) + 32
        TemperatureUnit::Fahrenheit => (celsius * 9.0 / 5.0) + 32.0,
        TemperatureUnit::Kelvin => celsius + KELVIN_OFFSET,
    }
}

/// Same unit returns the input untouched, without a float round trip.
pub fn convert_temperature(value: f64, from_unit: TemperatureUnit, to_unit: TemperatureUnit) -> f64 {
    if from_unit == to_unit {
        return value;
    }
    from_celsius(to_celsius(value, from_unit), to_unit)
}

/// Name-based entry point. Unrecognized names are an error, never a silent 0.
pub fn convert_temperature_named(value: f64, from_unit: &str, to_unit: &str) -> Result<f64, ConvertError> {
    let unknown = |unit: &str| ConvertError::UnknownUnit {
        category: Category::Temperature,
        unit: unit.to_string(),
    };
    let from = TemperatureUnit::from_id(from_unit).ok_or_else(|| unknown(from_unit))?;
    let to = TemperatureUnit::from_id(to_unit).ok_or_else(|| unknown(to_unit))?;
    Ok(convert_temperature(value, from, to))
}
