//! Free-text quantity parsing ("12 ft", "3.5 kilograms", "100°C to kelvin").
//!
//! Lax by intent: the first number/unit pair found anywhere in the text wins.

use once_cell::sync::Lazy;
use regex::Regex;

use super::units::{LengthUnit, TemperatureUnit, Unit, WeightUnit};
use crate::shared::error::{AppError, AppResult};

const ERR_CANNOT_PARSE_UNIT: &str = "Could not parse unit from text";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedQuantity {
    pub value: f64,
    pub unit: Unit,
}

/// Map a unit spelling to its unit (case-insensitive)
pub fn normalize_unit(unit: &str) -> Option<Unit> {
    let unit_lower = unit.trim().to_lowercase();
    let unit = match unit_lower.as_str() {
        // Length
        "m" | "meter" | "meters" | "metre" | "metres" => Unit::Length(LengthUnit::Meters),
        "ft" | "foot" | "feet" | "'" => Unit::Length(LengthUnit::Feet),
        "in" | "inch" | "inches" | "\"" => Unit::Length(LengthUnit::Inches),
        "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => {
            Unit::Length(LengthUnit::Centimeters)
        }
        "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => {
            Unit::Length(LengthUnit::Kilometers)
        }
        "mi" | "mile" | "miles" => Unit::Length(LengthUnit::Miles),
        // Weight
        "kg" | "kgs" | "kilo" | "kilos" | "kilogram" | "kilograms" => {
            Unit::Weight(WeightUnit::Kilograms)
        }
        "lb" | "lbs" | "pound" | "pounds" => Unit::Weight(WeightUnit::Pounds),
        "oz" | "ounce" | "ounces" => Unit::Weight(WeightUnit::Ounces),
        "g" | "gram" | "grams" | "gramme" | "grammes" => Unit::Weight(WeightUnit::Grams),
        "st" | "stone" | "stones" => Unit::Weight(WeightUnit::Stones),
        // Temperature
        "c" | "°c" | "celsius" => Unit::Temperature(TemperatureUnit::Celsius),
        "f" | "°f" | "fahrenheit" => Unit::Temperature(TemperatureUnit::Fahrenheit),
        "k" | "kelvin" | "kelvins" => Unit::Temperature(TemperatureUnit::Kelvin),
        _ => return None,
    };
    Some(unit)
}

// Compile-time constant patterns, so expect cannot fire at runtime
static RE_NUMBER_THEN_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([+-]?\d+(?:\.\d+)?)\s*([a-zA-Z°'"]+)"#)
        .expect("Failed to compile number-then-unit pattern")
});

static RE_UNIT_THEN_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([a-zA-Z°'"]+)\s*([+-]?\d+(?:\.\d+)?)"#)
        .expect("Failed to compile unit-then-number pattern")
});

static RE_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([+-]?\d+(?:\.\d+)?)").expect("Failed to compile number pattern")
});

// Longest first so "kilometers" is not read as "meters"
const SPELLED_OUT: [(&str, Unit); 15] = [
    ("centimeters", Unit::Length(LengthUnit::Centimeters)),
    ("kilometers", Unit::Length(LengthUnit::Kilometers)),
    ("fahrenheit", Unit::Temperature(TemperatureUnit::Fahrenheit)),
    ("kilograms", Unit::Weight(WeightUnit::Kilograms)),
    ("celsius", Unit::Temperature(TemperatureUnit::Celsius)),
    ("ounces", Unit::Weight(WeightUnit::Ounces)),
    ("pounds", Unit::Weight(WeightUnit::Pounds)),
    ("inches", Unit::Length(LengthUnit::Inches)),
    ("kelvin", Unit::Temperature(TemperatureUnit::Kelvin)),
    ("meters", Unit::Length(LengthUnit::Meters)),
    ("stones", Unit::Weight(WeightUnit::Stones)),
    ("grams", Unit::Weight(WeightUnit::Grams)),
    ("miles", Unit::Length(LengthUnit::Miles)),
    ("feet", Unit::Length(LengthUnit::Feet)),
    ("foot", Unit::Length(LengthUnit::Feet)),
];

pub fn parse_quantity(text: &str) -> AppResult<ParsedQuantity> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("Empty text".to_string()));
    }

    // Comma decimal separators
    let normalized = text.replace(',', ".");

    if let Some(caps) = RE_NUMBER_THEN_UNIT.captures(&normalized) {
        if let (Ok(value), Some(unit)) = (caps[1].parse::<f64>(), normalize_unit(&caps[2])) {
            log::debug!("[UnitConverter] Parsed {} {} from '{}'", value, unit, text);
            return Ok(ParsedQuantity { value, unit });
        }
    }

    if let Some(caps) = RE_UNIT_THEN_NUMBER.captures(&normalized) {
        if let (Some(unit), Ok(value)) = (normalize_unit(&caps[1]), caps[2].parse::<f64>()) {
            log::debug!("[UnitConverter] Parsed {} {} from '{}'", value, unit, text);
            return Ok(ParsedQuantity { value, unit });
        }
    }

    if let Some(caps) = RE_NUMBER.captures(&normalized) {
        if let Ok(value) = caps[1].parse::<f64>() {
            let lower = normalized.to_lowercase();
            if let Some((_, unit)) = SPELLED_OUT.iter().find(|(name, _)| lower.contains(name)) {
                log::debug!("[UnitConverter] Parsed {} {} from '{}'", value, unit, text);
                return Ok(ParsedQuantity { value, unit: *unit });
            }
        }
    }

    log::debug!("[UnitConverter] Failed to parse quantity: '{}'", text);
    Err(AppError::Validation(format!("{}: {}", ERR_CANNOT_PARSE_UNIT, text)))
}
