//! Scale factors relative to each category's canonical unit.
//!
//! A factor answers "how many of this unit make one canonical unit"
//! (meters for length, kilograms for weight). Temperature has no entry here:
//! its scales differ in origin, see `temperature`.

use super::units::{Category, LengthUnit, Unit, WeightUnit};
use super::ConvertError;

pub fn length_factor(unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Meters => 1.0,
        LengthUnit::Feet => 3.28084,
        LengthUnit::Inches => 39.3701,
        LengthUnit::Centimeters => 100.0,
        LengthUnit::Kilometers => 0.001,
        LengthUnit::Miles => 0.000621371,
    }
}

pub fn weight_factor(unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Kilograms => 1.0,
        WeightUnit::Pounds => 2.20462,
        WeightUnit::Ounces => 35.274,
        WeightUnit::Grams => 1000.0,
        WeightUnit::Stones => 0.157473,
    }
}

/// Canonical unit of a table-backed category
pub fn canonical_unit(category: Category) -> Option<Unit> {
    match category {
        Category::Length => Some(Unit::Length(LengthUnit::Meters)),
        Category::Weight => Some(Unit::Weight(WeightUnit::Kilograms)),
        Category::Temperature => None,
    }
}

/// Look up the factor of `unit` under `category`.
///
/// Fails with `UnknownUnit` when the unit is not registered under the
/// category, which includes every temperature unit.
pub fn factor_for(category: Category, unit: Unit) -> Result<f64, ConvertError> {
    match (category, unit) {
        (Category::Length, Unit::Length(unit)) => Ok(length_factor(unit)),
        (Category::Weight, Unit::Weight(unit)) => Ok(weight_factor(unit)),
        _ => Err(ConvertError::UnknownUnit {
            category,
            unit: unit.id().to_string(),
        }),
    }
}

/// String-keyed variant of `factor_for` for boundary callers
pub fn factor_for_id(category: Category, unit: &str) -> Result<f64, ConvertError> {
    factor_for(category, Unit::parse(category, unit)?)
}
