//! Categories and units known to the converter.
//!
//! Units are a closed tagged union: every `Unit` carries its category, so a
//! length unit can never be handed to the weight converter once it is typed.
//! String ids only exist at the boundary and are resolved per category.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use super::ConvertError;

/// Unit categories, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Category {
    Length,
    Weight,
    Temperature,
}

impl Default for Category {
    fn default() -> Self {
        Category::Length
    }
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Length, Category::Weight, Category::Temperature];

    pub fn id(self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Weight => "weight",
            Category::Temperature => "temperature",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Weight => "Weight",
            Category::Temperature => "Temperature",
        }
    }

    /// Units of this category in display order. The first two are the
    /// default from/to pair.
    pub fn units(self) -> &'static [Unit] {
        match self {
            Category::Length => &LENGTH_UNITS,
            Category::Weight => &WEIGHT_UNITS,
            Category::Temperature => &TEMPERATURE_UNITS,
        }
    }

    pub fn from_id(id: &str) -> Option<Category> {
        let id = id.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.id().eq_ignore_ascii_case(id))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    Meters,
    Feet,
    Inches,
    Centimeters,
    Kilometers,
    Miles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightUnit {
    Kilograms,
    Pounds,
    Ounces,
    Grams,
    Stones,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Length(LengthUnit),
    Weight(WeightUnit),
    Temperature(TemperatureUnit),
}

const LENGTH_UNITS: [Unit; 6] = [
    Unit::Length(LengthUnit::Meters),
    Unit::Length(LengthUnit::Feet),
    Unit::Length(LengthUnit::Inches),
    Unit::Length(LengthUnit::Centimeters),
    Unit::Length(LengthUnit::Kilometers),
    Unit::Length(LengthUnit::Miles),
];

const WEIGHT_UNITS: [Unit; 5] = [
    Unit::Weight(WeightUnit::Kilograms),
    Unit::Weight(WeightUnit::Pounds),
    Unit::Weight(WeightUnit::Ounces),
    Unit::Weight(WeightUnit::Grams),
    Unit::Weight(WeightUnit::Stones),
];

const TEMPERATURE_UNITS: [Unit; 3] = [
    Unit::Temperature(TemperatureUnit::Celsius),
    Unit::Temperature(TemperatureUnit::Fahrenheit),
    Unit::Temperature(TemperatureUnit::Kelvin),
];

impl TemperatureUnit {
    pub fn id(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
            TemperatureUnit::Kelvin => "kelvin",
        }
    }

    pub fn from_id(id: &str) -> Option<TemperatureUnit> {
        match Unit::parse(Category::Temperature, id) {
            Ok(Unit::Temperature(unit)) => Some(unit),
            _ => None,
        }
    }
}

impl Unit {
    pub fn category(self) -> Category {
        match self {
            Unit::Length(_) => Category::Length,
            Unit::Weight(_) => Category::Weight,
            Unit::Temperature(_) => Category::Temperature,
        }
    }

    /// Stable identifier used at the IPC boundary (e.g. "feet")
    pub fn id(self) -> &'static str {
        match self {
            Unit::Length(unit) => match unit {
                LengthUnit::Meters => "meters",
                LengthUnit::Feet => "feet",
                LengthUnit::Inches => "inches",
                LengthUnit::Centimeters => "centimeters",
                LengthUnit::Kilometers => "kilometers",
                LengthUnit::Miles => "miles",
            },
            Unit::Weight(unit) => match unit {
                WeightUnit::Kilograms => "kilograms",
                WeightUnit::Pounds => "pounds",
                WeightUnit::Ounces => "ounces",
                WeightUnit::Grams => "grams",
                WeightUnit::Stones => "stones",
            },
            Unit::Temperature(unit) => unit.id(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Unit::Length(unit) => match unit {
                LengthUnit::Meters => "Meters",
                LengthUnit::Feet => "Feet",
                LengthUnit::Inches => "Inches",
                LengthUnit::Centimeters => "Centimeters",
                LengthUnit::Kilometers => "Kilometers",
                LengthUnit::Miles => "Miles",
            },
            Unit::Weight(unit) => match unit {
                WeightUnit::Kilograms => "Kilograms",
                WeightUnit::Pounds => "Pounds",
                WeightUnit::Ounces => "Ounces",
                WeightUnit::Grams => "Grams",
                WeightUnit::Stones => "Stones",
            },
            Unit::Temperature(unit) => match unit {
                TemperatureUnit::Celsius => "Celsius",
                TemperatureUnit::Fahrenheit => "Fahrenheit",
                TemperatureUnit::Kelvin => "Kelvin",
            },
        }
    }

    /// Resolve a unit id within `category` (case-insensitive).
    pub fn parse(category: Category, id: &str) -> Result<Unit, ConvertError> {
        let needle = id.trim();
        category
            .units()
            .iter()
            .copied()
            .find(|unit| unit.id().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ConvertError::UnknownUnit {
                category,
                unit: id.to_string(),
            })
    }

    /// Resolve a unit id across all categories
    pub fn from_id(id: &str) -> Option<Unit> {
        Category::ALL
            .into_iter()
            .find_map(|category| Unit::parse(category, id).ok())
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
