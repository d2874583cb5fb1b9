use crate::shared::error::{AppError, AppResult, ERR_UNSUPPORTED_ACTION};
use crate::shared::types::{ActionType, CommandItem, ExecuteActionResponse};
use super::{FeatureAsync, FeatureSync};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;
use thiserror::Error;

pub mod controller;
pub mod linear;
pub mod parsing;
pub mod table;
pub mod temperature;
pub mod units;

pub use controller::ConverterController;
pub use parsing::{parse_quantity, ParsedQuantity};
pub use units::{Category, LengthUnit, TemperatureUnit, Unit, WeightUnit};

const ERR_MISSING_TEXT_PARAM: &str = "Missing 'text' parameter";

// ============================================================================
// Engine types
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// The unit is not registered under the category. Callers building
    /// requests from typed units never hit this; string-keyed callers can.
    #[error("Unknown {category} unit: {unit}")]
    UnknownUnit { category: Category, unit: String },
}

/// Outcome of a conversion. `Unrepresentable` is an ordinary result for
/// input that is not a finite number, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConversionResult {
    Value(f64),
    Unrepresentable,
}

impl ConversionResult {
    pub fn value(self) -> Option<f64> {
        match self {
            ConversionResult::Value(value) => Some(value),
            ConversionResult::Unrepresentable => None,
        }
    }

    pub fn is_unrepresentable(self) -> bool {
        matches!(self, ConversionResult::Unrepresentable)
    }

    /// Display text; empty for the unrepresentable marker
    pub fn formatted(self) -> String {
        self.value().map(format_result).unwrap_or_default()
    }
}

/// A validated request: both units belong to `category`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRequest {
    value: f64,
    from_unit: Unit,
    to_unit: Unit,
    category: Category,
}

impl ConversionRequest {
    pub fn new(value: f64, from_unit: Unit, to_unit: Unit, category: Category) -> Result<Self, ConvertError> {
        for unit in [from_unit, to_unit] {
            if unit.category() != category {
                return Err(ConvertError::UnknownUnit {
                    category,
                    unit: unit.id().to_string(),
                });
            }
        }
        Ok(Self { value, from_unit, to_unit, category })
    }

    pub fn execute(&self) -> Result<ConversionResult, ConvertError> {
        if !self.value.is_finite() {
            return Ok(ConversionResult::Unrepresentable);
        }

        // Identity must return the input bit for bit
        if self.from_unit == self.to_unit {
            return Ok(ConversionResult::Value(self.value));
        }

        let result = match (self.from_unit, self.to_unit) {
            (Unit::Temperature(from), Unit::Temperature(to)) => {
                temperature::convert_temperature(self.value, from, to)
            }
            (from, to) => linear::convert_linear(self.value, from, to, self.category)?,
        };

        log::debug!(
            "[UnitConverter] {} {} -> {} {}",
            self.value, self.from_unit, result, self.to_unit
        );
        Ok(ConversionResult::Value(result))
    }
}

// ============================================================================
// Engine API
// ============================================================================

pub fn list_categories() -> &'static [Category] {
    &Category::ALL
}

pub fn list_units(category: Category) -> &'static [Unit] {
    category.units()
}

pub fn convert(category: Category, from_unit: Unit, to_unit: Unit, value: f64) -> Result<ConversionResult, ConvertError> {
    ConversionRequest::new(value, from_unit, to_unit, category)?.execute()
}

/// Boundary variant taking raw strings. Unknown unit names fail; a value
/// that does not parse yields `Unrepresentable`.
pub fn convert_input(category: Category, from_unit: &str, to_unit: &str, value: &str) -> Result<ConversionResult, ConvertError> {
    let from_unit = Unit::parse(category, from_unit)?;
    let to_unit = Unit::parse(category, to_unit)?;
    match parse_value(value) {
        Some(value) => convert(category, from_unit, to_unit, value),
        None => Ok(ConversionResult::Unrepresentable),
    }
}

// Leading decimal number, optionally with an exponent
static RE_NUMERIC_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("Failed to compile numeric prefix pattern")
});

/// Parse the leading number of user input, ignoring whatever follows it
/// ("12abc" -> 12, "1,5" -> 1). Empty, non-numeric or non-finite text is `None`.
pub fn parse_value(text: &str) -> Option<f64> {
    RE_NUMERIC_PREFIX
        .find(text.trim_start())
        .and_then(|prefix| prefix.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Four decimals, trailing zeros and a bare trailing point stripped.
/// Examples: 3.28084 -> "3.2808", 32.0 -> "32", 0.5 -> "0.5"
pub fn format_result(value: f64) -> String {
    let fixed = format!("{:.4}", value);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };

    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

// ============================================================================
// Feature Implementation
// ============================================================================

#[derive(Clone)]
pub struct UnitConverterFeature;

impl FeatureSync for UnitConverterFeature {
    fn id(&self) -> &'static str {
        "unit_converter"
    }

    fn widget_commands(&self) -> Vec<CommandItem> {
        vec![CommandItem {
            id: "widget_unit_converter".to_string(),
            label: "Unit Converter".to_string(),
            description: Some("Convert length, weight and temperature".to_string()),
            action_type: None,
            widget_type: Some("unit_converter".to_string()),
        }]
    }

    // One "Convert to ..." action per registered unit
    fn action_commands(&self) -> Vec<CommandItem> {
        list_categories()
            .iter()
            .flat_map(|category| list_units(*category).iter())
            .map(|unit| CommandItem {
                id: format!("convert_to_{}", unit.id()),
                label: format!("Convert to {}", unit.label()),
                description: None,
                action_type: Some(ActionType::ConvertUnit {
                    target: unit.id().to_string(),
                }),
                widget_type: None,
            })
            .collect()
    }
}

#[async_trait]
impl FeatureAsync for UnitConverterFeature {
    async fn execute_action(
        &self,
        action_type: &ActionType,
        params: &serde_json::Value,
    ) -> AppResult<ExecuteActionResponse> {
        let ActionType::ConvertUnit { target } = action_type else {
            return Err(AppError::Unknown(ERR_UNSUPPORTED_ACTION.to_string()));
        };

        let text = params
            .get("text")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AppError::Validation(ERR_MISSING_TEXT_PARAM.to_string()))?;

        let quantity = parse_quantity(text)?;
        let category = quantity.unit.category();
        let target_unit = Unit::parse(category, target)?;
        let result = convert(category, quantity.unit, target_unit, quantity.value)?;

        let converted = result
            .value()
            .ok_or_else(|| AppError::Conversion(format!("Cannot convert '{}'", text)))?;

        Ok(ExecuteActionResponse {
            result: format!("{} {}", format_result(converted), target_unit.id()),
            metadata: Some(json!({
                "category": category.id(),
                "from_unit": quantity.unit.id(),
                "target_unit": target_unit.id(),
                "original_amount": quantity.value,
                "converted_amount": converted,
                "widget": "unit_converter"
            })),
        })
    }
}
