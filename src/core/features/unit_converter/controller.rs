//! Converter view state: active category, unit pair and the two values.

use super::units::{Category, Unit};
use super::{convert, format_result, parse_value, ConversionResult, ConvertError};
use crate::shared::types::ConverterSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub struct ConverterController {
    category: Category,
    from_unit: Unit,
    to_unit: Unit,
    from_value: String,
    to_value: String,
}

impl Default for ConverterController {
    fn default() -> Self {
        Self::new(Category::default())
    }
}

impl ConverterController {
    pub fn new(category: Category) -> Self {
        let (from_unit, to_unit) = default_pair(category);
        Self {
            category,
            from_unit,
            to_unit,
            from_value: String::new(),
            to_value: String::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn from_unit(&self) -> Unit {
        self.from_unit
    }

    pub fn to_unit(&self) -> Unit {
        self.to_unit
    }

    pub fn from_value(&self) -> &str {
        &self.from_value
    }

    pub fn to_value(&self) -> &str {
        &self.to_value
    }

    /// Switch category. The unit pair resets to the category's first two
    /// units and both values are cleared; nothing carries over.
    pub fn select_category(&mut self, category: Category) {
        let (from_unit, to_unit) = default_pair(category);
        self.category = category;
        self.from_unit = from_unit;
        self.to_unit = to_unit;
        self.from_value.clear();
        self.to_value.clear();
        log::debug!("[UnitConverter] Category set to {} ({} -> {})", category, from_unit, to_unit);
    }

    pub fn set_from_unit(&mut self, unit: Unit) -> Result<ConversionResult, ConvertError> {
        self.ensure_in_category(unit)?;
        self.from_unit = unit;
        Ok(self.recompute())
    }

    pub fn set_to_unit(&mut self, unit: Unit) -> Result<ConversionResult, ConvertError> {
        self.ensure_in_category(unit)?;
        self.to_unit = unit;
        Ok(self.recompute())
    }

    /// Store raw input and refresh the output. Unparsable input is a normal
    /// state: the output goes blank.
    pub fn set_from_value(&mut self, value: impl Into<String>) -> ConversionResult {
        self.from_value = value.into();
        self.recompute()
    }

    /// Exchange units and values together. The previous output becomes the
    /// input as-is; nothing is recomputed.
    pub fn swap_units(&mut self) {
        std::mem::swap(&mut self.from_unit, &mut self.to_unit);
        std::mem::swap(&mut self.from_value, &mut self.to_value);
    }

    pub fn snapshot(&self) -> ConverterSnapshot {
        ConverterSnapshot {
            category: self.category,
            from_unit: self.from_unit.id().to_string(),
            to_unit: self.to_unit.id().to_string(),
            from_value: self.from_value.clone(),
            to_value: self.to_value.clone(),
        }
    }

    fn ensure_in_category(&self, unit: Unit) -> Result<(), ConvertError> {
        if unit.category() == self.category {
            Ok(())
        } else {
            Err(ConvertError::UnknownUnit {
                category: self.category,
                unit: unit.id().to_string(),
            })
        }
    }

    fn recompute(&mut self) -> ConversionResult {
        let result = match parse_value(&self.from_value) {
            Some(value) => convert(self.category, self.from_unit, self.to_unit, value)
                .unwrap_or_else(|e| {
                    log::error!("[UnitConverter] Controller holds an invalid unit pair: {}", e);
                    ConversionResult::Unrepresentable
                }),
            None => ConversionResult::Unrepresentable,
        };

        self.to_value = match result {
            ConversionResult::Value(value) => format_result(value),
            ConversionResult::Unrepresentable => String::new(),
        };
        result
    }
}

fn default_pair(category: Category) -> (Unit, Unit) {
    let units = category.units();
    (units[0], units[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::features::unit_converter::units::{LengthUnit, TemperatureUnit, WeightUnit};

    #[test]
    fn test_starts_on_first_two_units() {
        let controller = ConverterController::default();
        assert_eq!(controller.category(), Category::Length);
        assert_eq!(controller.from_unit(), Unit::Length(LengthUnit::Meters));
        assert_eq!(controller.to_unit(), Unit::Length(LengthUnit::Feet));
        assert_eq!(controller.to_value(), "");
    }

    #[test]
    fn test_input_updates_output() {
        let mut controller = ConverterController::default();
        let result = controller.set_from_value("1");
        assert_eq!(result.value(), Some(3.28084));
        assert_eq!(controller.to_value(), "3.2808");
    }

    #[test]
    fn test_invalid_input_blanks_output() {
        let mut controller = ConverterController::default();
        controller.set_from_value("10");
        assert!(!controller.to_value().is_empty());

        let result = controller.set_from_value("abc");
        assert!(result.is_unrepresentable());
        assert_eq!(controller.to_value(), "");

        assert!(controller.set_from_value("").is_unrepresentable());
    }

    #[test]
    fn test_category_switch_resets_state() {
        let mut controller = ConverterController::default();
        controller
            .set_from_unit(Unit::Length(LengthUnit::Miles))
            .unwrap();
        controller.set_from_value("26.2");

        controller.select_category(Category::Weight);
        assert_eq!(controller.from_unit(), Unit::Weight(WeightUnit::Kilograms));
        assert_eq!(controller.to_unit(), Unit::Weight(WeightUnit::Pounds));
        assert_eq!(controller.from_value(), "");
        assert_eq!(controller.to_value(), "");
    }

    #[test]
    fn test_rejects_unit_from_another_category() {
        let mut controller = ConverterController::default();
        let err = controller
            .set_to_unit(Unit::Temperature(TemperatureUnit::Kelvin))
            .unwrap_err();
        assert!(matches!(err, ConvertError::UnknownUnit { category: Category::Length, .. }));
        assert_eq!(controller.to_unit(), Unit::Length(LengthUnit::Feet));
    }

    #[test]
    fn test_unit_change_recomputes() {
        let mut controller = ConverterController::new(Category::Temperature);
        controller.set_from_value("100");
        assert_eq!(controller.to_value(), "212");

        controller
            .set_to_unit(Unit::Temperature(TemperatureUnit::Kelvin))
            .unwrap();
        assert_eq!(controller.to_value(), "373.15");
    }

    #[test]
    fn test_swap_exchanges_units_and_values() {
        let mut controller = ConverterController::default();
        controller.set_from_value("2");
        let before = controller.clone();

        controller.swap_units();
        assert_eq!(controller.from_unit(), before.to_unit());
        assert_eq!(controller.to_unit(), before.from_unit());
        assert_eq!(controller.from_value(), before.to_value());
        assert_eq!(controller.to_value(), before.from_value());

        controller.swap_units();
        assert_eq!(controller, before);
    }

    #[test]
    fn test_snapshot_uses_unit_ids() {
        let mut controller = ConverterController::new(Category::Weight);
        controller.set_from_value("1");
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.category, Category::Weight);
        assert_eq!(snapshot.from_unit, "kilograms");
        assert_eq!(snapshot.to_unit, "pounds");
        assert_eq!(snapshot.to_value, "2.2046");
    }
}
