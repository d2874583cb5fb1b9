use super::table::factor_for;
use super::units::{Category, Unit};
use super::ConvertError;

/// Scale-factor conversion for length and weight.
///
/// Pivots through the canonical unit so the table stays one factor per unit
/// instead of one per unit pair.
pub fn convert_linear(
    value: f64,
    from_unit: Unit,
    to_unit: Unit,
    category: Category,
) -> Result<f64, ConvertError> {
    let canonical = value / factor_for(category, from_unit)?;
    Ok(canonical * factor_for(category, to_unit)?)
}
