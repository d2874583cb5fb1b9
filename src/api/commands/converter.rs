//! Unit converter commands
//!
//! Stateless engine calls plus the converter view state held in `AppState`.

use crate::api::state::AppState;
use crate::core::features::unit_converter::{self, parse_quantity, Category, Unit};
use crate::shared::error::AppResult;
use crate::shared::types::{
    CategoryDTO, ConvertUnitsRequest, ConvertUnitsResponse, ConverterSnapshot, ParseUnitResponse,
    SetUnitsRequest, UnitDTO,
};

fn unit_dto(unit: &Unit) -> UnitDTO {
    UnitDTO {
        id: unit.id().to_string(),
        label: unit.label().to_string(),
        category: unit.category(),
    }
}

/// Categories with their units, in display order
pub async fn get_categories_command() -> AppResult<Vec<CategoryDTO>> {
    Ok(unit_converter::list_categories()
        .iter()
        .map(|category| CategoryDTO {
            id: *category,
            label: category.label().to_string(),
            units: unit_converter::list_units(*category).iter().map(unit_dto).collect(),
        })
        .collect())
}

pub async fn get_units_command(category: Category) -> AppResult<Vec<UnitDTO>> {
    Ok(unit_converter::list_units(category).iter().map(unit_dto).collect())
}

/// One-shot conversion. A value that is not a number gives `result: None`
/// and an empty `formatted_result`.
pub async fn convert_units_command(request: ConvertUnitsRequest) -> AppResult<ConvertUnitsResponse> {
    let result = unit_converter::convert_input(
        request.category,
        &request.from_unit,
        &request.to_unit,
        &request.value,
    )?;

    Ok(ConvertUnitsResponse {
        result: result.value(),
        formatted_result: result.formatted(),
        from_unit: request.from_unit,
        to_unit: request.to_unit,
    })
}

/// Parse text such as "12 ft" into amount, unit and category
pub async fn parse_quantity_command(text: String) -> AppResult<ParseUnitResponse> {
    let quantity = parse_quantity(&text)?;
    Ok(ParseUnitResponse {
        amount: quantity.value,
        unit: quantity.unit.id().to_string(),
        category: quantity.unit.category(),
    })
}

pub async fn get_converter_state_command(state: &AppState) -> AppResult<ConverterSnapshot> {
    Ok(state.converter().snapshot())
}

pub async fn select_category_command(state: &AppState, category: Category) -> AppResult<ConverterSnapshot> {
    let mut converter = state.converter();
    converter.select_category(category);
    Ok(converter.snapshot())
}

pub async fn set_from_value_command(state: &AppState, value: String) -> AppResult<ConverterSnapshot> {
    let mut converter = state.converter();
    converter.set_from_value(value);
    Ok(converter.snapshot())
}

/// Change either side of the unit pair. Ids are resolved in the active
/// category; an id from another category is rejected and nothing changes.
pub async fn set_units_command(state: &AppState, request: SetUnitsRequest) -> AppResult<ConverterSnapshot> {
    let mut converter = state.converter();
    let category = converter.category();

    let from_unit = request.from_unit.map(|id| Unit::parse(category, &id)).transpose()?;
    let to_unit = request.to_unit.map(|id| Unit::parse(category, &id)).transpose()?;

    if let Some(from_unit) = from_unit {
        converter.set_from_unit(from_unit)?;
    }
    if let Some(to_unit) = to_unit {
        converter.set_to_unit(to_unit)?;
    }
    Ok(converter.snapshot())
}

pub async fn swap_units_command(state: &AppState) -> AppResult<ConverterSnapshot> {
    let mut converter = state.converter();
    converter.swap_units();
    Ok(converter.snapshot())
}
