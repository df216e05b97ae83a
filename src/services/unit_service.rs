use serde_json::json;
use uuid::Uuid;

use crate::{
    audit::ActivityKind,
    dto::units::{AddUnitsRequest, ChangeStatusRequest, UnitBatch, UpdateUnitRequest},
    error::{AppError, AppResult},
    models::Unit,
    response::{ApiResponse, Meta},
    services::ACTIVITY_MODULE,
    state::AppState,
    store::{NewUnits, UnitPatch},
};

pub async fn add_units(
    state: &AppState,
    product_id: Uuid,
    payload: AddUnitsRequest,
) -> AppResult<ApiResponse<UnitBatch>> {
    let input = validate_units(payload)?;
    let quantity = input.quantity;
    let units = state.store.add_units(product_id, input).await?;

    let qr_codes: Vec<&str> = units.iter().map(|unit| unit.qr_code.as_str()).collect();
    state.activity.record(
        ActivityKind::Create,
        ACTIVITY_MODULE,
        format!("{quantity} unit(s) received into stock"),
        json!({
            "product_id": product_id,
            "quantity": quantity,
            "qr_codes": qr_codes,
        }),
    );

    Ok(ApiResponse::success(
        "Units added",
        UnitBatch { units },
        Some(Meta::empty()),
    ))
}

pub async fn update_unit(
    state: &AppState,
    product_id: Uuid,
    unit_id: Uuid,
    payload: UpdateUnitRequest,
) -> AppResult<ApiResponse<Unit>> {
    let patch = UnitPatch {
        serial_number: payload.serial_number,
        lot: payload.lot,
        location: payload.location,
        notes: payload.notes,
    };
    let unit = state.store.update_unit(product_id, unit_id, patch).await?;

    state.activity.record(
        ActivityKind::Update,
        ACTIVITY_MODULE,
        format!("Unit updated: {}", unit.serial_number),
        json!({ "product_id": product_id, "unit_id": unit.id }),
    );

    Ok(ApiResponse::success("Updated", unit, Some(Meta::empty())))
}

pub async fn delete_unit(
    state: &AppState,
    product_id: Uuid,
    unit_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let removed = state.store.delete_unit(product_id, unit_id).await?;

    state.activity.record(
        ActivityKind::Delete,
        ACTIVITY_MODULE,
        format!("Unit deleted: {}", removed.serial_number),
        json!({ "product_id": product_id, "unit_id": removed.id }),
    );

    Ok(ApiResponse::success(
        "Deleted",
        json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn change_status(
    state: &AppState,
    product_id: Uuid,
    unit_id: Uuid,
    payload: ChangeStatusRequest,
) -> AppResult<ApiResponse<Unit>> {
    let unit = state
        .store
        .change_unit_status(product_id, unit_id, payload.status, payload.sold_to)
        .await?;

    state.activity.record(
        ActivityKind::Update,
        ACTIVITY_MODULE,
        format!("Unit {} moved to {}", unit.serial_number, unit.status),
        json!({
            "product_id": product_id,
            "unit_id": unit.id,
            "status": unit.status.as_str(),
        }),
    );

    Ok(ApiResponse::success(
        "Status updated",
        unit,
        Some(Meta::empty()),
    ))
}

/// Receiving a batch requires a base serial, a lot label, a location and a
/// quantity of at least one. All problems are reported together and nothing
/// is mutated on failure.
fn validate_units(payload: AddUnitsRequest) -> AppResult<NewUnits> {
    let mut problems = Vec::new();

    let serial_number = trimmed(payload.serial_number);
    if serial_number.is_none() {
        problems.push("serial_number is required".to_string());
    }
    let lot = trimmed(payload.lot);
    if lot.is_none() {
        problems.push("lot is required".to_string());
    }
    let location = trimmed(payload.location);
    if location.is_none() {
        problems.push("location is required".to_string());
    }
    if payload.quantity < 1 {
        problems.push("quantity must be at least 1".to_string());
    }

    if !problems.is_empty() {
        return Err(AppError::Validation(problems));
    }

    Ok(NewUnits {
        serial_number: serial_number.unwrap_or_default(),
        lot: lot.unwrap_or_default(),
        location: location.unwrap_or_default(),
        notes: trimmed(payload.notes),
        quantity: payload.quantity,
    })
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
