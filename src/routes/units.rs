use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::units::{AddUnitsRequest, ChangeStatusRequest, UnitBatch, UpdateUnitRequest},
    error::AppResult,
    models::Unit,
    response::ApiResponse,
    services::unit_service,
    state::AppState,
};

// Merged into the /products nest; paths are relative to it.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/units", post(add_units))
        .route("/{id}/units/{unit_id}", patch(update_unit))
        .route("/{id}/units/{unit_id}", delete(delete_unit))
        .route("/{id}/units/{unit_id}/status", post(change_status))
}

#[utoipa::path(
    post,
    path = "/api/products/{id}/units",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = AddUnitsRequest,
    responses(
        (status = 200, description = "Receive a batch of serialized units", body = ApiResponse<UnitBatch>),
        (status = 404, description = "Product not found"),
        (status = 422, description = "Missing serial, lot or location, or quantity below 1"),
    ),
    tag = "Units"
)]
pub async fn add_units(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddUnitsRequest>,
) -> AppResult<Json<ApiResponse<UnitBatch>>> {
    Ok(Json(unit_service::add_units(&state, id, payload).await?))
}

#[utoipa::path(
    patch,
    path = "/api/products/{id}/units/{unit_id}",
    params(
        ("id" = Uuid, Path, description = "Product ID"),
        ("unit_id" = Uuid, Path, description = "Unit ID"),
    ),
    request_body = UpdateUnitRequest,
    responses(
        (status = 200, description = "Edit descriptive fields; ID, QR code and status stay put", body = ApiResponse<Unit>),
        (status = 404, description = "Product or unit not found"),
    ),
    tag = "Units"
)]
pub async fn update_unit(
    State(state): State<AppState>,
    Path((id, unit_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateUnitRequest>,
) -> AppResult<Json<ApiResponse<Unit>>> {
    Ok(Json(
        unit_service::update_unit(&state, id, unit_id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}/units/{unit_id}",
    params(
        ("id" = Uuid, Path, description = "Product ID"),
        ("unit_id" = Uuid, Path, description = "Unit ID"),
    ),
    responses(
        (status = 200, description = "Delete one unit and recount the product totals"),
        (status = 404, description = "Product or unit not found"),
    ),
    tag = "Units"
)]
pub async fn delete_unit(
    State(state): State<AppState>,
    Path((id, unit_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(unit_service::delete_unit(&state, id, unit_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/products/{id}/units/{unit_id}/status",
    params(
        ("id" = Uuid, Path, description = "Product ID"),
        ("unit_id" = Uuid, Path, description = "Unit ID"),
    ),
    request_body = ChangeStatusRequest,
    responses(
        (status = 200, description = "Move the unit to any status; VENDU stamps the sold date", body = ApiResponse<Unit>),
        (status = 404, description = "Product or unit not found"),
    ),
    tag = "Units"
)]
pub async fn change_status(
    State(state): State<AppState>,
    Path((id, unit_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<ChangeStatusRequest>,
) -> AppResult<Json<ApiResponse<Unit>>> {
    Ok(Json(
        unit_service::change_status(&state, id, unit_id, payload).await?,
    ))
}
