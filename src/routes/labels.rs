use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::labels::LabelList,
    error::AppResult,
    response::ApiResponse,
    services::label_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_all_labels))
}

// Merged into the /products nest.
pub fn product_router() -> Router<AppState> {
    Router::new().route("/{id}/labels", get(list_product_labels))
}

#[utoipa::path(
    get,
    path = "/api/labels",
    responses(
        (status = 200, description = "QR labels for every unit in stock", body = ApiResponse<LabelList>)
    ),
    tag = "Labels"
)]
pub async fn list_all_labels(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<LabelList>>> {
    Ok(Json(label_service::list_labels(&state, None).await?))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}/labels",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "QR labels for one product; empty when the product is unknown", body = ApiResponse<LabelList>)
    ),
    tag = "Labels"
)]
pub async fn list_product_labels(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<LabelList>>> {
    Ok(Json(label_service::list_labels(&state, Some(id)).await?))
}
