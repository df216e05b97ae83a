use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::activity::ActivityList,
    error::AppResult,
    response::{ApiResponse, Meta},
    routes::params::ActivityQuery,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(recent_activity))
}

#[utoipa::path(
    get,
    path = "/api/activity",
    params(
        ("limit" = Option<usize>, Query, description = "Max entries, default 50"),
    ),
    responses(
        (status = 200, description = "Recent activity entries, newest first", body = ApiResponse<ActivityList>)
    ),
    tag = "Activity"
)]
pub async fn recent_activity(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> AppResult<Json<ApiResponse<ActivityList>>> {
    let items = state.activity.recent(query.limit.unwrap_or(50)).await;
    Ok(Json(ApiResponse::success(
        "Activity",
        ActivityList { items },
        Some(Meta::empty()),
    )))
}
