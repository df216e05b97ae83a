use axum::Router;

use crate::state::AppState;

pub mod activity;
pub mod doc;
pub mod health;
pub mod labels;
pub mod params;
pub mod products;
pub mod units;

// Build the API router without binding state; it is provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest(
            "/products",
            products::router()
                .merge(units::router())
                .merge(labels::product_router()),
        )
        .nest("/labels", labels::router())
        .nest("/activity", activity::router())
}
