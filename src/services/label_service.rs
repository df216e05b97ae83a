use uuid::Uuid;

use crate::{
    dto::labels::LabelList,
    error::AppResult,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Printable QR labels for one product or the whole inventory. A pure
/// projection over current state: repeated calls always reflect the latest
/// unit list, and a deleted product simply yields no labels.
pub async fn list_labels(
    state: &AppState,
    product_id: Option<Uuid>,
) -> AppResult<ApiResponse<LabelList>> {
    let mut items = state.store.labels(product_id).await;
    for label in &mut items {
        label.qr_code = image_url(&state.qr_base_url, &label.qr_code);
    }
    Ok(ApiResponse::success(
        "Labels",
        LabelList { items },
        Some(Meta::empty()),
    ))
}

/// Joins the configured base URL with a unit's QR path to form the
/// renderable image URL. No encoding happens here; the code stays opaque.
pub fn image_url(base: &str, qr_code: &str) -> String {
    format!("{}/{}.svg", base.trim_end_matches('/'), qr_code)
}
