use serde_json::json;
use uuid::Uuid;

use crate::{
    audit::ActivityKind,
    dto::products::{ProductDto, ProductForm, ProductList},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    routes::params::ProductQuery,
    services::ACTIVITY_MODULE,
    state::AppState,
    store::NewProduct,
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, per_page, offset) = query.pagination.normalize();
    let filtered = state.store.list(query.q.as_deref()).await;
    let total = filtered.len() as i64;
    let items = filtered
        .into_iter()
        .skip(offset as usize)
        .take(per_page as usize)
        .map(ProductDto::from)
        .collect();

    let meta = Meta::new(page, per_page, total);
    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(meta),
    ))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<ProductDto>> {
    let product = state.store.get(id).await?;
    Ok(ApiResponse::success("Product", product.into(), None))
}

pub async fn create_product(
    state: &AppState,
    payload: ProductForm,
) -> AppResult<ApiResponse<ProductDto>> {
    let details = validate_product(payload)?;
    let product = state.store.create_product(details).await;

    state.activity.record(
        ActivityKind::Create,
        ACTIVITY_MODULE,
        format!("Product created: {}", product.name),
        json!({ "product_id": product.id }),
    );

    Ok(ApiResponse::success(
        "Product created",
        product.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    id: Uuid,
    payload: ProductForm,
) -> AppResult<ApiResponse<ProductDto>> {
    let details = validate_product(payload)?;
    let product = state.store.update_product(id, details).await?;

    state.activity.record(
        ActivityKind::Update,
        ACTIVITY_MODULE,
        format!("Product updated: {}", product.name),
        json!({ "product_id": product.id }),
    );

    Ok(ApiResponse::success(
        "Updated",
        product.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let removed = state.store.delete_product(id).await?;

    state.activity.record(
        ActivityKind::Delete,
        ACTIVITY_MODULE,
        format!(
            "Product deleted: {} ({} unit(s) removed)",
            removed.name,
            removed.units.len()
        ),
        json!({ "product_id": removed.id, "units_removed": removed.units.len() }),
    );

    Ok(ApiResponse::success(
        "Deleted",
        json!({}),
        Some(Meta::empty()),
    ))
}

/// Checks the required descriptive fields and collects every problem into one
/// validation error, so the client can surface the full list at once. Nothing
/// is mutated when this fails.
fn validate_product(payload: ProductForm) -> AppResult<NewProduct> {
    let mut problems = Vec::new();

    let name = trimmed(payload.name);
    if name.is_none() {
        problems.push("name is required".to_string());
    }
    let category = trimmed(payload.category);
    if category.is_none() {
        problems.push("category is required".to_string());
    }
    match payload.base_price {
        None => problems.push("base_price is required".to_string()),
        Some(price) if !price.is_finite() || price < 0.0 => {
            problems.push("base_price must be a non-negative number".to_string())
        }
        Some(_) => {}
    }

    if !problems.is_empty() {
        return Err(AppError::Validation(problems));
    }

    Ok(NewProduct {
        name: name.unwrap_or_default(),
        category: category.unwrap_or_default(),
        supplier: trimmed(payload.supplier).unwrap_or_default(),
        description: trimmed(payload.description),
        base_price: payload.base_price.unwrap_or_default(),
        min_stock: payload.min_stock.unwrap_or(0),
    })
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
