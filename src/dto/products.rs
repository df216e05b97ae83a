use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Product, StockLevel};

/// Body for both product creation and update; the two operations validate the
/// same required fields. Everything is optional at the wire level so a 422
/// can list every missing field at once instead of failing on the first.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductForm {
    pub name: Option<String>,
    pub category: Option<String>,
    pub supplier: Option<String>,
    pub description: Option<String>,
    pub base_price: Option<f64>,
    /// Defaults to 0 when missing or invalid.
    pub min_stock: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDto {
    pub product: Product,
    pub stock_level: StockLevel,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        let stock_level = product.stock_level();
        Self {
            product,
            stock_level,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<ProductDto>,
}
