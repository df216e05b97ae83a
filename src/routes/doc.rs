use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    audit::{ActivityEntry, ActivityKind},
    dto::{
        activity::ActivityList,
        labels::LabelList,
        products::{ProductDto, ProductForm, ProductList},
        units::{AddUnitsRequest, ChangeStatusRequest, UnitBatch, UpdateUnitRequest},
    },
    models::{Product, QrLabel, StockLevel, Unit, UnitStatus},
    response::{ApiResponse, Meta},
    routes::{activity, health, labels, params, products, units},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        units::add_units,
        units::update_unit,
        units::delete_unit,
        units::change_status,
        labels::list_all_labels,
        labels::list_product_labels,
        activity::recent_activity,
    ),
    components(
        schemas(
            Product,
            Unit,
            UnitStatus,
            StockLevel,
            QrLabel,
            ProductForm,
            ProductDto,
            ProductList,
            AddUnitsRequest,
            UpdateUnitRequest,
            ChangeStatusRequest,
            UnitBatch,
            LabelList,
            ActivityEntry,
            ActivityKind,
            ActivityList,
            params::Pagination,
            params::ProductQuery,
            params::ActivityQuery,
            Meta,
            ApiResponse<ProductDto>,
            ApiResponse<ProductList>,
            ApiResponse<UnitBatch>,
            ApiResponse<LabelList>,
            ApiResponse<ActivityList>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product catalogue and stock levels"),
        (name = "Units", description = "Serialized unit lifecycle"),
        (name = "Labels", description = "Printable QR label sheets"),
        (name = "Activity", description = "Recent stock activity"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
