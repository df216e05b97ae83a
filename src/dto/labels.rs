use serde::Serialize;
use utoipa::ToSchema;

use crate::models::QrLabel;

#[derive(Debug, Serialize, ToSchema)]
pub struct LabelList {
    pub items: Vec<QrLabel>,
}
