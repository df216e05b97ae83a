use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Unit, UnitStatus};

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddUnitsRequest {
    /// Base serial; batches of more than one get `-001`-style suffixes.
    pub serial_number: Option<String>,
    pub lot: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUnitRequest {
    pub serial_number: Option<String>,
    pub lot: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeStatusRequest {
    pub status: UnitStatus,
    /// Buyer reference, recorded when the new status is VENDU.
    pub sold_to: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UnitBatch {
    pub units: Vec<Unit>,
}
