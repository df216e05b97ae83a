use serde::Serialize;
use utoipa::ToSchema;

use crate::audit::ActivityEntry;

#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityList {
    pub items: Vec<ActivityEntry>,
}
