use std::sync::Arc;

use crate::{audit::ActivitySink, store::InventoryStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InventoryStore>,
    pub activity: ActivitySink,
    pub qr_base_url: String,
}
