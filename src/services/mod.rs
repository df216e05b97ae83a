pub mod label_service;
pub mod product_service;
pub mod unit_service;

/// Module tag every activity entry from this subsystem is scoped to.
pub const ACTIVITY_MODULE: &str = "Stocks";
