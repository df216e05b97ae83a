use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle status of one serialized unit. Any status may transition to any
/// other; `InventoryStore::change_unit_status` is the single place that moves
/// a unit between statuses, so guard rules can be added there later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitStatus {
    Disponible,
    Vendu,
    Reserve,
    Endommage,
    Retourne,
    Perime,
    Enleve,
}

impl UnitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitStatus::Disponible => "DISPONIBLE",
            UnitStatus::Vendu => "VENDU",
            UnitStatus::Reserve => "RESERVE",
            UnitStatus::Endommage => "ENDOMMAGE",
            UnitStatus::Retourne => "RETOURNE",
            UnitStatus::Perime => "PERIME",
            UnitStatus::Enleve => "ENLEVE",
        }
    }

    /// Lenient parse used when mapping upstream `statut` strings.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DISPONIBLE" => Some(UnitStatus::Disponible),
            "VENDU" => Some(UnitStatus::Vendu),
            "RESERVE" => Some(UnitStatus::Reserve),
            "ENDOMMAGE" => Some(UnitStatus::Endommage),
            "RETOURNE" => Some(UnitStatus::Retourne),
            "PERIME" => Some(UnitStatus::Perime),
            "ENLEVE" => Some(UnitStatus::Enleve),
            _ => None,
        }
    }
}

impl std::fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One physical, serialized item tracked from receipt to disposition.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Unit {
    /// Unique unit ID, assigned at creation and never regenerated.
    pub id: Uuid,
    /// Opaque QR-code path, unique across all products, assigned at creation.
    pub qr_code: String,
    /// Human-assigned serial, unique within the batch it arrived in.
    pub serial_number: String,
    /// Batch label shared by units received together.
    pub lot: String,
    pub status: UnitStatus,
    /// Free-text physical location.
    pub location: String,
    /// Date the unit entered stock.
    pub received_date: NaiveDate,
    /// Set when the unit first transitions to VENDU. Never cleared afterwards,
    /// even if the unit later leaves VENDU.
    pub sold_date: Option<NaiveDate>,
    pub sold_to: Option<String>,
    pub notes: Option<String>,
}

/// A product and the serialized units it owns. The four totals are derived:
/// every mutation path recomputes them from `units` before releasing the
/// store lock, so they are never observable out of sync.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub supplier: String,
    pub description: Option<String>,
    pub base_price: f64,
    /// Reorder threshold used by `stock_level`.
    pub min_stock: u32,
    pub units: Vec<Unit>,
    pub total_received: u32,
    pub total_available: u32,
    pub total_sold: u32,
    pub total_damaged: u32,
}

impl Product {
    pub fn stock_level(&self) -> StockLevel {
        stock_level(self.total_available, self.min_stock)
    }
}

/// Coarse availability classification for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    OutOfStock,
    LowStock,
    InStock,
}

/// Pure classification of `(total_available, min_stock)`.
pub fn stock_level(total_available: u32, min_stock: u32) -> StockLevel {
    if total_available == 0 {
        StockLevel::OutOfStock
    } else if total_available <= min_stock {
        StockLevel::LowStock
    } else {
        StockLevel::InStock
    }
}

/// Case-insensitive substring match over name, category and supplier. Pure,
/// so the list filter stays trivially testable.
pub fn matches_search(product: &Product, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    product.name.to_lowercase().contains(&term)
        || product.category.to_lowercase().contains(&term)
        || product.supplier.to_lowercase().contains(&term)
}

/// Flat, printable projection of one unit for QR label sheets and exports.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QrLabel {
    pub id: Uuid,
    /// Fully-qualified image URL once the configured base has been applied.
    pub qr_code: String,
    pub serial_number: String,
    pub lot: String,
    pub product_name: String,
    pub status: UnitStatus,
}
