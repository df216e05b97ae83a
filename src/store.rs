use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{matches_search, Product, QrLabel, Unit, UnitStatus},
};

/// Validated descriptive fields for creating or replacing a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub supplier: String,
    pub description: Option<String>,
    pub base_price: f64,
    pub min_stock: u32,
}

/// Validated input for a batch of new units.
#[derive(Debug, Clone)]
pub struct NewUnits {
    pub serial_number: String,
    pub lot: String,
    pub location: String,
    pub notes: Option<String>,
    pub quantity: u32,
}

/// In-place edit of a unit's descriptive fields. `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct UnitPatch {
    pub serial_number: Option<String>,
    pub lot: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// A unit carried over from the upstream stock source during hydration. IDs
/// and QR codes are not trusted from upstream; the store mints fresh ones.
#[derive(Debug, Clone)]
pub struct ImportedUnit {
    pub serial_number: String,
    pub lot: String,
    pub status: UnitStatus,
    pub location: String,
    pub received_date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ImportedProduct {
    pub details: NewProduct,
    pub units: Vec<ImportedUnit>,
}

struct ProductSlot {
    product: Product,
    /// Monotonic per-product QR sequence. Never rewound on deletion, so a
    /// delete-then-add can never mint a duplicate QR code.
    unit_seq: u32,
}

/// Sole owner of the product/unit aggregate. All mutation happens under a
/// single write-lock acquisition and ends with `recompute_totals`, so the
/// derived counts are never observable out of sync with the unit list.
pub struct InventoryStore {
    inner: RwLock<Vec<ProductSlot>>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
        }
    }

    /// Replaces the whole collection with products mapped from the upstream
    /// source. Returns how many products were loaded.
    pub async fn hydrate(&self, imported: Vec<ImportedProduct>) -> usize {
        let mut slots = Vec::with_capacity(imported.len());
        for group in imported {
            let mut slot = ProductSlot {
                product: blank_product(group.details),
                unit_seq: 0,
            };
            for unit in group.units {
                slot.unit_seq += 1;
                slot.product.units.push(Unit {
                    id: Uuid::new_v4(),
                    qr_code: qr_code_for(slot.product.id, slot.unit_seq),
                    serial_number: unit.serial_number,
                    lot: unit.lot,
                    status: unit.status,
                    location: unit.location,
                    received_date: unit.received_date,
                    sold_date: None,
                    sold_to: None,
                    notes: unit.notes,
                });
            }
            recompute_totals(&mut slot.product);
            slots.push(slot);
        }
        let count = slots.len();
        *self.inner.write().await = slots;
        count
    }

    /// Current products, newest first, optionally narrowed by the search
    /// term. Filtering is pure and leaves the collection untouched.
    pub async fn list(&self, term: Option<&str>) -> Vec<Product> {
        let slots = self.inner.read().await;
        slots
            .iter()
            .map(|slot| &slot.product)
            .filter(|product| term.is_none_or(|t| matches_search(product, t)))
            .cloned()
            .collect()
    }

    pub async fn get(&self, product_id: Uuid) -> AppResult<Product> {
        let slots = self.inner.read().await;
        slots
            .iter()
            .find(|slot| slot.product.id == product_id)
            .map(|slot| slot.product.clone())
            .ok_or(AppError::NotFound)
    }

    /// Creates an empty product and prepends it, matching the UI's
    /// newest-first ordering.
    pub async fn create_product(&self, details: NewProduct) -> Product {
        let product = blank_product(details);
        let mut slots = self.inner.write().await;
        slots.insert(
            0,
            ProductSlot {
                product: product.clone(),
                unit_seq: 0,
            },
        );
        product
    }

    /// Replaces descriptive fields only; units and totals are untouched.
    pub async fn update_product(&self, product_id: Uuid, details: NewProduct) -> AppResult<Product> {
        let mut slots = self.inner.write().await;
        let slot = find_slot(&mut slots, product_id)?;
        let product = &mut slot.product;
        product.name = details.name;
        product.category = details.category;
        product.supplier = details.supplier;
        product.description = details.description;
        product.base_price = details.base_price;
        product.min_stock = details.min_stock;
        Ok(product.clone())
    }

    /// Removes the product and every unit it owns. Returns the removed
    /// product so callers can describe the cascade.
    pub async fn delete_product(&self, product_id: Uuid) -> AppResult<Product> {
        let mut slots = self.inner.write().await;
        let index = slots
            .iter()
            .position(|slot| slot.product.id == product_id)
            .ok_or(AppError::NotFound)?;
        Ok(slots.remove(index).product)
    }

    /// Mints `quantity` fresh units on the product: new UUIDs, sequential QR
    /// codes, and `-001`-style serial suffixes when the batch has more than
    /// one unit. All units start DISPONIBLE, received today.
    pub async fn add_units(&self, product_id: Uuid, input: NewUnits) -> AppResult<Vec<Unit>> {
        let today = Utc::now().date_naive();
        let mut slots = self.inner.write().await;
        let slot = find_slot(&mut slots, product_id)?;

        let mut created = Vec::with_capacity(input.quantity as usize);
        for n in 1..=input.quantity {
            slot.unit_seq += 1;
            let serial_number = if input.quantity == 1 {
                input.serial_number.clone()
            } else {
                format!("{}-{:03}", input.serial_number, n)
            };
            created.push(Unit {
                id: Uuid::new_v4(),
                qr_code: qr_code_for(product_id, slot.unit_seq),
                serial_number,
                lot: input.lot.clone(),
                status: UnitStatus::Disponible,
                location: input.location.clone(),
                received_date: today,
                sold_date: None,
                sold_to: None,
                notes: input.notes.clone(),
            });
        }
        slot.product.units.extend(created.iter().cloned());
        recompute_totals(&mut slot.product);
        Ok(created)
    }

    /// Edits descriptive fields of one unit. ID, QR code, status and the
    /// product totals are untouched.
    pub async fn update_unit(
        &self,
        product_id: Uuid,
        unit_id: Uuid,
        patch: UnitPatch,
    ) -> AppResult<Unit> {
        let mut slots = self.inner.write().await;
        let slot = find_slot(&mut slots, product_id)?;
        let unit = find_unit(&mut slot.product, unit_id)?;
        if let Some(serial_number) = patch.serial_number {
            unit.serial_number = serial_number;
        }
        if let Some(lot) = patch.lot {
            unit.lot = lot;
        }
        if let Some(location) = patch.location {
            unit.location = location;
        }
        if let Some(notes) = patch.notes {
            unit.notes = Some(notes);
        }
        Ok(unit.clone())
    }

    pub async fn delete_unit(&self, product_id: Uuid, unit_id: Uuid) -> AppResult<Unit> {
        let mut slots = self.inner.write().await;
        let slot = find_slot(&mut slots, product_id)?;
        let index = slot
            .product
            .units
            .iter()
            .position(|unit| unit.id == unit_id)
            .ok_or(AppError::NotFound)?;
        let removed = slot.product.units.remove(index);
        recompute_totals(&mut slot.product);
        Ok(removed)
    }

    /// Unguarded transition to any status. Entering VENDU stamps `sold_date`
    /// (and `sold_to` when given); leaving VENDU clears neither.
    pub async fn change_unit_status(
        &self,
        product_id: Uuid,
        unit_id: Uuid,
        new_status: UnitStatus,
        sold_to: Option<String>,
    ) -> AppResult<Unit> {
        let mut slots = self.inner.write().await;
        let slot = find_slot(&mut slots, product_id)?;
        let unit = find_unit(&mut slot.product, unit_id)?;
        unit.status = new_status;
        if new_status == UnitStatus::Vendu {
            unit.sold_date = Some(Utc::now().date_naive());
            if sold_to.is_some() {
                unit.sold_to = sold_to;
            }
        }
        let changed = unit.clone();
        recompute_totals(&mut slot.product);
        Ok(changed)
    }

    /// Label projection for one product or for everything. Unknown product
    /// IDs yield an empty sheet rather than an error, so a label query for a
    /// just-deleted product simply prints nothing.
    pub async fn labels(&self, product_id: Option<Uuid>) -> Vec<QrLabel> {
        let slots = self.inner.read().await;
        slots
            .iter()
            .filter(|slot| product_id.is_none_or(|id| slot.product.id == id))
            .flat_map(|slot| {
                slot.product.units.iter().map(|unit| QrLabel {
                    id: unit.id,
                    qr_code: unit.qr_code.clone(),
                    serial_number: unit.serial_number.clone(),
                    lot: unit.lot.clone(),
                    product_name: slot.product.name.clone(),
                    status: unit.status,
                })
            })
            .collect()
    }
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn blank_product(details: NewProduct) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: details.name,
        category: details.category,
        supplier: details.supplier,
        description: details.description,
        base_price: details.base_price,
        min_stock: details.min_stock,
        units: Vec::new(),
        total_received: 0,
        total_available: 0,
        total_sold: 0,
        total_damaged: 0,
    }
}

fn qr_code_for(product_id: Uuid, seq: u32) -> String {
    format!("QR-{product_id}-UNIT-{seq:03}")
}

/// Rebuilds every derived total from the unit list. Scanning on each call
/// keeps counts correct no matter which status the mutated unit held, where
/// incremental adjustment historically under-counted deletions.
fn recompute_totals(product: &mut Product) {
    let mut available = 0;
    let mut sold = 0;
    let mut damaged = 0;
    for unit in &product.units {
        match unit.status {
            UnitStatus::Disponible => available += 1,
            UnitStatus::Vendu => sold += 1,
            UnitStatus::Endommage => damaged += 1,
            _ => {}
        }
    }
    product.total_received = product.units.len() as u32;
    product.total_available = available;
    product.total_sold = sold;
    product.total_damaged = damaged;
}

fn find_slot(slots: &mut [ProductSlot], product_id: Uuid) -> AppResult<&mut ProductSlot> {
    slots
        .iter_mut()
        .find(|slot| slot.product.id == product_id)
        .ok_or(AppError::NotFound)
}

fn find_unit(product: &mut Product, unit_id: Uuid) -> AppResult<&mut Unit> {
    product
        .units
        .iter_mut()
        .find(|unit| unit.id == unit_id)
        .ok_or(AppError::NotFound)
}
