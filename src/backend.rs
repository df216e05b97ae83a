use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::{
    models::UnitStatus,
    store::{ImportedProduct, ImportedUnit, NewProduct},
};

/// One supplier-product group as the upstream stock endpoint returns it.
#[derive(Debug, Deserialize)]
pub struct StockGroup {
    #[serde(rename = "produitFournisseur")]
    pub produit_fournisseur: UpstreamProduct,
    #[serde(default)]
    pub stocks: Vec<UpstreamStock>,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamProduct {
    pub nom: String,
    #[serde(default)]
    pub categorie: String,
    #[serde(default)]
    pub fournisseur: String,
    #[serde(rename = "prixBase", default)]
    pub prix_base: f64,
    #[serde(rename = "stockMinimum", default)]
    pub stock_minimum: u32,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamStock {
    pub sku: String,
    #[serde(default)]
    pub lot: String,
    #[serde(default)]
    pub statut: String,
    #[serde(default)]
    pub emplacement: String,
    #[serde(rename = "dateEntreeStock")]
    pub date_entree_stock: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Read path of the upstream product/stock source. Any failure surfaces to
/// the caller, which falls back to an empty collection rather than keeping
/// partial data.
pub async fn fetch_stock(url: &str) -> Result<Vec<ImportedProduct>, reqwest::Error> {
    let groups: Vec<StockGroup> = reqwest::get(url)
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(groups.into_iter().map(map_group).collect())
}

/// Field mapping from the upstream shape: `sku` becomes the serial number,
/// `statut` the status, `dateEntreeStock` the received date and
/// `emplacement` the location.
pub fn map_group(group: StockGroup) -> ImportedProduct {
    let p = group.produit_fournisseur;
    let units = group
        .stocks
        .into_iter()
        .map(|stock| {
            let status = UnitStatus::parse(&stock.statut).unwrap_or_else(|| {
                tracing::warn!(sku = %stock.sku, statut = %stock.statut, "unknown statut, defaulting to DISPONIBLE");
                UnitStatus::Disponible
            });
            ImportedUnit {
                serial_number: stock.sku,
                lot: stock.lot,
                status,
                location: stock.emplacement,
                received_date: stock
                    .date_entree_stock
                    .unwrap_or_else(|| Utc::now().date_naive()),
                notes: stock.notes,
            }
        })
        .collect();
    ImportedProduct {
        details: NewProduct {
            name: p.nom,
            category: p.categorie,
            supplier: p.fournisseur,
            description: p.description,
            base_price: p.prix_base,
            min_stock: p.stock_minimum,
        },
        units,
    }
}
