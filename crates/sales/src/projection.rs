//! Read-side projection of a sale into its flat wire shape.
//!
//! This is the one external contract a UI depends on: every projected line
//! carries *exactly one* of a `catalogItem` or a `combo` sub-object, and a
//! combo sub-object expands its own product lines in place.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use doceria_catalog::{Combo, ComboId, ComboLineId, Product, ProductId};

use crate::line_item::{CatalogLookup, LineItem, LineItemId, LineTarget};
use crate::sale::{Sale, SaleId};

/// Projected sale, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleView {
    pub id: SaleId,
    pub customer: String,
    pub total_amount: u64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: String,
    pub lines: Vec<SaleLineView>,
}

/// Projected transaction line.
///
/// At most one of `catalog_item`/`combo` is present; both absent means the
/// referent could not be resolved at projection time (an unknown line, kept
/// rather than failing the whole read).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLineView {
    pub id: LineItemId,
    pub quantity: u32,
    pub unit_price: u64,
    /// Computed at projection time: unit price × quantity. Never stored.
    pub total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_item: Option<ProductView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combo: Option<ComboView>,
}

/// Projected catalog item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub unit_price: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<NaiveDate>,
}

/// Projected combo, expanded with its own product lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboView {
    pub id: ComboId,
    pub name: String,
    pub description: String,
    pub total_price: u64,
    pub active: bool,
    pub lines: Vec<ComboLineView>,
}

/// Projected combo line. Combo lines only ever reference catalog items, so
/// there is no variant to resolve here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboLineView {
    pub id: ComboLineId,
    pub quantity: u32,
    pub unit_price: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_item: Option<ProductView>,
}

/// Project a persisted sale into its wire shape.
///
/// Pure read-side transform: no mutation, no persistence. Projecting the same
/// sale against the same catalog twice yields identical output.
pub fn project_sale(sale: &Sale, catalog: &impl CatalogLookup) -> SaleView {
    SaleView {
        id: sale.id,
        customer: sale.customer.clone(),
        total_amount: sale.total_amount,
        date: sale.sale_date,
        time: sale.sale_time,
        status: sale.status.to_string(),
        lines: sale
            .lines
            .iter()
            .map(|line| project_line(line, catalog))
            .collect(),
    }
}

fn project_line(line: &LineItem, catalog: &impl CatalogLookup) -> SaleLineView {
    let (catalog_item, combo) = match line.target {
        LineTarget::CatalogItem(id) => (catalog.product(id).map(project_product), None),
        LineTarget::Combo(id) => (
            None,
            catalog.combo(id).map(|combo| project_combo(&combo, catalog)),
        ),
    };

    SaleLineView {
        id: line.id,
        quantity: line.quantity,
        unit_price: line.unit_price,
        total: line.unit_price * u64::from(line.quantity),
        catalog_item,
        combo,
    }
}

fn project_product(product: Product) -> ProductView {
    ProductView {
        id: product.id,
        name: product.name,
        unit_price: product.unit_price,
        expires_on: product.expires_on,
    }
}

fn project_combo(combo: &Combo, catalog: &impl CatalogLookup) -> ComboView {
    ComboView {
        id: combo.id,
        name: combo.name.clone(),
        description: combo.description.clone(),
        total_price: combo.total_price,
        active: combo.active,
        lines: combo
            .lines
            .iter()
            .map(|line| ComboLineView {
                id: line.id,
                quantity: line.quantity,
                unit_price: line.unit_price,
                catalog_item: catalog.product(line.product_id).map(project_product),
            })
            .collect(),
    }
}
