use serde::{Deserialize, Serialize};

use doceria_catalog::{Combo, ComboId, Product, ProductId};
use doceria_core::EntityId;

/// Line item identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(pub EntityId);

impl LineItemId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for LineItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// The one thing a transaction line points at: a catalog item or a combo.
///
/// An enum rather than two optional foreign keys, so "exactly one reference"
/// holds by construction instead of by runtime convention. Flattened into the
/// owning line on the wire, it serializes as a single `catalogItem`/`combo`
/// key — never both, never neither.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineTarget {
    CatalogItem(ProductId),
    Combo(ComboId),
}

/// One row of a sale or commission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: LineItemId,
    pub quantity: u32,
    /// Price in smallest currency unit (e.g., cents).
    pub unit_price: u64,
    #[serde(flatten)]
    pub target: LineTarget,
}

/// Inbound line shape: at most one of the two references set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDescriptor {
    pub catalog_item_id: Option<ProductId>,
    pub combo_id: Option<ComboId>,
    pub quantity: u32,
    pub unit_price: u64,
}

/// Read access to products and combos during line resolution and projection.
pub trait CatalogLookup {
    fn product(&self, id: ProductId) -> Option<Product>;
    fn combo(&self, id: ComboId) -> Option<Combo>;
}

/// Resolve inbound line descriptors against the catalog.
///
/// Tolerant by design, in contrast to combo construction: a descriptor whose
/// reference does not resolve (or that carries no reference at all) is
/// dropped with a logged diagnostic, and the surviving lines keep their input
/// order. A catalog-item reference wins when a descriptor somehow carries
/// both. The same catalog snapshot and input always yield the same targets,
/// quantities and prices; only the generated line ids differ between runs.
pub fn resolve_line_items(
    catalog: &impl CatalogLookup,
    descriptors: &[LineDescriptor],
) -> Vec<LineItem> {
    let mut lines = Vec::with_capacity(descriptors.len());
    for descriptor in descriptors {
        let target = match (descriptor.catalog_item_id, descriptor.combo_id) {
            (Some(product_id), _) => {
                if catalog.product(product_id).is_some() {
                    Some(LineTarget::CatalogItem(product_id))
                } else {
                    tracing::warn!(%product_id, "skipping line: catalog item not found");
                    None
                }
            }
            (None, Some(combo_id)) => {
                if catalog.combo(combo_id).is_some() {
                    Some(LineTarget::Combo(combo_id))
                } else {
                    tracing::warn!(%combo_id, "skipping line: combo not found");
                    None
                }
            }
            (None, None) => {
                tracing::warn!("skipping line: neither catalog item nor combo referenced");
                None
            }
        };

        let Some(target) = target else { continue };

        if descriptor.quantity == 0 {
            tracing::warn!(?target, "skipping line: zero quantity");
            continue;
        }

        lines.push(LineItem {
            id: LineItemId::new(EntityId::new()),
            quantity: descriptor.quantity,
            unit_price: descriptor.unit_price,
            target,
        });
    }
    lines
}
