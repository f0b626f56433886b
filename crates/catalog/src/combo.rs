use serde::{Deserialize, Serialize};

use doceria_core::{DomainError, DomainResult, Entity, EntityId};

use crate::product::{Product, ProductId};

/// Combo identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComboId(pub EntityId);

impl ComboId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ComboId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Combo line identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComboLineId(pub EntityId);

impl ComboLineId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ComboLineId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// One priced catalog-item line inside a combo.
///
/// Lines reference catalog items only, never other combos, so bundle nesting
/// is impossible by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboLine {
    pub id: ComboLineId,
    pub product_id: ProductId,
    pub quantity: u32,
    /// Price in smallest currency unit (e.g., cents).
    pub unit_price: u64,
}

/// A named, priced bundle of catalog items.
///
/// The combo owns its lines: deleting the combo or replacing its line set
/// discards them with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combo {
    pub id: ComboId,
    pub name: String,
    pub description: String,
    /// Bundle price in smallest currency unit, supplied by the caller.
    pub total_price: u64,
    pub active: bool,
    pub lines: Vec<ComboLine>,
}

impl Entity for Combo {
    type Id = ComboId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Inbound shape for creating a combo or replacing an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboDraft {
    pub name: String,
    pub description: String,
    pub total_price: u64,
    /// `None` defaults to active on create and keeps the stored value on update.
    pub active: Option<bool>,
    pub lines: Vec<ComboLineDraft>,
}

/// Inbound shape for one combo line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboLineDraft {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: u64,
}

/// Read access to the product catalog, as combo construction sees it.
pub trait ProductLookup {
    fn product(&self, id: ProductId) -> Option<Product>;
}

impl Combo {
    /// Build a combo from a draft, resolving every product reference.
    ///
    /// Resolution here is strict: one dangling reference fails the whole
    /// operation and nothing is persisted.
    pub fn create(
        id: ComboId,
        draft: ComboDraft,
        products: &impl ProductLookup,
    ) -> DomainResult<Self> {
        let lines = build_lines(&draft.lines, products)?;
        Ok(Self {
            id,
            name: draft.name,
            description: draft.description,
            total_price: draft.total_price,
            active: draft.active.unwrap_or(true),
            lines,
        })
    }

    /// Replace this combo's fields and entire line set from a draft.
    ///
    /// The previous lines are discarded wholesale; there is no per-line merge.
    /// The new set is resolved strictly before any field is touched, so a
    /// failed update leaves the combo unchanged.
    pub fn apply_update(
        &mut self,
        draft: ComboDraft,
        products: &impl ProductLookup,
    ) -> DomainResult<()> {
        let lines = build_lines(&draft.lines, products)?;
        self.name = draft.name;
        self.description = draft.description;
        self.total_price = draft.total_price;
        if let Some(active) = draft.active {
            self.active = active;
        }
        self.lines = lines;
        Ok(())
    }
}

fn build_lines(
    drafts: &[ComboLineDraft],
    products: &impl ProductLookup,
) -> DomainResult<Vec<ComboLine>> {
    let mut lines = Vec::with_capacity(drafts.len());
    for draft in drafts {
        if draft.quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if products.product(draft.product_id).is_none() {
            return Err(DomainError::unresolved(format!(
                "catalog item not found for id {}",
                draft.product_id
            )));
        }
        lines.push(ComboLine {
            id: ComboLineId::new(EntityId::new()),
            product_id: draft.product_id,
            quantity: draft.quantity,
            unit_price: draft.unit_price,
        });
    }
    Ok(lines)
}
