use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use doceria_core::{Entity, EntityId};

use crate::product::ProductId;

/// Promotional item identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromotionId(pub EntityId);

impl PromotionId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for PromotionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A time-boxed promotional listing for one catalog item.
///
/// Inert record: nothing in the pricing path consults it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: PromotionId,
    pub product_id: ProductId,
    pub description: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
}

impl Entity for Promotion {
    type Id = PromotionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
