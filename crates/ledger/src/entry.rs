use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use doceria_core::{Entity, EntityId};

/// Ledger entry identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerEntryId(pub EntityId);

impl LedgerEntryId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for LedgerEntryId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Direction of a cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Inflow,
    Outflow,
}

/// One cash-flow movement, recorded as sent by the caller.
///
/// `total` is caller-supplied, like every stored total in this system; it is
/// not derived from `unit_price × quantity` here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: LedgerEntryId,
    pub name: String,
    /// Price in smallest currency unit (e.g., cents).
    pub unit_price: u64,
    pub quantity: u32,
    pub total: u64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub kind: EntryKind,
}

impl Entity for LedgerEntry {
    type Id = LedgerEntryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
