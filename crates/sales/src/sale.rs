use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use doceria_core::{Entity, EntityId};

use crate::line_item::{CatalogLookup, LineDescriptor, LineItem, resolve_line_items};
use crate::status::OrderStatus;

/// Sale identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(pub EntityId);

impl SaleId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for SaleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A point-of-sale transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: SaleId,
    pub customer: String,
    /// Caller-supplied total in smallest currency unit. Not reconciled
    /// against the lines.
    pub total_amount: u64,
    pub sale_date: NaiveDate,
    pub sale_time: NaiveTime,
    pub status: OrderStatus,
    pub lines: Vec<LineItem>,
}

impl Entity for Sale {
    type Id = SaleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Inbound shape for creating or replacing a sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleDraft {
    pub customer: String,
    pub total_amount: u64,
    pub sale_date: NaiveDate,
    pub sale_time: NaiveTime,
    pub lines: Vec<LineDescriptor>,
}

impl Sale {
    /// Assemble a sale from a draft.
    ///
    /// Status starts at `Pending` no matter what the caller sent; lines are
    /// resolved tolerantly (see [`resolve_line_items`]).
    pub fn create(id: SaleId, draft: SaleDraft, catalog: &impl CatalogLookup) -> Self {
        let lines = resolve_line_items(catalog, &draft.lines);
        Self {
            id,
            customer: draft.customer,
            total_amount: draft.total_amount,
            sale_date: draft.sale_date,
            sale_time: draft.sale_time,
            status: OrderStatus::Pending,
            lines,
        }
    }

    /// Replace every field from the draft, re-resolving the lines fresh.
    ///
    /// Identity is kept; the status is kept too unless the caller supplied
    /// one explicitly.
    pub fn replace(
        &mut self,
        draft: SaleDraft,
        status: Option<OrderStatus>,
        catalog: &impl CatalogLookup,
    ) {
        let lines = resolve_line_items(catalog, &draft.lines);
        self.customer = draft.customer;
        self.total_amount = draft.total_amount;
        self.sale_date = draft.sale_date;
        self.sale_time = draft.sale_time;
        if let Some(status) = status {
            self.status = status;
        }
        self.lines = lines;
    }

    /// Case-insensitive free-text match over customer name and id.
    pub fn matches_term(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.customer.to_lowercase().contains(&term) || self.id.to_string().contains(&term)
    }
}
