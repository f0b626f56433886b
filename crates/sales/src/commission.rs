use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use doceria_core::{Entity, EntityId};

use crate::line_item::{CatalogLookup, LineDescriptor, LineItem, resolve_line_items};
use crate::status::OrderStatus;

/// Commission identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommissionId(pub EntityId);

impl CommissionId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for CommissionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A commissioned order: a customer request to be delivered on a future date.
///
/// Same line-composition rules as [`crate::Sale`]; the difference is the
/// delivery date and the free-form description of what was agreed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commission {
    pub id: CommissionId,
    pub customer: String,
    pub description: String,
    pub delivery_date: NaiveDate,
    /// Agreed amount in smallest currency unit, supplied by the caller.
    pub amount: u64,
    pub status: OrderStatus,
    pub lines: Vec<LineItem>,
}

impl Entity for Commission {
    type Id = CommissionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Inbound shape for creating or replacing a commission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommissionDraft {
    pub customer: String,
    pub description: String,
    pub delivery_date: NaiveDate,
    pub amount: u64,
    pub lines: Vec<LineDescriptor>,
}

impl Commission {
    /// Assemble a commission from a draft: status forced to `Pending`, lines
    /// resolved tolerantly.
    pub fn create(id: CommissionId, draft: CommissionDraft, catalog: &impl CatalogLookup) -> Self {
        let lines = resolve_line_items(catalog, &draft.lines);
        Self {
            id,
            customer: draft.customer,
            description: draft.description,
            delivery_date: draft.delivery_date,
            amount: draft.amount,
            status: OrderStatus::Pending,
            lines,
        }
    }

    /// Replace every field from the draft, re-resolving the lines fresh.
    /// Keeps identity, and the status unless one is supplied.
    pub fn replace(
        &mut self,
        draft: CommissionDraft,
        status: Option<OrderStatus>,
        catalog: &impl CatalogLookup,
    ) {
        let lines = resolve_line_items(catalog, &draft.lines);
        self.customer = draft.customer;
        self.description = draft.description;
        self.delivery_date = draft.delivery_date;
        self.amount = draft.amount;
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
