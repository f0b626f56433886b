//! `doceria-sales` — sale/commission composition and pricing model.
//!
//! This crate holds the one structurally interesting part of the system: a
//! transaction line can reference *either* a catalog item *or* a combo (a
//! priced bundle of catalog items), combos recursively contain priced product
//! lines, and sales project into a flat wire shape that must keep that
//! either/or unambiguous.

pub mod commission;
pub mod line_item;
pub mod projection;
pub mod sale;
pub mod status;

pub use commission::{Commission, CommissionDraft, CommissionId};
pub use line_item::{
    CatalogLookup, LineDescriptor, LineItem, LineItemId, LineTarget, resolve_line_items,
};
pub use projection::{ComboLineView, ComboView, ProductView, SaleLineView, SaleView, project_sale};
pub use sale::{Sale, SaleDraft, SaleId};
pub use status::OrderStatus;
