//! `doceria-infra` — persistence and wiring concerns.
//!
//! Everything here is deliberately boring: keyed stores with cascade-by-
//! ownership semantics, read adapters over them, and startup seeding.

pub mod catalog_lookup;
pub mod seed;
pub mod store;

pub use catalog_lookup::CatalogSnapshot;
pub use seed::seed_admin;
pub use store::{InMemoryStore, Store};
