//! `doceria-ledger` — cash-flow ledger records.

pub mod entry;

pub use entry::{EntryKind, LedgerEntry, LedgerEntryId};
