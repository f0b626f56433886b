use std::sync::Arc;

use doceria_auth::{User, UserId};
use doceria_catalog::{Combo, ComboId, Product, ProductId, Promotion, PromotionId};
use doceria_infra::{CatalogSnapshot, InMemoryStore, seed_admin};
use doceria_ledger::{LedgerEntry, LedgerEntryId};
use doceria_sales::{Commission, CommissionId, Sale, SaleId};

/// Shared application state: one store per record kind.
///
/// Every handler runs a single synchronous read/compute/write cycle against
/// these stores. Concurrent writers to the same record race last-write-wins;
/// the stores make no further promises.
pub struct AppServices {
    pub products: Arc<InMemoryStore<ProductId, Product>>,
    pub combos: Arc<InMemoryStore<ComboId, Combo>>,
    pub sales: Arc<InMemoryStore<SaleId, Sale>>,
    pub commissions: Arc<InMemoryStore<CommissionId, Commission>>,
    pub ledger: Arc<InMemoryStore<LedgerEntryId, LedgerEntry>>,
    pub promotions: Arc<InMemoryStore<PromotionId, Promotion>>,
    pub users: Arc<InMemoryStore<UserId, User>>,
}

impl AppServices {
    /// Catalog read access for combo building, line resolution and sale
    /// projection. Borrowed per request.
    pub fn catalog(&self) -> CatalogSnapshot<'_> {
        CatalogSnapshot {
            products: &self.products,
            combos: &self.combos,
        }
    }
}

pub fn build_services() -> AppServices {
    let services = AppServices {
        products: Arc::new(InMemoryStore::new()),
        combos: Arc::new(InMemoryStore::new()),
        sales: Arc::new(InMemoryStore::new()),
        commissions: Arc::new(InMemoryStore::new()),
        ledger: Arc::new(InMemoryStore::new()),
        promotions: Arc::new(InMemoryStore::new()),
        users: Arc::new(InMemoryStore::new()),
    };

    seed_admin(&services.users);
    services
}
