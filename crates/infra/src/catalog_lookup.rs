use doceria_catalog::{Combo, ComboId, Product, ProductId, ProductLookup};
use doceria_sales::CatalogLookup;

use crate::store::{InMemoryStore, Store};

/// Catalog read access over the in-memory stores.
///
/// Borrowed for the duration of one request, which is exactly the snapshot
/// window the resolution and projection code assumes.
pub struct CatalogSnapshot<'a> {
    pub products: &'a InMemoryStore<ProductId, Product>,
    pub combos: &'a InMemoryStore<ComboId, Combo>,
}

impl ProductLookup for CatalogSnapshot<'_> {
    fn product(&self, id: ProductId) -> Option<Product> {
        self.products.find(&id)
    }
}

impl CatalogLookup for CatalogSnapshot<'_> {
    fn product(&self, id: ProductId) -> Option<Product> {
        self.products.find(&id)
    }

    fn combo(&self, id: ComboId) -> Option<Combo> {
        self.combos.find(&id)
    }
}
