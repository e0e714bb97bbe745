//! Test support: an in-memory Catalog implementation.
//!
//! Backs the integration suite so it can drive the real router without a
//! database. Compiled unconditionally because `tests/` integration crates
//! cannot see test-gated library modules.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::database::catalog::{
    Catalog, NewVariant, StoreReference, VariantChanges, VariantDetail,
};
use crate::database::models::{Color, Discount, Product, Size, Store, Variant};
use crate::database::DatabaseError;

#[derive(Default)]
struct CatalogState {
    stores: Vec<Store>,
    products: Vec<Product>,
    colors: Vec<Color>,
    sizes: Vec<Size>,
    discounts: Vec<Discount>,
    variants: Vec<SequencedVariant>,
    next_seq: u64,
}

/// Insertion sequence breaks created_at ties so "newest first" stays
/// deterministic when rows are created within the same clock tick.
struct SequencedVariant {
    seq: u64,
    variant: Variant,
}

#[derive(Default)]
pub struct MemoryCatalog {
    state: Mutex<CatalogState>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_store(&self, owner_id: Uuid, name: &str) -> Store {
        let now = Utc::now();
        let store = Store {
            id: Uuid::new_v4(),
            owner_id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.lock().stores.push(store.clone());
        store
    }

    pub fn add_product(&self, store_id: Uuid, name: &str) -> Product {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            store_id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.lock().products.push(product.clone());
        product
    }

    pub fn add_color(&self, store_id: Uuid, name: &str) -> Color {
        let now = Utc::now();
        let color = Color {
            id: Uuid::new_v4(),
            store_id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.lock().colors.push(color.clone());
        color
    }

    pub fn add_size(&self, store_id: Uuid, name: &str) -> Size {
        let now = Utc::now();
        let size = Size {
            id: Uuid::new_v4(),
            store_id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.lock().sizes.push(size.clone());
        size
    }

    pub fn add_discount(&self, store_id: Uuid, name: &str) -> Discount {
        let now = Utc::now();
        let discount = Discount {
            id: Uuid::new_v4(),
            store_id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.lock().discounts.push(discount.clone());
        discount
    }

    /// Direct row inspection for assertions
    pub fn variant(&self, id: Uuid) -> Option<Variant> {
        self.lock()
            .variants
            .iter()
            .find(|entry| entry.variant.id == id)
            .map(|entry| entry.variant.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CatalogState> {
        self.state.lock().expect("catalog state poisoned")
    }

    fn detail(state: &CatalogState, variant: Variant) -> VariantDetail {
        let color = variant
            .color_id
            .and_then(|id| state.colors.iter().find(|c| c.id == id).cloned());
        let size = variant
            .size_id
            .and_then(|id| state.sizes.iter().find(|s| s.id == id).cloned());
        let discount = variant
            .discount_id
            .and_then(|id| state.discounts.iter().find(|d| d.id == id).cloned());
        VariantDetail {
            variant,
            color,
            size,
            discount,
        }
    }

    fn newest_first(state: &CatalogState, product_id: Uuid) -> Vec<Variant> {
        let mut entries: Vec<_> = state
            .variants
            .iter()
            .filter(|entry| entry.variant.product_id == product_id)
            .map(|entry| (entry.seq, entry.variant.clone()))
            .collect();
        entries.sort_by(|a, b| (b.1.created_at, b.0).cmp(&(a.1.created_at, a.0)));
        entries.into_iter().map(|(_, variant)| variant).collect()
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn health(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn find_store_owned(
        &self,
        store_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Store>, DatabaseError> {
        Ok(self
            .lock()
            .stores
            .iter()
            .find(|store| store.id == store_id && store.owner_id == owner_id)
            .cloned())
    }

    async fn reference_in_store(
        &self,
        reference: StoreReference,
        id: Uuid,
        store_id: Uuid,
    ) -> Result<bool, DatabaseError> {
        let state = self.lock();
        let found = match reference {
            StoreReference::Product => state
                .products
                .iter()
                .any(|p| p.id == id && p.store_id == store_id),
            StoreReference::Color => state
                .colors
                .iter()
                .any(|c| c.id == id && c.store_id == store_id),
            StoreReference::Size => state
                .sizes
                .iter()
                .any(|s| s.id == id && s.store_id == store_id),
            StoreReference::Discount => state
                .discounts
                .iter()
                .any(|d| d.id == id && d.store_id == store_id),
        };
        Ok(found)
    }

    async fn list_variants(&self, product_id: Uuid) -> Result<Vec<Variant>, DatabaseError> {
        Ok(Self::newest_first(&self.lock(), product_id))
    }

    async fn list_variant_details(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<VariantDetail>, DatabaseError> {
        let state = self.lock();
        Ok(Self::newest_first(&state, product_id)
            .into_iter()
            .map(|variant| Self::detail(&state, variant))
            .collect())
    }

    async fn find_variant_detail(
        &self,
        variant_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<VariantDetail>, DatabaseError> {
        let state = self.lock();
        Ok(state
            .variants
            .iter()
            .find(|entry| entry.variant.id == variant_id && entry.variant.product_id == product_id)
            .map(|entry| Self::detail(&state, entry.variant.clone())))
    }

    async fn create_variant(&self, variant: NewVariant) -> Result<Variant, DatabaseError> {
        let mut state = self.lock();
        let now = Utc::now();
        let created = Variant {
            id: Uuid::new_v4(),
            product_id: variant.product_id,
            price: variant.price,
            stock: variant.stock,
            color_id: variant.color_id,
            size_id: variant.size_id,
            discount_id: None,
            created_at: now,
            updated_at: now,
        };
        let seq = state.next_seq;
        state.next_seq += 1;
        state.variants.push(SequencedVariant {
            seq,
            variant: created.clone(),
        });
        Ok(created)
    }

    async fn update_variant(
        &self,
        variant_id: Uuid,
        product_id: Uuid,
        changes: VariantChanges,
    ) -> Result<Option<Variant>, DatabaseError> {
        let mut state = self.lock();
        let entry = state
            .variants
            .iter_mut()
            .find(|entry| entry.variant.id == variant_id && entry.variant.product_id == product_id);

        Ok(entry.map(|entry| {
            entry.variant.price = changes.price;
            entry.variant.stock = changes.stock;
            entry.variant.color_id = changes.color_id;
            entry.variant.size_id = changes.size_id;
            entry.variant.discount_id = changes.discount_id;
            entry.variant.updated_at = Utc::now();
            entry.variant.clone()
        }))
    }

    async fn delete_variant(
        &self,
        variant_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<Variant>, DatabaseError> {
        let mut state = self.lock();
        let position = state
            .variants
            .iter()
            .position(|entry| entry.variant.id == variant_id && entry.variant.product_id == product_id);

        Ok(position.map(|position| state.variants.remove(position).variant))
    }
}
