use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::models::{Color, Discount, Size, Store, Variant};
use super::DatabaseError;

/// Store-scoped rows a variant may reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreReference {
    Product,
    Color,
    Size,
    Discount,
}

impl StoreReference {
    /// Label used in "... does not belong to store" responses
    pub fn label(&self) -> &'static str {
        match self {
            StoreReference::Product => "Product Id",
            StoreReference::Color => "Color",
            StoreReference::Size => "Size",
            StoreReference::Discount => "Discount",
        }
    }

    pub(crate) fn table(&self) -> &'static str {
        match self {
            StoreReference::Product => "products",
            StoreReference::Color => "colors",
            StoreReference::Size => "sizes",
            StoreReference::Discount => "discounts",
        }
    }
}

/// Fields persisted by the create path. Discounts are intentionally not
/// part of creation; they can only be attached through update.
#[derive(Debug, Clone)]
pub struct NewVariant {
    pub product_id: Uuid,
    pub price: Decimal,
    pub stock: i32,
    pub color_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
}

/// Full field replacement applied by the update path
#[derive(Debug, Clone)]
pub struct VariantChanges {
    pub price: Decimal,
    pub stock: i32,
    pub color_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub discount_id: Option<Uuid>,
}

/// Variant joined with its lookup rows, for the detail view
#[derive(Debug, Clone, Serialize)]
pub struct VariantDetail {
    #[serde(flatten)]
    pub variant: Variant,
    pub color: Option<Color>,
    pub size: Option<Size>,
    pub discount: Option<Discount>,
}

/// Persistence seam for the catalog. Ownership and parent-scope checks are
/// compound-filter lookups executed as a single call, never fetch-then-compare.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn health(&self) -> Result<(), DatabaseError>;

    /// A store that exists but belongs to another owner is indistinguishable
    /// from a missing store.
    async fn find_store_owned(
        &self,
        store_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Store>, DatabaseError>;

    /// Does the referenced row exist under the given store?
    async fn reference_in_store(
        &self,
        reference: StoreReference,
        id: Uuid,
        store_id: Uuid,
    ) -> Result<bool, DatabaseError>;

    /// Raw variants for a product, newest first. No joins; the listing is a
    /// thin existence/ordering query.
    async fn list_variants(&self, product_id: Uuid) -> Result<Vec<Variant>, DatabaseError>;

    /// Joined listing the table projection is built from, newest first
    async fn list_variant_details(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<VariantDetail>, DatabaseError>;

    async fn find_variant_detail(
        &self,
        variant_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<VariantDetail>, DatabaseError>;

    async fn create_variant(&self, variant: NewVariant) -> Result<Variant, DatabaseError>;

    /// Scoped by compound {id, product_id}; a mismatch on either matches
    /// zero rows and yields None.
    async fn update_variant(
        &self,
        variant_id: Uuid,
        product_id: Uuid,
        changes: VariantChanges,
    ) -> Result<Option<Variant>, DatabaseError>;

    /// Scoped by compound {id, product_id}; None when nothing was deleted
    async fn delete_variant(
        &self,
        variant_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<Variant>, DatabaseError>;
}
