use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A purchasable configuration of a product. The optional foreign keys
/// reference the store's lookup vocabularies; created_at is the listing
/// order key (newest first).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: Uuid,
    pub product_id: Uuid,
    pub price: Decimal,
    pub stock: i32,
    pub color_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub discount_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
