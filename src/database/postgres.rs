use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::catalog::{Catalog, NewVariant, StoreReference, VariantChanges, VariantDetail};
use super::models::{Color, Discount, Size, Store, Variant};
use super::DatabaseError;

const VARIANT_COLUMNS: &str =
    "id, product_id, price, stock, color_id, size_id, discount_id, created_at, updated_at";

const DETAIL_SQL: &str = "\
SELECT v.id, v.product_id, v.price, v.stock, v.color_id, v.size_id, v.discount_id, \
       v.created_at, v.updated_at, \
       c.id AS c_id, c.store_id AS c_store_id, c.name AS c_name, \
       c.created_at AS c_created_at, c.updated_at AS c_updated_at, \
       s.id AS s_id, s.store_id AS s_store_id, s.name AS s_name, \
       s.created_at AS s_created_at, s.updated_at AS s_updated_at, \
       d.id AS d_id, d.store_id AS d_store_id, d.name AS d_name, \
       d.created_at AS d_created_at, d.updated_at AS d_updated_at \
FROM variants v \
LEFT JOIN colors c ON c.id = v.color_id \
LEFT JOIN sizes s ON s.id = v.size_id \
LEFT JOIN discounts d ON d.id = v.discount_id";

/// Production catalog backed by PostgreSQL
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Catalog for PgCatalog {
    async fn health(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_store_owned(
        &self,
        store_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Store>, DatabaseError> {
        let store = sqlx::query_as::<_, Store>(
            "SELECT id, owner_id, name, created_at, updated_at FROM stores \
             WHERE id = $1 AND owner_id = $2",
        )
        .bind(store_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(store)
    }

    async fn reference_in_store(
        &self,
        reference: StoreReference,
        id: Uuid,
        store_id: Uuid,
    ) -> Result<bool, DatabaseError> {
        // Table names come from the enum, never from input
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1 AND store_id = $2)",
            reference.table()
        );

        let (exists,): (bool,) = sqlx::query_as(&sql)
            .bind(id)
            .bind(store_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn list_variants(&self, product_id: Uuid) -> Result<Vec<Variant>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM variants WHERE product_id = $1 ORDER BY created_at DESC",
            VARIANT_COLUMNS
        );

        let variants = sqlx::query_as::<_, Variant>(&sql)
            .bind(product_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(variants)
    }

    async fn list_variant_details(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<VariantDetail>, DatabaseError> {
        let sql = format!("{} WHERE v.product_id = $1 ORDER BY v.created_at DESC", DETAIL_SQL);

        let rows = sqlx::query(&sql)
            .bind(product_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| detail_from_row(row).map_err(DatabaseError::from))
            .collect()
    }

    async fn find_variant_detail(
        &self,
        variant_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<VariantDetail>, DatabaseError> {
        let sql = format!("{} WHERE v.id = $1 AND v.product_id = $2", DETAIL_SQL);

        let row = sqlx::query(&sql)
            .bind(variant_id)
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(detail_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn create_variant(&self, variant: NewVariant) -> Result<Variant, DatabaseError> {
        let sql = format!(
            "INSERT INTO variants (id, product_id, price, stock, color_id, size_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7) \
             RETURNING {}",
            VARIANT_COLUMNS
        );

        let created = sqlx::query_as::<_, Variant>(&sql)
            .bind(Uuid::new_v4())
            .bind(variant.product_id)
            .bind(variant.price)
            .bind(variant.stock)
            .bind(variant.color_id)
            .bind(variant.size_id)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn update_variant(
        &self,
        variant_id: Uuid,
        product_id: Uuid,
        changes: VariantChanges,
    ) -> Result<Option<Variant>, DatabaseError> {
        let sql = format!(
            "UPDATE variants \
             SET price = $3, stock = $4, color_id = $5, size_id = $6, discount_id = $7, updated_at = $8 \
             WHERE id = $1 AND product_id = $2 \
             RETURNING {}",
            VARIANT_COLUMNS
        );

        let updated = sqlx::query_as::<_, Variant>(&sql)
            .bind(variant_id)
            .bind(product_id)
            .bind(changes.price)
            .bind(changes.stock)
            .bind(changes.color_id)
            .bind(changes.size_id)
            .bind(changes.discount_id)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    async fn delete_variant(
        &self,
        variant_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<Variant>, DatabaseError> {
        let sql = format!(
            "DELETE FROM variants WHERE id = $1 AND product_id = $2 RETURNING {}",
            VARIANT_COLUMNS
        );

        let deleted = sqlx::query_as::<_, Variant>(&sql)
            .bind(variant_id)
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(deleted)
    }
}

/// Assemble a joined row into a detail record. Joined lookup columns are
/// NULL when the variant carries no reference.
fn detail_from_row(row: &PgRow) -> Result<VariantDetail, sqlx::Error> {
    let variant = Variant {
        id: row.try_get("id")?,
        product_id: row.try_get("product_id")?,
        price: row.try_get("price")?,
        stock: row.try_get("stock")?,
        color_id: row.try_get("color_id")?,
        size_id: row.try_get("size_id")?,
        discount_id: row.try_get("discount_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    };

    let color = match row.try_get::<Option<Uuid>, _>("c_id")? {
        Some(id) => Some(Color {
            id,
            store_id: row.try_get("c_store_id")?,
            name: row.try_get("c_name")?,
            created_at: row.try_get("c_created_at")?,
            updated_at: row.try_get("c_updated_at")?,
        }),
        None => None,
    };

    let size = match row.try_get::<Option<Uuid>, _>("s_id")? {
        Some(id) => Some(Size {
            id,
            store_id: row.try_get("s_store_id")?,
            name: row.try_get("s_name")?,
            created_at: row.try_get("s_created_at")?,
            updated_at: row.try_get("s_updated_at")?,
        }),
        None => None,
    };

    let discount = match row.try_get::<Option<Uuid>, _>("d_id")? {
        Some(id) => Some(Discount {
            id,
            store_id: row.try_get("d_store_id")?,
            name: row.try_get("d_name")?,
            created_at: row.try_get("d_created_at")?,
            updated_at: row.try_get("d_updated_at")?,
        }),
        None => None,
    };

    Ok(VariantDetail {
        variant,
        color,
        size,
        discount,
    })
}
