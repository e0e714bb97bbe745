use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::database::catalog::Catalog;
use crate::database::models::Variant;
use crate::error::ApiError;
use crate::AppState;

/// GET /api/:store_id/products/:product_id/variants
///
/// Public listing, newest first. Deliberately join-free: the collection
/// view only needs raw rows, the single-item read carries the joins.
pub async fn variant_list(
    State(state): State<AppState>,
    Path((_store_id, product_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<Variant>>, ApiError> {
    let variants = state.catalog.list_variants(product_id).await?;

    Ok(Json(variants))
}
