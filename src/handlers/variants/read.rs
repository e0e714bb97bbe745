use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::database::catalog::{Catalog, VariantDetail};
use crate::error::ApiError;
use crate::AppState;

/// GET /api/:store_id/products/:product_id/variants/:variant_id
///
/// Public denormalized read: the variant joined with its color, size and
/// discount. A compound {id, product_id} miss is a null payload, not an
/// error; the caller treats null as "not found".
pub async fn variant_read(
    State(state): State<AppState>,
    Path((_store_id, product_id, variant_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<Option<VariantDetail>>, ApiError> {
    let detail = state
        .catalog
        .find_variant_detail(variant_id, product_id)
        .await?;

    Ok(Json(detail))
}
