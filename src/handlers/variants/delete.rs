use axum::extract::{Path, State};
use axum::{Extension, Json};
use uuid::Uuid;

use crate::database::catalog::Catalog;
use crate::database::models::Variant;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::AppState;

use super::{require_owned_store, require_principal};

/// DELETE /api/:store_id/products/:product_id/variants/:variant_id
///
/// Immediate and irreversible; no soft delete at this layer. Deleting a
/// variant that does not exist (or was already deleted) is an error, not
/// a silent success.
pub async fn variant_delete(
    State(state): State<AppState>,
    Path((store_id, product_id, variant_id)): Path<(Uuid, Uuid, Uuid)>,
    principal: Option<Extension<AuthUser>>,
) -> Result<Json<Variant>, ApiError> {
    let principal = require_principal(principal)?;

    require_owned_store(state.catalog.as_ref(), store_id, &principal).await?;

    let deleted = state.catalog.delete_variant(variant_id, product_id).await?;

    let Some(variant) = deleted else {
        tracing::warn!(%variant_id, %product_id, "delete matched no variant");
        return Err(ApiError::internal());
    };

    Ok(Json(variant))
}
