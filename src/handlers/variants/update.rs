use axum::extract::{Path, State};
use axum::{Extension, Json};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::catalog::{Catalog, StoreReference, VariantChanges};
use crate::database::models::Variant;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::AppState;

use super::{
    empty_as_none, require_in_store, require_optional_in_store, require_owned_store,
    require_price, require_principal, require_stock,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVariant {
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub color_id: Option<Uuid>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub size_id: Option<Uuid>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub discount_id: Option<Uuid>,
}

/// PATCH /api/:store_id/products/:product_id/variants/:variant_id
///
/// Full field replacement. The persistence call filters by compound
/// {id, product_id}: a variant id under a different product matches zero
/// rows and the response is null rather than a mutation of the wrong row.
pub async fn variant_update(
    State(state): State<AppState>,
    Path((store_id, product_id, variant_id)): Path<(Uuid, Uuid, Uuid)>,
    principal: Option<Extension<AuthUser>>,
    Json(body): Json<UpdateVariant>,
) -> Result<Json<Option<Variant>>, ApiError> {
    let principal = require_principal(principal)?;

    let price = require_price(body.price)?;
    let stock = require_stock(body.stock)?;

    let catalog = state.catalog.as_ref();
    require_owned_store(catalog, store_id, &principal).await?;
    require_in_store(catalog, StoreReference::Product, product_id, store_id).await?;
    require_optional_in_store(catalog, StoreReference::Color, body.color_id, store_id).await?;
    require_optional_in_store(catalog, StoreReference::Size, body.size_id, store_id).await?;
    require_optional_in_store(catalog, StoreReference::Discount, body.discount_id, store_id).await?;

    let updated = state
        .catalog
        .update_variant(
            variant_id,
            product_id,
            VariantChanges {
                price,
                stock,
                color_id: body.color_id,
                size_id: body.size_id,
                discount_id: body.discount_id,
            },
        )
        .await?;

    Ok(Json(updated))
}
