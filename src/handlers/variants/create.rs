use axum::extract::{Path, State};
use axum::{Extension, Json};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::catalog::{Catalog, NewVariant, StoreReference};
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
pub struct CreateVariant {
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub color_id: Option<Uuid>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub size_id: Option<Uuid>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub discount_id: Option<Uuid>,
}

/// POST /api/:store_id/products/:product_id/variants
pub async fn variant_create(
    State(state): State<AppState>,
    Path((store_id, product_id)): Path<(Uuid, Uuid)>,
    principal: Option<Extension<AuthUser>>,
    Json(body): Json<CreateVariant>,
) -> Result<Json<Variant>, ApiError> {
    let principal = require_principal(principal)?;

    // Discounts cannot be attached at creation; the field is accepted
    // for wire compatibility and ignored.
    let CreateVariant {
        price,
        stock,
        color_id,
        size_id,
        discount_id: _,
    } = body;

    let price = require_price(price)?;
    let stock = require_stock(stock)?;

    let catalog = state.catalog.as_ref();
    require_owned_store(catalog, store_id, &principal).await?;
    require_in_store(catalog, StoreReference::Product, product_id, store_id).await?;
    require_optional_in_store(catalog, StoreReference::Color, color_id, store_id).await?;
    require_optional_in_store(catalog, StoreReference::Size, size_id, store_id).await?;

    // product_id comes from the route, never from the body
    let variant = state
        .catalog
        .create_variant(NewVariant {
            product_id,
            price,
            stock,
            color_id,
            size_id,
        })
        .await?;

    Ok(Json(variant))
}
