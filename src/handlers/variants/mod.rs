// Variant handlers: guard clauses composed in front of exactly one
// persistence call per operation. The handler is the error boundary;
// nothing propagates past it except as an ApiError response.

use axum::Extension;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::database::catalog::{Catalog, StoreReference};
use crate::database::models::Store;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

pub mod create;
pub mod delete;
pub mod list;
pub mod read;
pub mod update;

// Re-export handler functions
pub use create::variant_create;
pub use delete::variant_delete;
pub use list::variant_list;
pub use read::variant_read;
pub use update::variant_update;

/// First guard of every mutating handler: no principal, no mutation
pub(crate) fn require_principal(
    principal: Option<Extension<AuthUser>>,
) -> Result<AuthUser, ApiError> {
    principal
        .map(|Extension(user)| user)
        .ok_or_else(ApiError::unauthenticated)
}

/// Price must be present and positive. Zero is rejected with the same
/// message as absence, matching the wire contract.
pub(crate) fn require_price(price: Option<Decimal>) -> Result<Decimal, ApiError> {
    match price {
        Some(price) if price > Decimal::ZERO => Ok(price),
        _ => Err(ApiError::missing_field("Price")),
    }
}

pub(crate) fn require_stock(stock: Option<i32>) -> Result<i32, ApiError> {
    match stock {
        Some(stock) if stock > 0 => Ok(stock),
        _ => Err(ApiError::missing_field("Stock")),
    }
}

/// Single compound-filter lookup: a store owned by someone else and a
/// store that does not exist both surface as "Unauthorized".
pub(crate) async fn require_owned_store(
    catalog: &dyn Catalog,
    store_id: Uuid,
    principal: &AuthUser,
) -> Result<Store, ApiError> {
    catalog
        .find_store_owned(store_id, principal.principal_id)
        .await?
        .ok_or_else(ApiError::unauthorized)
}

/// The referenced row must exist under the acting store
pub(crate) async fn require_in_store(
    catalog: &dyn Catalog,
    reference: StoreReference,
    id: Uuid,
    store_id: Uuid,
) -> Result<(), ApiError> {
    if catalog.reference_in_store(reference, id, store_id).await? {
        Ok(())
    } else {
        Err(ApiError::not_in_store(reference.label()))
    }
}

pub(crate) async fn require_optional_in_store(
    catalog: &dyn Catalog,
    reference: StoreReference,
    id: Option<Uuid>,
    store_id: Uuid,
) -> Result<(), ApiError> {
    match id {
        Some(id) => require_in_store(catalog, reference, id, store_id).await,
        None => Ok(()),
    }
}

/// Select inputs arrive as "" when the form field was left unset;
/// normalize the sentinel to absent before it reaches any guard.
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(raw) => Uuid::parse_str(raw).map(Some).map_err(serde::de::Error::custom),
    }
}
