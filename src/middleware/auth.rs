use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{verify_token, Claims};

/// Authenticated principal extracted from a bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub principal_id: Uuid,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            principal_id: claims.sub,
        }
    }
}

/// Decodes the bearer token when one is present and injects the principal
/// into request extensions. Absence is not an error at this layer: the
/// read endpoints serve unauthenticated traffic, and the mutating handlers
/// reject a missing principal themselves (403) as their first guard.
pub async fn principal_middleware(headers: HeaderMap, mut request: Request, next: Next) -> Response {
    if let Some(token) = bearer_token(&headers) {
        match verify_token(&token) {
            Ok(claims) => {
                request.extensions_mut().insert(AuthUser::from(claims));
            }
            Err(reason) => {
                // Invalid tokens degrade to anonymous rather than failing the request
                tracing::debug!("ignoring invalid bearer token: {}", reason);
            }
        }
    }

    next.run(request).await
}

/// Extract the bearer token from the Authorization header
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))?;

    let auth_str = auth_header.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?;

    if token.trim().is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
