use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use catalog_admin_api::database::models::{Product, Store};
use catalog_admin_api::testing::MemoryCatalog;
use catalog_admin_api::{app, auth, AppState};

/// One owned store with one product, plus a token for the owner
pub struct Scenario {
    pub catalog: Arc<MemoryCatalog>,
    pub router: Router,
    pub token: String,
    pub store: Store,
    pub product: Product,
}

pub fn scenario() -> Result<Scenario> {
    let catalog = Arc::new(MemoryCatalog::new());
    let router = app(AppState {
        catalog: catalog.clone(),
    });

    let owner = Uuid::new_v4();
    let token = auth::issue_token(owner)?;
    let store = catalog.add_store(owner, "Sneaker Store");
    let product = catalog.add_product(store.id, "Runner");

    Ok(Scenario {
        catalog,
        router,
        token,
        store,
        product,
    })
}

pub fn collection_uri(store_id: Uuid, product_id: Uuid) -> String {
    format!("/api/{}/products/{}/variants", store_id, product_id)
}

pub fn item_uri(store_id: Uuid, product_id: Uuid, variant_id: Uuid) -> String {
    format!("/api/{}/products/{}/variants/{}", store_id, product_id, variant_id)
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

/// Drive one request through the router and collect the raw body
pub async fn send(router: &Router, request: Request<Body>) -> Result<(StatusCode, String)> {
    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok((status, String::from_utf8(bytes.to_vec())?))
}

/// As send(), parsing the body as JSON
pub async fn send_json(router: &Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let (status, text) = send(router, request).await?;
    let value: Value = serde_json::from_str(&text)?;
    Ok((status, value))
}
