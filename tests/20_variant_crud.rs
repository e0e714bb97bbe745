mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use catalog_admin_api::api::format::variant_rows;
use catalog_admin_api::database::catalog::Catalog;

use common::{collection_uri, item_uri, request, scenario, send, send_json};

#[tokio::test]
async fn create_then_read_round_trips() -> Result<()> {
    let s = scenario()?;
    let color = s.catalog.add_color(s.store.id, "Crimson");
    let size = s.catalog.add_size(s.store.id, "XL");

    let (status, created) = send_json(
        &s.router,
        request(
            "POST",
            &collection_uri(s.store.id, s.product.id),
            Some(&s.token),
            Some(json!({ "price": 19.99, "stock": 5, "colorId": color.id, "sizeId": size.id })),
        ),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["price"], "19.99");
    assert_eq!(created["stock"], 5);
    assert_eq!(created["colorId"], json!(color.id));
    assert_eq!(created["sizeId"], json!(size.id));
    assert_eq!(created["productId"], json!(s.product.id));
    // Discounts can only be attached through update
    assert_eq!(created["discountId"], json!(null));

    let variant_id: Uuid = serde_json::from_value(created["id"].clone())?;
    let (status, detail) = send_json(
        &s.router,
        request(
            "GET",
            &item_uri(s.store.id, s.product.id, variant_id),
            None,
            None,
        ),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["id"], created["id"]);
    assert_eq!(detail["price"], "19.99");
    assert_eq!(detail["stock"], 5);
    assert_eq!(detail["color"]["name"], "Crimson");
    assert_eq!(detail["size"]["name"], "XL");
    assert_eq!(detail["discount"], json!(null));

    Ok(())
}

#[tokio::test]
async fn zero_price_is_rejected_like_absence() -> Result<()> {
    let s = scenario()?;

    let (status, body) = send(
        &s.router,
        request(
            "POST",
            &collection_uri(s.store.id, s.product.id),
            Some(&s.token),
            Some(json!({ "price": 0, "stock": 5 })),
        ),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Price is required");

    Ok(())
}

#[tokio::test]
async fn missing_stock_is_rejected() -> Result<()> {
    let s = scenario()?;

    let (status, body) = send(
        &s.router,
        request(
            "POST",
            &collection_uri(s.store.id, s.product.id),
            Some(&s.token),
            Some(json!({ "price": 9.99 })),
        ),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Stock is required");

    Ok(())
}

#[tokio::test]
async fn listing_returns_newest_first() -> Result<()> {
    let s = scenario()?;

    for stock in 1..=3 {
        let (status, _) = send_json(
            &s.router,
            request(
                "POST",
                &collection_uri(s.store.id, s.product.id),
                Some(&s.token),
                Some(json!({ "price": 4.50, "stock": stock })),
            ),
        )
        .await?;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, listed) = send_json(
        &s.router,
        request(
            "GET",
            &collection_uri(s.store.id, s.product.id),
            None,
            None,
        ),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    let stocks: Vec<i64> = listed
        .as_array()
        .expect("array body")
        .iter()
        .map(|row| row["stock"].as_i64().unwrap())
        .collect();
    assert_eq!(stocks, vec![3, 2, 1]);

    Ok(())
}

#[tokio::test]
async fn update_scoped_to_wrong_product_is_a_noop() -> Result<()> {
    let s = scenario()?;
    let other_product = s.catalog.add_product(s.store.id, "Slide");

    let (status, created) = send_json(
        &s.router,
        request(
            "POST",
            &collection_uri(s.store.id, s.product.id),
            Some(&s.token),
            Some(json!({ "price": 19.99, "stock": 5 })),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let variant_id: Uuid = serde_json::from_value(created["id"].clone())?;

    // Same store, but the variant hangs off a different product
    let (status, body) = send(
        &s.router,
        request(
            "PATCH",
            &item_uri(s.store.id, other_product.id, variant_id),
            Some(&s.token),
            Some(json!({ "price": 1.00, "stock": 1 })),
        ),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "null");

    let unchanged = s.catalog.variant(variant_id).expect("variant still exists");
    assert_eq!(unchanged.price, "19.99".parse().unwrap());
    assert_eq!(unchanged.stock, 5);

    Ok(())
}

#[tokio::test]
async fn update_is_the_only_path_that_sets_a_discount() -> Result<()> {
    let s = scenario()?;
    let discount = s.catalog.add_discount(s.store.id, "Summer Sale");

    let (status, created) = send_json(
        &s.router,
        request(
            "POST",
            &collection_uri(s.store.id, s.product.id),
            Some(&s.token),
            Some(json!({ "price": 19.99, "stock": 5, "discountId": discount.id })),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["discountId"], json!(null));

    let variant_id: Uuid = serde_json::from_value(created["id"].clone())?;
    let (status, updated) = send_json(
        &s.router,
        request(
            "PATCH",
            &item_uri(s.store.id, s.product.id, variant_id),
            Some(&s.token),
            Some(json!({ "price": 14.99, "stock": 2, "discountId": discount.id })),
        ),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["discountId"], json!(discount.id));
    assert_eq!(updated["price"], "14.99");
    assert_eq!(updated["stock"], 2);

    Ok(())
}

#[tokio::test]
async fn delete_is_not_idempotent() -> Result<()> {
    let s = scenario()?;

    let (status, created) = send_json(
        &s.router,
        request(
            "POST",
            &collection_uri(s.store.id, s.product.id),
            Some(&s.token),
            Some(json!({ "price": 19.99, "stock": 5 })),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let variant_id: Uuid = serde_json::from_value(created["id"].clone())?;

    let (status, deleted) = send_json(
        &s.router,
        request(
            "DELETE",
            &item_uri(s.store.id, s.product.id, variant_id),
            Some(&s.token),
            None,
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], created["id"]);
    assert!(s.catalog.variant(variant_id).is_none());

    // The second delete matches nothing and is an error, not a silent success
    let (status, body) = send(
        &s.router,
        request(
            "DELETE",
            &item_uri(s.store.id, s.product.id, variant_id),
            Some(&s.token),
            None,
        ),
    )
    .await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Internal error");

    Ok(())
}

#[tokio::test]
async fn reading_a_missing_variant_returns_null() -> Result<()> {
    let s = scenario()?;

    let (status, body) = send(
        &s.router,
        request(
            "GET",
            &item_uri(s.store.id, s.product.id, Uuid::new_v4()),
            None,
            None,
        ),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "null");

    Ok(())
}

#[tokio::test]
async fn empty_string_foreign_keys_persist_as_absent() -> Result<()> {
    let s = scenario()?;

    let (status, created) = send_json(
        &s.router,
        request(
            "POST",
            &collection_uri(s.store.id, s.product.id),
            Some(&s.token),
            Some(json!({ "price": 2.50, "stock": 1, "colorId": "", "sizeId": "" })),
        ),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["colorId"], json!(null));
    assert_eq!(created["sizeId"], json!(null));

    Ok(())
}

#[tokio::test]
async fn table_rows_project_names_and_formatted_prices() -> Result<()> {
    let s = scenario()?;
    let color = s.catalog.add_color(s.store.id, "Crimson");

    let (status, _) = send_json(
        &s.router,
        request(
            "POST",
            &collection_uri(s.store.id, s.product.id),
            Some(&s.token),
            Some(json!({ "price": 9.99, "stock": 3, "colorId": color.id })),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(
        &s.router,
        request(
            "POST",
            &collection_uri(s.store.id, s.product.id),
            Some(&s.token),
            Some(json!({ "price": 7, "stock": 1 })),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let details = s.catalog.list_variant_details(s.product.id).await?;
    let rows = variant_rows(&details);

    // Newest first: the bare variant, then the colored one
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].price, "$7.00");
    assert_eq!(rows[0].color, "None");
    assert_eq!(rows[0].size, "None");
    assert_eq!(rows[0].discount, "None");
    assert_eq!(rows[1].price, "$9.99");
    assert_eq!(rows[1].color, "Crimson");

    Ok(())
}

#[tokio::test]
async fn malformed_path_ids_are_rejected_at_the_boundary() -> Result<()> {
    let s = scenario()?;

    let (status, _) = send(
        &s.router,
        request(
            "GET",
            &format!("/api/not-a-uuid/products/{}/variants", s.product.id),
            None,
            None,
        ),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}
