//! Integration tests for wishlist items, including the sort endpoint.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_user, delete_auth, get, get_auth, post_json_auth, put_json_auth, token_for,
    USER_ROLE_ID,
};
use serde_json::json;
use sqlx::PgPool;

/// Create a public wishlist owned by a fresh user and add the named items
/// in order. Returns `(wishlist_id, owner_token, item_ids)`.
async fn seed(pool: &PgPool, names: &[&str]) -> (i64, String, Vec<i64>) {
    let owner = create_user(pool, "owner", USER_ROLE_ID).await;
    let token = token_for(owner.id, "user");

    let app = common::build_test_app(pool.clone());
    let response =
        post_json_auth(app, "/api/v1/wishlists", json!({ "name": "Salon" }), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let wishlist_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let mut ids = Vec::new();
    for name in names {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            &format!("/api/v1/wishlists/{wishlist_id}/items"),
            json!({ "name": name }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        ids.push(body_json(response).await["data"]["id"].as_i64().unwrap());
    }
    (wishlist_id, token, ids)
}

async fn sort(
    pool: &PgPool,
    wishlist_id: i64,
    item_id: i64,
    body: serde_json::Value,
    token: &str,
) -> axum::response::Response {
    let app = common::build_test_app(pool.clone());
    post_json_auth(
        app,
        &format!("/api/v1/wishlists/{wishlist_id}/items/{item_id}/sort"),
        body,
        token,
    )
    .await
}

/// `(name, sort_order)` pairs in response order.
fn positions(data: &serde_json::Value) -> Vec<(String, i64)> {
    data.as_array()
        .unwrap()
        .iter()
        .map(|i| {
            (
                i["name"].as_str().unwrap().to_string(),
                i["sort_order"].as_i64().unwrap(),
            )
        })
        .collect()
}

fn pairs(expected: &[(&str, i64)]) -> Vec<(String, i64)> {
    expected.iter().map(|(n, o)| (n.to_string(), *o)).collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn items_are_appended_in_creation_order(pool: PgPool) {
    let (wishlist_id, token, _) = seed(&pool, &["A", "B", "C"]).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, &format!("/api/v1/wishlists/{wishlist_id}/items"), &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        positions(&json["data"]),
        pairs(&[("A", 0), ("B", 1), ("C", 2)])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_defaults_quantity_and_validates_url(pool: PgPool) {
    let (wishlist_id, token, ids) = seed(&pool, &["A"]).await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/wishlists/{wishlist_id}/items/{}", ids[0])).await;
    assert_eq!(body_json(response).await["data"]["quantity"], 1);

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/wishlists/{wishlist_id}/items"),
        json!({ "name": "Bad link", "url": "not a url" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn moving_last_item_up_shifts_the_band_down(pool: PgPool) {
    let (wishlist_id, token, ids) = seed(&pool, &["A", "B", "C", "D"]).await;

    let response = sort(
        &pool,
        wishlist_id,
        ids[3],
        json!({ "old_index": 3, "new_index": 1 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        positions(&json["data"]),
        pairs(&[("A", 0), ("D", 1), ("B", 2), ("C", 3)])
    );
    assert_eq!(json["items_version"], 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn moving_first_item_down_shifts_the_band_up(pool: PgPool) {
    let (wishlist_id, token, ids) = seed(&pool, &["A", "B", "C", "D"]).await;

    let response = sort(
        &pool,
        wishlist_id,
        ids[0],
        json!({ "oldIndex": 0, "newIndex": 2 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        positions(&json["data"]),
        pairs(&[("B", 0), ("C", 1), ("A", 2), ("D", 3)])
    );

    // The new order is what later reads return.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/wishlists/{wishlist_id}/items")).await;
    assert_eq!(positions(&body_json(response).await["data"]), positions(&json["data"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn identity_move_keeps_order_and_version(pool: PgPool) {
    let (wishlist_id, token, ids) = seed(&pool, &["A", "B", "C"]).await;

    let response = sort(
        &pool,
        wishlist_id,
        ids[1],
        json!({ "old_index": 1, "new_index": 1 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        positions(&json["data"]),
        pairs(&[("A", 0), ("B", 1), ("C", 2)])
    );
    assert_eq!(json["items_version"], 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn out_of_range_index_returns_invalid_range(pool: PgPool) {
    let (wishlist_id, token, ids) = seed(&pool, &["A", "B", "C"]).await;

    for body in [
        json!({ "old_index": 0, "new_index": 3 }),
        json!({ "old_index": -1, "new_index": 0 }),
    ] {
        let response = sort(&pool, wishlist_id, ids[0], body, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "INVALID_RANGE");
    }

    // Nothing moved.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/wishlists/{wishlist_id}/items")).await;
    assert_eq!(
        positions(&body_json(response).await["data"]),
        pairs(&[("A", 0), ("B", 1), ("C", 2)])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stale_expected_version_returns_409(pool: PgPool) {
    let (wishlist_id, token, ids) = seed(&pool, &["A", "B", "C"]).await;

    let response = sort(
        &pool,
        wishlist_id,
        ids[0],
        json!({ "old_index": 0, "new_index": 2, "expected_version": 3 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // A second client still holding version 3 is refused.
    let response = sort(
        &pool,
        wishlist_id,
        ids[1],
        json!({ "old_index": 0, "new_index": 1, "expected_version": 3 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sort_requires_the_owner(pool: PgPool) {
    let (wishlist_id, _token, ids) = seed(&pool, &["A", "B"]).await;
    let stranger = create_user(&pool, "stranger", USER_ROLE_ID).await;

    let response = sort(
        &pool,
        wishlist_id,
        ids[0],
        json!({ "old_index": 0, "new_index": 1 }),
        &token_for(stranger.id, "user"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sort_on_missing_wishlist_or_item_returns_404(pool: PgPool) {
    let (wishlist_id, token, ids) = seed(&pool, &["A", "B"]).await;
    let body = json!({ "old_index": 0, "new_index": 1 });

    let response = sort(&pool, wishlist_id + 1000, ids[0], body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = sort(&pool, wishlist_id, ids[1] + 1000, body, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_an_item_closes_the_gap(pool: PgPool) {
    let (wishlist_id, token, ids) = seed(&pool, &["A", "B", "C", "D"]).await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(
        app,
        &format!("/api/v1/wishlists/{wishlist_id}/items/{}", ids[1]),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/wishlists/{wishlist_id}/items")).await;
    assert_eq!(
        positions(&body_json(response).await["data"]),
        pairs(&[("A", 0), ("C", 1), ("D", 2)])
    );

    // Sorting still addresses the compacted positions.
    let response = sort(
        &pool,
        wishlist_id,
        ids[3],
        json!({ "old_index": 2, "new_index": 0 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        positions(&body_json(response).await["data"]),
        pairs(&[("D", 0), ("A", 1), ("C", 2)])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_leaves_position_untouched(pool: PgPool) {
    let (wishlist_id, token, ids) = seed(&pool, &["A", "B"]).await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app,
        &format!("/api/v1/wishlists/{wishlist_id}/items/{}", ids[1]),
        json!({ "name": "B2", "quantity": 3, "sort_order": 0 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "B2");
    assert_eq!(json["data"]["quantity"], 3);
    assert_eq!(json["data"]["sort_order"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn paged_items_follow_sort_order(pool: PgPool) {
    let (wishlist_id, token, _) = seed(&pool, &["A", "B", "C", "D", "E"]).await;
    let app = common::build_test_app(pool);

    let response = get_auth(
        app,
        &format!("/api/v1/wishlists/{wishlist_id}/items/page/1/2"),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 5);
    assert_eq!(positions(&json["data"]), pairs(&[("B", 1), ("C", 2)]));
}
