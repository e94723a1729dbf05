use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use merx::{api, db, seed};
use tower::util::ServiceExt; // for `oneshot`

// Helper to build the app on a seeded in-memory database
async fn setup_app() -> Router {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    seed::seed_demo_data(&db).await.expect("Failed to seed");
    api::api_router(db)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, payload: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_app().await;

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "merx");
}

#[tokio::test]
async fn test_list_categories_sorted_by_name() {
    let app = setup_app().await;

    let response = app.oneshot(get("/categories")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let categories = json.as_array().expect("expected a bare array");
    assert_eq!(categories.len(), 3);
    assert_eq!(categories[0]["name"], "Books");
    assert_eq!(categories[1]["name"], "Computers");
    assert_eq!(categories[2]["name"], "Electronics");
}

#[tokio::test]
async fn test_category_crud_flow() {
    let app = setup_app().await;

    // Create
    let payload = serde_json::json!({ "name": "Toys" });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/categories", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["name"], "Toys");
    let id = created["id"].as_i64().expect("created id") as i32;
    assert!(id > 3, "fresh id must not collide with the seeded rows");

    // Read
    let response = app
        .clone()
        .oneshot(get(&format!("/categories/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Toys");

    // Update
    let payload = serde_json::json!({ "name": "Games" });
    let response = app
        .clone()
        .oneshot(json_request("PUT", &format!("/categories/{}", id), &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Games");

    // Delete
    let request = Request::builder()
        .uri(format!("/categories/{}", id))
        .method("DELETE")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Gone
    let response = app
        .oneshot(get(&format!("/categories/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_product_with_categories() {
    let app = setup_app().await;

    let payload = serde_json::json!({
        "name": "E-Reader",
        "description": "Six inch e-ink reader",
        "price": 249.9,
        "date": "2024-02-01T10:00:00Z",
        "categories": [{ "id": 1 }, { "id": 2 }]
    });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/products", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["name"], "E-Reader");
    assert_eq!(created["price"], 249.9);
    assert_eq!(created["categories"].as_array().unwrap().len(), 2);

    // Read back with the association resolved
    let id = created["id"].as_i64().unwrap();
    assert!(id > 8, "fresh id must not collide with the seeded rows");
    let response = app
        .oneshot(get(&format!("/products/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(response).await;
    let categories = fetched["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0]["id"], 1);
    assert_eq!(categories[1]["id"], 2);
}

#[tokio::test]
async fn test_duplicate_category_ids_collapse_to_one() {
    let app = setup_app().await;

    let payload = serde_json::json!({
        "name": "Webcam",
        "description": "1080p USB webcam",
        "price": 59.9,
        "date": "2024-02-01T10:00:00Z",
        "categories": [{ "id": 2 }, { "id": 2 }]
    });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/products", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    let categories = created["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["id"], 2);
}

#[tokio::test]
async fn test_update_product_replaces_category_set() {
    let app = setup_app().await;

    // Seeded product 1 is The Lord of the Rings, linked to Books (1)
    let payload = serde_json::json!({
        "name": "Desk",
        "description": "Standing desk, oak top",
        "price": 420.0,
        "date": "2024-02-01T10:00:00Z",
        "categories": [{ "id": 2 }]
    });

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/products/1", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["name"], "Desk");

    let categories = updated["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["id"], 2);
    assert_eq!(categories[0]["name"], "Electronics");
}

#[tokio::test]
async fn test_product_update_rolls_back_on_unknown_category() {
    let app = setup_app().await;

    // One resolvable id and one unknown id: nothing may be written
    let payload = serde_json::json!({
        "name": "Renamed",
        "description": "Should never persist",
        "price": 1.0,
        "date": "2024-02-01T10:00:00Z",
        "categories": [{ "id": 2 }, { "id": 999 }]
    });

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/products/1", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get("/products/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let product = body_json(response).await;
    assert_eq!(product["name"], "The Lord of the Rings");

    let categories = product["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["name"], "Books");
}

#[tokio::test]
async fn test_product_create_rolls_back_on_unknown_category() {
    let app = setup_app().await;

    let payload = serde_json::json!({
        "name": "Phantom",
        "description": "Should never persist",
        "price": 10.0,
        "date": "2024-02-01T10:00:00Z",
        "categories": [{ "id": 1 }, { "id": 999 }]
    });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/products", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The catalog still holds only the seeded products
    let response = app.oneshot(get("/products")).await.unwrap();
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_paged_product_listing() {
    let app = setup_app().await;

    let response = app.clone().oneshot(get("/products?size=4")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_json(response).await;
    assert_eq!(page["content"].as_array().unwrap().len(), 4);
    assert_eq!(page["page"], 0);
    assert_eq!(page["size"], 4);
    assert_eq!(page["total_elements"], 8);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["content"][0]["name"], "The Lord of the Rings");

    let response = app
        .clone()
        .oneshot(get("/products?page=1&size=4"))
        .await
        .unwrap();
    let page = body_json(response).await;
    assert_eq!(page["content"].as_array().unwrap().len(), 4);
    assert_eq!(page["page"], 1);

    // Past the end: empty content, same totals
    let response = app.oneshot(get("/products?page=9&size=4")).await.unwrap();
    let page = body_json(response).await;
    assert_eq!(page["content"].as_array().unwrap().len(), 0);
    assert_eq!(page["total_elements"], 8);
}

#[tokio::test]
async fn test_user_crud_with_roles() {
    let app = setup_app().await;

    let payload = serde_json::json!({
        "first_name": "John",
        "last_name": "Doe",
        "email": "john@example.com",
        "password": "changeme",
        "roles": [{ "id": 1 }]
    });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/users", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["email"], "john@example.com");
    assert!(created.get("password").is_none());
    assert!(created.get("password_hash").is_none());

    let roles = created["roles"].as_array().unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0]["authority"], "ROLE_OPERATOR");

    let id = created["id"].as_i64().unwrap();

    // Update profile and grow the role set
    let payload = serde_json::json!({
        "first_name": "John",
        "last_name": "Dorian",
        "email": "john@example.com",
        "roles": [{ "id": 1 }, { "id": 2 }]
    });

    let response = app
        .clone()
        .oneshot(json_request("PUT", &format!("/users/{}", id), &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["last_name"], "Dorian");
    assert_eq!(updated["roles"].as_array().unwrap().len(), 2);

    // Delete
    let request = Request::builder()
        .uri(format!("/users/{}", id))
        .method("DELETE")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get(&format!("/users/{}", id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_users_never_exposes_credentials() {
    let app = setup_app().await;

    let response = app.oneshot(get("/users")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let users = json.as_array().unwrap();
    assert_eq!(users.len(), 2);
    for user in users {
        assert!(user.get("password").is_none());
        assert!(user.get("password_hash").is_none());
    }
}

#[tokio::test]
async fn test_login_and_me_flow() {
    let app = setup_app().await;

    let payload = serde_json::json!({
        "email": "maria@gmail.com",
        "password": "123456"
    });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/auth/login", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let token = json["token"].as_str().expect("token").to_string();

    let request = Request::builder()
        .uri("/auth/me")
        .method("GET")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let me = body_json(response).await;
    assert_eq!(me["email"], "maria@gmail.com");
    assert_eq!(me["roles"].as_array().unwrap().len(), 2);

    // Without a token
    let response = app.clone().oneshot(get("/auth/me")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Wrong password
    let payload = serde_json::json!({
        "email": "maria@gmail.com",
        "password": "654321"
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/auth/login", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Unknown account
    let payload = serde_json::json!({
        "email": "nobody@gmail.com",
        "password": "123456"
    });
    let response = app
        .oneshot(json_request("POST", "/auth/login", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
