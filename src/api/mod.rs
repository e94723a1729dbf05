pub mod auth;
pub mod categories;
pub mod errors;
pub mod health;
pub mod products;
pub mod users;

use axum::{
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::services::PageRequest;

/// Optional paging controls shared by the list endpoints. A bare request
/// returns the full collection; naming either knob switches to a page.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<u64>,
    pub size: Option<u64>,
}

impl PageParams {
    pub fn is_paged(&self) -> bool {
        self.page.is_some() || self.size.is_some()
    }

    pub fn to_request(&self) -> PageRequest {
        PageRequest::new(self.page.unwrap_or(0), self.size.unwrap_or(12))
    }
}

pub fn api_router(db: DatabaseConnection) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::get_me))
        // Categories
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/:id",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        // Products
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .with_state(db)
}
