use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use sea_orm::DatabaseConnection;

use crate::models::ProductDto;
use crate::services::product_service;

use super::errors::{error_response, validation_response};
use super::PageParams;

#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "List products, paged when page or size is given")
    )
)]
pub async fn list_products(
    State(db): State<DatabaseConnection>,
    Query(params): Query<PageParams>,
    uri: Uri,
) -> impl IntoResponse {
    if params.is_paged() {
        match product_service::find_all_paged(&db, params.to_request()).await {
            Ok(page) => (StatusCode::OK, Json(page)).into_response(),
            Err(e) => error_response(e, uri.path()),
        }
    } else {
        match product_service::find_all(&db).await {
            Ok(products) => (StatusCode::OK, Json(products)).into_response(),
            Err(e) => error_response(e, uri.path()),
        }
    }
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    responses(
        (status = 200, description = "Product with its categories"),
        (status = 404, description = "Id not found")
    )
)]
pub async fn get_product(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    uri: Uri,
) -> impl IntoResponse {
    match product_service::find_by_id(&db, id).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => error_response(e, uri.path()),
    }
}

#[utoipa::path(
    post,
    path = "/products",
    responses(
        (status = 201, description = "Product created"),
        (status = 400, description = "Payload failed validation"),
        (status = 404, description = "A referenced category id does not exist")
    )
)]
pub async fn create_product(
    State(db): State<DatabaseConnection>,
    uri: Uri,
    Json(payload): Json<ProductDto>,
) -> impl IntoResponse {
    if let Err(message) = payload.validate() {
        return validation_response(message, uri.path());
    }

    match product_service::insert(&db, payload).await {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => error_response(e, uri.path()),
    }
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    responses(
        (status = 200, description = "Product updated"),
        (status = 400, description = "Payload failed validation"),
        (status = 404, description = "Id not found")
    )
)]
pub async fn update_product(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    uri: Uri,
    Json(payload): Json<ProductDto>,
) -> impl IntoResponse {
    if let Err(message) = payload.validate() {
        return validation_response(message, uri.path());
    }

    match product_service::update(&db, id, payload).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => error_response(e, uri.path()),
    }
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Id not found")
    )
)]
pub async fn delete_product(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    uri: Uri,
) -> impl IntoResponse {
    match product_service::delete(&db, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e, uri.path()),
    }
}
