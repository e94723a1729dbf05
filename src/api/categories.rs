use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use sea_orm::DatabaseConnection;

use crate::models::CategoryDto;
use crate::services::category_service;

use super::errors::{error_response, validation_response};
use super::PageParams;

pub async fn list_categories(
    State(db): State<DatabaseConnection>,
    Query(params): Query<PageParams>,
    uri: Uri,
) -> impl IntoResponse {
    if params.is_paged() {
        match category_service::find_all_paged(&db, params.to_request()).await {
            Ok(page) => (StatusCode::OK, Json(page)).into_response(),
            Err(e) => error_response(e, uri.path()),
        }
    } else {
        match category_service::find_all(&db).await {
            Ok(categories) => (StatusCode::OK, Json(categories)).into_response(),
            Err(e) => error_response(e, uri.path()),
        }
    }
}

pub async fn get_category(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    uri: Uri,
) -> impl IntoResponse {
    match category_service::find_by_id(&db, id).await {
        Ok(category) => (StatusCode::OK, Json(category)).into_response(),
        Err(e) => error_response(e, uri.path()),
    }
}

pub async fn create_category(
    State(db): State<DatabaseConnection>,
    uri: Uri,
    Json(payload): Json<CategoryDto>,
) -> impl IntoResponse {
    if let Err(message) = payload.validate() {
        return validation_response(message, uri.path());
    }

    match category_service::insert(&db, payload).await {
        Ok(category) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(e) => error_response(e, uri.path()),
    }
}

pub async fn update_category(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    uri: Uri,
    Json(payload): Json<CategoryDto>,
) -> impl IntoResponse {
    if let Err(message) = payload.validate() {
        return validation_response(message, uri.path());
    }

    match category_service::update(&db, id, payload).await {
        Ok(category) => (StatusCode::OK, Json(category)).into_response(),
        Err(e) => error_response(e, uri.path()),
    }
}

pub async fn delete_category(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    uri: Uri,
) -> impl IntoResponse {
    match category_service::delete(&db, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e, uri.path()),
    }
}
