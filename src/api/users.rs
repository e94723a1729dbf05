use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use sea_orm::DatabaseConnection;

use crate::models::UserDto;
use crate::services::user_service;

use super::errors::{error_response, validation_response};
use super::PageParams;

pub async fn list_users(
    State(db): State<DatabaseConnection>,
    Query(params): Query<PageParams>,
    uri: Uri,
) -> impl IntoResponse {
    if params.is_paged() {
        match user_service::find_all_paged(&db, params.to_request()).await {
            Ok(page) => (StatusCode::OK, Json(page)).into_response(),
            Err(e) => error_response(e, uri.path()),
        }
    } else {
        match user_service::find_all(&db).await {
            Ok(users) => (StatusCode::OK, Json(users)).into_response(),
            Err(e) => error_response(e, uri.path()),
        }
    }
}

pub async fn get_user(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    uri: Uri,
) -> impl IntoResponse {
    match user_service::find_by_id(&db, id).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => error_response(e, uri.path()),
    }
}

pub async fn create_user(
    State(db): State<DatabaseConnection>,
    uri: Uri,
    Json(payload): Json<UserDto>,
) -> impl IntoResponse {
    if let Err(message) = payload.validate_insert() {
        return validation_response(message, uri.path());
    }

    match user_service::insert(&db, payload).await {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => error_response(e, uri.path()),
    }
}

pub async fn update_user(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    uri: Uri,
    Json(payload): Json<UserDto>,
) -> impl IntoResponse {
    if let Err(message) = payload.validate() {
        return validation_response(message, uri.path());
    }

    match user_service::update(&db, id, payload).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => error_response(e, uri.path()),
    }
}

pub async fn delete_user(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    uri: Uri,
) -> impl IntoResponse {
    match user_service::delete(&db, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e, uri.path()),
    }
}
