//! Services Layer
//!
//! Pure business logic for the catalog resources, called from the Axum
//! handlers. Each service orchestrates store access, DTO mapping and
//! association sync, and owns the translation of store failures into
//! `ServiceError`.

pub mod category_service;
pub mod product_service;
pub mod user_service;

use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;

/// Error type for service operations
#[derive(Debug)]
pub enum ServiceError {
    /// Requested id absent at read or write time
    NotFound(String),
    /// Write rejected by a store integrity constraint (dependent records)
    Database(String),
    /// Anything else; surfaced as a generic server failure
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::NotFound(msg) => write!(f, "Resource not found: {}", msg),
            ServiceError::Database(msg) => write!(f, "Database error: {}", msg),
            ServiceError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        match e {
            DbErr::RecordNotFound(msg) => ServiceError::NotFound(msg),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

/// Requested page of a listing. Size is clamped so a paginator is never
/// built with a zero page size.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size: size.clamp(1, 100),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 0, size: 12 }
    }
}

/// One page of mapped records, carrying the store's total count and page
/// metadata through to the response.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}
