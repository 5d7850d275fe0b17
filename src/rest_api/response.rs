//! # Response Formatting
//!
//! Standard response types for REST API.

use serde::Serialize;
use serde_json::Value;

use crate::query::{PageResult, Pagination};

/// List response with pagination
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub count: usize,
    pub total: u64,
    pub pagination: Pagination,
    pub data: Vec<Value>,
}

impl From<PageResult> for ListResponse {
    fn from(page: PageResult) -> Self {
        Self {
            success: true,
            count: page.count,
            total: page.total,
            pagination: page.pagination,
            data: page.items,
        }
    }
}

/// Single record response
#[derive(Debug, Clone, Serialize)]
pub struct SingleResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> SingleResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok",
            message: "Server is running",
        }
    }
}
