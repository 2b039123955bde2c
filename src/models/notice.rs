//! Notice model (departmental announcements)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Notice record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notice {
    pub id: i32,
    pub title: String,
    pub body: String,
    /// Category slug (e.g. "general", "exam", "admission")
    pub category: String,
    /// Pinned notices sort first
    pub is_pinned: bool,
    pub author_id: Option<i32>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Create notice request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateNotice {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "body is required"))]
    pub body: String,
    pub category: Option<String>,
    pub is_pinned: Option<bool>,
}

/// Update notice request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateNotice {
    pub title: Option<String>,
    pub body: Option<String>,
    pub category: Option<String>,
    pub is_pinned: Option<bool>,
}

/// Query parameters for notices
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct NoticeQuery {
    /// Filter by category
    pub category: Option<String>,
    /// Page number (1-based)
    pub page: Option<i64>,
    /// Items per page
    pub per_page: Option<i64>,
}
