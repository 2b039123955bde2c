//! Room model

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::RoomStatus;

/// A bookable physical space
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Room {
    pub id: i32,
    /// Display label, unique (e.g. "101", "Seminar-2")
    pub room_number: String,
    /// Purpose/category (e.g. "lecture", "lab", "seminar")
    pub purpose: String,
    /// Seating capacity
    pub capacity: i32,
    pub location: Option<String>,
    /// Daily operating window start (time-of-day)
    pub open_time: NaiveTime,
    /// Daily operating window end (time-of-day)
    pub close_time: NaiveTime,
    pub status: RoomStatus,
    pub description: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Create room request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoom {
    #[validate(length(min = 1, message = "room_number is required"))]
    pub room_number: String,
    #[validate(length(min = 1, message = "purpose is required"))]
    pub purpose: String,
    #[validate(range(min = 1, message = "capacity must be positive"))]
    pub capacity: i32,
    pub location: Option<String>,
    /// Operating window start (HH:MM)
    pub open_time: String,
    /// Operating window end (HH:MM)
    pub close_time: String,
    pub description: Option<String>,
}

/// Update room request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRoom {
    pub room_number: Option<String>,
    pub purpose: Option<String>,
    #[validate(range(min = 1, message = "capacity must be positive"))]
    pub capacity: Option<i32>,
    pub location: Option<String>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub status: Option<RoomStatus>,
    pub description: Option<String>,
}

/// Query parameters for listing rooms
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct RoomQuery {
    /// Filter by status
    pub status: Option<RoomStatus>,
    /// Filter by purpose/category
    pub purpose: Option<String>,
    /// Minimum capacity
    pub min_capacity: Option<i32>,
    /// Page number (1-based)
    pub page: Option<i64>,
    /// Items per page
    pub per_page: Option<i64>,
}
