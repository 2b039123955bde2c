//! Booking model and request types

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::enums::BookingStatus;

/// A reservation of one room for one contiguous time range on one date
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: i32,
    pub room_id: i32,
    /// Owning user
    pub user_id: i32,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub purpose: String,
    pub notes: Option<String>,
    pub status: BookingStatus,
    /// Client-supplied idempotency token, if any
    pub request_token: Option<Uuid>,
    pub crea_date: DateTime<Utc>,
}

/// A validated booking request, ready for the repository
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub room_id: i32,
    pub user_id: i32,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub purpose: String,
    pub notes: Option<String>,
    pub request_token: Option<Uuid>,
}

/// A multi-slot booking request: a set of selected slot starts, not
/// necessarily contiguous, booked under one purpose
#[derive(Debug, Clone)]
pub struct CreateSlotBookings {
    pub room_id: i32,
    pub user_id: i32,
    pub booking_date: NaiveDate,
    /// Selected slot start times
    pub slot_starts: Vec<NaiveTime>,
    pub purpose: String,
    pub notes: Option<String>,
}
