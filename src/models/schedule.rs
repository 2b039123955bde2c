//! Derived schedule views (slots, day and weekly schedules)
//!
//! These are read-only value types computed from a room's operating hours
//! and its scheduled bookings. They are never stored.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// One fixed-width bookable time unit within a room's operating hours
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Slot {
    pub start_time: NaiveTime,
    /// Always `start_time` plus the slot width
    pub end_time: NaiveTime,
    pub available: bool,
    /// Covering booking when unavailable
    pub booking_id: Option<i32>,
}

/// The ordered slot sequence for one room on one date
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub slots: Vec<Slot>,
}

/// Seven day schedules, offsets 0..6 from the portal-local today
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeeklySchedule {
    pub room_id: i32,
    pub room_number: String,
    pub days: Vec<DaySchedule>,
}

/// Query parameters for a single-day schedule
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct DayScheduleQuery {
    /// Schedule date (YYYY-MM-DD); defaults to today
    pub date: Option<String>,
}

/// Query parameters for the room search
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct RoomSearchQuery {
    /// Candidate date (YYYY-MM-DD)
    pub date: String,
    /// Window start (HH:MM)
    pub start_time: String,
    /// Window end (HH:MM)
    pub end_time: String,
    /// Filter by room purpose/category
    pub purpose: Option<String>,
    /// Minimum capacity
    pub min_capacity: Option<i32>,
}
