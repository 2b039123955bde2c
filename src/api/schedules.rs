//! Schedule and room-search endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{
        room::Room,
        schedule::{DaySchedule, DayScheduleQuery, RoomSearchQuery, WeeklySchedule},
    },
};

use super::{parse_date, parse_time, AuthenticatedUser};

/// Day schedule for a room: the slot grid annotated with availability
#[utoipa::path(
    get,
    path = "/rooms/{id}/schedule",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Room ID"),
        DayScheduleQuery
    ),
    responses(
        (status = 200, description = "Day schedule", body = DaySchedule),
        (status = 404, description = "Room not found")
    )
)]
pub async fn get_day_schedule(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(room_id): Path<i32>,
    Query(query): Query<DayScheduleQuery>,
) -> AppResult<Json<DaySchedule>> {
    let date = match query.date {
        Some(ref value) => Some(parse_date(value, "date")?),
        None => None,
    };
    let schedule = state.services.schedules.day_schedule(room_id, date).await?;
    Ok(Json(schedule))
}

/// Weekly schedule for a room: seven day schedules from today onwards
#[utoipa::path(
    get,
    path = "/rooms/{id}/schedule/week",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Weekly schedule", body = WeeklySchedule),
        (status = 404, description = "Room not found")
    )
)]
pub async fn get_weekly_schedule(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(room_id): Path<i32>,
) -> AppResult<Json<WeeklySchedule>> {
    let schedule = state.services.schedules.weekly_schedule(room_id).await?;
    Ok(Json(schedule))
}

/// Find rooms fully free for a time window
#[utoipa::path(
    get,
    path = "/rooms/search",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(RoomSearchQuery),
    responses(
        (status = 200, description = "Rooms free for the window", body = Vec<Room>),
        (status = 400, description = "Invalid window")
    )
)]
pub async fn search_rooms(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<RoomSearchQuery>,
) -> AppResult<Json<Vec<Room>>> {
    let date = parse_date(&query.date, "date")?;
    let start_time = parse_time(&query.start_time, "start_time")?;
    let end_time = parse_time(&query.end_time, "end_time")?;

    let rooms = state
        .services
        .schedules
        .search_rooms(
            date,
            start_time,
            end_time,
            query.purpose.as_deref(),
            query.min_capacity,
        )
        .await?;
    Ok(Json(rooms))
}
