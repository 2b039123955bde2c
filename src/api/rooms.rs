//! Room administration endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::room::{CreateRoom, Room, RoomQuery, UpdateRoom},
};

use super::AuthenticatedUser;

/// List rooms
#[utoipa::path(
    get,
    path = "/rooms",
    tag = "rooms",
    security(("bearer_auth" = [])),
    params(RoomQuery),
    responses(
        (status = 200, description = "Room list", body = Vec<Room>)
    )
)]
pub async fn list_rooms(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<RoomQuery>,
) -> AppResult<Json<Vec<Room>>> {
    let rooms = state.services.rooms.list(&query).await?;
    Ok(Json(rooms))
}

/// Get room by ID
#[utoipa::path(
    get,
    path = "/rooms/{id}",
    tag = "rooms",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room details", body = Room),
        (status = 404, description = "Room not found")
    )
)]
pub async fn get_room(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Room>> {
    let room = state.services.rooms.get_by_id(id).await?;
    Ok(Json(room))
}

/// Create a room
#[utoipa::path(
    post,
    path = "/rooms",
    tag = "rooms",
    security(("bearer_auth" = [])),
    request_body = CreateRoom,
    responses(
        (status = 201, description = "Room created", body = Room),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Room number already exists")
    )
)]
pub async fn create_room(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateRoom>,
) -> AppResult<(StatusCode, Json<Room>)> {
    claims.require_admin()?;
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let room = state.services.rooms.create(&data).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

/// Update a room
#[utoipa::path(
    put,
    path = "/rooms/{id}",
    tag = "rooms",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Room ID")),
    request_body = UpdateRoom,
    responses(
        (status = 200, description = "Room updated", body = Room),
        (status = 404, description = "Room not found")
    )
)]
pub async fn update_room(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateRoom>,
) -> AppResult<Json<Room>> {
    claims.require_admin()?;
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let room = state.services.rooms.update(id, &data).await?;
    Ok(Json(room))
}

/// Delete a room
#[utoipa::path(
    delete,
    path = "/rooms/{id}",
    tag = "rooms",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 204, description = "Room deleted"),
        (status = 404, description = "Room not found"),
        (status = 409, description = "Room has scheduled bookings")
    )
)]
pub async fn delete_room(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.rooms.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
