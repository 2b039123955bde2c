//! Booking endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::booking::{Booking, CreateBooking, CreateSlotBookings},
};

use super::{parse_date, parse_time, AuthenticatedUser};

/// Create booking request
#[derive(Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    /// Room ID
    pub room_id: i32,
    /// Booking date (YYYY-MM-DD)
    pub booking_date: String,
    /// Start time (HH:MM)
    pub start_time: String,
    /// End time (HH:MM)
    pub end_time: String,
    /// Purpose of the booking
    pub purpose: String,
    pub notes: Option<String>,
    /// Optional idempotency token; replaying the same token returns the
    /// original booking instead of a conflict
    pub request_token: Option<Uuid>,
}

/// Multi-slot booking request
#[derive(Deserialize, ToSchema)]
pub struct CreateSlotBookingsRequest {
    /// Room ID
    pub room_id: i32,
    /// Booking date (YYYY-MM-DD)
    pub booking_date: String,
    /// Selected slot start times (HH:MM), not necessarily contiguous
    pub slot_starts: Vec<String>,
    /// Shared purpose for all slots
    pub purpose: String,
    pub notes: Option<String>,
}

/// Multi-slot booking response
#[derive(Serialize, ToSchema)]
pub struct SlotBookingsResponse {
    pub bookings: Vec<Booking>,
}

/// Create a booking
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = Booking),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Room not found"),
        (status = 409, description = "Overlapping booking exists")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let booking = CreateBooking {
        room_id: request.room_id,
        user_id: claims.user_id,
        booking_date: parse_date(&request.booking_date, "booking_date")?,
        start_time: parse_time(&request.start_time, "start_time")?,
        end_time: parse_time(&request.end_time, "end_time")?,
        purpose: request.purpose,
        notes: request.notes,
        request_token: request.request_token,
    };

    let created = state.services.bookings.create(booking).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Book a set of individual slots in one atomic operation
#[utoipa::path(
    post,
    path = "/bookings/slots",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = CreateSlotBookingsRequest,
    responses(
        (status = 201, description = "All slots booked", body = SlotBookingsResponse),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Room not found"),
        (status = 409, description = "One or more slots already booked; none were reserved")
    )
)]
pub async fn create_slot_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateSlotBookingsRequest>,
) -> AppResult<(StatusCode, Json<SlotBookingsResponse>)> {
    let mut slot_starts = Vec::with_capacity(request.slot_starts.len());
    for value in &request.slot_starts {
        slot_starts.push(parse_time(value, "slot_starts")?);
    }

    let bookings = CreateSlotBookings {
        room_id: request.room_id,
        user_id: claims.user_id,
        booking_date: parse_date(&request.booking_date, "booking_date")?,
        slot_starts,
        purpose: request.purpose,
        notes: request.notes,
    };

    let created = state.services.bookings.create_for_slots(bookings).await?;
    Ok((
        StatusCode::CREATED,
        Json(SlotBookingsResponse { bookings: created }),
    ))
}

/// Cancel a booking
#[utoipa::path(
    post,
    path = "/bookings/{id}/cancel",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = Booking),
        (status = 403, description = "Not the booking owner"),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Booking already cancelled or completed")
    )
)]
pub async fn cancel_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(booking_id): Path<i32>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.cancel(booking_id, &claims).await?;
    Ok(Json(booking))
}

/// Get bookings for a specific user
#[utoipa::path(
    get,
    path = "/users/{id}/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User's bookings", body = Vec<Booking>),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(user_id): Path<i32>,
) -> AppResult<Json<Vec<Booking>>> {
    claims.require_self_or_admin(user_id)?;

    let bookings = state.services.bookings.user_bookings(user_id).await?;
    Ok(Json(bookings))
}
