//! Booking service: validation, atomic creation, cancellation
//!
//! Validation runs the full rule chain before any write; the database's
//! exclusion constraint remains the authoritative overlap check, since a
//! concurrent booking can land between validation and commit. Multi-slot
//! requests are committed as one transaction, so a batch never partially
//! reserves.

use chrono::{Duration, NaiveDate};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, CreateBooking, CreateSlotBookings},
        room::Room,
        schedule::Slot,
        BookingStatus, RoomStatus, UserClaims,
    },
    repository::Repository,
    scheduling::{annotate_slots, slot_starts, validate_booking_request, BookingPolicy, Clock},
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
    policy: BookingPolicy,
    clock: Clock,
}

impl BookingsService {
    pub fn new(repository: Repository, policy: BookingPolicy, clock: Clock) -> Self {
        Self {
            repository,
            policy,
            clock,
        }
    }

    /// Get bookings for a user
    pub async fn user_bookings(&self, user_id: i32) -> AppResult<Vec<Booking>> {
        // Verify user exists
        self.repository.users.get_by_id(user_id).await?;
        self.repository.bookings.list_for_user(user_id).await
    }

    /// Validate and create a single booking
    pub async fn create(&self, request: CreateBooking) -> AppResult<Booking> {
        validate_booking_request(
            request.booking_date,
            request.start_time,
            request.end_time,
            &request.purpose,
            self.clock.today(),
            &self.policy,
        )?;

        let room = self.bookable_room(request.room_id).await?;

        // Idempotent replay: a token already committed maps back to its
        // booking instead of racing the overlap constraint again
        if let Some(token) = request.request_token {
            if let Some(existing) = self.repository.bookings.find_by_token(token).await? {
                return Ok(existing);
            }
        }

        let slots = self.day_slots(&room, request.booking_date).await?;
        if request.start_time < room.open_time || request.end_time > room.close_time {
            return Err(AppError::Validation(format!(
                "requested range is outside the room's operating hours ({}-{})",
                room.open_time.format("%H:%M"),
                room.close_time.format("%H:%M"),
            )));
        }
        let taken = occupied_in_range(&slots, &request);
        if !taken.is_empty() {
            return Err(conflict_for(&taken));
        }

        self.repository.bookings.create(&request).await
    }

    /// Validate and create one booking per selected slot, all or nothing
    pub async fn create_for_slots(&self, request: CreateSlotBookings) -> AppResult<Vec<Booking>> {
        if request.slot_starts.is_empty() {
            return Err(AppError::Validation(
                "at least one slot must be selected".to_string(),
            ));
        }

        let mut starts = request.slot_starts.clone();
        starts.sort();
        starts.dedup();

        let width = Duration::minutes(self.policy.slot_minutes as i64);
        let today = self.clock.today();
        for &start in &starts {
            validate_booking_request(
                request.booking_date,
                start,
                start + width,
                &request.purpose,
                today,
                &self.policy,
            )?;
        }

        let room = self.bookable_room(request.room_id).await?;

        let slots = self.day_slots(&room, request.booking_date).await?;

        // Report every conflicting slot up front so the caller can
        // re-pick once, not once per slot
        let taken: Vec<&Slot> = slots
            .iter()
            .filter(|s| !s.available && starts.contains(&s.start_time))
            .collect();
        if !taken.is_empty() {
            return Err(conflict_for(&taken));
        }
        for &start in &starts {
            if !slots.iter().any(|s| s.start_time == start) {
                return Err(AppError::Validation(format!(
                    "slot {} is outside the room's operating hours",
                    start.format("%H:%M")
                )));
            }
        }

        self.repository
            .bookings
            .create_batch(
                request.room_id,
                request.user_id,
                request.booking_date,
                &starts,
                self.policy.slot_minutes,
                &request.purpose,
                request.notes.as_deref(),
            )
            .await
    }

    /// Cancel a scheduled booking on behalf of its owner (or an admin)
    pub async fn cancel(&self, booking_id: i32, claims: &UserClaims) -> AppResult<Booking> {
        let booking = self.repository.bookings.get_by_id(booking_id).await?;

        if booking.user_id != claims.user_id && !claims.is_admin() {
            return Err(AppError::Forbidden(
                "only the booking owner may cancel it".to_string(),
            ));
        }

        if booking.status != BookingStatus::Scheduled {
            return Err(AppError::InvalidState(format!(
                "booking is already {}",
                booking.status
            )));
        }

        self.repository
            .bookings
            .cancel(booking_id)
            .await?
            .ok_or_else(|| AppError::InvalidState("booking is no longer scheduled".to_string()))
    }

    async fn bookable_room(&self, room_id: i32) -> AppResult<Room> {
        let room = self.repository.rooms.get_by_id(room_id).await?;
        if room.status != RoomStatus::Available {
            return Err(AppError::Validation(format!(
                "room {} is {} and not open for booking",
                room.room_number, room.status
            )));
        }
        Ok(room)
    }

    async fn day_slots(&self, room: &Room, date: NaiveDate) -> AppResult<Vec<Slot>> {
        let bookings = self
            .repository
            .bookings
            .list_for_room_date(room.id, date)
            .await?;
        let starts = slot_starts(room.open_time, room.close_time, self.policy.slot_minutes)?;
        Ok(annotate_slots(&starts, self.policy.slot_minutes, &bookings))
    }
}

fn occupied_in_range<'a>(slots: &'a [Slot], request: &CreateBooking) -> Vec<&'a Slot> {
    slots
        .iter()
        .filter(|s| {
            !s.available && s.start_time >= request.start_time && s.start_time < request.end_time
        })
        .collect()
}

fn conflict_for(taken: &[&Slot]) -> AppError {
    let listed: Vec<String> = taken
        .iter()
        .map(|s| s.start_time.format("%H:%M").to_string())
        .collect();
    AppError::Conflict(format!("slots already booked: {}", listed.join(", ")))
}
