//! Bookings repository for database operations
//!
//! The no-overlap invariant is owned by the `bookings_no_overlap`
//! exclusion constraint: whatever was pre-checked at validation time, the
//! insert that loses a concurrent race gets an exclusion violation here
//! and is surfaced as a conflict. Multi-slot creation runs inside one
//! transaction, so a batch either commits every slot or none.

use chrono::{Duration, NaiveDate, NaiveTime};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::booking::{Booking, CreateBooking},
};

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// Scheduled bookings for one room on one date, ordered by start time
    pub async fn list_for_room_date(&self, room_id: i32, date: NaiveDate) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE room_id = $1 AND booking_date = $2 AND status = 'scheduled'
            ORDER BY start_time
            "#,
        )
        .bind(room_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    /// All bookings for a user, most recent first
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE user_id = $1 ORDER BY booking_date DESC, start_time DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    /// Look up a booking by its idempotency token
    pub async fn find_by_token(&self, token: Uuid) -> AppResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE request_token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(booking)
    }

    /// Create a single booking as one atomic insert
    pub async fn create(&self, booking: &CreateBooking) -> AppResult<Booking> {
        let created = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (room_id, user_id, booking_date, start_time, end_time, purpose, notes, request_token)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(booking.room_id)
        .bind(booking.user_id)
        .bind(booking.booking_date)
        .bind(booking.start_time)
        .bind(booking.end_time)
        .bind(&booking.purpose)
        .bind(&booking.notes)
        .bind(booking.request_token)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, booking.start_time, booking.end_time))?;
        Ok(created)
    }

    /// Create one booking per selected slot, all inside a single
    /// transaction. Any failure rolls the whole batch back.
    pub async fn create_batch(
        &self,
        room_id: i32,
        user_id: i32,
        booking_date: NaiveDate,
        slot_starts: &[NaiveTime],
        slot_minutes: u32,
        purpose: &str,
        notes: Option<&str>,
    ) -> AppResult<Vec<Booking>> {
        let width = Duration::minutes(slot_minutes as i64);
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(slot_starts.len());

        for &start in slot_starts {
            let end = start + width;
            let booking = sqlx::query_as::<_, Booking>(
                r#"
                INSERT INTO bookings (room_id, user_id, booking_date, start_time, end_time, purpose, notes)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
                "#,
            )
            .bind(room_id)
            .bind(user_id)
            .bind(booking_date)
            .bind(start)
            .bind(end)
            .bind(purpose)
            .bind(notes)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_insert_error(e, start, end))?;
            created.push(booking);
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Transition a scheduled booking to cancelled. Returns `None` when
    /// the row exists but is no longer in the scheduled state.
    pub async fn cancel(&self, id: i32) -> AppResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings SET status = 'cancelled'
            WHERE id = $1 AND status = 'scheduled'
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(booking)
    }

    /// Flip scheduled bookings whose end has passed to completed.
    /// `today`/`now_time` are in the portal's local calendar.
    pub async fn complete_elapsed(&self, today: NaiveDate, now_time: NaiveTime) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE bookings SET status = 'completed'
            WHERE status = 'scheduled'
              AND (booking_date < $1 OR (booking_date = $1 AND end_time <= $2))
            "#,
        )
        .bind(today)
        .bind(now_time)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

}

fn map_insert_error(err: sqlx::Error, start: NaiveTime, end: NaiveTime) -> AppError {
    if let Some(db) = err.as_database_error() {
        if db.constraint() == Some("bookings_no_overlap") {
            return AppError::Conflict(format!(
                "room is already booked for an overlapping time range ({}-{})",
                start.format("%H:%M"),
                end.format("%H:%M"),
            ));
        }
        if db.constraint() == Some("bookings_request_token_key") {
            return AppError::Conflict("a booking with this request token already exists".to_string());
        }
    }
    AppError::Database(err)
}
