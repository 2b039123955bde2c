//! Rooms repository for database operations

use chrono::{NaiveTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        room::{CreateRoom, Room, RoomQuery, UpdateRoom},
        RoomStatus,
    },
};

#[derive(Clone)]
pub struct RoomsRepository {
    pool: Pool<Postgres>,
}

impl RoomsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get room by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Room> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room with id {} not found", id)))
    }

    /// List rooms with optional filters
    pub async fn list(&self, query: &RoomQuery) -> AppResult<Vec<Room>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.status.is_some() {
            conditions.push(format!("status = ${}", idx));
            idx += 1;
        }
        if query.purpose.is_some() {
            conditions.push(format!("purpose = ${}", idx));
            idx += 1;
        }
        if query.min_capacity.is_some() {
            conditions.push(format!("capacity >= ${}", idx));
            idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(50).clamp(1, 200);

        let sql = format!(
            "SELECT * FROM rooms {} ORDER BY room_number LIMIT ${} OFFSET ${}",
            where_clause,
            idx,
            idx + 1
        );

        let mut builder = sqlx::query_as::<_, Room>(&sql);
        if let Some(status) = query.status {
            builder = builder.bind(status);
        }
        if let Some(ref purpose) = query.purpose {
            builder = builder.bind(purpose);
        }
        if let Some(min_capacity) = query.min_capacity {
            builder = builder.bind(min_capacity);
        }
        builder = builder.bind(per_page).bind((page - 1) * per_page);

        let rooms = builder.fetch_all(&self.pool).await?;
        Ok(rooms)
    }

    /// Create a room
    pub async fn create(&self, data: &CreateRoom) -> AppResult<Room> {
        let (open, close) = parse_window(&data.open_time, &data.close_time)?;

        let room = sqlx::query_as::<_, Room>(
            r#"
            INSERT INTO rooms (room_number, purpose, capacity, location, open_time, close_time, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&data.room_number)
        .bind(&data.purpose)
        .bind(data.capacity)
        .bind(&data.location)
        .bind(open)
        .bind(close)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_room_error(e, &data.room_number))?;
        Ok(room)
    }

    /// Update a room
    pub async fn update(&self, id: i32, data: &UpdateRoom) -> AppResult<Room> {
        // Window fields are cross-validated against the stored row so a
        // partial update cannot invert the operating window.
        let current = self.get_by_id(id).await?;
        let open = match data.open_time {
            Some(ref value) => parse_clock(value, "open_time")?,
            None => current.open_time,
        };
        let close = match data.close_time {
            Some(ref value) => parse_clock(value, "close_time")?,
            None => current.close_time,
        };
        if open >= close {
            return Err(AppError::Validation(
                "open_time must be before close_time".to_string(),
            ));
        }

        let room = sqlx::query_as::<_, Room>(
            r#"
            UPDATE rooms
            SET room_number = COALESCE($2, room_number),
                purpose = COALESCE($3, purpose),
                capacity = COALESCE($4, capacity),
                location = COALESCE($5, location),
                open_time = $6,
                close_time = $7,
                status = COALESCE($8, status),
                description = COALESCE($9, description),
                modif_date = $10
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.room_number)
        .bind(&data.purpose)
        .bind(data.capacity)
        .bind(&data.location)
        .bind(open)
        .bind(close)
        .bind(data.status)
        .bind(&data.description)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_room_error(e, data.room_number.as_deref().unwrap_or("")))?
        .ok_or_else(|| AppError::NotFound(format!("Room with id {} not found", id)))?;
        Ok(room)
    }

    /// Delete a room; refused while scheduled bookings reference it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let has_bookings: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM bookings WHERE room_id = $1 AND status = 'scheduled')",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        if has_bookings {
            return Err(AppError::Conflict(
                "room has scheduled bookings and cannot be deleted".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Room with id {} not found", id)));
        }
        Ok(())
    }

    /// List rooms eligible for a search: available status plus optional
    /// purpose/capacity filters
    pub async fn list_candidates(
        &self,
        purpose: Option<&str>,
        min_capacity: Option<i32>,
    ) -> AppResult<Vec<Room>> {
        let query = RoomQuery {
            status: Some(RoomStatus::Available),
            purpose: purpose.map(|p| p.to_string()),
            min_capacity,
            page: None,
            per_page: None,
        };
        self.list(&query).await
    }
}

fn parse_clock(value: &str, field: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::Validation(format!("Invalid {} (use HH:MM)", field)))
}

fn parse_window(open: &str, close: &str) -> AppResult<(NaiveTime, NaiveTime)> {
    let open = parse_clock(open, "open_time")?;
    let close = parse_clock(close, "close_time")?;
    if open >= close {
        return Err(AppError::Validation(
            "open_time must be before close_time".to_string(),
        ));
    }
    Ok((open, close))
}

fn map_room_error(err: sqlx::Error, room_number: &str) -> AppError {
    if let Some(db) = err.as_database_error() {
        if db.constraint() == Some("rooms_room_number_key") {
            return AppError::Conflict(format!("Room number '{}' already exists", room_number));
        }
    }
    AppError::Database(err)
}
