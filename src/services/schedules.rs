//! Schedule resolution service (day schedules, weekly view, room search)

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::{
    error::{AppError, AppResult},
    models::{
        room::Room,
        schedule::{DaySchedule, WeeklySchedule},
    },
    repository::Repository,
    scheduling::{annotate_slots, is_slot_aligned, range_is_free, slot_starts, BookingPolicy, Clock},
};

#[derive(Clone)]
pub struct SchedulesService {
    repository: Repository,
    policy: BookingPolicy,
    clock: Clock,
}

impl SchedulesService {
    pub fn new(repository: Repository, policy: BookingPolicy, clock: Clock) -> Self {
        Self {
            repository,
            policy,
            clock,
        }
    }

    /// Slot grid for one room on one date, annotated with availability.
    /// Defaults to today in the portal's local calendar.
    pub async fn day_schedule(&self, room_id: i32, date: Option<NaiveDate>) -> AppResult<DaySchedule> {
        let room = self.repository.rooms.get_by_id(room_id).await?;
        let date = date.unwrap_or_else(|| self.clock.today());
        self.build_day(&room, date).await
    }

    /// Seven day schedules for a room, offsets 0..6 from today
    pub async fn weekly_schedule(&self, room_id: i32) -> AppResult<WeeklySchedule> {
        let room = self.repository.rooms.get_by_id(room_id).await?;
        let today = self.clock.today();

        let mut days = Vec::with_capacity(7);
        for offset in 0..7 {
            let date = today + Duration::days(offset);
            days.push(self.build_day(&room, date).await?);
        }

        Ok(WeeklySchedule {
            room_id: room.id,
            room_number: room.room_number,
            days,
        })
    }

    /// Rooms free for the whole [start, end) window on `date`, filtered
    /// by status, purpose and capacity. The window must cover every slot
    /// it spans; endpoint adjacency is not enough.
    pub async fn search_rooms(
        &self,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        purpose: Option<&str>,
        min_capacity: Option<i32>,
    ) -> AppResult<Vec<Room>> {
        if end_time <= start_time {
            return Err(AppError::Validation(
                "end time must be after start time".to_string(),
            ));
        }
        if !is_slot_aligned(start_time, self.policy.slot_minutes)
            || !is_slot_aligned(end_time, self.policy.slot_minutes)
        {
            return Err(AppError::Validation(format!(
                "times must align to {}-minute slots",
                self.policy.slot_minutes
            )));
        }

        let candidates = self
            .repository
            .rooms
            .list_candidates(purpose, min_capacity)
            .await?;

        let mut free = Vec::new();
        for room in candidates {
            let schedule = self.build_day(&room, date).await?;
            if range_is_free(&schedule.slots, start_time, end_time, self.policy.slot_minutes) {
                free.push(room);
            }
        }
        Ok(free)
    }

    async fn build_day(&self, room: &Room, date: NaiveDate) -> AppResult<DaySchedule> {
        let bookings = self
            .repository
            .bookings
            .list_for_room_date(room.id, date)
            .await?;
        let starts = slot_starts(room.open_time, room.close_time, self.policy.slot_minutes)?;
        Ok(DaySchedule {
            date,
            slots: annotate_slots(&starts, self.policy.slot_minutes, &bookings),
        })
    }
}
