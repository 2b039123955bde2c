//! Room-booking scheduling core.
//!
//! Slot grids, availability and booking validation are pure computations:
//! slots are derived from a room's operating hours on demand and never
//! persisted, so they can never drift from the bookings table. Everything
//! time-dependent takes an explicit `today` or a [`Clock`], never ambient
//! wall-clock time.

pub mod availability;
pub mod grid;
pub mod validate;

pub use availability::{annotate_slots, range_is_free, ranges_overlap};
pub use grid::slot_starts;
pub use validate::{is_slot_aligned, validate_booking_request};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};

use crate::{
    config::BookingConfig,
    error::{AppError, AppResult},
};

/// System-wide booking policy, parsed once from [`BookingConfig`].
#[derive(Debug, Clone, Copy)]
pub struct BookingPolicy {
    /// Width of one bookable slot
    pub slot_minutes: u32,
    /// Daily bookable window opening time
    pub open_time: NaiveTime,
    /// Daily bookable window closing time
    pub close_time: NaiveTime,
    /// Rolling booking horizon in days
    pub horizon_days: i64,
}

impl BookingPolicy {
    pub fn from_config(config: &BookingConfig) -> AppResult<Self> {
        let open_time = parse_clock(&config.open_time)?;
        let close_time = parse_clock(&config.close_time)?;
        if config.slot_minutes == 0 {
            return Err(AppError::Internal(
                "booking.slot_minutes must be positive".to_string(),
            ));
        }
        if open_time >= close_time {
            return Err(AppError::Internal(
                "booking.open_time must be before booking.close_time".to_string(),
            ));
        }
        if config.horizon_days < 1 {
            return Err(AppError::Internal(
                "booking.horizon_days must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            slot_minutes: config.slot_minutes,
            open_time,
            close_time,
            horizon_days: config.horizon_days,
        })
    }
}

/// Parse an HH:MM clock value
fn parse_clock(value: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::Internal(format!("invalid clock value '{}' (use HH:MM)", value)))
}

/// Source of "now" in the portal's local calendar.
///
/// The offset is fixed by configuration so that every component agrees on
/// which date "today" is, and tests can substitute a known instant.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    offset: FixedOffset,
}

impl Clock {
    pub fn from_offset_minutes(minutes: i32) -> AppResult<Self> {
        let offset = FixedOffset::east_opt(minutes * 60)
            .ok_or_else(|| AppError::Internal(format!("invalid UTC offset: {} minutes", minutes)))?;
        Ok(Self { offset })
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }

    /// Current date in the portal's local calendar
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Project an arbitrary UTC instant into the portal's local calendar
    pub fn localize(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config() -> BookingConfig {
        BookingConfig {
            slot_minutes: 30,
            open_time: "08:00".to_string(),
            close_time: "20:00".to_string(),
            horizon_days: 7,
            utc_offset_minutes: 360,
        }
    }

    #[test]
    fn policy_parses_clock_values() {
        let policy = BookingPolicy::from_config(&config()).unwrap();
        assert_eq!(policy.open_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(policy.close_time, NaiveTime::from_hms_opt(20, 0, 0).unwrap());
        assert_eq!(policy.horizon_days, 7);
    }

    #[test]
    fn policy_rejects_inverted_window() {
        let mut cfg = config();
        cfg.open_time = "20:00".to_string();
        cfg.close_time = "08:00".to_string();
        assert!(BookingPolicy::from_config(&cfg).is_err());
    }

    #[test]
    fn policy_rejects_bad_clock_string() {
        let mut cfg = config();
        cfg.open_time = "8am".to_string();
        assert!(BookingPolicy::from_config(&cfg).is_err());
    }

    #[test]
    fn clock_localizes_across_date_boundary() {
        let clock = Clock::from_offset_minutes(360).unwrap();
        // 23:00 UTC is already the next day at +06:00
        let instant = Utc.with_ymd_and_hms(2025, 3, 1, 23, 0, 0).unwrap();
        assert_eq!(
            clock.localize(instant).date_naive(),
            NaiveDate::from_ymd_opt(2025, 3, 2).unwrap()
        );
    }
}
