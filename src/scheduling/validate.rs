//! Booking request validation
//!
//! Pure business-rule checks that run before any persistence attempt.
//! Rules are checked in order and the first violation is reported; later
//! checks are meaningless once an earlier one fails. Per-room slot
//! availability is checked separately by the booking service, and the
//! database re-checks overlap at commit time.

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};

use super::BookingPolicy;
use crate::error::{AppError, AppResult};

/// Validate a prospective booking against the system-wide rules.
///
/// `today` is the current date in the portal's local calendar.
pub fn validate_booking_request(
    booking_date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    purpose: &str,
    today: NaiveDate,
    policy: &BookingPolicy,
) -> AppResult<()> {
    if purpose.trim().is_empty() {
        return Err(AppError::Validation("purpose is required".to_string()));
    }

    if booking_date < today {
        return Err(AppError::Validation(
            "booking date cannot be in the past".to_string(),
        ));
    }

    // Rolling horizon: today is day 0, today + horizon_days is excluded
    if booking_date >= today + Duration::days(policy.horizon_days) {
        return Err(AppError::Validation(format!(
            "bookings may be made at most {} days in advance",
            policy.horizon_days
        )));
    }

    // Daily bookable window: the end may sit exactly on the closing
    // time, the start may not
    if start_time < policy.open_time || start_time >= policy.close_time {
        return Err(AppError::Validation(format!(
            "start time must fall within the bookable window ({}-{})",
            policy.open_time.format("%H:%M"),
            policy.close_time.format("%H:%M"),
        )));
    }
    if end_time > policy.close_time || end_time < policy.open_time {
        return Err(AppError::Validation(format!(
            "end time must fall within the bookable window ({}-{})",
            policy.open_time.format("%H:%M"),
            policy.close_time.format("%H:%M"),
        )));
    }

    if end_time <= start_time {
        return Err(AppError::Validation(
            "end time must be after start time".to_string(),
        ));
    }

    if !is_slot_aligned(start_time, policy.slot_minutes) || !is_slot_aligned(end_time, policy.slot_minutes) {
        return Err(AppError::Validation(format!(
            "times must align to {}-minute slots",
            policy.slot_minutes
        )));
    }

    Ok(())
}

/// Whole-minute time sitting on a slot boundary
pub fn is_slot_aligned(time: NaiveTime, slot_minutes: u32) -> bool {
    time.second() == 0
        && time.nanosecond() == 0
        && (time.num_seconds_from_midnight() / 60) % slot_minutes == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn policy() -> BookingPolicy {
        BookingPolicy {
            slot_minutes: 30,
            open_time: t(8, 0),
            close_time: t(20, 0),
            horizon_days: 7,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn check(date: NaiveDate, start: NaiveTime, end: NaiveTime, purpose: &str) -> AppResult<()> {
        validate_booking_request(date, start, end, purpose, today(), &policy())
    }

    fn message(result: AppResult<()>) -> String {
        match result.unwrap_err() {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn accepts_well_formed_request() {
        assert!(check(today(), t(9, 0), t(10, 0), "Team sync").is_ok());
    }

    #[test]
    fn accepts_end_on_closing_boundary() {
        assert!(check(today(), t(19, 30), t(20, 0), "Late seminar").is_ok());
    }

    #[test]
    fn accepts_last_day_of_horizon() {
        let date = today() + Duration::days(6);
        assert!(check(date, t(9, 0), t(10, 0), "Planning").is_ok());
    }

    #[test]
    fn rejects_blank_purpose() {
        assert_eq!(message(check(today(), t(9, 0), t(10, 0), "  ")), "purpose is required");
    }

    #[test]
    fn rejects_past_date() {
        let yesterday = today() - Duration::days(1);
        assert_eq!(
            message(check(yesterday, t(9, 0), t(10, 0), "Retro")),
            "booking date cannot be in the past"
        );
    }

    #[test]
    fn rejects_horizon_boundary() {
        // today + 7 is exclusive
        let date = today() + Duration::days(7);
        assert_eq!(
            message(check(date, t(9, 0), t(10, 0), "Too far")),
            "bookings may be made at most 7 days in advance"
        );
    }

    #[test]
    fn rejects_start_before_window() {
        assert!(message(check(today(), t(7, 30), t(9, 0), "Early")).contains("start time"));
    }

    #[test]
    fn rejects_start_on_closing_time() {
        assert!(message(check(today(), t(20, 0), t(20, 30), "Late")).contains("start time"));
    }

    #[test]
    fn rejects_end_after_window() {
        assert!(message(check(today(), t(19, 0), t(20, 30), "Late")).contains("end time"));
    }

    #[test]
    fn rejects_end_not_after_start() {
        assert_eq!(
            message(check(today(), t(10, 0), t(9, 0), "Backwards")),
            "end time must be after start time"
        );
        assert_eq!(
            message(check(today(), t(10, 0), t(10, 0), "Empty")),
            "end time must be after start time"
        );
    }

    #[test]
    fn rejects_unaligned_times() {
        assert!(message(check(today(), t(9, 15), t(10, 0), "Odd")).contains("align"));
        assert!(message(check(today(), t(9, 0), t(10, 15), "Odd")).contains("align"));
    }

    #[test]
    fn short_circuits_in_rule_order() {
        // past date reported even though the times are also unaligned
        let yesterday = today() - Duration::days(1);
        assert_eq!(
            message(check(yesterday, t(9, 15), t(8, 0), "Order")),
            "booking date cannot be in the past"
        );
    }
}
