//! Slot grid generation from a room's operating hours

use chrono::{NaiveTime, Timelike};

use crate::error::{AppError, AppResult};

/// Generate the ordered sequence of slot start times for an operating
/// window.
///
/// Slots are `slot_minutes` wide, the first starts at `open`, and only
/// slots whose full width fits before `close` are emitted, so the last
/// slot always ends at or before the closing time. Operating times must
/// be whole minutes with the opening time strictly before the closing
/// time; anything else is an invalid operating window.
pub fn slot_starts(open: NaiveTime, close: NaiveTime, slot_minutes: u32) -> AppResult<Vec<NaiveTime>> {
    if slot_minutes == 0 {
        return Err(AppError::Internal("slot width must be positive".to_string()));
    }
    if open.second() != 0 || open.nanosecond() != 0 || close.second() != 0 || close.nanosecond() != 0 {
        return Err(AppError::Validation(
            "invalid operating window: times must fall on whole minutes".to_string(),
        ));
    }
    if open >= close {
        return Err(AppError::Validation(
            "invalid operating window: opening time must be before closing time".to_string(),
        ));
    }

    // Work in minutes-from-midnight; NaiveTime arithmetic wraps at
    // midnight, which must never shorten or extend the grid.
    let open_min = open.num_seconds_from_midnight() / 60;
    let close_min = close.num_seconds_from_midnight() / 60;

    let mut starts = Vec::with_capacity(((close_min - open_min) / slot_minutes) as usize);
    let mut cursor = open_min;
    while cursor + slot_minutes <= close_min {
        starts.push(
            NaiveTime::from_num_seconds_from_midnight_opt(cursor * 60, 0)
                .expect("cursor stays below 24:00"),
        );
        cursor += slot_minutes;
    }
    Ok(starts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn standard_day_yields_24_slots() {
        let starts = slot_starts(t(8, 0), t(20, 0), 30).unwrap();
        assert_eq!(starts.len(), 24);
        assert_eq!(starts[0], t(8, 0));
        assert_eq!(starts[1], t(8, 30));
        assert_eq!(*starts.last().unwrap(), t(19, 30));
    }

    #[test]
    fn every_start_is_a_whole_slot_from_open() {
        let starts = slot_starts(t(9, 0), t(17, 30), 30).unwrap();
        for (i, start) in starts.iter().enumerate() {
            let minutes = start.num_seconds_from_midnight() / 60 - 9 * 60;
            assert_eq!(minutes, i as u32 * 30);
        }
        assert_eq!(starts.len(), 17);
    }

    #[test]
    fn partial_tail_is_not_bookable() {
        // 20:15 close: a slot starting 20:00 would end 20:30, past close
        let starts = slot_starts(t(8, 0), t(20, 15), 30).unwrap();
        assert_eq!(*starts.last().unwrap(), t(19, 30));
    }

    #[test]
    fn window_shorter_than_one_slot_is_empty() {
        let starts = slot_starts(t(8, 0), t(8, 20), 30).unwrap();
        assert!(starts.is_empty());
    }

    #[test]
    fn rejects_inverted_window() {
        let err = slot_starts(t(20, 0), t(8, 0), 30).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn rejects_equal_open_and_close() {
        assert!(slot_starts(t(8, 0), t(8, 0), 30).is_err());
    }

    #[test]
    fn rejects_sub_minute_times() {
        let open = NaiveTime::from_hms_opt(8, 0, 30).unwrap();
        assert!(slot_starts(open, t(20, 0), 30).is_err());
    }
}
