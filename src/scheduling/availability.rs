//! Availability resolution: overlaying bookings onto a slot grid

use chrono::{Duration, NaiveTime, Timelike};

use crate::models::{booking::Booking, schedule::Slot};

/// Half-open interval overlap: [a_start, a_end) and [b_start, b_end)
/// share at least one instant
pub fn ranges_overlap(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Annotate each slot of a grid as available or not, given the room's
/// scheduled bookings for the date.
///
/// A slot is unavailable when its [start, start+width) interval
/// intersects any booking's [start, end) interval; every slot inside a
/// multi-slot booking range carries that booking's id.
pub fn annotate_slots(starts: &[NaiveTime], slot_minutes: u32, bookings: &[Booking]) -> Vec<Slot> {
    let width = Duration::minutes(slot_minutes as i64);
    starts
        .iter()
        .map(|&start| {
            let end = start + width;
            let covering = bookings
                .iter()
                .find(|b| ranges_overlap(start, end, b.start_time, b.end_time));
            Slot {
                start_time: start,
                end_time: end,
                available: covering.is_none(),
                booking_id: covering.map(|b| b.id),
            }
        })
        .collect()
}

/// Whether [start, end) is slot-contiguous and fully free.
///
/// The range is free only when every slot it spans exists in the grid
/// (i.e. the range lies inside the operating window and divides evenly
/// into slots) and each of those slots is available. Endpoint adjacency
/// is not enough.
pub fn range_is_free(slots: &[Slot], start: NaiveTime, end: NaiveTime, slot_minutes: u32) -> bool {
    if start >= end {
        return false;
    }
    let span_minutes = (end.num_seconds_from_midnight() - start.num_seconds_from_midnight()) / 60;
    if span_minutes % slot_minutes != 0 {
        return false;
    }
    let expected = (span_minutes / slot_minutes) as usize;

    let covered: Vec<&Slot> = slots
        .iter()
        .filter(|s| s.start_time >= start && s.start_time < end)
        .collect();

    covered.len() == expected && covered.iter().all(|s| s.available)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::BookingStatus;
    use crate::scheduling::grid::slot_starts;
    use chrono::{NaiveDate, Utc};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn booking(id: i32, start: NaiveTime, end: NaiveTime) -> Booking {
        Booking {
            id,
            room_id: 1,
            user_id: 1,
            booking_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            start_time: start,
            end_time: end,
            purpose: "Lecture".to_string(),
            notes: None,
            status: BookingStatus::Scheduled,
            request_token: None,
            crea_date: Utc::now(),
        }
    }

    fn grid(bookings: &[Booking]) -> Vec<Slot> {
        let starts = slot_starts(t(8, 0), t(20, 0), 30).unwrap();
        annotate_slots(&starts, 30, bookings)
    }

    #[test]
    fn empty_day_is_fully_available() {
        let slots = grid(&[]);
        assert_eq!(slots.len(), 24);
        assert!(slots.iter().all(|s| s.available && s.booking_id.is_none()));
    }

    #[test]
    fn slot_ends_are_start_plus_width() {
        for slot in grid(&[]) {
            assert_eq!(slot.end_time, slot.start_time + Duration::minutes(30));
        }
    }

    #[test]
    fn multi_slot_booking_marks_every_covered_slot() {
        let slots = grid(&[booking(42, t(9, 0), t(10, 30))]);
        let taken: Vec<&Slot> = slots.iter().filter(|s| !s.available).collect();
        assert_eq!(taken.len(), 3);
        assert_eq!(taken[0].start_time, t(9, 0));
        assert_eq!(taken[2].start_time, t(10, 0));
        assert!(taken.iter().all(|s| s.booking_id == Some(42)));
    }

    #[test]
    fn unavailable_slots_exactly_cover_booked_ranges() {
        // union of unavailable slots == union of booking ranges, no gaps
        // and no over-marking
        let bookings = vec![booking(1, t(8, 30), t(9, 30)), booking(2, t(12, 0), t(12, 30))];
        let slots = grid(&bookings);
        for slot in &slots {
            let should_be_taken = bookings
                .iter()
                .any(|b| ranges_overlap(slot.start_time, slot.end_time, b.start_time, b.end_time));
            assert_eq!(!slot.available, should_be_taken, "slot {}", slot.start_time);
        }
    }

    #[test]
    fn adjacent_booking_does_not_mark_neighbours() {
        let slots = grid(&[booking(1, t(9, 0), t(10, 0))]);
        let by_start = |start: NaiveTime| slots.iter().find(|s| s.start_time == start).unwrap();
        assert!(by_start(t(8, 30)).available);
        assert!(!by_start(t(9, 0)).available);
        assert!(!by_start(t(9, 30)).available);
        assert!(by_start(t(10, 0)).available);
    }

    #[test]
    fn range_free_on_empty_grid() {
        let slots = grid(&[]);
        assert!(range_is_free(&slots, t(9, 0), t(10, 0), 30));
    }

    #[test]
    fn range_blocked_by_partial_overlap() {
        let slots = grid(&[booking(1, t(9, 0), t(10, 0))]);
        assert!(!range_is_free(&slots, t(9, 30), t(10, 30), 30));
    }

    #[test]
    fn exactly_adjacent_range_is_free() {
        let slots = grid(&[booking(1, t(9, 0), t(10, 0))]);
        assert!(range_is_free(&slots, t(10, 0), t(11, 0), 30));
        assert!(range_is_free(&slots, t(8, 0), t(9, 0), 30));
    }

    #[test]
    fn range_outside_operating_window_is_not_free() {
        // 19:30-20:30 extends past close; the 20:00 slot does not exist
        let slots = grid(&[]);
        assert!(!range_is_free(&slots, t(19, 30), t(20, 30), 30));
        assert!(!range_is_free(&slots, t(7, 0), t(8, 30), 30));
    }

    #[test]
    fn unaligned_span_is_not_free() {
        let slots = grid(&[]);
        assert!(!range_is_free(&slots, t(9, 0), t(9, 45), 30));
        assert!(!range_is_free(&slots, t(9, 0), t(9, 0), 30));
    }
}
