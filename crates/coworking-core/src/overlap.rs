//! Room/time-slot conflict detection.
//!
//! Time slots are half-open: a reservation ending at 12:00 and another
//! starting at 12:00 in the same room do not overlap.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::{Dataset, Reservation, ReservationId, RoomId};

/// Whether two reservations occupy the same room on the same day at
/// intersecting times.
///
/// Symmetric in its arguments. A reservation always overlaps itself, so
/// callers scanning one collection against another must skip
/// self-comparisons.
///
/// ```
/// use coworking_core::{overlaps, MemberId, NaiveDate, NaiveTime, Reservation, ReservationId, RoomId};
///
/// let day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
/// let at = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
/// let slot = |id, from, to| Reservation::new(ReservationId(id), MemberId(1), RoomId(1), day, at(from), at(to));
///
/// assert!(!overlaps(&slot(1, 10, 12), &slot(2, 12, 14)));
/// assert!(overlaps(&slot(1, 10, 12), &slot(3, 11, 13)));
/// ```
#[must_use]
pub fn overlaps(a: &Reservation, b: &Reservation) -> bool {
    a.room_id == b.room_id
        && a.date == b.date
        && a.start_time < b.end_time
        && a.end_time > b.start_time
}

/// Every pair of distinct reservations in the dataset that overlap.
///
/// Each unordered pair appears once, as `(earlier, later)` by input
/// position, and pairs are listed in input order of their first element.
#[must_use]
pub fn overlapping_pairs(dataset: &Dataset) -> Vec<(ReservationId, ReservationId)> {
    let reservations = dataset.reservations();

    // Only reservations of the same room and day can conflict.
    let mut slots: HashMap<(RoomId, NaiveDate), Vec<usize>> = HashMap::new();
    for (pos, r) in reservations.iter().enumerate() {
        slots.entry((r.room_id, r.date)).or_default().push(pos);
    }

    let mut pairs = Vec::new();
    for positions in slots.values() {
        for (i, &a) in positions.iter().enumerate() {
            for &b in &positions[i + 1..] {
                if overlaps(&reservations[a], &reservations[b]) {
                    pairs.push((a, b));
                }
            }
        }
    }
    pairs.sort_unstable();

    pairs
        .into_iter()
        .map(|(a, b)| (reservations[a].id, reservations[b].id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Member, MemberId, Room};
    use chrono::NaiveTime;
    use rust_decimal_macros::dec;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn time(hour: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
    }

    fn slot(id: u32, room: u32, day: u32, from: u32, to: u32) -> Reservation {
        Reservation::new(
            ReservationId(id),
            MemberId(1),
            RoomId(room),
            date(day),
            time(from),
            time(to),
        )
    }

    #[test]
    fn test_touching_slots_do_not_overlap() {
        let a = slot(1, 1, 10, 10, 12);
        let b = slot(2, 1, 10, 12, 14);
        assert!(!overlaps(&a, &b));
        assert!(!overlaps(&b, &a));
    }

    #[test]
    fn test_intersecting_slots_overlap() {
        let a = slot(1, 1, 10, 10, 12);
        let c = slot(3, 1, 10, 11, 13);
        assert!(overlaps(&a, &c));
        assert_eq!(overlaps(&a, &c), overlaps(&c, &a));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = slot(1, 1, 10, 9, 18);
        let inner = slot(2, 1, 10, 11, 12);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_different_room_or_day() {
        let a = slot(1, 1, 10, 10, 12);
        assert!(!overlaps(&a, &slot(2, 2, 10, 10, 12)));
        assert!(!overlaps(&a, &slot(3, 1, 11, 10, 12)));
    }

    #[test]
    fn test_self_overlaps() {
        let a = slot(1, 1, 10, 10, 12);
        assert!(overlaps(&a, &a));
    }

    #[test]
    fn test_overlapping_pairs() {
        let day = date(1);
        let dataset = Dataset::new(
            vec![Member::new(MemberId(1), "Ana Beltrán", "ana@example.com", day)],
            vec![
                Room::new(RoomId(1), "Sala Norte", dec!(30), time(8), time(20)),
                Room::new(RoomId(2), "Sala Sur", dec!(30), time(8), time(20)),
            ],
            vec![
                slot(1, 1, 10, 10, 12),
                slot(2, 2, 10, 10, 12),
                slot(3, 1, 10, 12, 14),
                slot(4, 1, 10, 11, 13),
                slot(5, 2, 10, 11, 12),
            ],
        )
        .unwrap();

        assert_eq!(
            overlapping_pairs(&dataset),
            vec![
                (ReservationId(1), ReservationId(4)),
                (ReservationId(2), ReservationId(5)),
                (ReservationId(3), ReservationId(4)),
            ]
        );
    }
}
