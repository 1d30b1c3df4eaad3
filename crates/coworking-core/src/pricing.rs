//! Reservation pricing.
//!
//! All arithmetic is exact [`Decimal`] arithmetic and nothing is rounded
//! here: `30 x 2 - (30 x 2 x 10 / 100)` is exactly `54`. Durations enter
//! as whole seconds and the division by 3600 comes last, so a 20 minute
//! slot at 30/h costs exactly `10`. Rounding for display is left to the
//! caller. Overflow is an error, never a panic.

use rust_decimal::Decimal;

use crate::entity::SECONDS_PER_HOUR;
use crate::{InvalidDataError, Reservation, Room};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Price of a reservation before any discount: hourly price times hours.
///
/// # Errors
///
/// Rejects a negative hourly price, a negative duration, or a result that
/// does not fit in a [`Decimal`].
pub fn base_price(room: &Room, reservation: &Reservation) -> Result<Decimal, InvalidDataError> {
    check_price(room)?;
    let seconds = reservation.duration_seconds();
    if seconds < 0 {
        return Err(InvalidDataError::NegativeHours {
            reservation: reservation.id,
            hours: reservation.hours(),
        });
    }
    room.hourly_price
        .checked_mul(Decimal::from(seconds))
        .and_then(|v| v.checked_div(Decimal::from(SECONDS_PER_HOUR)))
        .ok_or(InvalidDataError::Overflow {
            operation: "base price",
        })
}

/// Amount taken off the base price by the reservation's discount.
///
/// Zero when the reservation has no discount.
///
/// # Errors
///
/// Same as [`base_price`], plus a discount percentage outside `[0, 100]`.
pub fn discount_amount(
    room: &Room,
    reservation: &Reservation,
) -> Result<Decimal, InvalidDataError> {
    let base = base_price(room, reservation)?;
    discount_of(reservation, base)
}

/// Final price of a reservation: base price minus the discount amount.
///
/// ```
/// use coworking_core::{pricing, MemberId, NaiveDate, NaiveTime, Reservation, ReservationId, Room, RoomId};
/// use rust_decimal_macros::dec;
///
/// let at = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
/// let day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
/// let room = Room::new(RoomId(1), "Sala Norte", dec!(30), at(8), at(20));
/// let reservation = Reservation::new(ReservationId(1), MemberId(1), RoomId(1), day, at(10), at(12))
///     .with_discount(dec!(10));
///
/// assert_eq!(pricing::cost(&room, &reservation).unwrap(), dec!(54.00));
/// ```
///
/// # Errors
///
/// Same as [`discount_amount`].
pub fn cost(room: &Room, reservation: &Reservation) -> Result<Decimal, InvalidDataError> {
    let base = base_price(room, reservation)?;
    let discount = discount_of(reservation, base)?;
    // discount <= base, so this cannot overflow
    Ok(base - discount)
}

/// Revenue of a room booked for its whole opening period on one day.
///
/// The opening period is truncated to whole hours and no discount applies.
///
/// # Errors
///
/// Rejects a negative hourly price, a room that does not close after it
/// opens, or a result that does not fit in a [`Decimal`].
pub fn full_day_revenue(room: &Room) -> Result<Decimal, InvalidDataError> {
    check_price(room)?;
    if room.closing_time <= room.opening_time {
        return Err(InvalidDataError::InvalidOpeningHours {
            room: room.id,
            opening: room.opening_time,
            closing: room.closing_time,
        });
    }
    room.hourly_price
        .checked_mul(Decimal::from(room.opening_hours()))
        .ok_or(InvalidDataError::Overflow {
            operation: "full-day revenue",
        })
}

fn discount_of(reservation: &Reservation, base: Decimal) -> Result<Decimal, InvalidDataError> {
    let Some(pct) = reservation.discount_pct else {
        return Ok(Decimal::ZERO);
    };
    check_discount(reservation, pct)?;
    base.checked_mul(pct)
        .and_then(|v| v.checked_div(ONE_HUNDRED))
        .ok_or(InvalidDataError::Overflow {
            operation: "discount",
        })
}

fn check_price(room: &Room) -> Result<(), InvalidDataError> {
    if room.hourly_price < Decimal::ZERO {
        return Err(InvalidDataError::NegativePrice {
            room: room.id,
            price: room.hourly_price,
        });
    }
    Ok(())
}

pub(crate) fn check_discount(
    reservation: &Reservation,
    pct: Decimal,
) -> Result<(), InvalidDataError> {
    if pct < Decimal::ZERO || pct > ONE_HUNDRED {
        return Err(InvalidDataError::DiscountOutOfRange {
            reservation: reservation.id,
            pct,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemberId, ReservationId, RoomId};
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal_macros::dec;

    fn time(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    fn room(price: Decimal) -> Room {
        Room::new(RoomId(1), "Sala Norte", price, time(8, 0), time(20, 0))
    }

    fn reservation(start: NaiveTime, end: NaiveTime) -> Reservation {
        let day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        Reservation::new(ReservationId(1), MemberId(1), RoomId(1), day, start, end)
    }

    #[test]
    fn test_cost_with_discount() {
        let r = reservation(time(10, 0), time(12, 0)).with_discount(dec!(10));
        assert_eq!(base_price(&room(dec!(30)), &r).unwrap(), dec!(60));
        assert_eq!(discount_amount(&room(dec!(30)), &r).unwrap(), dec!(6));
        assert_eq!(cost(&room(dec!(30)), &r).unwrap(), dec!(54.00));
    }

    #[test]
    fn test_cost_without_discount() {
        let r = reservation(time(10, 0), time(11, 30));
        assert_eq!(cost(&room(dec!(25.50)), &r).unwrap(), dec!(38.25));
        assert_eq!(discount_amount(&room(dec!(25.50)), &r).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_cost_is_exact() {
        // 0.1-style values drift in binary floating point
        let r = reservation(time(10, 0), time(13, 0)).with_discount(dec!(33.3));
        let c = cost(&room(dec!(0.10)), &r).unwrap();
        assert_eq!(c, dec!(0.2001));
    }

    #[test]
    fn test_third_of_an_hour_is_exact() {
        let r = reservation(time(10, 0), time(10, 20));
        assert_eq!(base_price(&room(dec!(30)), &r).unwrap(), dec!(10));
        assert_eq!(cost(&room(dec!(30)), &r).unwrap(), dec!(10));

        let total: Decimal = (0..3).map(|_| cost(&room(dec!(30)), &r).unwrap()).sum();
        assert_eq!(total, dec!(30));

        let r = reservation(time(10, 0), time(10, 40)).with_discount(dec!(25));
        assert_eq!(cost(&room(dec!(45)), &r).unwrap(), dec!(22.5));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let r = reservation(time(8, 0), time(20, 0));
        let err = cost(&room(Decimal::MAX), &r).unwrap_err();
        assert_eq!(err, InvalidDataError::Overflow { operation: "base price" });

        let auditorium = Room::new(RoomId(4), "Auditorio Sol", Decimal::MAX, time(8, 0), time(20, 0));
        assert!(matches!(
            full_day_revenue(&auditorium),
            Err(InvalidDataError::Overflow { .. })
        ));
    }

    #[test]
    fn test_full_discount_is_free() {
        let r = reservation(time(10, 0), time(12, 0)).with_discount(dec!(100));
        assert_eq!(cost(&room(dec!(30)), &r).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_negative_price_rejected() {
        let r = reservation(time(10, 0), time(12, 0));
        let err = cost(&room(dec!(-1)), &r).unwrap_err();
        assert!(matches!(err, InvalidDataError::NegativePrice { .. }));
    }

    #[test]
    fn test_negative_hours_rejected() {
        let r = reservation(time(12, 0), time(10, 0));
        let err = cost(&room(dec!(30)), &r).unwrap_err();
        assert_eq!(
            err,
            InvalidDataError::NegativeHours {
                reservation: ReservationId(1),
                hours: dec!(-2),
            }
        );
    }

    #[test]
    fn test_discount_out_of_range_rejected() {
        let r = reservation(time(10, 0), time(12, 0)).with_discount(dec!(120));
        assert!(matches!(
            cost(&room(dec!(30)), &r),
            Err(InvalidDataError::DiscountOutOfRange { .. })
        ));
        let r = reservation(time(10, 0), time(12, 0)).with_discount(dec!(-5));
        assert!(discount_amount(&room(dec!(30)), &r).is_err());
    }

    #[test]
    fn test_full_day_revenue_truncates_hours() {
        let auditorium = Room::new(RoomId(4), "Auditorio Sol", dec!(80), time(9, 0), time(21, 45));
        assert_eq!(full_day_revenue(&auditorium).unwrap(), dec!(960));
    }

    #[test]
    fn test_full_day_revenue_rejects_inverted_hours() {
        let broken = Room::new(RoomId(4), "Auditorio Sol", dec!(80), time(21, 0), time(9, 0));
        assert!(matches!(
            full_day_revenue(&broken),
            Err(InvalidDataError::InvalidOpeningHours { .. })
        ));
    }
}
