//! Data precondition errors.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{MemberId, ReservationId, RoomId};

/// A precondition on the raw data is violated.
///
/// The analysed data is expected to be pre-validated, so any of these
/// points at a bug in whatever produced the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDataError {
    /// A room has a negative hourly price.
    #[error("room {room}: hourly price {price} is negative")]
    NegativePrice {
        /// The offending room.
        room: RoomId,
        /// The price found.
        price: Decimal,
    },

    /// A reservation lasts a negative number of hours.
    #[error("reservation {reservation}: duration of {hours} hours is negative")]
    NegativeHours {
        /// The offending reservation.
        reservation: ReservationId,
        /// The computed duration.
        hours: Decimal,
    },

    /// A reservation does not start strictly before it ends.
    #[error("reservation {reservation}: start time {start} is not before end time {end}")]
    InvalidTimeRange {
        /// The offending reservation.
        reservation: ReservationId,
        /// Start time.
        start: NaiveTime,
        /// End time.
        end: NaiveTime,
    },

    /// A discount percentage lies outside `[0, 100]`.
    #[error("reservation {reservation}: discount {pct}% is outside [0, 100]")]
    DiscountOutOfRange {
        /// The offending reservation.
        reservation: ReservationId,
        /// The percentage found.
        pct: Decimal,
    },

    /// A room does not close after it opens.
    #[error("room {room}: closing time {closing} is not after opening time {opening}")]
    InvalidOpeningHours {
        /// The offending room.
        room: RoomId,
        /// Opening time.
        opening: NaiveTime,
        /// Closing time.
        closing: NaiveTime,
    },

    /// A decimal computation left the representable range.
    #[error("arithmetic overflow computing {operation}")]
    Overflow {
        /// What was being computed ("base price", "discount", "sum", ...).
        operation: &'static str,
    },

    /// Two entities of the same collection share an id.
    #[error("duplicate {entity} id {id}")]
    DuplicateId {
        /// Collection name ("member", "room", "reservation").
        entity: &'static str,
        /// The repeated id.
        id: u32,
    },

    /// A reservation points at a member that is not in the snapshot.
    #[error("reservation {reservation} references unknown member {member}")]
    UnknownMember {
        /// The offending reservation.
        reservation: ReservationId,
        /// The dangling member id.
        member: MemberId,
    },

    /// A reservation points at a room that is not in the snapshot.
    #[error("reservation {reservation} references unknown room {room}")]
    UnknownRoom {
        /// The offending reservation.
        reservation: ReservationId,
        /// The dangling room id.
        room: RoomId,
    },
}
