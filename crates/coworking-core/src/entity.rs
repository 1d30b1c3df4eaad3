//! Entity types: members, rooms and reservations.
//!
//! Entities only carry their own columns. A reservation holds the foreign
//! keys to its member and room; the reverse direction (a member's or a
//! room's reservations) is derived by [`Dataset`](crate::Dataset).

use chrono::{Datelike, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{MemberId, ReservationId, ReservationStatus, RoomId};

pub(crate) const SECONDS_PER_HOUR: i64 = 3600;

/// A member of the coworking space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier
    pub id: MemberId,
    /// Full name: given name followed by surnames
    pub name: String,
    /// Contact email
    pub email: String,
    /// Phone number, if one was registered
    #[serde(default)]
    pub phone: Option<String>,
    /// Date the member signed up
    pub signup_date: NaiveDate,
}

impl Member {
    /// Create a new member without a phone number.
    #[must_use]
    pub fn new(
        id: MemberId,
        name: impl Into<String>,
        email: impl Into<String>,
        signup_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            phone: None,
            signup_date,
        }
    }

    /// Set the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Whether a usable phone number is registered.
    ///
    /// An empty string counts as "not registered", same as an absent one.
    #[must_use]
    pub fn has_phone(&self) -> bool {
        self.phone.as_deref().is_some_and(|p| !p.trim().is_empty())
    }

    /// Whether `surname` is one of the words after the first one.
    ///
    /// Whole words only, so "Martín" does not match "Martínez". Compound
    /// given names are handled: every word past the first is a candidate.
    ///
    /// ```
    /// use coworking_core::{Member, MemberId, NaiveDate};
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    /// let member = Member::new(MemberId(1), "María José Martín López", "mj@example.com", date);
    /// assert!(member.has_surname("Martín"));
    /// assert!(!member.has_surname("María"));
    /// ```
    #[must_use]
    pub fn has_surname(&self, surname: &str) -> bool {
        self.name.split_whitespace().skip(1).any(|word| word == surname)
    }

    /// Year the member signed up.
    #[must_use]
    pub fn signup_year(&self) -> i32 {
        self.signup_date.year()
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} <{}>", self.id, self.name, self.email)
    }
}

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier
    pub id: RoomId,
    /// Display name
    pub name: String,
    /// Price per hour
    pub hourly_price: Decimal,
    /// Maximum number of people, if known
    #[serde(default)]
    pub capacity: Option<u32>,
    /// Opening time of day
    pub opening_time: NaiveTime,
    /// Closing time of day
    pub closing_time: NaiveTime,
}

impl Room {
    /// Create a new room with unknown capacity.
    #[must_use]
    pub fn new(
        id: RoomId,
        name: impl Into<String>,
        hourly_price: Decimal,
        opening_time: NaiveTime,
        closing_time: NaiveTime,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            hourly_price,
            capacity: None,
            opening_time,
            closing_time,
        }
    }

    /// Set the capacity.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Whole hours between opening and closing, truncated.
    #[must_use]
    pub fn opening_hours(&self) -> i64 {
        (self.closing_time - self.opening_time).num_hours()
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} ({}/h)", self.id, self.name, self.hourly_price)
    }
}

/// A reservation of a room by a member for a time slot on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique identifier
    pub id: ReservationId,
    /// The member who booked
    pub member_id: MemberId,
    /// The room booked
    pub room_id: RoomId,
    /// Day of the reservation
    pub date: NaiveDate,
    /// Start time (inclusive)
    pub start_time: NaiveTime,
    /// End time (exclusive)
    pub end_time: NaiveTime,
    /// Discount percentage in `[0, 100]`, if any
    #[serde(default)]
    pub discount_pct: Option<Decimal>,
    /// Status tag, required in snapshot files
    pub status: ReservationStatus,
    /// Number of attendees, if recorded
    #[serde(default)]
    pub attendees: Option<u32>,
    /// Free-text observation
    #[serde(default)]
    pub notes: Option<String>,
}

impl Reservation {
    /// Create a new pending reservation without discount.
    #[must_use]
    pub fn new(
        id: ReservationId,
        member_id: MemberId,
        room_id: RoomId,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            id,
            member_id,
            room_id,
            date,
            start_time,
            end_time,
            discount_pct: None,
            status: ReservationStatus::Pending,
            attendees: None,
            notes: None,
        }
    }

    /// Set the discount percentage.
    #[must_use]
    pub const fn with_discount(mut self, pct: Decimal) -> Self {
        self.discount_pct = Some(pct);
        self
    }

    /// Set the status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<ReservationStatus>) -> Self {
        self.status = status.into();
        self
    }

    /// Set the attendee count.
    #[must_use]
    pub const fn with_attendees(mut self, attendees: u32) -> Self {
        self.attendees = Some(attendees);
        self
    }

    /// Set the observation text.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Duration of the reservation in seconds.
    ///
    /// Negative when the end time precedes the start time; [`Dataset`]
    /// rejects such reservations and pricing refuses them.
    ///
    /// [`Dataset`]: crate::Dataset
    #[must_use]
    pub fn duration_seconds(&self) -> i64 {
        (self.end_time - self.start_time).num_seconds()
    }

    /// Duration of the reservation in fractional hours.
    ///
    /// For display and duration comparisons only. A 20 minute slot is
    /// `0.333..` here, cut at 28 digits; pricing works from
    /// [`Reservation::duration_seconds`] instead.
    #[must_use]
    pub fn hours(&self) -> Decimal {
        Decimal::from(self.duration_seconds()) / Decimal::from(SECONDS_PER_HOUR)
    }

    /// Whether a discount was applied.
    #[must_use]
    pub const fn is_discounted(&self) -> bool {
        self.discount_pct.is_some()
    }

    /// Whether the reservation falls in the given year and, if set, month.
    #[must_use]
    pub fn is_in_period(&self, year: i32, month: Option<u32>) -> bool {
        self.date.year() == year && month.map_or(true, |m| self.date.month() == m)
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {}-{} room {} member {} [{}]",
            self.id,
            self.date,
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M"),
            self.room_id,
            self.member_id,
            self.status
        )
    }
}
