//! Core types for coworking analytics
//!
//! This crate provides the fundamental types the query engine works on:
//!
//! - [`Member`], [`Room`], [`Reservation`] - The three entity collections
//! - [`ReservationStatus`] - Closed set of reservation status tags
//! - [`Dataset`] - An immutable, validated snapshot with back-reference indexes
//! - [`Booking`] - A reservation joined with its member and room
//! - [`pricing`] - Exact decimal cost computation
//! - [`overlap`] - Room/time-slot conflict detection
//!
//! # Example
//!
//! ```
//! use coworking_core::{Dataset, Member, MemberId, Reservation, ReservationId, Room, RoomId};
//! use chrono::{NaiveDate, NaiveTime};
//! use rust_decimal_macros::dec;
//!
//! let day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
//! let at = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
//!
//! let dataset = Dataset::new(
//!     vec![Member::new(MemberId(1), "Ana Beltrán", "ana@example.com", day)],
//!     vec![Room::new(RoomId(1), "Sala Norte", dec!(30), at(8), at(20))],
//!     vec![Reservation::new(ReservationId(1), MemberId(1), RoomId(1), day, at(10), at(12))
//!         .with_discount(dec!(10))],
//! )
//! .unwrap();
//!
//! let booking = dataset.bookings().next().unwrap();
//! assert_eq!(booking.cost().unwrap(), dec!(54.00));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod dataset;
pub mod entity;
pub mod error;
pub mod id;
pub mod overlap;
pub mod pricing;
pub mod status;

pub use dataset::{Booking, Dataset};
pub use entity::{Member, Reservation, Room};
pub use error::InvalidDataError;
pub use id::{MemberId, ReservationId, RoomId};
pub use overlap::{overlapping_pairs, overlaps};
pub use status::ReservationStatus;

// Re-export commonly used external types
pub use chrono::{NaiveDate, NaiveTime};
pub use rust_decimal::Decimal;
