//! Report engine for coworking analytics.
//!
//! This crate answers analytical questions over an immutable
//! [`Dataset`](coworking_core::Dataset) of members, rooms and reservations.
//!
//! # Overview
//!
//! - [`primitives`] - filter, stable multi-key sort, distinct, group-by and
//!   reductions that every report is built from
//! - [`Executor`] - the typed reports, one method each
//! - [`Report`] - the report catalogue, projecting results into a
//!   [`QueryResult`] table
//! - [`ReportParams`] - the inputs of the parameterised reports
//!
//! # Example
//!
//! ```
//! use coworking_core::{Dataset, Room, RoomId, NaiveTime};
//! use coworking_query::{Executor, Report, ReportParams, Value};
//! use rust_decimal_macros::dec;
//!
//! let at = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
//! let rooms = vec![
//!     Room::new(RoomId(1), "Sala Norte", dec!(30), at(8), at(20)).with_capacity(12),
//!     Room::new(RoomId(2), "Box", dec!(15), at(9), at(18)),
//! ];
//! let dataset = Dataset::new(Vec::new(), rooms, Vec::new()).unwrap();
//! let executor = Executor::new(&dataset);
//!
//! let cheapest = executor.cheapest_rooms(1);
//! assert_eq!(cheapest[0].name, "Box");
//!
//! let table = Report::TotalCapacity.execute(&executor, &ReportParams::default()).unwrap();
//! assert_eq!(table.rows, vec![vec![Value::Integer(12)]]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod collate;
pub mod error;
pub mod executor;
pub mod params;
pub mod primitives;
pub mod report;
pub mod result;

pub use error::QueryError;
pub use executor::{Executor, MemberContact, MemberEmail, MemberListing, ReservationLine};
pub use params::ReportParams;
pub use report::Report;
pub use result::{QueryResult, Row, Value};
