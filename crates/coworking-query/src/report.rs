//! Report catalogue.
//!
//! [`Report`] names every report the executor can answer and projects its
//! typed result into a display-neutral [`QueryResult`].

use coworking_core::{Booking, Member, Room};
use std::fmt;
use std::str::FromStr;

use crate::{Executor, QueryError, QueryResult, ReportParams, Value};

/// A named report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Report {
    /// 1. Reservations in a year for rooms above a price.
    ReservationsInYearAbovePrice,
    /// 2. Members without reservations.
    MembersWithoutReservations,
    /// 3. Members without a phone.
    MembersWithoutPhone,
    /// 4. Members by email domain and signup year.
    MembersByEmailDomain,
    /// 5. Members by first surname.
    MembersWithFirstSurname,
    /// 6. Total spent by a member.
    TotalSpentBy,
    /// 7. Cheapest rooms.
    CheapestRooms,
    /// 8. Reservation with the largest discount.
    LargestDiscount,
    /// 9. Members with an attended group reservation.
    MembersWithAttendedGroup,
    /// 10. Shortest reservation.
    MinReservationHours,
    /// 11. Rooms matching a name pattern.
    RoomsMatchingName,
    /// 12. Members with their reservations.
    MemberListing,
    /// 13. Total room capacity.
    TotalCapacity,
    /// 14. Members with at least one reservation.
    MembersWithReservationsCount,
    /// 15. Rooms with a discount above a threshold.
    RoomsWithDiscountAbove,
    /// 16. Member with the most expensive reservation.
    TopPayingMember,
    /// 17. Members overlapping with a member.
    MembersOverlappingWith,
    /// 18. Revenue for a month.
    RevenueForMonth,
    /// 19. Members with a note.
    MembersWithNoteCount,
    /// 20. Full-day revenue of a room.
    FullDayRevenue,
    /// Revenue per room.
    RevenueByRoom,
    /// Reservations per status.
    StatusBreakdown,
}

impl Report {
    /// Every report, numbered ones first.
    pub const ALL: [Self; 22] = [
        Self::ReservationsInYearAbovePrice,
        Self::MembersWithoutReservations,
        Self::MembersWithoutPhone,
        Self::MembersByEmailDomain,
        Self::MembersWithFirstSurname,
        Self::TotalSpentBy,
        Self::CheapestRooms,
        Self::LargestDiscount,
        Self::MembersWithAttendedGroup,
        Self::MinReservationHours,
        Self::RoomsMatchingName,
        Self::MemberListing,
        Self::TotalCapacity,
        Self::MembersWithReservationsCount,
        Self::RoomsWithDiscountAbove,
        Self::TopPayingMember,
        Self::MembersOverlappingWith,
        Self::RevenueForMonth,
        Self::MembersWithNoteCount,
        Self::FullDayRevenue,
        Self::RevenueByRoom,
        Self::StatusBreakdown,
    ];

    /// Kebab-case identifier, as accepted by [`FromStr`].
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::ReservationsInYearAbovePrice => "reservations-in-year-above-price",
            Self::MembersWithoutReservations => "members-without-reservations",
            Self::MembersWithoutPhone => "members-without-phone",
            Self::MembersByEmailDomain => "members-by-email-domain",
            Self::MembersWithFirstSurname => "members-with-first-surname",
            Self::TotalSpentBy => "total-spent-by",
            Self::CheapestRooms => "cheapest-rooms",
            Self::LargestDiscount => "largest-discount",
            Self::MembersWithAttendedGroup => "members-with-attended-group",
            Self::MinReservationHours => "min-reservation-hours",
            Self::RoomsMatchingName => "rooms-matching-name",
            Self::MemberListing => "member-listing",
            Self::TotalCapacity => "total-capacity",
            Self::MembersWithReservationsCount => "members-with-reservations-count",
            Self::RoomsWithDiscountAbove => "rooms-with-discount-above",
            Self::TopPayingMember => "top-paying-member",
            Self::MembersOverlappingWith => "members-overlapping-with",
            Self::RevenueForMonth => "revenue-for-month",
            Self::MembersWithNoteCount => "members-with-note-count",
            Self::FullDayRevenue => "full-day-revenue",
            Self::RevenueByRoom => "revenue-by-room",
            Self::StatusBreakdown => "status-breakdown",
        }
    }

    /// Catalogue number, `1..=20`. `None` for the group-by summaries.
    #[must_use]
    pub fn number(self) -> Option<usize> {
        Self::ALL[..20].iter().position(|r| *r == self).map(|i| i + 1)
    }

    /// One-line description.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::ReservationsInYearAbovePrice => {
                "Reservations in the year for rooms priced above the threshold"
            }
            Self::MembersWithoutReservations => "Members without reservations",
            Self::MembersWithoutPhone => "Members without a registered phone",
            Self::MembersByEmailDomain => "Members by email domain and signup year",
            Self::MembersWithFirstSurname => "Members with the given first surname",
            Self::TotalSpentBy => "Total spent by the member",
            Self::CheapestRooms => "Cheapest rooms per hour",
            Self::LargestDiscount => "Reservation with the largest discount",
            Self::MembersWithAttendedGroup => "Members with an attended group of the given size",
            Self::MinReservationHours => "Shortest reservation in hours",
            Self::RoomsMatchingName => "Rooms matching the name pattern",
            Self::MemberListing => "Members with their reservations",
            Self::TotalCapacity => "Total room capacity",
            Self::MembersWithReservationsCount => "Members with at least one reservation",
            Self::RoomsWithDiscountAbove => "Rooms with a discount above the threshold",
            Self::TopPayingMember => "Member with the most expensive reservation",
            Self::MembersOverlappingWith => "Members overlapping with the member",
            Self::RevenueForMonth => "Revenue for the month",
            Self::MembersWithNoteCount => "Members with the note in a reservation",
            Self::FullDayRevenue => "Full-day revenue of the room",
            Self::RevenueByRoom => "Revenue per room",
            Self::StatusBreakdown => "Reservations per status",
        }
    }

    /// Evaluate the report and project it into a table.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] if a parameter is invalid or the data violates
    /// a pricing precondition.
    pub fn execute(
        self,
        executor: &Executor<'_>,
        params: &ReportParams,
    ) -> Result<QueryResult, QueryError> {
        let result = self.project(executor, params);
        match &result {
            Ok(table) => tracing::debug!(report = self.id(), rows = table.len(), "report evaluated"),
            Err(e) => tracing::debug!(report = self.id(), "report failed: {e}"),
        }
        result
    }

    fn project(
        self,
        executor: &Executor<'_>,
        params: &ReportParams,
    ) -> Result<QueryResult, QueryError> {
        let table = match self {
            Self::ReservationsInYearAbovePrice => booking_table(
                &executor.reservations_in_year_above_price(params.year, params.price_threshold),
            )?,
            Self::MembersWithoutReservations => {
                member_table(&executor.members_without_reservations())
            }
            Self::MembersWithoutPhone => {
                let mut table = QueryResult::new(["id", "name", "email"]);
                for c in executor.members_without_phone() {
                    table.add_row(vec![c.id.0.into(), c.name.into(), c.email.into()]);
                }
                table
            }
            Self::MembersByEmailDomain => {
                let mut table = QueryResult::new(["id", "email"]);
                for m in executor.members_by_email_domain(&params.email_domain, params.signup_year)
                {
                    table.add_row(vec![m.id.0.into(), m.email.into()]);
                }
                table
            }
            Self::MembersWithFirstSurname => {
                member_table(&executor.members_with_first_surname(&params.surname))
            }
            Self::TotalSpentBy => {
                QueryResult::scalar("total_spent", executor.total_spent_by(&params.member_name)?)
            }
            Self::CheapestRooms => room_table(&executor.cheapest_rooms(params.top_rooms)),
            Self::LargestDiscount => {
                let top = executor.largest_discount()?;
                let mut table = booking_table(top.as_slice())?;
                table.columns.push("discount_amount".to_string());
                if let (Some(booking), Some(row)) = (top, table.rows.first_mut()) {
                    row.push(booking.discount_amount()?.into());
                }
                table
            }
            Self::MembersWithAttendedGroup => {
                member_table(&executor.members_with_attended_group(params.attendees))
            }
            Self::MinReservationHours => {
                QueryResult::optional("min_hours", executor.min_reservation_hours())
            }
            Self::RoomsMatchingName => {
                room_table(&executor.rooms_matching_name(&params.room_name_pattern)?)
            }
            Self::MemberListing => {
                let mut table = QueryResult::new(["member_id", "member", "reservation_id", "room"]);
                for listing in executor.member_listing() {
                    let member = listing.member;
                    if listing.reservations.is_empty() {
                        table.add_row(vec![
                            member.id.0.into(),
                            member.name.as_str().into(),
                            Value::Null,
                            Value::Null,
                        ]);
                    }
                    for line in listing.reservations {
                        table.add_row(vec![
                            member.id.0.into(),
                            member.name.as_str().into(),
                            line.reservation.0.into(),
                            line.room_name.into(),
                        ]);
                    }
                }
                table
            }
            Self::TotalCapacity => QueryResult::scalar("total_capacity", executor.total_capacity()),
            Self::MembersWithReservationsCount => {
                QueryResult::scalar("members", executor.members_with_reservations_count())
            }
            Self::RoomsWithDiscountAbove => {
                room_table(&executor.rooms_with_discount_above(params.discount_threshold))
            }
            Self::TopPayingMember => {
                member_table(executor.top_paying_member()?.as_slice())
            }
            Self::MembersOverlappingWith => {
                member_table(&executor.members_overlapping_with(&params.member_name)?)
            }
            Self::RevenueForMonth => QueryResult::scalar(
                "revenue",
                executor.revenue_for_month(params.revenue_year, params.revenue_month)?,
            ),
            Self::MembersWithNoteCount => {
                QueryResult::scalar("members", executor.members_with_note_count(&params.note))
            }
            Self::FullDayRevenue => QueryResult::optional(
                "full_day_revenue",
                executor.full_day_revenue(&params.room_name)?,
            ),
            Self::RevenueByRoom => {
                let mut table = QueryResult::new(["room_id", "room", "revenue"]);
                for (room, revenue) in executor.revenue_by_room()? {
                    table.add_row(vec![room.id.0.into(), room.name.as_str().into(), revenue.into()]);
                }
                table
            }
            Self::StatusBreakdown => {
                let mut table = QueryResult::new(["status", "reservations"]);
                for (status, n) in executor.reservations_by_status() {
                    table.add_row(vec![status.as_str().into(), n.into()]);
                }
                table
            }
        };
        Ok(table)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Report {
    type Err = QueryError;

    /// Parse a catalogue number (`"7"`) or a kebab-case id (`"cheapest-rooms"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let found = match s.parse::<usize>() {
            Ok(n) => Self::ALL.into_iter().find(|r| r.number() == Some(n)),
            Err(_) => Self::ALL
                .into_iter()
                .find(|r| r.id().eq_ignore_ascii_case(s)),
        };
        found.ok_or_else(|| QueryError::UnknownReport(s.to_string()))
    }
}

const MEMBER_COLUMNS: [&str; 5] = ["id", "name", "email", "phone", "signup_date"];
const ROOM_COLUMNS: [&str; 6] = [
    "id",
    "name",
    "hourly_price",
    "capacity",
    "opening_time",
    "closing_time",
];
const BOOKING_COLUMNS: [&str; 10] = [
    "id",
    "date",
    "start_time",
    "end_time",
    "hours",
    "member",
    "room",
    "discount_pct",
    "status",
    "cost",
];

fn member_table(members: &[&Member]) -> QueryResult {
    let mut table = QueryResult::new(MEMBER_COLUMNS);
    for m in members {
        table.add_row(vec![
            m.id.0.into(),
            m.name.as_str().into(),
            m.email.as_str().into(),
            m.phone.as_deref().into(),
            m.signup_date.into(),
        ]);
    }
    table
}

fn room_table(rooms: &[&Room]) -> QueryResult {
    let mut table = QueryResult::new(ROOM_COLUMNS);
    for r in rooms {
        table.add_row(vec![
            r.id.0.into(),
            r.name.as_str().into(),
            r.hourly_price.into(),
            r.capacity.into(),
            r.opening_time.into(),
            r.closing_time.into(),
        ]);
    }
    table
}

fn booking_table(bookings: &[Booking<'_>]) -> Result<QueryResult, QueryError> {
    let mut table = QueryResult::new(BOOKING_COLUMNS);
    for b in bookings {
        let r = b.reservation;
        table.add_row(vec![
            r.id.0.into(),
            r.date.into(),
            r.start_time.into(),
            r.end_time.into(),
            r.hours().into(),
            b.member.name.as_str().into(),
            b.room.name.as_str().into(),
            r.discount_pct.into(),
            r.status.as_str().into(),
            b.cost()?.into(),
        ]);
    }
    Ok(table)
}
