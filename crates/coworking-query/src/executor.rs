//! Report executor.
//!
//! [`Executor`] borrows a [`Dataset`] and answers the twenty analytical
//! questions plus two group-by summaries. Every report is a pure function
//! of the snapshot and its arguments, composed from [`crate::primitives`].

use coworking_core::{
    overlaps, Booking, Dataset, InvalidDataError, Member, MemberId, Reservation, ReservationId,
    ReservationStatus, Room,
};
use rust_decimal::Decimal;

use crate::params::compile_pattern;
use crate::primitives::{
    count, distinct_by, filter, group_reduce, min_by, sort_by, sum, take, try_max_by, try_sum,
    SortKey,
};
use crate::QueryError;

/// Contact details of a member without a phone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberContact<'a> {
    /// The member.
    pub id: MemberId,
    /// Full name.
    pub name: &'a str,
    /// Email address.
    pub email: &'a str,
}

/// Id and email of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberEmail<'a> {
    /// The member.
    pub id: MemberId,
    /// Email address.
    pub email: &'a str,
}

/// One reservation line of a [`MemberListing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationLine<'a> {
    /// The reservation.
    pub reservation: ReservationId,
    /// Name of the reserved room.
    pub room_name: &'a str,
}

/// A member with the reservations they made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberListing<'a> {
    /// The member.
    pub member: &'a Member,
    /// Their reservations, in input order.
    pub reservations: Vec<ReservationLine<'a>>,
}

/// Evaluates reports over a borrowed dataset snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Executor<'a> {
    dataset: &'a Dataset,
}

impl<'a> Executor<'a> {
    /// Create an executor over the given snapshot.
    #[must_use]
    pub const fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    /// The snapshot being queried.
    #[must_use]
    pub const fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Reservations in `year` whose room costs more than `threshold` per hour.
    #[must_use]
    pub fn reservations_in_year_above_price(&self, year: i32, threshold: Decimal) -> Vec<Booking<'a>> {
        filter(self.dataset.bookings(), |b| {
            b.reservation.is_in_period(year, None) && b.room.hourly_price > threshold
        })
    }

    /// Members who never made a reservation.
    #[must_use]
    pub fn members_without_reservations(&self) -> Vec<&'a Member> {
        let dataset = self.dataset;
        filter(dataset.members(), |m| !dataset.has_reservations(m.id))
    }

    /// Members with no phone registered, by name descending.
    #[must_use]
    pub fn members_without_phone(&self) -> Vec<MemberContact<'a>> {
        let contacts = filter(self.dataset.members(), |m| !m.has_phone())
            .into_iter()
            .map(|m| MemberContact {
                id: m.id,
                name: &m.name,
                email: &m.email,
            });
        sort_by(contacts, &[SortKey::text(|c: &MemberContact<'_>| c.name).desc()])
    }

    /// Members whose email ends with `domain` and who signed up in `signup_year`.
    #[must_use]
    pub fn members_by_email_domain(&self, domain: &str, signup_year: i32) -> Vec<MemberEmail<'a>> {
        filter(self.dataset.members(), |m| {
            m.email.ends_with(domain) && m.signup_year() == signup_year
        })
        .into_iter()
        .map(|m| MemberEmail {
            id: m.id,
            email: &m.email,
        })
        .collect()
    }

    /// Members carrying `surname` as a whole word after their first name.
    ///
    /// Most recent signups first; same-day signups by name.
    #[must_use]
    pub fn members_with_first_surname(&self, surname: &str) -> Vec<&'a Member> {
        sort_by(
            filter(self.dataset.members(), |m| m.has_surname(surname)),
            &[
                SortKey::by(|m: &&Member| m.signup_date).desc(),
                SortKey::text(|m: &&Member| m.name.as_str()),
            ],
        )
    }

    /// Total paid by the members matching `member_name`.
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidParameter`] for a blank name, or
    /// [`QueryError::InvalidData`] if a reservation cannot be priced.
    pub fn total_spent_by(&self, member_name: &str) -> Result<Decimal, QueryError> {
        let words = name_query(member_name)?;
        let dataset = self.dataset;
        let costs = filter(dataset.members(), |m| name_matches(m, &words))
            .into_iter()
            .flat_map(|m| dataset.reservations_of_member(m.id))
            .map(|b| b.cost());
        Ok(try_sum(costs)?)
    }

    /// The `k` rooms with the lowest hourly price. Ties keep input order.
    #[must_use]
    pub fn cheapest_rooms(&self, k: usize) -> Vec<&'a Room> {
        take(
            sort_by(self.dataset.rooms(), &[SortKey::by(|r: &&Room| r.hourly_price)]),
            k,
        )
    }

    /// The discounted reservation with the largest discount amount.
    ///
    /// On ties the earliest reservation in input order wins.
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidData`] if a reservation cannot be priced.
    pub fn largest_discount(&self) -> Result<Option<Booking<'a>>, QueryError> {
        let discounted = filter(self.dataset.bookings(), |b| b.reservation.is_discounted());
        Ok(try_max_by(discounted, Booking::discount_amount)?)
    }

    /// Members with an attended reservation of exactly `attendees` people.
    #[must_use]
    pub fn members_with_attended_group(&self, attendees: u32) -> Vec<&'a Member> {
        let dataset = self.dataset;
        filter(dataset.members(), |m| {
            dataset.reservations_of_member(m.id).any(|b| {
                b.reservation.status == ReservationStatus::Attended
                    && b.reservation.attendees == Some(attendees)
            })
        })
    }

    /// Shortest reservation length in hours.
    #[must_use]
    pub fn min_reservation_hours(&self) -> Option<Decimal> {
        min_by(self.dataset.reservations().iter().map(Reservation::hours), |h| *h)
    }

    /// Rooms whose name matches the regular expression `pattern`.
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidParameter`] if `pattern` does not compile.
    pub fn rooms_matching_name(&self, pattern: &str) -> Result<Vec<&'a Room>, QueryError> {
        let re = compile_pattern(pattern)?;
        Ok(filter(self.dataset.rooms(), |r| re.is_match(&r.name)))
    }

    /// Every member by name with their reservations and room names.
    #[must_use]
    pub fn member_listing(&self) -> Vec<MemberListing<'a>> {
        let dataset = self.dataset;
        sort_by(dataset.members(), &[SortKey::text(|m: &&Member| m.name.as_str())])
            .into_iter()
            .map(|member| MemberListing {
                member,
                reservations: dataset
                    .reservations_of_member(member.id)
                    .map(|b| ReservationLine {
                        reservation: b.reservation.id,
                        room_name: &b.room.name,
                    })
                    .collect(),
            })
            .collect()
    }

    /// Sum of room capacities; rooms without one count as zero.
    #[must_use]
    pub fn total_capacity(&self) -> u64 {
        self.dataset
            .rooms()
            .iter()
            .map(|r| u64::from(r.capacity.unwrap_or(0)))
            .sum()
    }

    /// Number of distinct members with at least one reservation.
    #[must_use]
    pub fn members_with_reservations_count(&self) -> usize {
        count(distinct_by(self.dataset.reservations(), |r| r.member_id))
    }

    /// Rooms with a reservation whose discount is above `threshold` percent.
    #[must_use]
    pub fn rooms_with_discount_above(&self, threshold: Decimal) -> Vec<&'a Room> {
        let dataset = self.dataset;
        filter(dataset.rooms(), |room| {
            dataset
                .reservations_of_room(room.id)
                .any(|b| b.reservation.discount_pct.is_some_and(|pct| pct > threshold))
        })
    }

    /// The member who paid the single most expensive reservation.
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidData`] if a reservation cannot be priced.
    pub fn top_paying_member(&self) -> Result<Option<&'a Member>, QueryError> {
        let top = try_max_by(self.dataset.bookings(), Booking::cost)?;
        Ok(top.map(|b| b.member))
    }

    /// Other members with a reservation overlapping one of the target's.
    ///
    /// The target is every member matching `member_name`; they are never
    /// part of the result. Each member appears once, in input order.
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidParameter`] for a blank name.
    pub fn members_overlapping_with(&self, member_name: &str) -> Result<Vec<&'a Member>, QueryError> {
        let words = name_query(member_name)?;
        let dataset = self.dataset;
        let (targets, others): (Vec<&Member>, Vec<&Member>) = dataset
            .members()
            .iter()
            .partition(|m| name_matches(m, &words));

        let target_reservations: Vec<Booking<'_>> = targets
            .iter()
            .flat_map(|m| dataset.reservations_of_member(m.id))
            .collect();

        let clashing = filter(others, |m| {
            dataset.reservations_of_member(m.id).any(|mine| {
                target_reservations
                    .iter()
                    .any(|theirs| overlaps(mine.reservation, theirs.reservation))
            })
        });
        Ok(distinct_by(clashing, |m| m.id))
    }

    /// Revenue of the reservations in the given month.
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidParameter`] for a month outside `1..=12`, or
    /// [`QueryError::InvalidData`] if a reservation cannot be priced.
    pub fn revenue_for_month(&self, year: i32, month: u32) -> Result<Decimal, QueryError> {
        if !(1..=12).contains(&month) {
            return Err(QueryError::InvalidParameter(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        let in_month = filter(self.dataset.bookings(), |b| {
            b.reservation.is_in_period(year, Some(month))
        });
        Ok(try_sum(in_month.iter().map(Booking::cost))?)
    }

    /// Number of members with a reservation whose notes contain `note`.
    #[must_use]
    pub fn members_with_note_count(&self, note: &str) -> usize {
        let dataset = self.dataset;
        count(filter(dataset.members(), |m| {
            dataset
                .reservations_of_member(m.id)
                .any(|b| b.reservation.notes.as_deref().is_some_and(|n| n.contains(note)))
        }))
    }

    /// Full-day revenue of the first room named exactly `room_name`.
    ///
    /// `None` when no room has that name.
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidData`] if the room's hours are not a valid range.
    pub fn full_day_revenue(&self, room_name: &str) -> Result<Option<Decimal>, QueryError> {
        self.dataset
            .rooms()
            .iter()
            .find(|r| r.name == room_name)
            .map(coworking_core::pricing::full_day_revenue)
            .transpose()
            .map_err(QueryError::from)
    }

    /// Post-discount revenue per room.
    ///
    /// Rooms come in the order their first reservation appears; rooms
    /// without reservations are left out.
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidData`] if a reservation cannot be priced.
    pub fn revenue_by_room(&self) -> Result<Vec<(&'a Room, Decimal)>, QueryError> {
        let priced = self
            .dataset
            .bookings()
            .map(|b| b.cost().map(|cost| (b.room, cost)))
            .collect::<Result<Vec<_>, InvalidDataError>>()?;

        let groups = group_reduce(
            priced,
            |(room, _)| room.id,
            || (None, Vec::new()),
            |(_, mut costs), (room, cost)| {
                costs.push(*cost);
                (Some(*room), costs)
            },
        );
        let totals = groups
            .into_iter()
            .filter_map(|(_, (room, costs))| room.map(|room| (room, costs)))
            .map(|(room, costs)| sum(costs).map(|total| (room, total)))
            .collect::<Result<Vec<_>, InvalidDataError>>()?;
        Ok(totals)
    }

    /// Number of reservations per status tag, in first-seen order.
    #[must_use]
    pub fn reservations_by_status(&self) -> Vec<(&'a ReservationStatus, usize)> {
        let tags = self.dataset.reservations().iter().map(|r| &r.status);
        group_reduce(tags, |s| *s, || 0, |n, _| n + 1)
    }
}

/// Split a member name query into the words that must all match.
fn name_query(query: &str) -> Result<Vec<&str>, QueryError> {
    let words: Vec<&str> = query.split_whitespace().collect();
    if words.is_empty() {
        return Err(QueryError::InvalidParameter(
            "member name must not be empty".to_string(),
        ));
    }
    Ok(words)
}

fn name_matches(member: &Member, words: &[&str]) -> bool {
    words.iter().all(|w| member.name.contains(w))
}
