//! Immutable dataset snapshot with back-reference indexes.
//!
//! The entity collections are owned by the snapshot and never change once
//! it is built. Member -> reservations and room -> reservations are
//! position indexes computed once in [`Dataset::new`], so entities never
//! point at each other.

use rust_decimal::Decimal;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use crate::pricing::{self, check_discount};
use crate::{
    InvalidDataError, Member, MemberId, Reservation, ReservationId, Room, RoomId,
};

/// A reservation joined with the member and room it references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Booking<'a> {
    /// The reservation.
    pub reservation: &'a Reservation,
    /// The member who made it.
    pub member: &'a Member,
    /// The room it is for.
    pub room: &'a Room,
}

impl Booking<'_> {
    /// Final price of the reservation. See [`pricing::cost`].
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDataError`] if a pricing precondition fails.
    pub fn cost(&self) -> Result<Decimal, InvalidDataError> {
        pricing::cost(self.room, self.reservation)
    }

    /// Discount amount of the reservation. See [`pricing::discount_amount`].
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDataError`] if a pricing precondition fails.
    pub fn discount_amount(&self) -> Result<Decimal, InvalidDataError> {
        pricing::discount_amount(self.room, self.reservation)
    }
}

#[derive(Debug, Clone, Copy)]
struct Link {
    member: usize,
    room: usize,
}

/// A validated, read-only snapshot of members, rooms and reservations.
///
/// Every reservation's member and room are guaranteed to exist, so joins
/// never fail. The snapshot is `Send + Sync` and can be shared across
/// threads evaluating different reports.
#[derive(Debug, Clone)]
pub struct Dataset {
    members: Vec<Member>,
    rooms: Vec<Room>,
    reservations: Vec<Reservation>,
    member_pos: HashMap<MemberId, usize>,
    room_pos: HashMap<RoomId, usize>,
    /// Parallel to `reservations`.
    links: Vec<Link>,
    /// Parallel to `members`: positions into `reservations`.
    by_member: Vec<Vec<usize>>,
    /// Parallel to `rooms`: positions into `reservations`.
    by_room: Vec<Vec<usize>>,
}

impl Dataset {
    /// Validate the collections and build the snapshot.
    ///
    /// Input order is preserved and is the iteration order of every
    /// accessor.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidDataError`] found: duplicate ids, dangling
    /// member or room references, a negative hourly price, a room that does
    /// not close after it opens, a reservation that does not start before
    /// it ends, or a discount outside `[0, 100]`.
    pub fn new(
        members: Vec<Member>,
        rooms: Vec<Room>,
        reservations: Vec<Reservation>,
    ) -> Result<Self, InvalidDataError> {
        let result = Self::build(members, rooms, reservations);
        match &result {
            Ok(dataset) => tracing::debug!(
                members = dataset.members.len(),
                rooms = dataset.rooms.len(),
                reservations = dataset.reservations.len(),
                "dataset snapshot built"
            ),
            Err(e) => tracing::warn!("rejected dataset snapshot: {e}"),
        }
        result
    }

    fn build(
        members: Vec<Member>,
        rooms: Vec<Room>,
        reservations: Vec<Reservation>,
    ) -> Result<Self, InvalidDataError> {
        let member_pos = position_index(&members, |m| m.id, |id| id.0, "member")?;
        let room_pos = position_index(&rooms, |r| r.id, |id| id.0, "room")?;
        position_index(&reservations, |r| r.id, |id: ReservationId| id.0, "reservation")?;

        for room in &rooms {
            validate_room(room)?;
        }

        let mut links = Vec::with_capacity(reservations.len());
        let mut by_member = vec![Vec::new(); members.len()];
        let mut by_room = vec![Vec::new(); rooms.len()];

        for (pos, reservation) in reservations.iter().enumerate() {
            validate_reservation(reservation)?;

            let member = *member_pos.get(&reservation.member_id).ok_or(
                InvalidDataError::UnknownMember {
                    reservation: reservation.id,
                    member: reservation.member_id,
                },
            )?;
            let room = *room_pos.get(&reservation.room_id).ok_or(
                InvalidDataError::UnknownRoom {
                    reservation: reservation.id,
                    room: reservation.room_id,
                },
            )?;

            by_member[member].push(pos);
            by_room[room].push(pos);
            links.push(Link { member, room });
        }

        Ok(Self {
            members,
            rooms,
            reservations,
            member_pos,
            room_pos,
            links,
            by_member,
            by_room,
        })
    }

    /// An empty snapshot.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            members: Vec::new(),
            rooms: Vec::new(),
            reservations: Vec::new(),
            member_pos: HashMap::new(),
            room_pos: HashMap::new(),
            links: Vec::new(),
            by_member: Vec::new(),
            by_room: Vec::new(),
        }
    }

    /// All members, in input order.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// All rooms, in input order.
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// All reservations, in input order.
    #[must_use]
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// All reservations joined with their member and room, in input order.
    pub fn bookings(&self) -> impl Iterator<Item = Booking<'_>> + '_ {
        (0..self.reservations.len()).map(move |pos| self.booking_at(pos))
    }

    /// Look up a member by id.
    #[must_use]
    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.member_pos.get(&id).map(|&pos| &self.members[pos])
    }

    /// Look up a room by id.
    #[must_use]
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.room_pos.get(&id).map(|&pos| &self.rooms[pos])
    }

    /// Reservations made by a member, in input order.
    ///
    /// Empty for a member without reservations or an unknown id.
    pub fn reservations_of_member(&self, id: MemberId) -> impl Iterator<Item = Booking<'_>> + '_ {
        let positions = self
            .member_pos
            .get(&id)
            .map_or(&[][..], |&pos| self.by_member[pos].as_slice());
        positions.iter().map(move |&pos| self.booking_at(pos))
    }

    /// Reservations of a room, in input order.
    ///
    /// Empty for a room without reservations or an unknown id.
    pub fn reservations_of_room(&self, id: RoomId) -> impl Iterator<Item = Booking<'_>> + '_ {
        let positions = self
            .room_pos
            .get(&id)
            .map_or(&[][..], |&pos| self.by_room[pos].as_slice());
        positions.iter().map(move |&pos| self.booking_at(pos))
    }

    /// Whether the member has at least one reservation.
    #[must_use]
    pub fn has_reservations(&self, id: MemberId) -> bool {
        self.member_pos
            .get(&id)
            .is_some_and(|&pos| !self.by_member[pos].is_empty())
    }

    /// Check if the snapshot holds no entities at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty() && self.rooms.is_empty() && self.reservations.is_empty()
    }

    fn booking_at(&self, pos: usize) -> Booking<'_> {
        let link = self.links[pos];
        Booking {
            reservation: &self.reservations[pos],
            member: &self.members[link.member],
            room: &self.rooms[link.room],
        }
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::empty()
    }
}

fn position_index<T, K: Copy + Eq + Hash>(
    items: &[T],
    key: impl Fn(&T) -> K,
    raw: impl Fn(K) -> u32,
    entity: &'static str,
) -> Result<HashMap<K, usize>, InvalidDataError> {
    let mut index = HashMap::with_capacity(items.len());
    for (pos, item) in items.iter().enumerate() {
        let id = key(item);
        match index.entry(id) {
            Entry::Occupied(_) => {
                return Err(InvalidDataError::DuplicateId {
                    entity,
                    id: raw(id),
                })
            }
            Entry::Vacant(slot) => {
                slot.insert(pos);
            }
        }
    }
    Ok(index)
}

fn validate_room(room: &Room) -> Result<(), InvalidDataError> {
    if room.hourly_price < Decimal::ZERO {
        return Err(InvalidDataError::NegativePrice {
            room: room.id,
            price: room.hourly_price,
        });
    }
    if room.closing_time <= room.opening_time {
        return Err(InvalidDataError::InvalidOpeningHours {
            room: room.id,
            opening: room.opening_time,
            closing: room.closing_time,
        });
    }
    Ok(())
}

fn validate_reservation(reservation: &Reservation) -> Result<(), InvalidDataError> {
    if reservation.start_time >= reservation.end_time {
        return Err(InvalidDataError::InvalidTimeRange {
            reservation: reservation.id,
            start: reservation.start_time,
            end: reservation.end_time,
        });
    }
    if let Some(pct) = reservation.discount_pct {
        check_discount(reservation, pct)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal_macros::dec;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn time(hour: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
    }

    fn members() -> Vec<Member> {
        vec![
            Member::new(MemberId(1), "Ana Beltrán", "ana@example.com", date(2024, 1, 1)),
            Member::new(MemberId(2), "Luis Pérez", "luis@example.com", date(2024, 2, 1)),
            Member::new(MemberId(3), "Eva Soto", "eva@example.com", date(2024, 3, 1)),
        ]
    }

    fn rooms() -> Vec<Room> {
        vec![
            Room::new(RoomId(10), "Sala Norte", dec!(30), time(8), time(20)),
            Room::new(RoomId(20), "Sala Sur", dec!(20), time(8), time(20)),
        ]
    }

    fn reservation(id: u32, member: u32, room: u32) -> Reservation {
        Reservation::new(
            ReservationId(id),
            MemberId(member),
            RoomId(room),
            date(2025, 1, 10),
            time(10),
            time(12),
        )
    }

    #[test]
    fn test_back_references() {
        let dataset = Dataset::new(
            members(),
            rooms(),
            vec![reservation(1, 1, 10), reservation(2, 2, 20), reservation(3, 1, 20)],
        )
        .unwrap();

        let ana: Vec<_> = dataset
            .reservations_of_member(MemberId(1))
            .map(|b| b.reservation.id)
            .collect();
        assert_eq!(ana, vec![ReservationId(1), ReservationId(3)]);

        let south: Vec<_> = dataset
            .reservations_of_room(RoomId(20))
            .map(|b| b.member.id)
            .collect();
        assert_eq!(south, vec![MemberId(2), MemberId(1)]);

        assert!(dataset.has_reservations(MemberId(2)));
        assert!(!dataset.has_reservations(MemberId(3)));
        assert_eq!(dataset.reservations_of_member(MemberId(3)).count(), 0);
        assert_eq!(dataset.reservations_of_member(MemberId(99)).count(), 0);
    }

    #[test]
    fn test_bookings_join() {
        let dataset = Dataset::new(members(), rooms(), vec![reservation(1, 2, 10)]).unwrap();
        let booking = dataset.bookings().next().unwrap();
        assert_eq!(booking.member.name, "Luis Pérez");
        assert_eq!(booking.room.name, "Sala Norte");
        assert_eq!(booking.cost().unwrap(), dec!(60));
    }

    #[test]
    fn test_lookup() {
        let dataset = Dataset::new(members(), rooms(), Vec::new()).unwrap();
        assert_eq!(dataset.member(MemberId(3)).unwrap().name, "Eva Soto");
        assert_eq!(dataset.room(RoomId(20)).unwrap().name, "Sala Sur");
        assert!(dataset.room(RoomId(30)).is_none());
    }

    #[test]
    fn test_unknown_member_rejected() {
        let err = Dataset::new(members(), rooms(), vec![reservation(1, 9, 10)]).unwrap_err();
        assert_eq!(
            err,
            InvalidDataError::UnknownMember {
                reservation: ReservationId(1),
                member: MemberId(9),
            }
        );
    }

    #[test]
    fn test_unknown_room_rejected() {
        let err = Dataset::new(members(), rooms(), vec![reservation(1, 1, 30)]).unwrap_err();
        assert!(matches!(err, InvalidDataError::UnknownRoom { .. }));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut dup = members();
        dup.push(Member::new(MemberId(2), "Otro", "otro@example.com", date(2024, 1, 1)));
        let err = Dataset::new(dup, rooms(), Vec::new()).unwrap_err();
        assert_eq!(err, InvalidDataError::DuplicateId { entity: "member", id: 2 });

        let err = Dataset::new(
            members(),
            rooms(),
            vec![reservation(1, 1, 10), reservation(1, 2, 10)],
        )
        .unwrap_err();
        assert_eq!(err, InvalidDataError::DuplicateId { entity: "reservation", id: 1 });
    }

    #[test]
    fn test_time_range_rejected() {
        let mut r = reservation(1, 1, 10);
        r.end_time = r.start_time;
        let err = Dataset::new(members(), rooms(), vec![r]).unwrap_err();
        assert!(matches!(err, InvalidDataError::InvalidTimeRange { .. }));
    }

    #[test]
    fn test_discount_range_rejected() {
        let r = reservation(1, 1, 10).with_discount(dec!(100.01));
        let err = Dataset::new(members(), rooms(), vec![r]).unwrap_err();
        assert!(matches!(err, InvalidDataError::DiscountOutOfRange { .. }));

        let r = reservation(1, 1, 10).with_discount(dec!(100));
        assert!(Dataset::new(members(), rooms(), vec![r]).is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut bad = rooms();
        bad[1].hourly_price = dec!(-0.01);
        let err = Dataset::new(members(), bad, Vec::new()).unwrap_err();
        assert!(matches!(err, InvalidDataError::NegativePrice { .. }));
    }

    #[test]
    fn test_empty() {
        let dataset = Dataset::default();
        assert!(dataset.is_empty());
        assert_eq!(dataset.bookings().count(), 0);
    }
}
