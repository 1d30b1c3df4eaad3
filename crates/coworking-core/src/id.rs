//! Entity identifiers.
//!
//! Each collection has its own id newtype so a member id can never be used
//! to look up a room.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`Member`](crate::Member).
    MemberId
);
entity_id!(
    /// Identifier of a [`Room`](crate::Room).
    RoomId
);
entity_id!(
    /// Identifier of a [`Reservation`](crate::Reservation).
    ReservationId
);
