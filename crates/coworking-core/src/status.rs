//! Reservation status tags.
//!
//! The source data stores the status as free text. Known tags map onto a
//! closed set of variants; anything else is kept verbatim in
//! [`ReservationStatus::Other`] so that matches stay exhaustive when new
//! tags show up.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a reservation.
///
/// Tags are matched exactly (case-sensitive). The canonical spelling is the
/// dataset's own (`ASISTIDA`, `CANCELADA`, ...); the English tags are
/// accepted as aliases.
///
/// ```
/// use coworking_core::ReservationStatus;
///
/// assert_eq!(ReservationStatus::from("ASISTIDA"), ReservationStatus::Attended);
/// assert_eq!(ReservationStatus::from("ATTENDED"), ReservationStatus::Attended);
/// assert_eq!(ReservationStatus::from("asistida").as_str(), "asistida");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReservationStatus {
    /// The member showed up.
    Attended,
    /// The reservation was cancelled.
    Cancelled,
    /// Not yet confirmed.
    Pending,
    /// Confirmed, not yet held.
    Confirmed,
    /// Any tag outside the known set, kept verbatim.
    Other(String),
}

impl ReservationStatus {
    /// The canonical tag for this status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Attended => "ASISTIDA",
            Self::Cancelled => "CANCELADA",
            Self::Pending => "PENDIENTE",
            Self::Confirmed => "CONFIRMADA",
            Self::Other(tag) => tag,
        }
    }

    /// Check if this is one of the known statuses.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for ReservationStatus {
    fn from(tag: &str) -> Self {
        match tag {
            "ASISTIDA" | "ATTENDED" => Self::Attended,
            "CANCELADA" | "CANCELLED" => Self::Cancelled,
            "PENDIENTE" | "PENDING" => Self::Pending,
            "CONFIRMADA" | "CONFIRMED" => Self::Confirmed,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ReservationStatus {
    fn from(tag: String) -> Self {
        match Self::from(tag.as_str()) {
            Self::Other(_) => Self::Other(tag),
            known => known,
        }
    }
}

impl From<ReservationStatus> for String {
    fn from(status: ReservationStatus) -> Self {
        match status {
            ReservationStatus::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
