//! Snapshot loader for coworking analytics.
//!
//! Reads a JSON document holding the three entity collections and turns it
//! into a validated [`Dataset`]. Report parameters can be loaded the same
//! way from a partial JSON object.
//!
//! # Example
//!
//! ```
//! use coworking_loader::Loader;
//!
//! let json = r#"{
//!     "members": [{"id": 1, "name": "Ana Beltrán", "email": "ana@example.com",
//!                  "signup_date": "2024-03-01"}],
//!     "rooms": [{"id": 1, "name": "Sala Norte", "hourly_price": "30",
//!                "opening_time": "08:00:00", "closing_time": "20:00:00"}],
//!     "reservations": [{"id": 1, "member_id": 1, "room_id": 1, "date": "2025-01-10",
//!                       "start_time": "10:00:00", "end_time": "12:00:00",
//!                       "discount_pct": 10, "status": "ASISTIDA"}]
//! }"#;
//!
//! let dataset = Loader::new().load_str(json).unwrap();
//! assert_eq!(dataset.reservations().len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use coworking_core::{Dataset, InvalidDataError, Member, Reservation, ReservationId, Room};
use coworking_query::ReportParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// IO error reading a file.
    #[error("failed to read file {path}: {source}")]
    Io {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or does not have the expected shape.
    #[error("invalid JSON in {origin}: {source}")]
    Json {
        /// File path, or `<string>` for in-memory input.
        origin: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The collections parsed but do not form a consistent snapshot.
    #[error(transparent)]
    InvalidData(#[from] InvalidDataError),

    /// A reservation carries a status tag outside the known set.
    #[error("reservation {reservation} has unknown status {status:?}")]
    UnknownStatus {
        /// The offending reservation.
        reservation: ReservationId,
        /// The status as written in the file.
        status: String,
    },
}

/// The on-disk shape of a dataset snapshot.
///
/// Every collection may be omitted and defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// All members.
    pub members: Vec<Member>,
    /// All rooms.
    pub rooms: Vec<Room>,
    /// All reservations.
    pub reservations: Vec<Reservation>,
}

impl Snapshot {
    /// Validate the collections and build the dataset.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDataError`] if the snapshot is inconsistent.
    pub fn into_dataset(self) -> Result<Dataset, InvalidDataError> {
        Dataset::new(self.members, self.rooms, self.reservations)
    }
}

/// Snapshot loader.
#[derive(Debug, Default)]
pub struct Loader {
    /// Reject status tags outside the known set instead of keeping them.
    strict_status: bool,
}

impl Loader {
    /// Create a new loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject reservations whose status is not one of the known tags.
    ///
    /// By default unknown tags are kept verbatim and only logged.
    #[must_use]
    pub const fn with_strict_status(mut self, enabled: bool) -> Self {
        self.strict_status = enabled;
        self
    }

    /// Load a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] in the following cases:
    ///
    /// - [`LoadError::Io`] - Failed to read the file
    /// - [`LoadError::Json`] - The file is not a valid snapshot document
    /// - [`LoadError::InvalidData`] - The snapshot is inconsistent
    /// - [`LoadError::UnknownStatus`] - Strict status checking rejected a tag
    pub fn load(&self, path: &Path) -> Result<Dataset, LoadError> {
        let source = read(path)?;
        let snapshot = parse(&source, &path.display().to_string())?;
        tracing::debug!(path = %path.display(), "read snapshot file");
        self.build(snapshot)
    }

    /// Load a snapshot from an in-memory JSON document.
    ///
    /// # Errors
    ///
    /// Same as [`Loader::load`], minus [`LoadError::Io`].
    pub fn load_str(&self, json: &str) -> Result<Dataset, LoadError> {
        self.build(parse(json, "<string>")?)
    }

    fn build(&self, snapshot: Snapshot) -> Result<Dataset, LoadError> {
        for reservation in &snapshot.reservations {
            if reservation.status.is_known() {
                continue;
            }
            if self.strict_status {
                return Err(LoadError::UnknownStatus {
                    reservation: reservation.id,
                    status: reservation.status.to_string(),
                });
            }
            tracing::warn!(
                reservation = %reservation.id,
                "unknown reservation status {:?}",
                reservation.status.as_str()
            );
        }
        Ok(snapshot.into_dataset()?)
    }
}

/// Load a snapshot file with default settings.
///
/// # Errors
///
/// See [`Loader::load`].
pub fn load(path: &Path) -> Result<Dataset, LoadError> {
    Loader::new().load(path)
}

/// Load report parameters from a JSON file.
///
/// Missing fields keep their defaults, so `{}` is a valid file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] or [`LoadError::Json`].
pub fn load_params(path: &Path) -> Result<ReportParams, LoadError> {
    let source = read(path)?;
    parse(&source, &path.display().to_string())
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

fn parse<T: for<'de> Deserialize<'de>>(source: &str, origin: &str) -> Result<T, LoadError> {
    serde_json::from_str(source).map_err(|e| LoadError::Json {
        origin: origin.to_string(),
        source: e,
    })
}
