//! Command-line front end for coworking analytics.
//!
//! - `cowork-report`: Run one report, or the whole catalogue, over a JSON
//!   snapshot and print the tables as text, CSV or JSON
//!
//! # Example Usage
//!
//! ```bash
//! cowork-report coworking.json
//! cowork-report coworking.json cheapest-rooms -f csv
//! cowork-report coworking.json 18 --year 2025 --month 2
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
pub mod render;
