//! Report parameters.
//!
//! Each parameterised report reads its inputs from [`ReportParams`]. The
//! defaults reproduce the questions asked of the reference dataset, so
//! `ReportParams::default()` is a complete configuration.

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::QueryError;

/// Inputs for the parameterised reports.
///
/// Deserializes from a partial JSON object: any missing field keeps its
/// default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportParams {
    /// Year of reservations to list (report 1).
    pub year: i32,
    /// Rooms must cost strictly more than this per hour (report 1).
    pub price_threshold: Decimal,
    /// Email suffix to match, including the `@` (report 4).
    pub email_domain: String,
    /// Signup year to match (report 4).
    pub signup_year: i32,
    /// Surname to match as a whole word after the given name (report 5).
    pub surname: String,
    /// Member to analyse; every word must appear in the name (reports 6, 17).
    pub member_name: String,
    /// How many of the cheapest rooms to list (report 7).
    pub top_rooms: usize,
    /// Exact attendee count of an attended reservation (report 9).
    pub attendees: u32,
    /// Regular expression on room names (report 11).
    pub room_name_pattern: String,
    /// Discount percentage rooms must exceed in some reservation (report 15).
    pub discount_threshold: Decimal,
    /// Year of the revenue period (report 18).
    pub revenue_year: i32,
    /// Month of the revenue period, `1..=12` (report 18).
    pub revenue_month: u32,
    /// Text an observation must contain (report 19).
    pub note: String,
    /// Room to price for a full day (report 20).
    pub room_name: String,
}

impl Default for ReportParams {
    fn default() -> Self {
        Self {
            year: 2025,
            price_threshold: Decimal::from(25),
            email_domain: "@yahoo.es".to_string(),
            signup_year: 2024,
            surname: "Martín".to_string(),
            member_name: "Ana Beltrán".to_string(),
            top_rooms: 3,
            attendees: 10,
            room_name_pattern: "^Sala.*o$|x$".to_string(),
            discount_threshold: Decimal::from(10),
            revenue_year: 2025,
            revenue_month: 1,
            note: "Requiere equipamiento especial".to_string(),
            room_name: "Auditorio Sol".to_string(),
        }
    }
}

impl ReportParams {
    /// Check the parameters that have a restricted range.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidParameter`] for a month outside
    /// `1..=12`, an empty member name, or a room name pattern that is not a
    /// valid regular expression.
    pub fn validate(&self) -> Result<(), QueryError> {
        if !(1..=12).contains(&self.revenue_month) {
            return Err(QueryError::InvalidParameter(format!(
                "revenue_month must be between 1 and 12, got {}",
                self.revenue_month
            )));
        }
        if self.member_name.split_whitespace().next().is_none() {
            return Err(QueryError::InvalidParameter(
                "member_name must not be empty".to_string(),
            ));
        }
        compile_pattern(&self.room_name_pattern)?;
        Ok(())
    }
}

pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex, QueryError> {
    Regex::new(pattern).map_err(|e| {
        QueryError::InvalidParameter(format!(
            "room name pattern {pattern:?} is not a valid regular expression: {e}"
        ))
    })
}
