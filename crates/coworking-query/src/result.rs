//! Tabular report output.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

/// A single cell of a report table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Text value.
    String(String),
    /// Decimal value (money, hours, percentages).
    Number(Decimal),
    /// Integer value (ids, counts).
    Integer(i64),
    /// Date value.
    Date(NaiveDate),
    /// Time-of-day value.
    Time(NaiveTime),
    /// Boolean value.
    Boolean(bool),
    /// Absent value.
    Null,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Decimal> for Value {
    fn from(n: Decimal) -> Self {
        Self::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Integer(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Self::Integer(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<NaiveTime> for Value {
    fn from(t: NaiveTime) -> Self {
        Self::Time(t)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// A row of report results.
pub type Row = Vec<Value>;

/// Report result containing column names and rows.
///
/// A scalar report with no answer yields a table with zero rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    /// Column names.
    pub columns: Vec<String>,
    /// Result rows.
    pub rows: Vec<Row>,
}

impl QueryResult {
    /// Create a new empty result.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// A one-column result with a single row.
    pub fn scalar(column: &str, value: impl Into<Value>) -> Self {
        let mut result = Self::new([column]);
        result.add_row(vec![value.into()]);
        result
    }

    /// A one-column result with one row if `value` is present, none otherwise.
    pub fn optional(column: &str, value: Option<impl Into<Value>>) -> Self {
        let mut result = Self::new([column]);
        if let Some(value) = value {
            result.add_row(vec![value.into()]);
        }
        result
    }

    /// Add a row to the result.
    pub fn add_row(&mut self, row: Row) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the result is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
