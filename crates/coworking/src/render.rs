//! Report table rendering.
//!
//! Turns a [`QueryResult`] into aligned text, CSV or JSON. Nothing here
//! knows which report produced the table.

use anyhow::Result;
use coworking_query::{QueryResult, Value};
use std::io::Write;

/// Output format for report tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Column-aligned text (default)
    #[default]
    Text,
    /// Comma-separated values with a header row
    Csv,
    /// JSON object with columns and rows
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Write a table in the given format.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_result<W: Write>(result: &QueryResult, format: OutputFormat, writer: &mut W) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(result, writer),
        OutputFormat::Csv => write_csv(result, writer),
        OutputFormat::Json => {
            writeln!(writer, "{}", serde_json::to_string_pretty(&result_to_json(result))?)?;
            Ok(())
        }
    }
}

/// Write a table with aligned columns, followed by its row count.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_text<W: Write>(result: &QueryResult, writer: &mut W) -> Result<()> {
    if result.columns.is_empty() {
        return Ok(());
    }

    let cells: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| row.iter().map(format_value).collect())
        .collect();

    // Widths in characters, not bytes, so accented names line up
    let mut widths: Vec<usize> = result.columns.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_line(writer, &result.columns, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_line(writer, &rule, &widths)?;
    for row in &cells {
        write_line(writer, row, &widths)?;
    }

    writeln!(writer)?;
    writeln!(writer, "{} row(s)", result.rows.len())?;
    Ok(())
}

fn write_line<W: Write>(writer: &mut W, cells: &[String], widths: &[usize]) -> Result<()> {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:width$}"))
        .collect();
    writeln!(writer, "{}", line.join("  ").trim_end())?;
    Ok(())
}

/// Write a table as CSV with a header row.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv<W: Write>(result: &QueryResult, writer: &mut W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(&result.columns)?;
    for row in &result.rows {
        csv.write_record(row.iter().map(format_value))?;
    }
    csv.flush()?;
    Ok(())
}

/// The JSON form of a table: columns, one object per row, and the row count.
#[must_use]
pub fn result_to_json(result: &QueryResult) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = result
        .rows
        .iter()
        .map(|row| {
            let obj: serde_json::Map<String, serde_json::Value> = result
                .columns
                .iter()
                .zip(row.iter())
                .map(|(col, val)| (col.clone(), value_to_json(val)))
                .collect();
            serde_json::Value::Object(obj)
        })
        .collect();

    serde_json::json!({
        "columns": result.columns,
        "rows": rows,
        "row_count": result.rows.len(),
    })
}

/// Display form of a cell. Absent values render as an empty string.
#[must_use]
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Date(d) => d.to_string(),
        Value::Time(t) => t.format("%H:%M").to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Null => String::new(),
    }
}

/// JSON form of a cell. Decimals stay strings so no precision is lost.
#[must_use]
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Number(n) => serde_json::Value::String(n.to_string()),
        Value::Integer(i) => serde_json::json!(i),
        Value::Date(d) => serde_json::Value::String(d.to_string()),
        Value::Time(t) => serde_json::Value::String(t.format("%H:%M:%S").to_string()),
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Null => serde_json::Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use rust_decimal_macros::dec;

    fn sample() -> QueryResult {
        let mut result = QueryResult::new(["id", "name", "hourly_price", "capacity"]);
        result.add_row(vec![
            Value::Integer(1),
            Value::String("Sala Cubo".to_string()),
            Value::Number(dec!(30.00)),
            Value::Integer(10),
        ]);
        result.add_row(vec![
            Value::Integer(5),
            Value::String("Lab Fénix, planta 2".to_string()),
            Value::Number(dec!(15)),
            Value::Null,
        ]);
        result
    }

    fn render(result: &QueryResult, format: OutputFormat) -> String {
        let mut out = Vec::new();
        write_result(result, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_alignment() {
        let text = render(&sample(), OutputFormat::Text);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id  name                 hourly_price  capacity");
        assert_eq!(lines[1], "--  -------------------  ------------  --------");
        assert_eq!(lines[2], "1   Sala Cubo            30.00         10");
        assert_eq!(lines[3], "5   Lab Fénix, planta 2  15");
        assert_eq!(lines.last(), Some(&"2 row(s)"));
    }

    #[test]
    fn test_csv_quotes_commas() {
        let csv = render(&sample(), OutputFormat::Csv);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "id,name,hourly_price,capacity");
        assert_eq!(lines[1], "1,Sala Cubo,30.00,10");
        assert_eq!(lines[2], "5,\"Lab Fénix, planta 2\",15,");
    }

    #[test]
    fn test_json_keeps_decimal_precision() {
        let json: serde_json::Value =
            serde_json::from_str(&render(&sample(), OutputFormat::Json)).unwrap();
        assert_eq!(json["row_count"], 2);
        assert_eq!(json["rows"][0]["hourly_price"], "30.00");
        assert_eq!(json["rows"][1]["capacity"], serde_json::Value::Null);
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let result = QueryResult::new(["min_hours"]);
        assert_eq!(render(&result, OutputFormat::Csv), "min_hours\n");
        assert!(render(&result, OutputFormat::Text).ends_with("0 row(s)\n"));
    }

    #[test]
    fn test_time_formatting() {
        let t = NaiveTime::from_hms_opt(8, 30, 0).unwrap();
        assert_eq!(format_value(&Value::Time(t)), "08:30");
        assert_eq!(value_to_json(&Value::Time(t)), "08:30:00");
    }
}
