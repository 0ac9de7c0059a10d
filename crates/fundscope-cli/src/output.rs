//! Output formatting utilities.

use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Formats and prints rows based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
    }
}

/// Prints flat rows as a table or CSV, and `structured` as JSON.
///
/// Used where the JSON form keeps nesting (group keys, optional values)
/// that a flat row cannot.
pub fn print_report<T, S>(rows: &[T], structured: &S, format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize + Tabled,
    S: Serialize + ?Sized,
{
    match format {
        OutputFormat::Json => print_json(structured),
        OutputFormat::Table | OutputFormat::Csv => print_output(rows, format),
    }
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
    Ok(())
}

/// Prints data as JSON. Undefined (`NaN`) numbers become `null`.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints a grid whose columns are only known at run time.
///
/// Table and CSV output only; JSON callers serialize their own structure.
pub fn print_grid(header: &[String], rows: &[Vec<String>], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(header)?;
            for row in rows {
                wtr.write_record(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Table | OutputFormat::Json => {
            if rows.is_empty() {
                println!("No results.");
                return Ok(());
            }
            let mut builder = Builder::default();
            builder.push_record(header.iter().cloned());
            for row in rows {
                builder.push_record(row.iter().cloned());
            }
            let table = builder
                .build()
                .with(Style::rounded())
                .with(Modify::new(Columns::first()).with(Alignment::left()))
                .to_string();
            println!("{table}");
        }
    }
    Ok(())
}

/// Formats a ratio as a percentage, `n/a` when undefined.
pub fn format_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{:.4}%", value * 100.0)
    } else {
        "n/a".to_string()
    }
}

/// Formats a ratio with fixed precision, `n/a` when undefined.
pub fn format_ratio(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.4}")
    } else {
        "n/a".to_string()
    }
}

/// A ratio shown as a percentage in tables and serialized as the raw number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Percent(pub f64);

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_percent(self.0))
    }
}

/// An optional ratio; `-` in tables, empty or `null` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MaybePercent(pub Option<f64>);

impl fmt::Display for MaybePercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => f.write_str(&format_percent(value)),
            None => f.write_str("-"),
        }
    }
}

/// A unitless ratio (Sharpe, Sortino, correlation) with four decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ratio(pub f64);

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_ratio(self.0))
    }
}

/// An optional decimal amount; `-` in tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MaybeDecimal(pub Option<Decimal>);

impl fmt::Display for MaybeDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value}"),
            None => f.write_str("-"),
        }
    }
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Setting")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl ToString) -> Self {
        Self {
            key: key.into(),
            value: value.to_string(),
        }
    }
}

/// Prints a header for a section, on table output only.
pub fn print_header(title: &str, format: OutputFormat) {
    if format == OutputFormat::Table {
        println!("\n{}", title.bold().underline());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_display() {
        assert_eq!(Percent(0.25).to_string(), "25.0000%");
        assert_eq!(Percent(f64::NAN).to_string(), "n/a");
        assert_eq!(MaybePercent(None).to_string(), "-");
        assert_eq!(MaybePercent(Some(-0.1)).to_string(), "-10.0000%");
    }

    #[test]
    fn test_ratio_display() {
        assert_eq!(Ratio(1.23456).to_string(), "1.2346");
        assert_eq!(Ratio(f64::INFINITY).to_string(), "n/a");
        assert_eq!(MaybeDecimal(None).to_string(), "-");
    }

    #[test]
    fn test_wrappers_serialize_transparently() {
        assert_eq!(serde_json::to_string(&Percent(0.5)).unwrap(), "0.5");
        assert_eq!(serde_json::to_string(&MaybePercent(None)).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Ratio(f64::NAN)).unwrap(), "null");
    }
}
