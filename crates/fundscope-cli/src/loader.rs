//! Reading position snapshots from CSV files.
//!
//! Each file is one snapshot. Headers are column names (`fund_id`, `date`,
//! `security_id`, `market_value`, ...); optional dimension columns are
//! carried by the table exactly when their header is present. Unknown
//! headers are ignored.

use chrono::NaiveDate;
use fundscope_portfolio::{Column, PositionRecord, PositionTable};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::{CliError, CliResult};

const REQUIRED_HEADERS: [Column; 4] = [
    Column::FundId,
    Column::Date,
    Column::SecurityId,
    Column::MarketValue,
];

/// Loads one snapshot per path.
pub fn load_snapshots(paths: &[PathBuf]) -> CliResult<Vec<PositionTable>> {
    paths.iter().map(|p| load_positions(p)).collect()
}

/// Loads all paths into a single table.
pub fn load_combined(paths: &[PathBuf]) -> CliResult<PositionTable> {
    let snapshots = load_snapshots(paths)?;
    let columns: Vec<Column> = Column::ALL
        .into_iter()
        .filter(|c| c.is_optional())
        .filter(|c| snapshots.iter().all(|s| s.has_column(*c)))
        .collect();
    let records = snapshots
        .into_iter()
        .flat_map(|s| s.records().to_vec())
        .collect();
    PositionTable::new(columns, records).map_err(|e| CliError::InvalidArgument(e.to_string()))
}

/// Reads a positions CSV file.
pub fn load_positions(path: &Path) -> CliResult<PositionTable> {
    let file = std::fs::File::open(path).map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {e}", path.display()),
        ))
    })?;
    read_positions(file, path)
}

/// Reads positions CSV from any reader; `path` is used in messages only.
pub fn read_positions<R: std::io::Read>(reader: R, path: &Path) -> CliResult<PositionTable> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut index: HashMap<Column, usize> = HashMap::new();
    for (i, header) in rdr.headers()?.iter().enumerate() {
        match Column::from_str(header) {
            Ok(column) => {
                index.insert(column, i);
            }
            Err(_) => warn!(path = %path.display(), header, "ignoring unknown column"),
        }
    }

    for column in REQUIRED_HEADERS {
        if !index.contains_key(&column) {
            return Err(CliError::MissingColumn {
                path: path.to_path_buf(),
                column: column.name().to_string(),
            });
        }
    }

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let line = row.position().map_or(0, csv::Position::line);
        let field = |column: Column| {
            index
                .get(&column)
                .and_then(|&i| row.get(i))
                .filter(|v| !v.is_empty())
        };
        let invalid = |reason: String| CliError::InvalidRow {
            path: path.to_path_buf(),
            line,
            reason,
        };

        let text = |column: Column| -> CliResult<String> {
            field(column)
                .map(str::to_string)
                .ok_or_else(|| invalid(format!("empty '{column}'")))
        };
        let number = |column: Column| -> CliResult<Decimal> {
            field(column).map_or(Ok(Decimal::ZERO), |v| {
                parse_decimal(v).map_err(|e| invalid(format!("'{column}': {e}")))
            })
        };

        let date = parse_date(&text(Column::Date)?).map_err(|e| invalid(e.to_string()))?;
        let market_value = field(Column::MarketValue)
            .ok_or_else(|| invalid("empty 'market_value'".to_string()))
            .and_then(|v| parse_decimal(v).map_err(|e| invalid(e.to_string())))?;

        let mut record = PositionRecord::new(
            text(Column::FundId)?,
            date,
            text(Column::SecurityId)?,
            market_value,
        )
        .with_holding(number(Column::Quantity)?, number(Column::Price)?)
        .with_dividend(number(Column::Dividend)?);

        record.sector = field(Column::Sector).map(str::to_string);
        record.country = field(Column::Country).map(str::to_string);
        record.asset_type = field(Column::AssetType).map(str::to_string);
        record.manager_id = field(Column::ManagerId).map(str::to_string);

        records.push(record);
    }

    let declared: Vec<Column> = index.keys().copied().filter(|c| c.is_optional()).collect();
    let table = PositionTable::new(declared, records).map_err(|e| CliError::InvalidRow {
        path: path.to_path_buf(),
        line: 0,
        reason: e.to_string(),
    })?;

    debug!(path = %path.display(), records = table.len(), "loaded positions");
    Ok(table)
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses a decimal, accepting scientific notation.
pub fn parse_decimal(s: &str) -> CliResult<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| CliError::InvalidNumber(s.to_string()))
}
