//! The position table: validated input of every analytics stage.

use super::{Column, PositionRecord};
use crate::error::{PortfolioError, PortfolioResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;

/// An immutable collection of position records with a known set of columns.
///
/// The required columns (fund, date, security and all measures) are always
/// present. An optional dimension column is present only if every record
/// carries a value for it, so grouping by a present column never has to
/// drop rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionTable {
    columns: BTreeSet<Column>,
    records: Vec<PositionRecord>,
}

impl PositionTable {
    /// Creates a table declaring which optional columns it carries.
    ///
    /// Required columns are implied and may be listed or omitted.
    ///
    /// # Errors
    ///
    /// Returns a schema error if any record has no value for a declared
    /// optional column.
    pub fn new(
        columns: impl IntoIterator<Item = Column>,
        records: Vec<PositionRecord>,
    ) -> PortfolioResult<Self> {
        let mut declared: BTreeSet<Column> = Column::REQUIRED.into_iter().collect();
        declared.extend(columns);

        for column in declared.iter().filter(|c| c.is_optional()) {
            if let Some((i, record)) = records
                .iter()
                .enumerate()
                .find(|(_, r)| !r.has_value(*column))
            {
                return Err(PortfolioError::schema(format!(
                    "record {} ({}/{}) has no value for column '{}'",
                    i, record.fund_id, record.security_id, column
                )));
            }
        }

        Ok(Self {
            columns: declared,
            records,
        })
    }

    /// Creates a table whose optional columns are those populated on every
    /// record.
    ///
    /// An empty table carries only the required columns.
    #[must_use]
    pub fn from_records(records: Vec<PositionRecord>) -> Self {
        let mut columns: BTreeSet<Column> = Column::REQUIRED.into_iter().collect();
        if !records.is_empty() {
            columns.extend(
                Column::ALL
                    .into_iter()
                    .filter(|c| c.is_optional())
                    .filter(|c| records.iter().all(|r| r.has_value(*c))),
            );
        }
        Self { columns, records }
    }

    /// Returns the records in input order.
    #[must_use]
    pub fn records(&self) -> &[PositionRecord] {
        &self.records
    }

    /// Iterates over the records.
    pub fn iter(&self) -> impl Iterator<Item = &PositionRecord> {
        self.records.iter()
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the table has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the columns the table carries.
    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.columns.iter().copied()
    }

    /// Returns true if the table carries the column.
    #[must_use]
    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Sum of market value over all records.
    #[must_use]
    pub fn total_market_value(&self) -> Decimal {
        self.records.iter().map(|r| r.market_value).sum()
    }

    /// Distinct dates, ascending.
    #[must_use]
    pub fn dates(&self) -> BTreeSet<NaiveDate> {
        self.records.iter().map(|r| r.date).collect()
    }

    /// Distinct fund identifiers, sorted.
    #[must_use]
    pub fn fund_ids(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.fund_id.as_str()).collect()
    }

    /// Checks that `group_by` is a non-empty list of dimension columns the
    /// table carries.
    ///
    /// # Errors
    ///
    /// Returns a schema error naming the first offending column.
    pub fn validate_group_by(&self, group_by: &[Column]) -> PortfolioResult<()> {
        if group_by.is_empty() {
            return Err(PortfolioError::schema("group_by must name at least one column"));
        }
        for column in group_by {
            if !column.is_dimension() {
                return Err(PortfolioError::schema(format!(
                    "column '{column}' is a measure and cannot be grouped by"
                )));
            }
            if !self.has_column(*column) {
                return Err(PortfolioError::schema(format!(
                    "column '{column}' is not present in the table"
                )));
            }
        }
        Ok(())
    }
}

impl Default for PositionTable {
    fn default() -> Self {
        Self::from_records(Vec::new())
    }
}

impl<'a> IntoIterator for &'a PositionTable {
    type Item = &'a PositionRecord;
    type IntoIter = std::slice::Iter<'a, PositionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
