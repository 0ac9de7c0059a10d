//! Market value roll-ups by one or more dimensions.
//!
//! Records are partitioned by the tuple of their `group_by` values in a hash
//! map, and each partition accumulates a running sum of market value.
//! `Decimal` addition is exact, so the group totals always add back up to the
//! table total.

use crate::error::PortfolioResult;
use crate::types::{Column, KeyPart, PositionRecord, PositionTable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Values of the `group_by` columns shared by all members of a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey(Vec<KeyPart>);

impl GroupKey {
    /// Creates a key from its parts.
    pub fn new<I, P>(parts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<KeyPart>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    /// Builds the key of a record. Columns without a value are skipped,
    /// which cannot happen once `group_by` has been validated against the
    /// record's table.
    #[must_use]
    pub fn of(record: &PositionRecord, group_by: &[Column]) -> Self {
        Self(group_by.iter().filter_map(|c| record.key_part(*c)).collect())
    }

    /// Returns the key parts in `group_by` order.
    #[must_use]
    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(" / "))
    }
}

/// Running totals of one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    /// Sum of member market values.
    pub market_value: Decimal,
    /// Number of member records.
    pub count: usize,
}

/// Market value per group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupAggregate {
    /// The columns the groups are keyed by.
    pub group_by: Vec<Column>,

    /// Totals by group key.
    pub groups: HashMap<GroupKey, GroupTotal>,
}

/// A flattened aggregate entry, suitable for tabular output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRow {
    /// Group key parts in `group_by` order.
    pub key: Vec<KeyPart>,
    /// Group market value.
    pub market_value: Decimal,
    /// Number of member records.
    pub count: usize,
}

impl GroupAggregate {
    /// Returns the market value of a group.
    #[must_use]
    pub fn market_value(&self, key: &GroupKey) -> Option<Decimal> {
        self.groups.get(key).map(|t| t.market_value)
    }

    /// Returns the totals of a group.
    #[must_use]
    pub fn get(&self, key: &GroupKey) -> Option<&GroupTotal> {
        self.groups.get(key)
    }

    /// Sum of all group values.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.groups.values().map(|t| t.market_value).sum()
    }

    /// Returns the number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns all groups sorted by key.
    #[must_use]
    pub fn sorted_by_key(&self) -> Vec<(&GroupKey, &GroupTotal)> {
        let mut result: Vec<_> = self.groups.iter().collect();
        result.sort_by(|a, b| a.0.cmp(b.0));
        result
    }

    /// Returns all groups sorted by market value descending, then by key.
    #[must_use]
    pub fn sorted_by_value(&self) -> Vec<(&GroupKey, &GroupTotal)> {
        let mut result: Vec<_> = self.groups.iter().collect();
        result.sort_by(|a, b| {
            b.1.market_value
                .cmp(&a.1.market_value)
                .then_with(|| a.0.cmp(b.0))
        });
        result
    }

    /// Flattens the aggregate into rows sorted by key.
    #[must_use]
    pub fn rows(&self) -> Vec<GroupRow> {
        to_rows(self.sorted_by_key())
    }

    /// Flattens the aggregate into rows sorted by market value descending.
    #[must_use]
    pub fn rows_by_value(&self) -> Vec<GroupRow> {
        to_rows(self.sorted_by_value())
    }
}

fn to_rows(sorted: Vec<(&GroupKey, &GroupTotal)>) -> Vec<GroupRow> {
    sorted
        .into_iter()
        .map(|(key, total)| GroupRow {
            key: key.parts().to_vec(),
            market_value: total.market_value,
            count: total.count,
        })
        .collect()
}

/// Sums market value per distinct combination of `group_by` values.
///
/// # Arguments
///
/// * `positions` - Table to aggregate
/// * `group_by` - Non-empty list of dimension columns present in the table
///
/// # Errors
///
/// Returns a schema error if `group_by` is empty, names a measure column or
/// names a column the table does not carry.
///
/// # Example
///
/// ```rust,ignore
/// use fundscope_portfolio::prelude::*;
///
/// let by_fund = aggregate(&table, &[Column::FundId])?;
/// assert_eq!(by_fund.total(), table.total_market_value());
/// ```
pub fn aggregate(positions: &PositionTable, group_by: &[Column]) -> PortfolioResult<GroupAggregate> {
    positions.validate_group_by(group_by)?;

    let mut groups: HashMap<GroupKey, GroupTotal> = HashMap::new();
    for record in positions {
        let entry = groups.entry(GroupKey::of(record, group_by)).or_default();
        entry.market_value += record.market_value;
        entry.count += 1;
    }

    debug!(
        records = positions.len(),
        groups = groups.len(),
        group_by = ?group_by,
        "aggregated market value"
    );

    Ok(GroupAggregate {
        group_by: group_by.to_vec(),
        groups,
    })
}

/// Total market value per asset type.
///
/// # Errors
///
/// Returns a schema error if the table has no asset type column.
pub fn aggregate_by_asset_type(positions: &PositionTable) -> PortfolioResult<GroupAggregate> {
    aggregate(positions, &[Column::AssetType])
}

/// Total market value per (fund, country, asset type).
///
/// # Errors
///
/// Returns a schema error if the table lacks the country or asset type column.
pub fn aggregate_by_fund_country_asset_type(
    positions: &PositionTable,
) -> PortfolioResult<GroupAggregate> {
    aggregate(
        positions,
        &[Column::FundId, Column::Country, Column::AssetType],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PortfolioError;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }

    fn table() -> PositionTable {
        PositionTable::from_records(vec![
            PositionRecord::new("F1", date(), "A", dec!(100))
                .with_country("FR")
                .with_asset_type("Equity"),
            PositionRecord::new("F1", date(), "B", dec!(300))
                .with_country("US")
                .with_asset_type("Equity"),
            PositionRecord::new("F2", date(), "C", dec!(200))
                .with_country("US")
                .with_asset_type("Bond"),
            PositionRecord::new("F2", date(), "D", dec!(50.25))
                .with_country("US")
                .with_asset_type("Bond"),
        ])
    }

    #[test]
    fn test_aggregate_by_fund() {
        let agg = aggregate(&table(), &[Column::FundId]).unwrap();
        assert_eq!(agg.len(), 2);
        assert_eq!(agg.market_value(&GroupKey::new(["F1"])), Some(dec!(400)));
        assert_eq!(agg.market_value(&GroupKey::new(["F2"])), Some(dec!(250.25)));
        assert_eq!(agg.get(&GroupKey::new(["F2"])).unwrap().count, 2);
    }

    #[test]
    fn test_conservation() {
        let table = table();
        for group_by in [
            vec![Column::FundId],
            vec![Column::Country],
            vec![Column::FundId, Column::Country, Column::AssetType],
            vec![Column::SecurityId],
            vec![Column::Date],
        ] {
            let agg = aggregate(&table, &group_by).unwrap();
            assert_eq!(agg.total(), table.total_market_value());
        }
    }

    #[test]
    fn test_compound_key() {
        let agg = aggregate_by_fund_country_asset_type(&table()).unwrap();
        assert_eq!(agg.len(), 3);
        assert_eq!(
            agg.market_value(&GroupKey::new(["F2", "US", "Bond"])),
            Some(dec!(250.25))
        );
        assert_eq!(agg.market_value(&GroupKey::new(["F1", "FR", "Equity"])), Some(dec!(100)));
    }

    #[test]
    fn test_by_asset_type() {
        let agg = aggregate_by_asset_type(&table()).unwrap();
        assert_eq!(agg.market_value(&GroupKey::new(["Equity"])), Some(dec!(400)));
        assert_eq!(agg.market_value(&GroupKey::new(["Bond"])), Some(dec!(250.25)));
    }

    #[test]
    fn test_missing_column() {
        let err = aggregate(&table(), &[Column::ManagerId]).unwrap_err();
        assert!(matches!(err, PortfolioError::Schema { .. }));

        let err = aggregate(&table(), &[]).unwrap_err();
        assert!(matches!(err, PortfolioError::Schema { .. }));
    }

    #[test]
    fn test_sorted_views() {
        let agg = aggregate(&table(), &[Column::SecurityId]).unwrap();

        let by_value: Vec<String> = agg
            .sorted_by_value()
            .iter()
            .map(|(k, _)| k.to_string())
            .collect();
        assert_eq!(by_value, vec!["B", "C", "A", "D"]);

        let by_key: Vec<String> = agg
            .sorted_by_key()
            .iter()
            .map(|(k, _)| k.to_string())
            .collect();
        assert_eq!(by_key, vec!["A", "B", "C", "D"]);

        let rows = agg.rows();
        assert_eq!(rows[0].key, vec![KeyPart::from("A")]);
        assert_eq!(rows[0].market_value, dec!(100));

        let by_value_rows = agg.rows_by_value();
        let row_keys: Vec<KeyPart> = by_value_rows.iter().map(|r| r.key[0].clone()).collect();
        assert_eq!(
            row_keys,
            ["B", "C", "A", "D"].map(KeyPart::from).to_vec()
        );
        assert_eq!(by_value_rows[0].market_value, agg.sorted_by_value()[0].1.market_value);
        assert_eq!(by_value_rows[0].count, agg.sorted_by_value()[0].1.count);
    }

    #[test]
    fn test_date_keys() {
        let agg = aggregate(&table(), &[Column::FundId, Column::Date]).unwrap();
        let key = GroupKey::new([KeyPart::from("F1"), KeyPart::Date(date())]);
        assert_eq!(agg.market_value(&key), Some(dec!(400)));
        assert_eq!(key.to_string(), "F1 / 2024-02-29");
    }

    #[test]
    fn test_empty_table() {
        let agg = aggregate(&PositionTable::default(), &[Column::FundId]).unwrap();
        assert!(agg.is_empty());
        assert_eq!(agg.total(), Decimal::ZERO);
    }
}
