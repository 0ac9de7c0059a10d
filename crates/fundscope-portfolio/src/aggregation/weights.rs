//! Position weights within their group.
//!
//! Weights are returned as a new list; the input table is never annotated
//! in place, so several weightings of the same table cannot interfere.

use super::group::{aggregate, GroupKey};
use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{Column, PositionRecord, PositionTable};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A position annotated with its share of its group's market value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedPosition {
    /// The underlying position.
    pub position: PositionRecord,

    /// The group the position belongs to.
    pub group: GroupKey,

    /// Market value of the whole group.
    pub group_total: Decimal,

    /// `market_value / group_total`, or `NaN` when the group total is zero.
    pub weight: f64,
}

impl WeightedPosition {
    /// Returns true if the weight is defined (the group total is non-zero).
    #[must_use]
    pub fn is_defined(&self) -> bool {
        !self.weight.is_nan()
    }
}

/// Computes every position's weight within its `group_by` group.
///
/// Weights of each group with a non-zero total sum to one. When a group's
/// total is exactly zero every member gets a `NaN` weight: the share is
/// undefined and is not coerced to zero or one.
///
/// Output order matches the input table.
///
/// # Errors
///
/// Returns a schema error under the same conditions as [`aggregate`].
///
/// # Example
///
/// ```rust,ignore
/// let weights = compute_weights(&table, &[Column::FundId])?;
/// for w in weights.iter().filter(|w| w.is_defined()) {
///     println!("{} {:.2}%", w.position.security_id, w.weight * 100.0);
/// }
/// ```
pub fn compute_weights(
    positions: &PositionTable,
    group_by: &[Column],
) -> PortfolioResult<Vec<WeightedPosition>> {
    let totals = aggregate(positions, group_by)?;

    let weighted: Vec<WeightedPosition> = positions
        .iter()
        .map(|record| {
            let group = GroupKey::of(record, group_by);
            let group_total = totals.market_value(&group).unwrap_or(Decimal::ZERO);
            WeightedPosition {
                weight: share(record.market_value, group_total),
                position: record.clone(),
                group,
                group_total,
            }
        })
        .collect();

    let undefined = weighted.iter().filter(|w| !w.is_defined()).count();
    if undefined > 0 {
        debug!(undefined, "positions in zero-total groups have undefined weights");
    }

    Ok(weighted)
}

/// Like [`compute_weights`], but fails instead of reporting `NaN` weights.
///
/// # Errors
///
/// Returns `UndefinedWeight` naming the first group whose total is zero, or
/// a schema error under the same conditions as [`aggregate`].
pub fn compute_weights_strict(
    positions: &PositionTable,
    group_by: &[Column],
) -> PortfolioResult<Vec<WeightedPosition>> {
    let weighted = compute_weights(positions, group_by)?;
    if let Some(w) = weighted.iter().find(|w| !w.is_defined()) {
        return Err(PortfolioError::UndefinedWeight {
            group: w.group.to_string(),
        });
    }
    Ok(weighted)
}

/// Weight of each position within its fund.
///
/// # Errors
///
/// Propagates [`compute_weights`] errors.
pub fn weights_by_fund(positions: &PositionTable) -> PortfolioResult<Vec<WeightedPosition>> {
    compute_weights(positions, &[Column::FundId])
}

/// Weight of each position within its (fund, asset type) group.
///
/// # Errors
///
/// Returns a schema error if the table has no asset type column.
pub fn weights_by_fund_and_asset_type(
    positions: &PositionTable,
) -> PortfolioResult<Vec<WeightedPosition>> {
    compute_weights(positions, &[Column::FundId, Column::AssetType])
}

/// Weight of each position within its (manager, asset type) group.
///
/// # Errors
///
/// Returns a schema error if the table lacks the manager or asset type column.
pub fn weights_by_manager_and_asset_type(
    positions: &PositionTable,
) -> PortfolioResult<Vec<WeightedPosition>> {
    compute_weights(positions, &[Column::ManagerId, Column::AssetType])
}

/// `part / whole` as `f64`, `NaN` when `whole` is zero.
#[must_use]
pub fn share(part: Decimal, whole: Decimal) -> f64 {
    if whole.is_zero() {
        return f64::NAN;
    }
    part.checked_div(whole)
        .and_then(|w| w.to_f64())
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()
    }

    #[test]
    fn test_weights_within_fund() {
        let table = PositionTable::from_records(vec![
            PositionRecord::new("F1", date(), "A", dec!(100)),
            PositionRecord::new("F1", date(), "B", dec!(300)),
            PositionRecord::new("F2", date(), "C", dec!(200)),
        ]);

        let weights = weights_by_fund(&table).unwrap();
        assert_eq!(weights.len(), 3);
        assert_relative_eq!(weights[0].weight, 0.25);
        assert_relative_eq!(weights[1].weight, 0.75);
        assert_relative_eq!(weights[2].weight, 1.0);
        assert_eq!(weights[0].group_total, dec!(400));
        assert_eq!(weights[2].group, GroupKey::new(["F2"]));
    }

    #[test]
    fn test_zero_total_group_is_undefined() {
        let table = PositionTable::from_records(vec![
            PositionRecord::new("F1", date(), "A", dec!(0)),
            PositionRecord::new("F1", date(), "B", dec!(0)),
            PositionRecord::new("F2", date(), "C", dec!(200)),
        ]);

        let weights = weights_by_fund(&table).unwrap();
        assert!(weights[0].weight.is_nan());
        assert!(weights[1].weight.is_nan());
        assert!(!weights[0].is_defined());
        assert_relative_eq!(weights[2].weight, 1.0);

        let err = compute_weights_strict(&table, &[Column::FundId]).unwrap_err();
        assert_eq!(
            err,
            PortfolioError::UndefinedWeight {
                group: "F1".to_string()
            }
        );
    }

    #[test]
    fn test_offsetting_positions_are_undefined() {
        // A long and a short that cancel out leave a zero total
        let table = PositionTable::from_records(vec![
            PositionRecord::new("F1", date(), "LONG", dec!(150)),
            PositionRecord::new("F1", date(), "SHORT", dec!(-150)),
        ]);
        let weights = weights_by_fund(&table).unwrap();
        assert!(weights.iter().all(|w| w.weight.is_nan()));
    }

    #[test]
    fn test_compound_groupings() {
        let table = PositionTable::from_records(vec![
            PositionRecord::new("F1", date(), "A", dec!(100))
                .with_asset_type("Equity")
                .with_manager("M1"),
            PositionRecord::new("F1", date(), "B", dec!(100))
                .with_asset_type("Bond")
                .with_manager("M1"),
            PositionRecord::new("F2", date(), "C", dec!(300))
                .with_asset_type("Equity")
                .with_manager("M1"),
        ]);

        let by_fund_type = weights_by_fund_and_asset_type(&table).unwrap();
        assert_relative_eq!(by_fund_type[0].weight, 1.0);
        assert_relative_eq!(by_fund_type[1].weight, 1.0);
        assert_relative_eq!(by_fund_type[2].weight, 1.0);

        let by_manager_type = weights_by_manager_and_asset_type(&table).unwrap();
        assert_relative_eq!(by_manager_type[0].weight, 0.25);
        assert_relative_eq!(by_manager_type[1].weight, 1.0);
        assert_relative_eq!(by_manager_type[2].weight, 0.75);
    }

    #[test]
    fn test_input_untouched_between_weightings() {
        let table = PositionTable::from_records(vec![
            PositionRecord::new("F1", date(), "A", dec!(100)).with_asset_type("Equity"),
            PositionRecord::new("F1", date(), "B", dec!(300)).with_asset_type("Bond"),
        ]);
        let before = table.clone();

        let first = weights_by_fund(&table).unwrap();
        let second = weights_by_fund_and_asset_type(&table).unwrap();

        assert_eq!(table, before);
        assert_relative_eq!(first[0].weight, 0.25);
        assert_relative_eq!(second[0].weight, 1.0);
    }

    #[test]
    fn test_missing_column() {
        let table =
            PositionTable::from_records(vec![PositionRecord::new("F1", date(), "A", dec!(1))]);
        assert!(matches!(
            weights_by_manager_and_asset_type(&table),
            Err(PortfolioError::Schema { .. })
        ));
    }

    #[test]
    fn test_share() {
        assert_relative_eq!(share(dec!(1), dec!(3)), 1.0 / 3.0, epsilon = 1e-15);
        assert!(share(dec!(1), Decimal::ZERO).is_nan());
    }
}
