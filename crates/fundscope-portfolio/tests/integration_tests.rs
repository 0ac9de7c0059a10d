//! Integration tests for fundscope-portfolio.
//!
//! These tests run the analytics end to end over small multi-fund snapshots.

use approx::assert_relative_eq;
use fundscope_portfolio::prelude::*;
use fundscope_portfolio::{aggregate_by_fund_country_asset_type, weights_by_fund_and_asset_type};
use rust_decimal_macros::dec;

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

fn holding(
    fund: &str,
    on: NaiveDate,
    security: &str,
    market_value: Decimal,
    country: &str,
    asset_type: &str,
) -> PositionRecord {
    PositionRecord::new(fund, on, security, market_value)
        .with_country(country)
        .with_asset_type(asset_type)
        .with_sector("Industrials")
        .with_manager("M1")
}

/// Two funds observed on three month-ends.
fn snapshots() -> Vec<PositionTable> {
    let jan = date(1, 31);
    let feb = date(2, 29);
    let mar = date(3, 31);
    vec![
        PositionTable::from_records(vec![
            holding("F1", jan, "AIR", dec!(100), "FR", "Equity"),
            holding("F1", jan, "OAT", dec!(300), "FR", "Bond"),
            holding("F2", jan, "AIR", dec!(200), "FR", "Equity"),
        ]),
        PositionTable::from_records(vec![
            holding("F1", feb, "AIR", dec!(120), "FR", "Equity"),
            holding("F1", feb, "OAT", dec!(360), "FR", "Bond"),
            holding("F2", feb, "AIR", dec!(240), "FR", "Equity"),
        ]),
        PositionTable::from_records(vec![
            holding("F1", mar, "AIR", dec!(90), "FR", "Equity"),
            holding("F1", mar, "OAT", dec!(270), "FR", "Bond"),
            holding("F2", mar, "AIR", dec!(200), "FR", "Equity"),
            holding("F2", mar, "UST", dec!(60), "US", "Bond"),
        ]),
    ]
}

// =============================================================================
// AGGREGATION
// =============================================================================

#[test]
fn test_aggregate_by_fund() {
    let table = &snapshots()[0];
    let by_fund = aggregate(table, &[Column::FundId]).unwrap();

    assert_eq!(by_fund.len(), 2);
    assert_eq!(by_fund.market_value(&GroupKey::new(["F1"])), Some(dec!(400)));
    assert_eq!(by_fund.market_value(&GroupKey::new(["F2"])), Some(dec!(200)));
    assert_eq!(by_fund.total(), table.total_market_value());
}

#[test]
fn test_weights_within_fund() {
    let table = &snapshots()[0];
    let weights = compute_weights(table, &[Column::FundId]).unwrap();

    assert_relative_eq!(weights[0].weight, 0.25);
    assert_relative_eq!(weights[1].weight, 0.75);
    assert_relative_eq!(weights[2].weight, 1.0);
}

#[test]
fn test_multi_dimension_helpers() {
    let table = &snapshots()[2];

    let rollup = aggregate_by_fund_country_asset_type(table).unwrap();
    assert_eq!(rollup.len(), 4);
    assert_eq!(
        rollup.market_value(&GroupKey::new(["F2", "US", "Bond"])),
        Some(dec!(60))
    );

    let weights = weights_by_fund_and_asset_type(table).unwrap();
    assert!(weights.iter().all(|w| w.is_defined()));
    let f2_bond = weights
        .iter()
        .find(|w| w.position.security_id == "UST")
        .unwrap();
    assert_relative_eq!(f2_bond.weight, 1.0);
}

#[test]
fn test_missing_dimension_is_schema_error() {
    let table = PositionTable::from_records(vec![PositionRecord::new(
        "F1",
        date(1, 31),
        "AIR",
        dec!(100),
    )]);
    assert!(matches!(
        aggregate(&table, &[Column::Country]),
        Err(PortfolioError::Schema { .. })
    ));
}

#[test]
fn test_breakdown_and_top_positions() {
    let table = &snapshots()[2];
    let rows = group_breakdown(table, &[Column::AssetType]).unwrap();
    assert_eq!(rows[0].key, GroupKey::new(["Bond"]));
    assert_eq!(rows[0].market_value, dec!(330));
    assert_eq!(rows[0].security_count, 2);

    let top = top_positions(table, 1);
    assert_eq!(top[0].position.security_id, "OAT");
    assert_relative_eq!(top[0].portfolio_weight, 270.0 / 620.0, epsilon = 1e-12);
}

// =============================================================================
// PERFORMANCE
// =============================================================================

#[test]
fn test_series_across_snapshots() {
    let series = build_series(&snapshots()).unwrap();
    let f1 = &series["F1"];

    assert_eq!(f1.valuations(), vec![dec!(400), dec!(480), dec!(360)]);
    assert_eq!(f1.points[0].daily_return, None);
    assert_relative_eq!(f1.points[1].daily_return.unwrap(), 0.2);
    assert_relative_eq!(f1.points[2].daily_return.unwrap(), -0.25);
    assert_eq!(series["F2"].points[2].security_count, 2);
}

#[test]
fn test_reversed_snapshots_give_same_series() {
    let forward = build_series(&snapshots()).unwrap();
    let mut reversed = snapshots();
    reversed.reverse();
    assert_eq!(build_series(&reversed).unwrap(), forward);
}

#[test]
fn test_risk_profiles() {
    let series = build_series(&snapshots()).unwrap();
    let profiles = compute_risk_profiles(&series, &AnalyticsConfig::default()).unwrap();

    let f1 = profiles["F1"].as_ref().unwrap();
    assert_eq!(f1.observations, 2);
    assert_relative_eq!(f1.max_drawdown, 0.25, epsilon = 1e-12);
    assert!(f1.annualized_volatility > 0.0);

    let f2 = profiles["F2"].as_ref().unwrap();
    // 200 -> 240 -> 260
    assert_relative_eq!(f2.max_drawdown, 0.0);
}

#[test]
fn test_drawdown_reference_series() {
    let series = ReturnSeries::from_valuations(
        "F1",
        [
            (date(1, 1), dec!(100)),
            (date(1, 2), dec!(120)),
            (date(1, 3), dec!(90)),
            (date(1, 4), dec!(130)),
        ],
    )
    .unwrap();
    let profile = compute_risk_profile(&series, 0.02, 252).unwrap();
    assert_relative_eq!(profile.max_drawdown, 0.25, epsilon = 1e-12);
}

#[test]
fn test_single_snapshot_is_insufficient() {
    let series = build_series(&snapshots()[..1]).unwrap();
    let err = compute_risk_profile(&series["F1"], 0.02, 252).unwrap_err();
    assert!(err.is_insufficient_data());
    assert!(variation_statistics(&series["F1"]).is_err());
}

#[test]
fn test_correlation_matrix() {
    let series = build_series(&snapshots()).unwrap();
    let matrix = compute_correlations(&series);

    assert_eq!(matrix.funds, vec!["F1", "F2"]);
    assert_eq!(matrix.get("F1", "F1"), Some(1.0));
    assert_eq!(
        matrix.get("F1", "F2").map(f64::to_bits),
        matrix.get("F2", "F1").map(f64::to_bits)
    );
    // F1: +20%, -25%; F2: +20%, +8.33%
    assert_relative_eq!(matrix.get("F1", "F2").unwrap(), 1.0, epsilon = 1e-9);
}

#[test]
fn test_price_changes_across_snapshots() {
    let snapshots: Vec<PositionTable> = snapshots()
        .into_iter()
        .map(|t| {
            PositionTable::from_records(
                t.records()
                    .iter()
                    .cloned()
                    .map(|r| {
                        let price = r.market_value / dec!(10);
                        r.with_holding(dec!(10), price)
                    })
                    .collect(),
            )
        })
        .collect();

    let changes = price_changes(&snapshots).unwrap();
    let air: Vec<_> = changes
        .iter()
        .filter(|c| c.fund_id == "F1" && c.security_id == "AIR")
        .collect();
    assert_eq!(air.len(), 3);
    assert_eq!(air[0].change, None);
    assert_relative_eq!(air[1].change.unwrap(), 0.2);
    assert_relative_eq!(air[2].change.unwrap(), -0.25);
}

#[test]
fn test_outputs_serialize_nan_as_null() {
    let table = PositionTable::from_records(vec![PositionRecord::new(
        "F1",
        date(1, 31),
        "AIR",
        Decimal::ZERO,
    )]);
    let weights = compute_weights(&table, &[Column::FundId]).unwrap();
    let json = serde_json::to_value(&weights[0]).unwrap();
    assert!(json["weight"].is_null());
    assert_eq!(json["position"]["fund_id"], "F1");
}
