//! Group statistics and largest positions.

use super::group::{aggregate, GroupKey};
use super::weights::share;
use crate::error::PortfolioResult;
use crate::types::{Column, PositionRecord, PositionTable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Statistics of one group of positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupBreakdown {
    /// Group key.
    pub key: GroupKey,

    /// Number of distinct securities in the group.
    pub security_count: usize,

    /// Number of position records in the group.
    pub position_count: usize,

    /// Total market value.
    pub market_value: Decimal,

    /// Share of the table's total market value (`NaN` if that total is zero).
    pub share: f64,

    /// Lowest unit price.
    pub min_price: Decimal,

    /// Highest unit price.
    pub max_price: Decimal,

    /// Unweighted average unit price.
    pub avg_price: Decimal,
}

#[derive(Default)]
struct PriceStats<'a> {
    securities: HashSet<&'a str>,
    min: Option<Decimal>,
    max: Option<Decimal>,
    sum: Decimal,
}

/// Summarizes each `group_by` group: distinct securities, market value,
/// share of the grand total and price range.
///
/// Rows are sorted by market value descending, then by key.
///
/// # Errors
///
/// Returns a schema error under the same conditions as [`aggregate`].
pub fn group_breakdown(
    positions: &PositionTable,
    group_by: &[Column],
) -> PortfolioResult<Vec<GroupBreakdown>> {
    let totals = aggregate(positions, group_by)?;
    let grand_total = totals.total();

    let mut prices: HashMap<GroupKey, PriceStats<'_>> = HashMap::new();
    for record in positions {
        let stats = prices.entry(GroupKey::of(record, group_by)).or_default();
        stats.securities.insert(record.security_id.as_str());
        stats.min = Some(stats.min.map_or(record.price, |m| m.min(record.price)));
        stats.max = Some(stats.max.map_or(record.price, |m| m.max(record.price)));
        stats.sum += record.price;
    }

    let rows = totals
        .sorted_by_value()
        .into_iter()
        .map(|(key, total)| {
            let stats = prices.remove(key).unwrap_or_default();
            GroupBreakdown {
                key: key.clone(),
                security_count: stats.securities.len(),
                position_count: total.count,
                market_value: total.market_value,
                share: share(total.market_value, grand_total),
                min_price: stats.min.unwrap_or_default(),
                max_price: stats.max.unwrap_or_default(),
                avg_price: if total.count == 0 {
                    Decimal::ZERO
                } else {
                    stats.sum / Decimal::from(total.count)
                },
            }
        })
        .collect();

    Ok(rows)
}

/// A position ranked by market value across the whole table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPosition {
    /// 1-based rank.
    pub rank: usize,

    /// The position.
    pub position: PositionRecord,

    /// Share of the table's total market value (`NaN` if that total is zero).
    pub portfolio_weight: f64,
}

/// Returns the `limit` largest positions by market value.
///
/// Ties are broken by fund then security identifier so the ranking is
/// deterministic.
#[must_use]
pub fn top_positions(positions: &PositionTable, limit: usize) -> Vec<RankedPosition> {
    let total = positions.total_market_value();

    let mut ranked: Vec<&PositionRecord> = positions.iter().collect();
    ranked.sort_by(|a, b| {
        b.market_value
            .cmp(&a.market_value)
            .then_with(|| a.fund_id.cmp(&b.fund_id))
            .then_with(|| a.security_id.cmp(&b.security_id))
    });

    ranked
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, record)| RankedPosition {
            rank: i + 1,
            position: record.clone(),
            portfolio_weight: share(record.market_value, total),
        })
        .collect()
}
