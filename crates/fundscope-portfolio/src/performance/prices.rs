//! Security price changes between observations.

use crate::error::{PortfolioError, PortfolioResult};
use crate::types::PositionTable;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Price of one security held by one fund on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    /// Fund identifier.
    pub fund_id: String,
    /// Security identifier.
    pub security_id: String,
    /// Observation date.
    pub date: NaiveDate,
    /// Unit price on `date`.
    pub price: Decimal,
    /// Unit price at the previous observation of the same holding.
    pub previous_price: Option<Decimal>,
    /// `(price - previous_price) / previous_price`; `None` at the first
    /// observation or when the previous price is zero.
    pub change: Option<f64>,
}

/// Tracks the price of every (fund, security) holding across snapshots.
///
/// Output is ordered by fund, security then date.
///
/// # Errors
///
/// Returns `DuplicateObservation` if a holding is priced twice on one date.
pub fn price_changes(snapshots: &[PositionTable]) -> PortfolioResult<Vec<PriceChange>> {
    let mut holdings: BTreeMap<(&str, &str), BTreeMap<NaiveDate, Decimal>> = BTreeMap::new();

    for record in snapshots.iter().flat_map(PositionTable::iter) {
        let prices = holdings
            .entry((record.fund_id.as_str(), record.security_id.as_str()))
            .or_default();
        if prices.insert(record.date, record.price).is_some() {
            return Err(PortfolioError::duplicate(
                format!("{}/{}", record.fund_id, record.security_id),
                record.date,
            ));
        }
    }

    let mut changes = Vec::new();
    for ((fund_id, security_id), prices) in &holdings {
        let mut previous: Option<Decimal> = None;
        for (&date, &price) in prices {
            let change = previous
                .filter(|p| !p.is_zero())
                .and_then(|p| price.checked_sub(p).and_then(|d| d.checked_div(p)))
                .and_then(|r| r.to_f64());
            changes.push(PriceChange {
                fund_id: (*fund_id).to_string(),
                security_id: (*security_id).to_string(),
                date,
                price,
                previous_price: previous,
                change,
            });
            previous = Some(price);
        }
    }

    debug!(
        holdings = holdings.len(),
        observations = changes.len(),
        "computed price changes"
    );

    Ok(changes)
}
