//! Per-fund valuation and daily return series.

use crate::aggregation::{aggregate, GroupKey};
use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{Column, PositionTable};
use chrono::NaiveDate;
use fundscope_math::rolling::trailing_mean;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// One dated observation of a fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Observation date.
    pub date: NaiveDate,

    /// Total market value of the fund on that date.
    pub valuation: Decimal,

    /// Total dividends received on that date.
    pub dividends: Decimal,

    /// Number of distinct securities held.
    pub security_count: usize,

    /// Return since the previous observation.
    ///
    /// `None` at the first observation and when the previous valuation is zero.
    pub daily_return: Option<f64>,
}

/// Date-ordered valuation series of one fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    /// Fund identifier.
    pub fund_id: String,

    /// Points in strictly increasing date order.
    pub points: Vec<SeriesPoint>,
}

impl ReturnSeries {
    /// Builds a series from dated valuations.
    ///
    /// Observations are sorted by date; dividends and security counts are zero.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateObservation` if a date appears twice.
    pub fn from_valuations(
        fund_id: impl Into<String>,
        valuations: impl IntoIterator<Item = (NaiveDate, Decimal)>,
    ) -> PortfolioResult<Self> {
        let fund_id = fund_id.into();
        let mut observations = BTreeMap::new();
        for (date, valuation) in valuations {
            let point = Observation {
                valuation,
                ..Observation::default()
            };
            if observations.insert(date, point).is_some() {
                return Err(PortfolioError::duplicate(fund_id, date));
            }
        }
        Ok(Self::from_observations(fund_id, observations))
    }

    fn from_observations(fund_id: String, observations: BTreeMap<NaiveDate, Observation>) -> Self {
        let mut previous: Option<Decimal> = None;
        let points = observations
            .into_iter()
            .map(|(date, obs)| {
                let daily_return = previous.and_then(|prev| period_return(prev, obs.valuation));
                previous = Some(obs.valuation);
                SeriesPoint {
                    date,
                    valuation: obs.valuation,
                    dividends: obs.dividends,
                    security_count: obs.securities.len(),
                    daily_return,
                }
            })
            .collect();

        Self { fund_id, points }
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Observation dates in order.
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Valuations in date order.
    #[must_use]
    pub fn valuations(&self) -> Vec<Decimal> {
        self.points.iter().map(|p| p.valuation).collect()
    }

    /// Daily returns in date order, `None` where undefined.
    #[must_use]
    pub fn returns(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.daily_return).collect()
    }

    /// The defined daily returns only.
    #[must_use]
    pub fn defined_returns(&self) -> Vec<f64> {
        self.points.iter().filter_map(|p| p.daily_return).collect()
    }

    /// Trailing mean of daily returns over the last `window` observations,
    /// current one included.
    ///
    /// Undefined returns are skipped; a window holding none yields `None`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `window` is zero.
    pub fn rolling_mean(&self, window: usize) -> PortfolioResult<Vec<Option<f64>>> {
        Ok(trailing_mean(&self.returns(), window)?)
    }
}

#[derive(Debug, Default)]
struct Observation {
    valuation: Decimal,
    dividends: Decimal,
    securities: HashSet<String>,
}

fn period_return(previous: Decimal, current: Decimal) -> Option<f64> {
    if previous.is_zero() {
        return None;
    }
    current
        .checked_sub(previous)
        .and_then(|delta| delta.checked_div(previous))
        .and_then(|r| r.to_f64())
}

/// Builds the valuation and return series of every fund across snapshots.
///
/// Each snapshot is aggregated by `(fund_id, date)`. Snapshots may arrive in
/// any order; each fund's points are sorted by date and every return is taken
/// against the fund's previous observation.
///
/// # Errors
///
/// Returns `DuplicateObservation` if two snapshots both value the same fund on
/// the same date.
///
/// # Example
///
/// ```rust,ignore
/// let series = build_series(&[january, february, march])?;
/// let f1 = &series["F1"];
/// assert!(f1.points[0].daily_return.is_none());
/// ```
pub fn build_series(snapshots: &[PositionTable]) -> PortfolioResult<BTreeMap<String, ReturnSeries>> {
    let mut funds: BTreeMap<String, BTreeMap<NaiveDate, Observation>> = BTreeMap::new();

    for snapshot in snapshots {
        let totals = aggregate(snapshot, &[Column::FundId, Column::Date])?;

        let mut extras: HashMap<GroupKey, (Decimal, HashSet<String>)> = HashMap::new();
        for record in snapshot {
            let entry = extras
                .entry(GroupKey::of(record, &[Column::FundId, Column::Date]))
                .or_default();
            entry.0 += record.dividend;
            entry.1.insert(record.security_id.clone());
        }

        for (key, total) in totals.sorted_by_key() {
            let (Some(fund_id), Some(date)) = (
                key.parts().first().and_then(|p| p.as_text()),
                key.parts().get(1).and_then(|p| p.as_date()),
            ) else {
                continue;
            };

            let (dividends, securities) = extras.remove(key).unwrap_or_default();
            let observations = funds.entry(fund_id.to_string()).or_default();
            if observations.contains_key(&date) {
                return Err(PortfolioError::duplicate(fund_id, date));
            }
            observations.insert(
                date,
                Observation {
                    valuation: total.market_value,
                    dividends,
                    securities,
                },
            );
        }
    }

    let series: BTreeMap<String, ReturnSeries> = funds
        .into_iter()
        .map(|(fund_id, observations)| {
            let series = ReturnSeries::from_observations(fund_id.clone(), observations);
            (fund_id, series)
        })
        .collect();

    debug!(
        snapshots = snapshots.len(),
        funds = series.len(),
        "built return series"
    );

    Ok(series)
}
