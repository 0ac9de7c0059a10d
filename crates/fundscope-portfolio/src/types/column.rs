//! Column names of a position table.

use crate::error::PortfolioError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A column of a position table.
///
/// Dimension columns can be grouped by; measure columns carry the numbers
/// being summed or inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    /// Fund identifier.
    FundId,
    /// Snapshot date.
    Date,
    /// Security identifier.
    SecurityId,
    /// Issuer sector.
    Sector,
    /// Country of risk.
    Country,
    /// Asset type (equity, bond, ...).
    AssetType,
    /// Portfolio manager.
    ManagerId,
    /// Units held.
    Quantity,
    /// Unit price.
    Price,
    /// Market value of the position.
    MarketValue,
    /// Dividend received.
    Dividend,
}

impl Column {
    /// Every column, in canonical order.
    pub const ALL: [Column; 11] = [
        Column::FundId,
        Column::Date,
        Column::SecurityId,
        Column::Sector,
        Column::Country,
        Column::AssetType,
        Column::ManagerId,
        Column::Quantity,
        Column::Price,
        Column::MarketValue,
        Column::Dividend,
    ];

    /// Columns every table carries.
    pub const REQUIRED: [Column; 7] = [
        Column::FundId,
        Column::Date,
        Column::SecurityId,
        Column::Quantity,
        Column::Price,
        Column::MarketValue,
        Column::Dividend,
    ];

    /// Returns the snake_case column name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::FundId => "fund_id",
            Self::Date => "date",
            Self::SecurityId => "security_id",
            Self::Sector => "sector",
            Self::Country => "country",
            Self::AssetType => "asset_type",
            Self::ManagerId => "manager_id",
            Self::Quantity => "quantity",
            Self::Price => "price",
            Self::MarketValue => "market_value",
            Self::Dividend => "dividend",
        }
    }

    /// Returns true if records can be grouped by this column.
    #[must_use]
    pub fn is_dimension(&self) -> bool {
        !matches!(
            self,
            Self::Quantity | Self::Price | Self::MarketValue | Self::Dividend
        )
    }

    /// Returns true if a table may omit this column.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        matches!(
            self,
            Self::Sector | Self::Country | Self::AssetType | Self::ManagerId
        )
    }

    /// Parses a comma-separated list of column names, e.g. `"fund_id,country"`.
    ///
    /// # Errors
    ///
    /// Returns a schema error for an unknown name.
    pub fn parse_list(s: &str) -> Result<Vec<Column>, PortfolioError> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Column {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Column::ALL
            .iter()
            .find(|c| c.name() == normalized)
            .copied()
            // "fund" and "manager" are the names used by the reporting layer
            .or(match normalized.as_str() {
                "fund" => Some(Column::FundId),
                "manager" => Some(Column::ManagerId),
                "security" => Some(Column::SecurityId),
                _ => None,
            })
            .ok_or_else(|| PortfolioError::schema(format!("unknown column '{}'", s.trim())))
    }
}
