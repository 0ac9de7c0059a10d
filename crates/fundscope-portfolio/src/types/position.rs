//! Position records and the values they expose per column.

use super::Column;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One security held by one fund on one date.
///
/// `market_value` is taken as given and never recomputed from
/// `quantity * price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    /// Fund identifier.
    pub fund_id: String,
    /// Snapshot date.
    pub date: NaiveDate,
    /// Security identifier.
    pub security_id: String,
    /// Issuer sector.
    #[serde(default)]
    pub sector: Option<String>,
    /// Country of risk.
    #[serde(default)]
    pub country: Option<String>,
    /// Asset type.
    #[serde(default)]
    pub asset_type: Option<String>,
    /// Portfolio manager.
    #[serde(default)]
    pub manager_id: Option<String>,
    /// Units held.
    #[serde(default)]
    pub quantity: Decimal,
    /// Unit price.
    #[serde(default)]
    pub price: Decimal,
    /// Market value in fund currency.
    pub market_value: Decimal,
    /// Dividend received on the date.
    #[serde(default)]
    pub dividend: Decimal,
}

impl PositionRecord {
    /// Creates a record with no optional dimensions and zero quantity, price
    /// and dividend.
    #[must_use]
    pub fn new(
        fund_id: impl Into<String>,
        date: NaiveDate,
        security_id: impl Into<String>,
        market_value: Decimal,
    ) -> Self {
        Self {
            fund_id: fund_id.into(),
            date,
            security_id: security_id.into(),
            sector: None,
            country: None,
            asset_type: None,
            manager_id: None,
            quantity: Decimal::ZERO,
            price: Decimal::ZERO,
            market_value,
            dividend: Decimal::ZERO,
        }
    }

    /// Sets the sector.
    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Sets the country.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Sets the asset type.
    #[must_use]
    pub fn with_asset_type(mut self, asset_type: impl Into<String>) -> Self {
        self.asset_type = Some(asset_type.into());
        self
    }

    /// Sets the manager.
    #[must_use]
    pub fn with_manager(mut self, manager_id: impl Into<String>) -> Self {
        self.manager_id = Some(manager_id.into());
        self
    }

    /// Sets quantity and price.
    #[must_use]
    pub fn with_holding(mut self, quantity: Decimal, price: Decimal) -> Self {
        self.quantity = quantity;
        self.price = price;
        self
    }

    /// Sets the dividend.
    #[must_use]
    pub fn with_dividend(mut self, dividend: Decimal) -> Self {
        self.dividend = dividend;
        self
    }

    /// Returns the value of a dimension column, or `None` for measure
    /// columns and absent optional dimensions.
    #[must_use]
    pub fn key_part(&self, column: Column) -> Option<KeyPart> {
        match column {
            Column::FundId => Some(KeyPart::Text(self.fund_id.clone())),
            Column::Date => Some(KeyPart::Date(self.date)),
            Column::SecurityId => Some(KeyPart::Text(self.security_id.clone())),
            Column::Sector => self.sector.clone().map(KeyPart::Text),
            Column::Country => self.country.clone().map(KeyPart::Text),
            Column::AssetType => self.asset_type.clone().map(KeyPart::Text),
            Column::ManagerId => self.manager_id.clone().map(KeyPart::Text),
            Column::Quantity | Column::Price | Column::MarketValue | Column::Dividend => None,
        }
    }

    /// Returns true if the record holds a value for the column.
    #[must_use]
    pub fn has_value(&self, column: Column) -> bool {
        match column {
            Column::Sector => self.sector.is_some(),
            Column::Country => self.country.is_some(),
            Column::AssetType => self.asset_type.is_some(),
            Column::ManagerId => self.manager_id.is_some(),
            _ => true,
        }
    }
}

/// One component of a group key.
///
/// Dates keep their type so that keys sort chronologically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyPart {
    /// A date value.
    Date(NaiveDate),
    /// A textual value.
    Text(String),
}

impl KeyPart {
    /// Returns the text value, if this part is textual.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Date(_) => None,
        }
    }

    /// Returns the date value, if this part is a date.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            Self::Text(_) => None,
        }
    }
}

impl std::fmt::Display for KeyPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date(d) => write!(f, "{d}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for KeyPart {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for KeyPart {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<NaiveDate> for KeyPart {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    }

    #[test]
    fn test_builder() {
        let record = PositionRecord::new("F1", date(), "AAPL", dec!(1500))
            .with_sector("Technology")
            .with_country("US")
            .with_asset_type("Equity")
            .with_manager("M1")
            .with_holding(dec!(10), dec!(150))
            .with_dividend(dec!(2.5));

        assert_eq!(record.fund_id, "F1");
        assert_eq!(record.sector.as_deref(), Some("Technology"));
        assert_eq!(record.quantity, dec!(10));
        assert_eq!(record.dividend, dec!(2.5));
    }

    #[test]
    fn test_key_parts() {
        let record = PositionRecord::new("F1", date(), "AAPL", dec!(1500)).with_country("US");

        assert_eq!(record.key_part(Column::FundId), Some(KeyPart::from("F1")));
        assert_eq!(record.key_part(Column::Date), Some(KeyPart::Date(date())));
        assert_eq!(record.key_part(Column::Country), Some(KeyPart::from("US")));
        assert_eq!(record.key_part(Column::Sector), None);
        assert_eq!(record.key_part(Column::MarketValue), None);

        assert!(record.has_value(Column::Country));
        assert!(!record.has_value(Column::Sector));
        assert!(record.has_value(Column::Price));
    }

    #[test]
    fn test_market_value_not_recomputed() {
        let record = PositionRecord::new("F1", date(), "X", dec!(999))
            .with_holding(dec!(10), dec!(50));
        assert_eq!(record.market_value, dec!(999));
    }

    #[test]
    fn test_key_part_ordering() {
        let early = KeyPart::Date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        let late = KeyPart::Date(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert!(early < late);
        assert_eq!(late.to_string(), "2024-01-10");
        assert_eq!(late.as_date(), NaiveDate::from_ymd_opt(2024, 1, 10));
        assert_eq!(KeyPart::from("US").as_text(), Some("US"));
    }
}
