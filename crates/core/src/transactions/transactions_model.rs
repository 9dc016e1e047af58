use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::investors::{Portfolio, Transaction};
use crate::utils::time_utils::timestamp_millis_or_zero;

/// A transaction joined with the scheme it was made in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub txn_id: String,
    pub txn_date: String,
    pub txn_type: String,
    pub txn_amount: Decimal,
    pub nav_at_txn: Decimal,
    pub units: Decimal,
    pub scheme_name: String,
    pub amc_name: String,
    pub category: String,
    /// `txn_date` in epoch millis; unparseable dates are 0
    #[serde(skip)]
    timestamp_millis: i64,
}

impl TransactionRow {
    pub fn new(portfolio: &Portfolio, txn: &Transaction) -> Self {
        Self {
            txn_id: txn.txn_id.clone(),
            txn_date: txn.txn_date.clone(),
            txn_type: txn.txn_type.clone(),
            txn_amount: txn.txn_amount,
            nav_at_txn: txn.nav_at_txn,
            units: txn.units,
            scheme_name: portfolio.scheme_name.clone(),
            amc_name: portfolio.amc_name.clone(),
            category: portfolio.category.clone(),
            timestamp_millis: timestamp_millis_or_zero(&txn.txn_date),
        }
    }

    /// Every transaction of every folio, folio order first.
    pub fn flatten(portfolios: &[Portfolio]) -> Vec<Self> {
        portfolios
            .iter()
            .flat_map(|p| p.transactions.iter().map(move |t| Self::new(p, t)))
            .collect()
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp_millis
    }

    /// Case-insensitive match on scheme, AMC, type or id. `needle` must
    /// already be lower-cased.
    pub fn matches_search(&self, needle: &str) -> bool {
        [&self.scheme_name, &self.amc_name, &self.txn_type, &self.txn_id]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }

    /// Ascending comparison on one column.
    pub fn compare_by(&self, other: &Self, key: SortKey) -> Ordering {
        match key {
            SortKey::TxnDate => self.timestamp_millis.cmp(&other.timestamp_millis),
            SortKey::TxnAmount => self.txn_amount.cmp(&other.txn_amount),
            SortKey::NavAtTxn => self.nav_at_txn.cmp(&other.nav_at_txn),
            SortKey::Units => self.units.cmp(&other.units),
            SortKey::TxnId => self.txn_id.cmp(&other.txn_id),
            SortKey::TxnType => self.txn_type.cmp(&other.txn_type),
            SortKey::SchemeName => self.scheme_name.cmp(&other.scheme_name),
            SortKey::AmcName => self.amc_name.cmp(&other.amc_name),
        }
    }
}

/// Sortable columns of the transactions table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    TxnDate,
    TxnId,
    TxnType,
    TxnAmount,
    NavAtTxn,
    Units,
    SchemeName,
    AmcName,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        SortKey::TxnDate,
        SortKey::TxnId,
        SortKey::TxnType,
        SortKey::TxnAmount,
        SortKey::NavAtTxn,
        SortKey::Units,
        SortKey::SchemeName,
        SortKey::AmcName,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::TxnDate => "txn_date",
            SortKey::TxnId => "txn_id",
            SortKey::TxnType => "txn_type",
            SortKey::TxnAmount => "txn_amount",
            SortKey::NavAtTxn => "nav_at_txn",
            SortKey::Units => "units",
            SortKey::SchemeName => "scheme_name",
            SortKey::AmcName => "amc_name",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SortKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Unknown sort column: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    /// Newest transactions first.
    fn default() -> Self {
        Self {
            key: SortKey::TxnDate,
            direction: SortDirection::Desc,
        }
    }
}

impl SortConfig {
    /// Clicking the current column while ascending flips to descending;
    /// anything else sorts the clicked column ascending.
    pub fn toggled(self, key: SortKey) -> Self {
        let direction = if self.key == key && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        Self { key, direction }
    }

    pub fn compare(&self, a: &TransactionRow, b: &TransactionRow) -> Ordering {
        let ordering = a.compare_by(b, self.key);
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// The "Showing X to Y of Z" line under the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    /// 1-based index of the first row on the page
    pub start: usize,
    /// 1-based index of the last row on the page
    pub end: usize,
    pub total: usize,
}

impl fmt::Display for PageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Showing {} to {} of {} transactions",
            self.start, self.end, self.total
        )
    }
}
