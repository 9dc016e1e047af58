//! Investor domain models as served by the backend.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::serde_utils::{lenient_decimal, lenient_string, null_as_empty};

/// Risk profile values the backend issues. Other values are kept verbatim.
pub const RISK_PROFILES: [&str; 3] = ["Low", "Moderate", "High"];

/// Investor types the backend issues.
pub const INVESTOR_TYPES: [&str; 2] = ["Individual", "Family"];

/// Transaction types the backend issues.
pub const TRANSACTION_TYPES: [&str; 5] = ["Buy", "Sell", "SIP", "Switch", "Dividend"];

/// A client of the distribution business.
///
/// List endpoints omit `portfolios` unless `include_portfolios=true` is
/// requested; the field then decodes as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Investor {
    #[serde(default, deserialize_with = "lenient_string")]
    pub investor_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mobile: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pan: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub risk_profile: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub investor_type: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_aum: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_invested: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub gain_loss_pct: Decimal,
    #[serde(default, deserialize_with = "lenient_string")]
    pub onboarding_date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub portfolios: Vec<Portfolio>,
}

/// A folio: one scheme held by one investor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(default, deserialize_with = "lenient_string")]
    pub folio_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub scheme_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub amc_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub invested_amount: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub current_value: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub gain_loss_pct: Decimal,
    #[serde(default)]
    pub sip_flag: bool,
    #[serde(default)]
    pub sip_freq: Option<String>,
    #[serde(default)]
    pub next_due_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub transactions: Vec<Transaction>,
}

/// A single buy/sell/SIP/switch/dividend entry in a folio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, deserialize_with = "lenient_string")]
    pub txn_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub txn_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub txn_type: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub txn_amount: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub nav_at_txn: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub units: Decimal,
}

impl Investor {
    /// Number of schemes held.
    pub fn scheme_count(&self) -> usize {
        self.portfolios.len()
    }

    /// Number of folios with an active SIP.
    pub fn active_sip_count(&self) -> usize {
        self.portfolios.iter().filter(|p| p.sip_flag).count()
    }

    pub fn is_gaining(&self) -> bool {
        self.gain_loss_pct >= Decimal::ZERO
    }
}
