//! Dashboard view models.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::utils::decimal_utils::saturating_add;
use crate::utils::serde_utils::{lenient_count, lenient_decimal, lenient_string, null_as_empty};

/// Headline figures computed from `GET /investors`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_investors: usize,
    pub total_aum: Decimal,
    pub total_invested: Decimal,
    /// Mean of `gain_loss_pct`; zero for an empty book.
    pub avg_gain: Decimal,
}

impl DashboardStats {
    /// Absolute gain across the book.
    pub fn total_gain(&self) -> Decimal {
        saturating_add(self.total_aum, -self.total_invested)
    }
}

/// Server-side analytics from `GET /dashboard/analytics`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardAnalytics {
    pub sip_status: SipStatus,
    #[serde(deserialize_with = "null_as_empty")]
    pub monthly_sip_inflow: Vec<MonthlyInflow>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub average_sip_ticket_size: Decimal,
    #[serde(deserialize_with = "null_as_empty")]
    pub top_sip_investors: Vec<SipInvestor>,
    pub profit_loss_split: ProfitLossSplit,
    #[serde(deserialize_with = "null_as_empty")]
    pub upcoming_sip_expiry: Vec<UpcomingSip>,
    #[serde(deserialize_with = "null_as_empty")]
    pub high_potential_investors: Vec<HighPotentialInvestor>,
    #[serde(rename = "needsSeeding")]
    pub needs_seeding: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SipStatus {
    #[serde(deserialize_with = "lenient_count")]
    pub active: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub paused: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub stopped: u64,
}

impl SipStatus {
    pub fn total(&self) -> u64 {
        self.active + self.paused + self.stopped
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyInflow {
    #[serde(deserialize_with = "lenient_string")]
    pub month: String,
    #[serde(deserialize_with = "lenient_decimal")]
    pub inflow: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SipInvestor {
    #[serde(deserialize_with = "lenient_string")]
    pub investor_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_decimal")]
    pub total_sip_value: Decimal,
}

/// Number of investors in profit and in loss.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfitLossSplit {
    #[serde(deserialize_with = "lenient_count")]
    pub profit: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub loss: u64,
}

impl ProfitLossSplit {
    /// Share of investors in profit, as a percentage rounded to 2 places.
    pub fn profit_pct(&self) -> Decimal {
        let total = self.profit + self.loss;
        if total == 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(self.profit) / Decimal::from(total) * dec!(100))
            .round_dp(DISPLAY_DECIMAL_PRECISION)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpcomingSip {
    #[serde(deserialize_with = "lenient_string")]
    pub investor_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub investor_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub scheme_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub next_due_date: String,
    #[serde(deserialize_with = "lenient_count")]
    pub days_until_due: i64,
    #[serde(deserialize_with = "lenient_decimal")]
    pub sip_amount: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighPotentialInvestor {
    #[serde(deserialize_with = "lenient_string")]
    pub investor_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_decimal")]
    pub total_sip_value: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub gain_loss_pct: Decimal,
    #[serde(deserialize_with = "lenient_count")]
    pub redemptions: u64,
}

/// What the dashboard page shows after loading.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    /// The backend holds no investors yet; offer to seed.
    NeedsSeeding,
    Ready {
        stats: DashboardStats,
        /// `None` when the analytics request failed.
        analytics: Option<DashboardAnalytics>,
    },
}
