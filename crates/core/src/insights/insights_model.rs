use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::investors::Investor;

/// A named bin holding a count of investors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountBucket {
    pub name: String,
    pub value: usize,
}

impl CountBucket {
    pub fn new(name: impl Into<String>, value: usize) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A named slice of AUM with its share of the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueBucket {
    pub name: String,
    pub value: Decimal,
    pub percentage: Decimal,
}

/// Investor cohorts. An investor may belong to several.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorSegments {
    pub new_investors: usize,
    pub active: usize,
    pub needs_attention: usize,
}

/// One row of the top/bottom performer tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformerSummary {
    pub investor_id: String,
    pub name: String,
    pub risk_profile: String,
    pub total_aum: Decimal,
    pub gain_loss_pct: Decimal,
}

impl From<&Investor> for PerformerSummary {
    fn from(investor: &Investor) -> Self {
        Self {
            investor_id: investor.investor_id.clone(),
            name: investor.name.clone(),
            risk_profile: investor.risk_profile.clone(),
            total_aum: investor.total_aum,
            gain_loss_pct: investor.gain_loss_pct,
        }
    }
}

/// Book-wide view behind the aggregate tab of the AI insights page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateInsights {
    pub total_investors: usize,
    pub total_aum: Decimal,
    pub total_invested: Decimal,
    pub avg_returns: Decimal,
    /// Counts per risk profile, in order of first appearance.
    pub risk_distribution: Vec<CountBucket>,
    /// Always the five performance bins, in fixed order.
    pub performance_distribution: Vec<CountBucket>,
    /// Always the five AUM bins, in fixed order.
    pub aum_distribution: Vec<CountBucket>,
    pub segments: InvestorSegments,
    pub category_totals: Vec<ValueBucket>,
    pub amc_weightage: Vec<ValueBucket>,
    pub top_performers: Vec<PerformerSummary>,
    /// Worst performer first.
    pub bottom_performers: Vec<PerformerSummary>,
}
