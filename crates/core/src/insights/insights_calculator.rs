//! Pure aggregation over the investor book.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{AggregateInsights, CountBucket, InvestorSegments, PerformerSummary, ValueBucket};
use crate::constants::{
    DISPLAY_DECIMAL_PRECISION, LAKH, NEEDS_ATTENTION_THRESHOLD_PCT, NEW_INVESTOR_WINDOW_DAYS,
    PERFORMER_LIST_SIZE, TOP_AMC_LIMIT,
};
use crate::investors::Investor;
use crate::utils::decimal_utils::{average_or_zero, saturating_add, saturating_sum};
use crate::utils::time_utils::is_within_last_days;

pub const PERFORMANCE_BINS: [&str; 5] = ["Negative", "0-5%", "5-10%", "10-15%", "15%+"];
pub const AUM_BINS: [&str; 5] = ["<5L", "5-10L", "10-15L", "15-20L", "20L+"];

/// Index into [`PERFORMANCE_BINS`] for a gain/loss percentage.
pub fn performance_bin(gain_loss_pct: Decimal) -> usize {
    if gain_loss_pct < Decimal::ZERO {
        0
    } else if gain_loss_pct < dec!(5) {
        1
    } else if gain_loss_pct < dec!(10) {
        2
    } else if gain_loss_pct < dec!(15) {
        3
    } else {
        4
    }
}

/// Index into [`AUM_BINS`] for an AUM in rupees.
pub fn aum_bin(total_aum: Decimal) -> usize {
    let lakhs = total_aum / Decimal::from(LAKH);
    if lakhs < dec!(5) {
        0
    } else if lakhs < dec!(10) {
        1
    } else if lakhs < dec!(15) {
        2
    } else if lakhs < dec!(20) {
        3
    } else {
        4
    }
}

/// `value / total * 100` rounded to 2 places; zero when the total is zero.
pub fn percentage_of(value: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    value
        .checked_div(total)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .map(|pct| pct.round_dp(DISPLAY_DECIMAL_PRECISION))
        .unwrap_or(Decimal::ZERO)
}

/// Sums values per key, keeping keys in order of first appearance.
pub fn group_sum_first_seen<'a, I>(entries: I) -> Vec<(String, Decimal)>
where
    I: IntoIterator<Item = (&'a str, Decimal)>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(String, Decimal)> = Vec::new();
    for (key, value) in entries {
        match index.get(key) {
            Some(&i) => groups[i].1 = saturating_add(groups[i].1, value),
            None => {
                index.insert(key, groups.len());
                groups.push((key.to_string(), value));
            }
        }
    }
    groups
}

fn count_first_seen<'a, I>(keys: I) -> Vec<CountBucket>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut buckets: Vec<CountBucket> = Vec::new();
    for key in keys {
        match index.get(key) {
            Some(&i) => buckets[i].value += 1,
            None => {
                index.insert(key, buckets.len());
                buckets.push(CountBucket::new(key, 1));
            }
        }
    }
    buckets
}

fn fixed_bins(labels: &[&str], counts: [usize; 5]) -> Vec<CountBucket> {
    labels
        .iter()
        .zip(counts)
        .map(|(label, value)| CountBucket::new(*label, value))
        .collect()
}

/// Groups by value descending. Equal values keep their first-seen order.
fn ranked_value_buckets(groups: Vec<(String, Decimal)>, total_aum: Decimal) -> Vec<ValueBucket> {
    let mut buckets: Vec<ValueBucket> = groups
        .into_iter()
        .map(|(name, value)| ValueBucket {
            percentage: percentage_of(value, total_aum),
            name,
            value,
        })
        .collect();
    buckets.sort_by(|a, b| b.value.cmp(&a.value));
    buckets
}

pub fn compute_aggregate_insights(investors: &[Investor], now: DateTime<Utc>) -> AggregateInsights {
    let total_investors = investors.len();
    let total_aum = saturating_sum(investors.iter().map(|inv| inv.total_aum));
    let total_invested = saturating_sum(investors.iter().map(|inv| inv.total_invested));
    let avg_returns = average_or_zero(investors.iter().map(|inv| inv.gain_loss_pct));

    let mut performance_counts = [0usize; 5];
    let mut aum_counts = [0usize; 5];
    let mut segments = InvestorSegments::default();
    let attention_threshold = Decimal::from(NEEDS_ATTENTION_THRESHOLD_PCT);

    for inv in investors {
        performance_counts[performance_bin(inv.gain_loss_pct)] += 1;
        aum_counts[aum_bin(inv.total_aum)] += 1;

        if is_within_last_days(&inv.onboarding_date, now, NEW_INVESTOR_WINDOW_DAYS) {
            segments.new_investors += 1;
        }
        if inv.gain_loss_pct >= Decimal::ZERO {
            segments.active += 1;
        }
        if inv.gain_loss_pct < attention_threshold {
            segments.needs_attention += 1;
        }
    }

    let portfolios = investors.iter().flat_map(|inv| inv.portfolios.iter());
    let category_totals = ranked_value_buckets(
        group_sum_first_seen(portfolios.clone().map(|p| (p.category.as_str(), p.current_value))),
        total_aum,
    );
    let mut amc_weightage = ranked_value_buckets(
        group_sum_first_seen(portfolios.map(|p| (p.amc_name.as_str(), p.current_value))),
        total_aum,
    );
    amc_weightage.truncate(TOP_AMC_LIMIT);

    let mut by_performance: Vec<&Investor> = investors.iter().collect();
    by_performance.sort_by(|a, b| b.gain_loss_pct.cmp(&a.gain_loss_pct));
    let top_performers = by_performance
        .iter()
        .take(PERFORMER_LIST_SIZE)
        .map(|inv| PerformerSummary::from(*inv))
        .collect();
    let bottom_performers = by_performance
        .iter()
        .rev()
        .take(PERFORMER_LIST_SIZE)
        .map(|inv| PerformerSummary::from(*inv))
        .collect();

    AggregateInsights {
        total_investors,
        total_aum,
        total_invested,
        avg_returns,
        risk_distribution: count_first_seen(investors.iter().map(|inv| inv.risk_profile.as_str())),
        performance_distribution: fixed_bins(&PERFORMANCE_BINS, performance_counts),
        aum_distribution: fixed_bins(&AUM_BINS, aum_counts),
        segments,
        category_totals,
        amc_weightage,
        top_performers,
        bottom_performers,
    }
}
