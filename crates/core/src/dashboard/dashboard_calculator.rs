use super::DashboardStats;
use crate::investors::Investor;
use crate::utils::decimal_utils::{average_or_zero, saturating_sum};

/// Totals shown on the dashboard cards.
pub fn compute_dashboard_stats(investors: &[Investor]) -> DashboardStats {
    let total_aum = saturating_sum(investors.iter().map(|inv| inv.total_aum));
    let total_invested = saturating_sum(investors.iter().map(|inv| inv.total_invested));
    let avg_gain = average_or_zero(investors.iter().map(|inv| inv.gain_loss_pct));

    DashboardStats {
        total_investors: investors.len(),
        total_aum,
        total_invested,
        avg_gain,
    }
}
