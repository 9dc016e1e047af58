//! Plain-text rendering of page view models.

use std::fmt::Write;

use mf360_core::analysis::{AiSummary, Analysis, RiskBand};
use mf360_core::dashboard::{DashboardAnalytics, DashboardStats, DashboardView};
use mf360_core::insights::{AggregateInsights, CountBucket, PerformerSummary, ValueBucket};
use mf360_core::investors::{Investor, InvestorDetail};
use mf360_core::notifications::{Notice, NoticeLevel};
use mf360_core::transactions::TransactionTable;
use mf360_core::utils::format_utils::{format_display_date, format_inr, format_percent, mask_pan};

pub fn print_success(message: &str) {
    print_notices(&[Notice::success(message)]);
}

pub fn print_notices(notices: &[Notice]) {
    for notice in notices {
        match notice.level {
            NoticeLevel::Error => eprintln!("[error] {}", notice.message),
            NoticeLevel::Info => println!("[info] {}", notice.message),
            NoticeLevel::Success => println!("[ok] {}", notice.message),
        }
    }
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}\n{}", title, "-".repeat(title.chars().count()));
}

pub fn dashboard(view: &DashboardView) -> String {
    let mut out = String::new();
    match view {
        DashboardView::NeedsSeeding => {
            out.push_str("No investors yet. Run `mf360 seed` to load sample data.\n");
        }
        DashboardView::Ready { stats, analytics } => {
            dashboard_stats(&mut out, stats);
            if let Some(analytics) = analytics {
                dashboard_analytics(&mut out, analytics);
            }
        }
    }
    out
}

fn dashboard_stats(out: &mut String, stats: &DashboardStats) {
    heading(out, "Overview");
    let _ = writeln!(out, "Total investors  {}", stats.total_investors);
    let _ = writeln!(out, "Total AUM        {}", format_inr(stats.total_aum));
    let _ = writeln!(out, "Total invested   {}", format_inr(stats.total_invested));
    let _ = writeln!(out, "Total gain       {}", format_inr(stats.total_gain()));
    let _ = writeln!(out, "Average return   {}", format_percent(stats.avg_gain));
}

fn dashboard_analytics(out: &mut String, analytics: &DashboardAnalytics) {
    let sip = &analytics.sip_status;
    heading(out, "SIP status");
    let _ = writeln!(
        out,
        "Active {}  Paused {}  Stopped {}  (total {})",
        sip.active,
        sip.paused,
        sip.stopped,
        sip.total()
    );
    let _ = writeln!(
        out,
        "Average SIP ticket  {}",
        format_inr(analytics.average_sip_ticket_size)
    );

    let split = &analytics.profit_loss_split;
    let _ = writeln!(
        out,
        "In profit {}  In loss {}  ({} in profit)",
        split.profit,
        split.loss,
        format_percent(split.profit_pct())
    );

    if !analytics.monthly_sip_inflow.is_empty() {
        heading(out, "Monthly SIP inflow");
        for month in &analytics.monthly_sip_inflow {
            let _ = writeln!(out, "{:<10} {}", month.month, format_inr(month.inflow));
        }
    }

    if !analytics.top_sip_investors.is_empty() {
        heading(out, "Top SIP investors");
        for investor in &analytics.top_sip_investors {
            let _ = writeln!(
                out,
                "{:<10} {:<28} {}",
                investor.investor_id,
                investor.name,
                format_inr(investor.total_sip_value)
            );
        }
    }

    if !analytics.upcoming_sip_expiry.is_empty() {
        heading(out, "Upcoming SIP dues");
        for due in &analytics.upcoming_sip_expiry {
            let _ = writeln!(
                out,
                "{:<24} {:<36} {} (in {} days) {}",
                due.investor_name,
                due.scheme_name,
                format_display_date(&due.next_due_date),
                due.days_until_due,
                format_inr(due.sip_amount)
            );
        }
    }

    if !analytics.high_potential_investors.is_empty() {
        heading(out, "High potential investors");
        for investor in &analytics.high_potential_investors {
            let _ = writeln!(
                out,
                "{:<10} {:<28} {} {} redemptions {}",
                investor.investor_id,
                investor.name,
                format_inr(investor.total_sip_value),
                format_percent(investor.gain_loss_pct),
                investor.redemptions
            );
        }
    }
}

pub fn investor_list(investors: &[Investor]) -> String {
    let mut out = String::new();
    if investors.is_empty() {
        out.push_str("No investors found\n");
        return out;
    }
    let _ = writeln!(
        out,
        "{:<10} {:<28} {:<12} {:<10} {:>16} {:>9}",
        "ID", "Name", "PAN", "Risk", "AUM", "Return"
    );
    for investor in investors {
        let _ = writeln!(
            out,
            "{:<10} {:<28} {:<12} {:<10} {:>16} {:>9}",
            investor.investor_id,
            investor.name,
            mask_pan(&investor.pan),
            investor.risk_profile,
            format_inr(investor.total_aum),
            format_percent(investor.gain_loss_pct)
        );
    }
    let _ = writeln!(out, "{} investors", investors.len());
    out
}

fn value_buckets(out: &mut String, buckets: &[ValueBucket]) {
    for bucket in buckets {
        let _ = writeln!(
            out,
            "{:<32} {:>16} {:>9}",
            bucket.name,
            format_inr(bucket.value),
            format_percent(bucket.percentage)
        );
    }
}

pub fn investor_detail(detail: &InvestorDetail) -> String {
    let mut out = String::new();
    let investor = &detail.investor;
    let _ = writeln!(out, "{} ({})", investor.name, investor.investor_id);
    let _ = writeln!(out, "{} | {} | PAN {}", investor.email, investor.mobile, investor.pan);
    let _ = writeln!(
        out,
        "{} risk, {} investor since {}",
        investor.risk_profile,
        investor.investor_type,
        format_display_date(&investor.onboarding_date)
    );
    let _ = writeln!(
        out,
        "AUM {}  Invested {}  Return {}",
        format_inr(investor.total_aum),
        format_inr(investor.total_invested),
        format_percent(investor.gain_loss_pct)
    );

    heading(&mut out, "Holdings");
    for folio in &investor.portfolios {
        let sip = match (&folio.sip_freq, folio.sip_flag) {
            (Some(freq), true) => format!("SIP {}", freq),
            (None, true) => "SIP".to_string(),
            _ => String::new(),
        };
        let _ = writeln!(
            out,
            "{:<40} {:>16} {:>9} {}",
            folio.scheme_name,
            format_inr(folio.current_value),
            format_percent(folio.gain_loss_pct),
            sip
        );
    }

    heading(&mut out, "Category allocation");
    value_buckets(&mut out, &detail.category_allocation);
    heading(&mut out, "Top AMCs");
    value_buckets(&mut out, &detail.top_amcs);
    out
}

pub fn transactions(table: &TransactionTable) -> String {
    let mut out = String::new();
    heading(&mut out, "Transactions");
    let rows = table.current_page_rows();
    if rows.is_empty() {
        out.push_str("No transactions found\n");
        return out;
    }
    let sort = table.sort_config();
    let _ = writeln!(out, "Sorted by {} {:?}", sort.key, sort.direction);
    let _ = writeln!(
        out,
        "{:<14} {:<12} {:<36} {:<9} {:>14} {:>10} {:>12}",
        "ID", "Date", "Scheme", "Type", "Amount", "NAV", "Units"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<14} {:<12} {:<36} {:<9} {:>14} {:>10} {:>12}",
            row.txn_id,
            format_display_date(&row.txn_date),
            row.scheme_name,
            row.txn_type,
            format_inr(row.txn_amount),
            row.nav_at_txn.round_dp(4),
            row.units.round_dp(3)
        );
    }

    let info = table.page_info();
    let pages: Vec<String> = table
        .page_window()
        .into_iter()
        .map(|p| {
            if p == info.current_page {
                format!("[{}]", p)
            } else {
                p.to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "{}", info);
    if info.total_pages > 1 {
        let _ = writeln!(out, "Page {} of {}: {}", info.current_page, info.total_pages, pages.join(" "));
    }
    out
}

fn count_buckets(out: &mut String, buckets: &[CountBucket]) {
    for bucket in buckets {
        let _ = writeln!(out, "{:<24} {:>6}", bucket.name, bucket.value);
    }
}

fn performers(out: &mut String, rows: &[PerformerSummary]) {
    for row in rows {
        let _ = writeln!(
            out,
            "{:<10} {:<28} {:<10} {:>16} {:>9}",
            row.investor_id,
            row.name,
            row.risk_profile,
            format_inr(row.total_aum),
            format_percent(row.gain_loss_pct)
        );
    }
}

pub fn aggregate_insights(insights: &AggregateInsights) -> String {
    let mut out = String::new();
    heading(&mut out, "Book summary");
    let _ = writeln!(out, "Investors       {}", insights.total_investors);
    let _ = writeln!(out, "Total AUM       {}", format_inr(insights.total_aum));
    let _ = writeln!(out, "Total invested  {}", format_inr(insights.total_invested));
    let _ = writeln!(out, "Average return  {}", format_percent(insights.avg_returns));

    let segments = &insights.segments;
    heading(&mut out, "Segments");
    let _ = writeln!(out, "New (30 days)    {}", segments.new_investors);
    let _ = writeln!(out, "Active SIP       {}", segments.active);
    let _ = writeln!(out, "Needs attention  {}", segments.needs_attention);

    heading(&mut out, "Risk profiles");
    count_buckets(&mut out, &insights.risk_distribution);
    heading(&mut out, "Returns");
    count_buckets(&mut out, &insights.performance_distribution);
    heading(&mut out, "AUM bands");
    count_buckets(&mut out, &insights.aum_distribution);
    heading(&mut out, "Categories");
    value_buckets(&mut out, &insights.category_totals);
    heading(&mut out, "AMC weightage");
    value_buckets(&mut out, &insights.amc_weightage);
    heading(&mut out, "Top performers");
    performers(&mut out, &insights.top_performers);
    heading(&mut out, "Bottom performers");
    performers(&mut out, &insights.bottom_performers);
    out
}

fn suggestions(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    heading(out, title);
    for item in items {
        let _ = writeln!(out, "- {}", item);
    }
}

pub fn analysis(analysis: &Analysis, summary: &AiSummary) -> String {
    let mut out = String::new();
    if let Some(name) = &analysis.name {
        let _ = writeln!(out, "Analysis for {}", name);
    }

    heading(&mut out, "Summary");
    let _ = writeln!(out, "{}", summary.text());

    let perf = analysis.performance();
    heading(&mut out, "Performance");
    let _ = writeln!(
        out,
        "Invested {}  Value {}  Return {}",
        format_inr(perf.invested),
        format_inr(perf.value),
        format_percent(perf.gain_loss)
    );

    let div = analysis.diversification();
    heading(&mut out, "Diversification");
    let _ = writeln!(
        out,
        "Score {}  AMCs {}  Categories {}",
        div.diversification_score.round_dp(0),
        div.amc_count,
        div.cat_count
    );

    let mismatch = analysis.risk_mismatch();
    heading(&mut out, "Risk fit");
    let _ = writeln!(out, "Equity share {}", format_percent(mismatch.equity_share));
    if let Some(alert) = &mismatch.alert {
        let _ = writeln!(out, "! {}", alert);
    }

    let alerts = analysis.concentration_alerts();
    if !alerts.is_empty() {
        heading(&mut out, "Concentration");
        for alert in alerts {
            let _ = writeln!(
                out,
                "{} {} {}",
                alert.alert_type,
                alert.amc,
                format_percent(alert.pct)
            );
        }
    }

    let discontinuation = analysis.sip_discontinuation();
    heading(&mut out, "SIP health");
    let band = match discontinuation.band() {
        RiskBand::High => "HIGH",
        RiskBand::Medium => "MEDIUM",
        RiskBand::Low => "LOW",
    };
    let _ = writeln!(
        out,
        "Active SIPs {}  Missed {}/{}  Discontinuation risk {} ({})",
        analysis.sip_health().active,
        discontinuation.missed_count,
        discontinuation.sip_count,
        discontinuation.risk,
        band
    );

    let churn = analysis.churn_risk();
    let _ = writeln!(
        out,
        "Churn risk {} (score {}){}",
        churn.churn_risk,
        churn.score.round_dp(0),
        if churn.is_high() { " !" } else { "" }
    );

    suggestions(&mut out, "Rebalancing", analysis.rebalancing_suggestions());
    suggestions(&mut out, "Performance suggestions", analysis.performance_suggestions());
    out
}
