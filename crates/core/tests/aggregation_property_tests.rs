//! Property-based integration tests for the aggregation pipeline and the
//! transactions table.

use chrono::{TimeZone, Utc};
use mf360_core::insights::compute_aggregate_insights;
use mf360_core::investors::{Investor, Portfolio, Transaction};
use mf360_core::transactions::{SortConfig, SortDirection, SortKey, TransactionTable};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// =============================================================================
// Generators
// =============================================================================

/// Percentages between -50.00 and 50.00.
fn arb_pct() -> impl Strategy<Value = Decimal> {
    (-5000i64..5000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Non-negative rupee amounts up to 50 lakh, in paise precision.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..500_000_000).prop_map(|paise| Decimal::new(paise, 2))
}

fn arb_risk() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Low".to_string()),
        Just("Moderate".to_string()),
        Just("High".to_string()),
        "[A-Z][a-z]{2,8}",
    ]
}

fn arb_amc() -> impl Strategy<Value = String> {
    (1u8..15).prop_map(|n| format!("AMC {}", n))
}

fn arb_portfolio() -> impl Strategy<Value = Portfolio> {
    (arb_amc(), arb_amount()).prop_map(|(amc_name, current_value)| Portfolio {
        amc_name,
        category: "Equity".to_string(),
        current_value,
        ..Portfolio::default()
    })
}

/// An investor whose AUM equals the sum of its folios' values.
fn arb_investor() -> impl Strategy<Value = Investor> {
    (
        arb_risk(),
        arb_pct(),
        proptest::collection::vec(arb_portfolio(), 0..6),
    )
        .prop_map(|(risk_profile, gain_loss_pct, portfolios)| {
            let total_aum = portfolios.iter().map(|p| p.current_value).sum();
            Investor {
                risk_profile,
                gain_loss_pct,
                total_aum,
                total_invested: total_aum,
                portfolios,
                ..Investor::default()
            }
        })
}

fn arb_txn_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Buy".to_string()),
        Just("Sell".to_string()),
        Just("SIP".to_string()),
        Just("Switch".to_string()),
        Just("Dividend".to_string()),
    ]
}

fn arb_transaction() -> impl Strategy<Value = Transaction> {
    (
        0u32..100_000,
        0i64..1000,
        arb_txn_type(),
        arb_amount(),
    )
        .prop_map(|(id, day, txn_type, txn_amount)| {
            let date = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap()
                + chrono::Duration::days(day);
            Transaction {
                txn_id: format!("T{}", id),
                txn_date: date.to_rfc3339(),
                txn_type,
                txn_amount,
                nav_at_txn: dec!(10),
                units: txn_amount / dec!(10),
            }
        })
}

fn arb_table() -> impl Strategy<Value = TransactionTable> {
    proptest::collection::vec(arb_transaction(), 0..80).prop_map(|transactions| {
        TransactionTable::from_portfolios(&[Portfolio {
            scheme_name: "Tata Digital India Fund".to_string(),
            amc_name: "Tata Mutual Fund".to_string(),
            transactions,
            ..Portfolio::default()
        }])
    })
}

fn arb_sort_key() -> impl Strategy<Value = SortKey> {
    proptest::sample::select(SortKey::ALL.to_vec())
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every investor lands in exactly one performance, AUM and risk bucket.
    #[test]
    fn prop_bucket_counts_sum_to_investor_count(
        investors in proptest::collection::vec(arb_investor(), 0..40)
    ) {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let insights = compute_aggregate_insights(&investors, now);

        let perf: usize = insights.performance_distribution.iter().map(|b| b.value).sum();
        let aum: usize = insights.aum_distribution.iter().map(|b| b.value).sum();
        let risk: usize = insights.risk_distribution.iter().map(|b| b.value).sum();

        prop_assert_eq!(insights.performance_distribution.len(), 5);
        prop_assert_eq!(insights.aum_distribution.len(), 5);
        prop_assert_eq!(perf, investors.len());
        prop_assert_eq!(aum, investors.len());
        prop_assert_eq!(risk, investors.len());
    }

    /// AMC shares follow `value / totalAUM * 100` and never exceed the whole.
    #[test]
    fn prop_amc_weightage_percentages(
        investors in proptest::collection::vec(arb_investor(), 0..40)
    ) {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let insights = compute_aggregate_insights(&investors, now);

        prop_assert!(insights.amc_weightage.len() <= 10);
        for bucket in &insights.amc_weightage {
            let expected = if insights.total_aum.is_zero() {
                Decimal::ZERO
            } else {
                (bucket.value / insights.total_aum * dec!(100)).round_dp(2)
            };
            prop_assert_eq!(bucket.percentage, expected);
        }

        // Each share is rounded to 2 places, so allow half a cent per bucket
        let total: Decimal = insights.amc_weightage.iter().map(|b| b.percentage).sum();
        prop_assert!(total <= dec!(100.05), "AMC shares sum to {}", total);

        let values: Vec<Decimal> = insights.amc_weightage.iter().map(|b| b.value).collect();
        prop_assert!(values.windows(2).all(|w| w[0] >= w[1]));
    }

    /// Re-applying the same sort leaves the order unchanged.
    #[test]
    fn prop_sort_is_idempotent(mut table in arb_table(), key in arb_sort_key()) {
        let config = SortConfig { key, direction: SortDirection::Asc };
        table.set_sort(config);
        let first: Vec<String> = table.filtered_rows().iter().map(|r| r.txn_id.clone()).collect();
        table.set_sort(config);
        let second: Vec<String> = table.filtered_rows().iter().map(|r| r.txn_id.clone()).collect();
        prop_assert_eq!(first, second);
    }

    /// With distinct amounts, flipping the direction reverses the order.
    #[test]
    fn prop_toggle_reverses_distinct_keys(
        amounts in proptest::collection::hash_set(1i64..1_000_000, 0..60)
    ) {
        let transactions: Vec<Transaction> = amounts
            .iter()
            .map(|&a| Transaction {
                txn_id: format!("T{}", a),
                txn_amount: Decimal::from(a),
                ..Transaction::default()
            })
            .collect();
        let mut table = TransactionTable::from_portfolios(&[Portfolio {
            transactions,
            ..Portfolio::default()
        }]);

        table.request_sort(SortKey::TxnAmount);
        let ascending: Vec<String> = table.filtered_rows().iter().map(|r| r.txn_id.clone()).collect();
        table.request_sort(SortKey::TxnAmount);
        prop_assert_eq!(table.sort_config().direction, SortDirection::Desc);
        let mut descending: Vec<String> = table.filtered_rows().iter().map(|r| r.txn_id.clone()).collect();
        descending.reverse();
        prop_assert_eq!(ascending, descending);
    }

    /// Export covers the whole filtered set whatever page is showing.
    #[test]
    fn prop_csv_row_count_matches_filtered_count(
        mut table in arb_table(),
        txn_type in arb_txn_type(),
        page in 1usize..6
    ) {
        table.set_type_filter(txn_type);
        table.go_to_page(page);
        let csv = table.to_csv().unwrap();
        prop_assert_eq!(csv.lines().count(), table.filtered_count() + 1);
        prop_assert!(table.current_page_rows().len() <= 20);
    }

    /// Search ignores case.
    #[test]
    fn prop_search_is_case_insensitive(
        mut table in arb_table(),
        term in prop_oneof![Just("buy"), Just("sip"), Just("tata"), Just("t1")]
    ) {
        table.set_search(term.to_uppercase());
        let upper = table.filtered_count();
        table.set_search(term);
        prop_assert_eq!(table.filtered_count(), upper);
    }
}
