use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Investor;
use crate::constants::DETAIL_TOP_AMC_LIMIT;
use crate::insights::{group_sum_first_seen, percentage_of, ValueBucket};
use crate::transactions::TransactionTable;
use crate::utils::decimal_utils::saturating_sum;

/// Everything the investor detail view shows above the transactions table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorDetail {
    pub investor: Investor,
    /// Sum of the folios' current values.
    pub portfolio_value: Decimal,
    /// Current value per category, in order of first appearance.
    pub category_allocation: Vec<ValueBucket>,
    /// The largest AMCs by current value.
    pub top_amcs: Vec<ValueBucket>,
}

impl InvestorDetail {
    pub fn transactions_table(&self) -> TransactionTable {
        TransactionTable::from_portfolios(&self.investor.portfolios)
    }
}

pub fn build_investor_detail(investor: Investor) -> InvestorDetail {
    let portfolio_value = saturating_sum(investor.portfolios.iter().map(|p| p.current_value));

    let to_buckets = |groups: Vec<(String, Decimal)>| -> Vec<ValueBucket> {
        groups
            .into_iter()
            .map(|(name, value)| ValueBucket {
                percentage: percentage_of(value, portfolio_value),
                name,
                value,
            })
            .collect()
    };

    let category_allocation = to_buckets(group_sum_first_seen(
        investor
            .portfolios
            .iter()
            .map(|p| (p.category.as_str(), p.current_value)),
    ));

    let mut top_amcs = to_buckets(group_sum_first_seen(
        investor
            .portfolios
            .iter()
            .map(|p| (p.amc_name.as_str(), p.current_value)),
    ));
    top_amcs.sort_by(|a, b| b.value.cmp(&a.value));
    top_amcs.truncate(DETAIL_TOP_AMC_LIMIT);

    InvestorDetail {
        investor,
        portfolio_value,
        category_allocation,
        top_amcs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::investors::Portfolio;
    use rust_decimal_macros::dec;

    fn holding(amc: &str, category: &str, value: Decimal) -> Portfolio {
        Portfolio {
            amc_name: amc.to_string(),
            category: category.to_string(),
            current_value: value,
            ..Portfolio::default()
        }
    }

    #[test]
    fn test_category_allocation_keeps_first_seen_order() {
        let investor = Investor {
            portfolios: vec![
                holding("UTI", "Debt", dec!(10000)),
                holding("Kotak", "Equity", dec!(60000)),
                holding("UTI", "Debt", dec!(30000)),
            ],
            ..Investor::default()
        };
        let detail = build_investor_detail(investor);

        assert_eq!(detail.portfolio_value, dec!(100000));
        let names: Vec<&str> = detail
            .category_allocation
            .iter()
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(names, vec!["Debt", "Equity"]);
        assert_eq!(detail.category_allocation[0].value, dec!(40000));
        assert_eq!(detail.category_allocation[0].percentage, dec!(40));
    }

    #[test]
    fn test_top_five_amcs_by_value() {
        let investor = Investor {
            portfolios: (1..=7)
                .map(|i| holding(&format!("AMC {}", i), "Equity", Decimal::from(i * 100)))
                .collect(),
            ..Investor::default()
        };
        let detail = build_investor_detail(investor);
        let names: Vec<&str> = detail.top_amcs.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["AMC 7", "AMC 6", "AMC 5", "AMC 4", "AMC 3"]);
    }

    #[test]
    fn test_no_portfolios() {
        let detail = build_investor_detail(Investor::default());
        assert!(detail.category_allocation.is_empty());
        assert!(detail.top_amcs.is_empty());
        assert!(detail.transactions_table().is_empty());
    }
}
