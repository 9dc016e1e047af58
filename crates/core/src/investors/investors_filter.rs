use serde::{Deserialize, Serialize};

use super::Investor;
use crate::constants::FILTER_ALL;

/// Search box plus risk dropdown of the investor list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorFilter {
    pub search: String,
    pub risk_profile: String,
}

impl Default for InvestorFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            risk_profile: FILTER_ALL.to_string(),
        }
    }
}

impl InvestorFilter {
    pub fn new(search: impl Into<String>, risk_profile: Option<String>) -> Self {
        Self {
            search: search.into(),
            risk_profile: risk_profile.unwrap_or_else(|| FILTER_ALL.to_string()),
        }
    }

    /// Case-insensitive substring on name, email or PAN, then an exact risk
    /// profile match unless the filter is `all`.
    pub fn matches(&self, investor: &Investor) -> bool {
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let hit = [&investor.name, &investor.email, &investor.pan]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        self.risk_profile == FILTER_ALL || investor.risk_profile == self.risk_profile
    }

    pub fn apply<'a>(&self, investors: &'a [Investor]) -> Vec<&'a Investor> {
        investors.iter().filter(|inv| self.matches(inv)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn investor(name: &str, email: &str, pan: &str, risk: &str) -> Investor {
        Investor {
            name: name.to_string(),
            email: email.to_string(),
            pan: pan.to_string(),
            risk_profile: risk.to_string(),
            ..Investor::default()
        }
    }

    fn sample() -> Vec<Investor> {
        vec![
            investor("Rohan Mehta", "rohan@example.com", "PAN00001X", "High"),
            investor("Sneha Nair", "sneha@example.com", "PAN00002X", "Low"),
            investor("Vikram Rao", "vikram.rao@corp.in", "PAN00003X", "High"),
        ]
    }

    #[test]
    fn test_default_filter_keeps_everything() {
        let investors = sample();
        assert_eq!(InvestorFilter::default().apply(&investors).len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let investors = sample();
        let by_name = InvestorFilter::new("SNEHA", None).apply(&investors);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Sneha Nair");

        let by_email = InvestorFilter::new("corp.in", None).apply(&investors);
        assert_eq!(by_email[0].name, "Vikram Rao");

        let by_pan = InvestorFilter::new("pan0000", None).apply(&investors);
        assert_eq!(by_pan.len(), 3);
    }

    #[test]
    fn test_risk_filter_is_exact() {
        let investors = sample();
        let high = InvestorFilter::new("", Some("High".to_string())).apply(&investors);
        assert_eq!(high.len(), 2);
        let none = InvestorFilter::new("", Some("high".to_string())).apply(&investors);
        assert!(none.is_empty());
        let both = InvestorFilter::new("rohan", Some("High".to_string())).apply(&investors);
        assert_eq!(both.len(), 1);
    }
}
