//! Typed view of the backend's AI analysis payload.
//!
//! The backend runs its algorithms and returns a loosely-shaped JSON object.
//! Every section here is optional, and the accessors on [`Analysis`] hand out
//! a section's named defaults when it is absent, so rendering code never has
//! to probe the raw payload.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::serde_utils::{lenient_count, lenient_decimal, lenient_string, null_as_empty};

pub const NO_SUMMARY_TEXT: &str = "No summary available";

/// Result of `POST /ai/run/:investor_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiRunResult {
    pub analysis: Analysis,
    pub summary: AiSummary,
}

/// Result of `GET /ai/summary/:investor_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CachedAnalysis {
    #[serde(deserialize_with = "lenient_string")]
    pub investor_id: String,
    #[serde(alias = "analysis_result")]
    pub analysis: Analysis,
    pub ai_summary: AiSummary,
    pub created_at: Option<String>,
}

/// Natural-language summary written by the language model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSummary {
    pub summary: Option<String>,
}

impl AiSummary {
    pub fn text(&self) -> &str {
        match self.summary.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => NO_SUMMARY_TEXT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Analysis {
    pub investor_id: Option<String>,
    pub name: Option<String>,
    pub performance: Option<PerformanceSection>,
    pub diversification: Option<DiversificationSection>,
    pub risk_mismatch: Option<RiskMismatchSection>,
    pub concentration: Option<ConcentrationSection>,
    pub sip_health: Option<SipHealthSection>,
    pub sip_discontinuation: Option<SipDiscontinuationSection>,
    pub churn_risk: Option<ChurnRiskSection>,
    pub rebalancing_recommendations: Option<SuggestionsSection>,
    pub performance_suggestions: Option<SuggestionsSection>,
    /// Sections without a typed counterpart (allocation, goal forecast, ...)
    #[serde(flatten)]
    pub other_sections: BTreeMap<String, serde_json::Value>,
}

impl Analysis {
    pub fn performance(&self) -> PerformanceSection {
        self.performance.clone().unwrap_or_default()
    }

    pub fn diversification(&self) -> DiversificationSection {
        self.diversification.clone().unwrap_or_default()
    }

    pub fn risk_mismatch(&self) -> RiskMismatchSection {
        self.risk_mismatch.clone().unwrap_or_default()
    }

    pub fn concentration_alerts(&self) -> &[ConcentrationAlert] {
        self.concentration
            .as_ref()
            .map(|c| c.alerts.as_slice())
            .unwrap_or(&[])
    }

    pub fn sip_health(&self) -> SipHealthSection {
        self.sip_health.clone().unwrap_or_default()
    }

    pub fn sip_discontinuation(&self) -> SipDiscontinuationSection {
        self.sip_discontinuation.clone().unwrap_or_default()
    }

    pub fn churn_risk(&self) -> ChurnRiskSection {
        self.churn_risk.clone().unwrap_or_default()
    }

    pub fn rebalancing_suggestions(&self) -> &[String] {
        self.rebalancing_recommendations
            .as_ref()
            .map(|s| s.suggestions.as_slice())
            .unwrap_or(&[])
    }

    pub fn performance_suggestions(&self) -> &[String] {
        self.performance_suggestions
            .as_ref()
            .map(|s| s.suggestions.as_slice())
            .unwrap_or(&[])
    }

    /// Raw JSON of a section the typed model does not cover.
    pub fn raw_section(&self, key: &str) -> Option<&serde_json::Value> {
        self.other_sections.get(key)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PerformanceSection {
    #[serde(deserialize_with = "lenient_decimal")]
    pub invested: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub value: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub gain_loss: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiversificationSection {
    #[serde(deserialize_with = "lenient_decimal")]
    pub diversification_score: Decimal,
    #[serde(deserialize_with = "lenient_count")]
    pub amc_count: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub cat_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RiskMismatchSection {
    #[serde(deserialize_with = "lenient_decimal")]
    pub equity_share: Decimal,
    pub alert: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcentrationSection {
    #[serde(deserialize_with = "null_as_empty")]
    pub alerts: Vec<ConcentrationAlert>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcentrationAlert {
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub alert_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub amc: String,
    #[serde(deserialize_with = "lenient_decimal")]
    pub pct: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SipHealthSection {
    #[serde(deserialize_with = "lenient_count")]
    pub active: u32,
}

/// Severity band used to colour SIP discontinuation risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SipDiscontinuationSection {
    #[serde(deserialize_with = "lenient_count")]
    pub sip_count: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub missed_count: u32,
    pub risk: String,
    #[serde(deserialize_with = "lenient_count")]
    pub high_risk_count: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub medium_risk_count: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub low_risk_count: u32,
}

impl Default for SipDiscontinuationSection {
    fn default() -> Self {
        Self {
            sip_count: 0,
            missed_count: 0,
            risk: "Low".to_string(),
            high_risk_count: 0,
            medium_risk_count: 0,
            low_risk_count: 0,
        }
    }
}

impl SipDiscontinuationSection {
    pub fn band(&self) -> RiskBand {
        match self.risk.as_str() {
            "Very High" | "High" => RiskBand::High,
            "Medium" => RiskBand::Medium,
            _ => RiskBand::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChurnRiskSection {
    pub churn_risk: String,
    #[serde(deserialize_with = "lenient_decimal")]
    pub score: Decimal,
}

impl Default for ChurnRiskSection {
    fn default() -> Self {
        Self {
            churn_risk: "Low".to_string(),
            score: Decimal::ZERO,
        }
    }
}

impl ChurnRiskSection {
    pub fn is_high(&self) -> bool {
        self.churn_risk == "High"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionsSection {
    #[serde(deserialize_with = "null_as_empty")]
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_full_run_result_decodes() {
        let json = r#"{
            "analysis": {
                "investor_id": "INV0007",
                "name": "Meera Joshi",
                "performance": {"invested": 250000, "value": 281250.5, "gainLoss": 12.5},
                "diversification": {"amcCount": 4, "catCount": 3, "diversificationScore": 72},
                "risk_mismatch": {"equityShare": 82.1, "alert": "Risk Mismatch: Equity 82.1% but profile Low"},
                "concentration": {"totals": {"HDFC Mutual Fund": 120000}, "alerts": [
                    {"type": "HighAMCConcentration", "amc": "HDFC Mutual Fund", "pct": 42.67}
                ]},
                "sip_health": {"active": 2, "details": []},
                "sip_discontinuation": {"sipCount": 2, "missedCount": 1, "risk": "High"},
                "churn_risk": {"churnRisk": "High", "score": 0.6},
                "rebalancing_recommendations": {"suggestions": ["Reduce equity exposure by 10-15%"]},
                "goal_forecast": {"status": "NoGoalDeclared"}
            },
            "summary": {"summary": "Healthy portfolio with concentration risk."}
        }"#;
        let result: AiRunResult = serde_json::from_str(json).unwrap();
        let analysis = &result.analysis;

        assert_eq!(analysis.performance().gain_loss, dec!(12.5));
        assert_eq!(analysis.diversification().amc_count, 4);
        assert!(analysis.risk_mismatch().alert.is_some());
        assert_eq!(analysis.concentration_alerts().len(), 1);
        assert_eq!(analysis.concentration_alerts()[0].pct, dec!(42.67));
        assert_eq!(analysis.sip_discontinuation().band(), RiskBand::High);
        assert!(analysis.churn_risk().is_high());
        assert_eq!(analysis.rebalancing_suggestions().len(), 1);
        assert_eq!(
            analysis.raw_section("goal_forecast"),
            Some(&serde_json::json!({"status": "NoGoalDeclared"}))
        );
        assert_eq!(result.summary.text(), "Healthy portfolio with concentration risk.");
    }

    #[test]
    fn test_absent_sections_use_named_defaults() {
        let result: AiRunResult = serde_json::from_str(r#"{"analysis": {}}"#).unwrap();
        let analysis = &result.analysis;

        assert_eq!(analysis.performance(), PerformanceSection::default());
        assert_eq!(analysis.diversification().diversification_score, Decimal::ZERO);
        assert_eq!(analysis.risk_mismatch().alert, None);
        assert!(analysis.concentration_alerts().is_empty());
        assert_eq!(analysis.sip_health().active, 0);
        assert_eq!(analysis.sip_discontinuation().risk, "Low");
        assert_eq!(analysis.churn_risk().churn_risk, "Low");
        assert!(analysis.rebalancing_suggestions().is_empty());
        assert_eq!(result.summary.text(), NO_SUMMARY_TEXT);
    }

    #[test]
    fn test_risk_band() {
        let mut section = SipDiscontinuationSection::default();
        assert_eq!(section.band(), RiskBand::Low);
        section.risk = "Very High".to_string();
        assert_eq!(section.band(), RiskBand::High);
        section.risk = "Medium".to_string();
        assert_eq!(section.band(), RiskBand::Medium);
    }

    #[test]
    fn test_cached_analysis_accepts_stored_field_name() {
        let json = r#"{
            "investor_id": "INV0007",
            "analysis_result": {"performance": {"gainLoss": -4.2}},
            "ai_summary": {"summary": "Review losing funds."},
            "created_at": "2024-05-01T10:00:00+00:00"
        }"#;
        let cached: CachedAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(cached.analysis.performance().gain_loss, dec!(-4.2));
        assert_eq!(cached.ai_summary.text(), "Review losing funds.");
    }

    #[test]
    fn test_loose_counts_do_not_reject_run_result() {
        let json = r#"{
            "analysis": {
                "diversification": {"amcCount": null, "catCount": 3.0, "diversificationScore": 55},
                "sip_health": {"active": "4"},
                "sip_discontinuation": {"sipCount": 4.0, "missedCount": null, "risk": "Medium"}
            },
            "summary": {"summary": "Steady."}
        }"#;
        let result: AiRunResult = serde_json::from_str(json).unwrap();
        let diversification = result.analysis.diversification();
        assert_eq!(diversification.amc_count, 0);
        assert_eq!(diversification.cat_count, 3);
        assert_eq!(result.analysis.sip_health().active, 4);
        let discontinuation = result.analysis.sip_discontinuation();
        assert_eq!(discontinuation.sip_count, 4);
        assert_eq!(discontinuation.missed_count, 0);
        assert_eq!(discontinuation.band(), RiskBand::Medium);
    }
}
