//! Create/edit form for investors and its client-side validation.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Investor;
use crate::errors::ValidationError;

lazy_static! {
    /// Loose `local@domain.tld` shape
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex pattern");

    /// Exactly ten ASCII digits
    static ref MOBILE_REGEX: Regex = Regex::new(r"^[0-9]{10}$").expect("Invalid regex pattern");
}

/// Payload for `POST /investors` and `PUT /investors/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorForm {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub pan: String,
    pub risk_profile: String,
    pub investor_type: String,
}

impl Default for InvestorForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            mobile: String::new(),
            pan: String::new(),
            risk_profile: "Moderate".to_string(),
            investor_type: "Individual".to_string(),
        }
    }
}

impl InvestorForm {
    /// Pre-fills the form for editing. Blank profile fields fall back to the
    /// new-investor defaults.
    pub fn from_investor(investor: &Investor) -> Self {
        let defaults = Self::default();
        Self {
            name: investor.name.clone(),
            email: investor.email.clone(),
            mobile: investor.mobile.clone(),
            pan: investor.pan.clone(),
            risk_profile: non_empty_or(&investor.risk_profile, defaults.risk_profile),
            investor_type: non_empty_or(&investor.investor_type, defaults.investor_type),
        }
    }

    /// PAN is always stored upper-cased.
    pub fn set_pan(&mut self, pan: &str) {
        self.pan = pan.to_uppercase();
    }

    pub fn with_pan(mut self, pan: &str) -> Self {
        self.set_pan(pan);
        self
    }

    /// Checks the form and reports the first failing rule only.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("Name", &self.name),
            ("Email", &self.email),
            ("Mobile", &self.mobile),
            ("PAN", &self.pan),
        ];
        if let Some((label, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ValidationError::MissingField((*label).to_string()));
        }

        if !EMAIL_REGEX.is_match(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }

        if !MOBILE_REGEX.is_match(&self.mobile) {
            return Err(ValidationError::InvalidMobile);
        }

        Ok(())
    }
}

fn non_empty_or(value: &str, fallback: String) -> String {
    if value.is_empty() {
        fallback
    } else {
        value.to_string()
    }
}
