//! Promo-code discounts.

use std::collections::HashMap;

use serde::Serialize;

/// Error returned for a promo code that is not in the table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid promo code: {code}")]
pub struct PromoError {
    pub code: String,
}

/// Known promo codes and their discount rates.
///
/// Codes are matched case-insensitively after trimming.
#[derive(Debug, Clone)]
pub struct PromoCodes {
    rates: HashMap<String, f64>,
}

impl PromoCodes {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            rates: HashMap::new(),
        }
    }

    /// Add a code with a discount rate in [0, 1].
    pub fn with_code(mut self, code: &str, rate: f64) -> Self {
        self.rates
            .insert(normalize(code), rate.clamp(0.0, 1.0));
        self
    }

    /// Discount rate for a code.
    pub fn rate(&self, code: &str) -> Result<f64, PromoError> {
        self.rates
            .get(&normalize(code))
            .copied()
            .ok_or_else(|| PromoError {
                code: code.trim().to_string(),
            })
    }

    /// Resolve an optional code to the outcome reported on a quote.
    pub fn apply(&self, code: Option<&str>) -> PromoOutcome {
        let Some(code) = code.filter(|c| !c.trim().is_empty()) else {
            return PromoOutcome::None;
        };

        match self.rate(code) {
            Ok(rate) => PromoOutcome::Applied {
                code: normalize(code),
                rate,
            },
            Err(e) => PromoOutcome::Rejected { code: e.code },
        }
    }
}

impl Default for PromoCodes {
    fn default() -> Self {
        Self::new()
            .with_code("SUMMER20", 0.20)
            .with_code("WELCOME10", 0.10)
            .with_code("STUDENT15", 0.15)
    }
}

/// What happened to the promo code supplied with a quote request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PromoOutcome {
    /// No code was supplied
    None,
    /// The code was recognised and its discount applied
    Applied { code: String, rate: f64 },
    /// The code was not recognised; no discount applied
    Rejected { code: String },
}

impl PromoOutcome {
    /// Discount rate to apply to the subtotal.
    pub fn rate(&self) -> f64 {
        match self {
            PromoOutcome::Applied { rate, .. } => *rate,
            PromoOutcome::None | PromoOutcome::Rejected { .. } => 0.0,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, PromoOutcome::Rejected { .. })
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}
