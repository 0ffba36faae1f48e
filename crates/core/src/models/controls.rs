use serde::{Deserialize, Serialize};

/// How the primary mortgage is paid down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmortizationType {
    /// Constant total payment, interest share declining over time
    #[default]
    Annuity,
    /// Constant principal repayment, total payment declining over time
    Serial,
    /// Any other value coming from a control. Produces an all-zero payment.
    #[serde(other)]
    Unrecognized,
}

impl std::fmt::Display for AmortizationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AmortizationType::Annuity => write!(f, "annuity"),
            AmortizationType::Serial => write!(f, "serial"),
            AmortizationType::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

impl std::str::FromStr for AmortizationType {
    type Err = std::convert::Infallible;

    /// Never fails: unknown names map to [`AmortizationType::Unrecognized`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "annuity" => AmortizationType::Annuity,
            "serial" => AmortizationType::Serial,
            _ => AmortizationType::Unrecognized,
        })
    }
}

/// Loan parameters supplied on every recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanControls {
    /// Annual interest rate as a fraction (0.05 = 5 %)
    pub annual_interest_rate: f64,

    /// Repayment term in whole years
    pub term_years: u32,

    pub amortization_type: AmortizationType,
}

impl LoanControls {
    pub fn new(annual_interest_rate: f64, term_years: u32, amortization_type: AmortizationType) -> Self {
        Self {
            annual_interest_rate,
            term_years,
            amortization_type,
        }
    }

    /// The rate with non-finite or negative input treated as zero.
    pub fn effective_rate(&self) -> f64 {
        if self.annual_interest_rate.is_finite() && self.annual_interest_rate > 0.0 {
            self.annual_interest_rate
        } else {
            0.0
        }
    }
}

impl Default for LoanControls {
    fn default() -> Self {
        Self {
            annual_interest_rate: 0.05,
            term_years: 25,
            amortization_type: AmortizationType::Annuity,
        }
    }
}

/// Yearly outgoings that reduce cash flow but stay out of the ratios.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostControls {
    #[serde(default)]
    pub annual_costs: u64,

    #[serde(default)]
    pub annual_tax: u64,
}

impl CostControls {
    pub fn new(annual_costs: u64, annual_tax: u64) -> Self {
        Self {
            annual_costs,
            annual_tax,
        }
    }

    pub fn total(&self) -> u64 {
        self.annual_costs.saturating_add(self.annual_tax)
    }
}
