use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::controls::{CostControls, LoanControls};

/// Name, value and range given to a newly added line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefaults {
    pub name: String,
    pub value: u64,
    pub max: u64,
    pub color: String,
}

impl ItemDefaults {
    pub fn new(name: impl Into<String>, value: u64, max: u64, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            max,
            color: color.into(),
        }
    }
}

/// Session configuration: starting controls and new-item defaults.
///
/// Every field is optional in JSON and falls back to [`Settings::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Loan controls a fresh dashboard starts with
    pub loan: LoanControls,

    /// Cost controls a fresh dashboard starts with
    pub costs: CostControls,

    pub new_asset: ItemDefaults,
    pub new_liability: ItemDefaults,
    pub new_income: ItemDefaults,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            loan: LoanControls::default(),
            costs: CostControls::default(),
            new_asset: ItemDefaults::new("New asset", 1_000_000, 10_000_000, "#447DF7"),
            new_liability: ItemDefaults::new("New debt", 100_000, 1_000_000, "#F66380"),
            new_income: ItemDefaults::new("New income", 0, 1_000_000, "#A5D6A7"),
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| CoreError::InvalidSettings(format!("Failed to parse settings: {e}")))?;
        settings.validate()?;
        tracing::debug!(
            rate = settings.loan.annual_interest_rate,
            term_years = settings.loan.term_years,
            amortization = %settings.loan.amortization_type,
            "settings loaded"
        );
        Ok(settings)
    }

    /// Serialize settings to pretty JSON.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize settings: {e}")))
    }

    /// Check that the starting controls are usable.
    pub fn validate(&self) -> Result<(), CoreError> {
        let rate = self.loan.annual_interest_rate;
        if !rate.is_finite() || rate < 0.0 {
            return Err(CoreError::InvalidSettings(format!(
                "Interest rate must be a non-negative number, got {rate}"
            )));
        }
        if self.loan.term_years == 0 {
            return Err(CoreError::InvalidSettings(
                "Loan term must be at least one year".into(),
            ));
        }
        for defaults in [&self.new_asset, &self.new_liability, &self.new_income] {
            if defaults.value > defaults.max {
                return Err(CoreError::InvalidSettings(format!(
                    "Default value {} for '{}' exceeds its maximum {}",
                    defaults.value, defaults.name, defaults.max
                )));
            }
        }
        Ok(())
    }
}
