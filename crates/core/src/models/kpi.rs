use serde::{Deserialize, Serialize};

/// A row of the key-figures table, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiRow {
    pub label: String,

    /// Formatted figure (currency, percentage or multiple)
    pub value: String,

    /// Recommendation text, "-" when there is none
    pub recommended: String,

    /// Pass/fail for ratio rows, `None` for plain figures
    pub status: Option<bool>,
}
