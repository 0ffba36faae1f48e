use serde::{Deserialize, Serialize};

/// One bar in the T-account visualization.
///
/// Values and shares are final; a frontend only has to draw them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSegment {
    /// Line-item id, or "liabilities" / "equity" on the financing side
    pub id: String,

    pub label: String,

    pub value: f64,

    /// Share of its side of the T-account, in percent
    pub share_pct: f64,

    pub color: String,
}

/// Both sides of the T-account: what is owned, and how it is financed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Assets with a positive value, in registry order
    pub assets: Vec<BalanceSegment>,

    /// Liabilities and equity, each only present when positive
    pub financing: Vec<BalanceSegment>,
}
