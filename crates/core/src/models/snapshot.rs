use serde::{Deserialize, Serialize};

use super::controls::{CostControls, LoanControls};
use super::ledger::Ledger;

/// The complete input state of one session at a point in time.
///
/// Everything the engine needs to produce an `AggregateResult`, and the
/// unit of JSON import/export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub ledger: Ledger,

    #[serde(default)]
    pub loan: LoanControls,

    #[serde(default)]
    pub costs: CostControls,
}

impl DashboardSnapshot {
    pub fn new(ledger: Ledger, loan: LoanControls, costs: CostControls) -> Self {
        Self { ledger, loan, costs }
    }
}
