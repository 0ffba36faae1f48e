use serde::{Deserialize, Serialize};

/// First-year payment figures for an amortized loan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanPayment {
    /// Payment per month in the first year
    pub monthly: f64,

    /// Total payment over the first year
    pub annual: f64,

    /// Interest part of the first-year payment
    pub interest: f64,

    /// Principal (repayment) part of the first-year payment
    pub principal: f64,
}

impl LoanPayment {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

/// Fixed recommendation limits for the four health ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioThresholds {
    /// Income / debt must be at least this
    pub income_to_debt_min: f64,
    /// Annual payment / income must be at most this
    pub payment_to_income_max: f64,
    /// Debt / income must be at most this
    pub loan_to_income_max: f64,
    /// Debt / equity must be at most this
    pub debt_to_equity_max: f64,
}

/// The engine's thresholds. Not user-configurable.
pub const RATIO_THRESHOLDS: RatioThresholds = RatioThresholds {
    income_to_debt_min: 0.20,
    payment_to_income_max: 0.30,
    loan_to_income_max: 5.0,
    debt_to_equity_max: 2.5,
};

/// The four financial health ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatioKind {
    IncomeToDebt,
    PaymentToIncome,
    LoanToIncome,
    DebtToEquity,
}

impl std::fmt::Display for RatioKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatioKind::IncomeToDebt => write!(f, "Income / debt"),
            RatioKind::PaymentToIncome => write!(f, "Interest and principal / income"),
            RatioKind::LoanToIncome => write!(f, "Debt / income"),
            RatioKind::DebtToEquity => write!(f, "Debt / equity"),
        }
    }
}

/// A computed ratio together with its pass/fail verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioCheck {
    pub kind: RatioKind,

    /// The ratio, or 0 when its denominator is zero (or not positive for debt/equity)
    pub value: f64,

    /// The limit the ratio is compared against
    pub threshold: f64,

    /// `false` whenever the denominator guard kicked in
    pub passed: bool,
}

/// Everything the dashboard derives from one snapshot of inputs.
///
/// Recomputed from scratch on every mutation; holds no incremental state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Sum of all assets, including the derived cash-from-financing asset
    pub total_assets: f64,

    pub total_liabilities: f64,

    /// Total assets minus total liabilities (may be negative)
    pub net_worth: f64,

    /// Same figure as `net_worth`
    pub equity: f64,

    pub total_annual_income: f64,

    /// Annual costs plus annual tax
    pub total_annual_costs: f64,

    /// First-year figures for the primary mortgage
    pub mortgage_payment: LoanPayment,

    /// Interest on every liability other than the primary mortgage
    pub interest_only_others: f64,

    /// Mortgage annual payment plus interest on the other liabilities
    pub total_annual_payment: f64,

    /// Income minus costs minus payments
    pub annual_cash_flow: f64,

    /// Two months of gross income
    pub recommended_liquidity_buffer: f64,

    pub income_to_debt: RatioCheck,
    pub payment_to_income: RatioCheck,
    pub loan_to_income: RatioCheck,
    pub debt_to_equity: RatioCheck,

    /// Net worth as a percentage of total assets (0 when there are no assets)
    pub equity_percent: f64,

    /// Liabilities as a percentage of total assets (0 when there are no assets)
    pub liabilities_percent: f64,
}

impl AggregateResult {
    /// The four ratio checks in display order.
    pub fn ratios(&self) -> [RatioCheck; 4] {
        [
            self.income_to_debt,
            self.payment_to_income,
            self.loan_to_income,
            self.debt_to_equity,
        ]
    }

    /// Whether net worth should be shown as negative (red).
    pub fn is_net_worth_negative(&self) -> bool {
        self.net_worth < 0.0
    }

    /// Number of ratio checks that pass.
    pub fn passed_count(&self) -> usize {
        self.ratios().iter().filter(|r| r.passed).count()
    }
}
