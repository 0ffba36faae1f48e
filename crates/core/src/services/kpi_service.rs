use crate::format::{format_currency, format_percentage, format_ratio_multiple};
use crate::models::aggregate::{AggregateResult, RatioCheck, RatioKind};
use crate::models::kpi::KpiRow;

/// Builds the key-figures table shown next to the T-account.
pub struct KpiService;

impl KpiService {
    pub fn new() -> Self {
        Self
    }

    /// The nine table rows in display order: five plain figures followed by
    /// the four ratio checks.
    pub fn rows(&self, result: &AggregateResult) -> Vec<KpiRow> {
        vec![
            figure("Total income", result.total_annual_income),
            figure("Annual costs", result.total_annual_costs),
            figure("Interest and principal per year", result.total_annual_payment),
            figure("Cash flow per year", result.annual_cash_flow),
            KpiRow {
                label: "Recommended liquidity buffer".into(),
                value: format_currency(0.0),
                recommended: format_currency(result.recommended_liquidity_buffer),
                status: None,
            },
            ratio_row(&result.income_to_debt, format_ratio_multiple(result.income_to_debt.value)),
            ratio_row(
                &result.payment_to_income,
                format_percentage(result.payment_to_income.value),
            ),
            ratio_row(&result.loan_to_income, format_ratio_multiple(result.loan_to_income.value)),
            ratio_row(&result.debt_to_equity, format_ratio_multiple(result.debt_to_equity.value)),
        ]
    }
}

impl Default for KpiService {
    fn default() -> Self {
        Self::new()
    }
}

/// Human-readable recommendation for a ratio, e.g. `> 20%` or `< 2.5x`.
pub fn recommendation(check: &RatioCheck) -> String {
    match check.kind {
        RatioKind::IncomeToDebt => format!("> {:.0}%", check.threshold * 100.0),
        RatioKind::PaymentToIncome => format!("< {:.0}%", check.threshold * 100.0),
        RatioKind::LoanToIncome | RatioKind::DebtToEquity => format!("< {}x", check.threshold),
    }
}

fn figure(label: &str, value: f64) -> KpiRow {
    KpiRow {
        label: label.into(),
        value: format_currency(value),
        recommended: "-".into(),
        status: None,
    }
}

fn ratio_row(check: &RatioCheck, value: String) -> KpiRow {
    KpiRow {
        label: check.kind.to_string(),
        value,
        recommended: recommendation(check),
        status: Some(check.passed),
    }
}
