use crate::models::aggregate::{AggregateResult, RatioCheck, RatioKind, RATIO_THRESHOLDS};
use crate::models::controls::{CostControls, LoanControls};
use crate::models::line_item::{LineItem, PRIMARY_MORTGAGE_ID};
use crate::services::ledger_service::LedgerService;
use crate::services::loan_service::LoanService;

/// Turns a snapshot of line items and controls into totals, payments,
/// cash flow and the four health ratios.
///
/// `recompute` is a pure function of its inputs: the same snapshot always
/// yields the same (bit-identical) result.
pub struct AggregationService {
    loan_service: LoanService,
}

impl AggregationService {
    pub fn new() -> Self {
        Self {
            loan_service: LoanService::new(),
        }
    }

    /// Recompute every derived figure from scratch.
    ///
    /// The derived cash-from-financing asset is counted at the other-debt
    /// liability's value no matter what value it currently carries, so a
    /// stale snapshot still produces consistent totals.
    pub fn recompute(
        &self,
        assets: &[LineItem],
        liabilities: &[LineItem],
        income: &[LineItem],
        loan: &LoanControls,
        costs: &CostControls,
    ) -> AggregateResult {
        let derived_value = LedgerService::derived_asset_value(liabilities);

        // 1–4. Totals
        let total_assets: f64 = assets
            .iter()
            .map(|a| {
                if a.is_derived() {
                    derived_value as f64
                } else {
                    a.value as f64
                }
            })
            .sum();
        let total_liabilities = sum_values(liabilities);
        let total_annual_income = sum_values(income);
        let net_worth = total_assets - total_liabilities;
        let equity = net_worth;

        // 5–7. Payments: full amortization on the mortgage, interest only on the rest
        let rate = loan.effective_rate();
        let mortgage_value = liabilities
            .iter()
            .find(|l| l.id == PRIMARY_MORTGAGE_ID)
            .map(|l| l.value as f64)
            .unwrap_or(0.0);
        let mortgage_payment = self.loan_service.compute_loan_payment(
            mortgage_value,
            rate,
            loan.term_years,
            loan.amortization_type,
        );
        let interest_only_others: f64 = liabilities
            .iter()
            .filter(|l| l.id != PRIMARY_MORTGAGE_ID)
            .map(|l| l.value as f64 * rate)
            .sum();
        let total_annual_payment = mortgage_payment.annual + interest_only_others;

        // 8–10. Cash flow
        let total_annual_costs = costs.total() as f64;
        let annual_cash_flow = total_annual_income - total_annual_costs - total_annual_payment;
        let recommended_liquidity_buffer = (total_annual_income / 12.0) * 2.0;

        // 11. Ratios, each guarded against a zero denominator
        let income_to_debt = {
            let value = if total_liabilities > 0.0 {
                total_annual_income / total_liabilities
            } else {
                0.0
            };
            RatioCheck {
                kind: RatioKind::IncomeToDebt,
                value,
                threshold: RATIO_THRESHOLDS.income_to_debt_min,
                passed: total_liabilities > 0.0 && value >= RATIO_THRESHOLDS.income_to_debt_min,
            }
        };
        let payment_to_income = {
            let value = if total_annual_income > 0.0 {
                total_annual_payment / total_annual_income
            } else {
                0.0
            };
            RatioCheck {
                kind: RatioKind::PaymentToIncome,
                value,
                threshold: RATIO_THRESHOLDS.payment_to_income_max,
                passed: total_annual_income > 0.0
                    && value <= RATIO_THRESHOLDS.payment_to_income_max,
            }
        };
        let loan_to_income = {
            let value = if total_annual_income > 0.0 {
                total_liabilities / total_annual_income
            } else {
                0.0
            };
            RatioCheck {
                kind: RatioKind::LoanToIncome,
                value,
                threshold: RATIO_THRESHOLDS.loan_to_income_max,
                passed: total_annual_income > 0.0 && value <= RATIO_THRESHOLDS.loan_to_income_max,
            }
        };
        // Negative equity is a valid displayed state, but it never passes here.
        let debt_to_equity = {
            let value = if equity > 0.0 {
                total_liabilities / equity
            } else {
                0.0
            };
            RatioCheck {
                kind: RatioKind::DebtToEquity,
                value,
                threshold: RATIO_THRESHOLDS.debt_to_equity_max,
                passed: equity > 0.0 && value <= RATIO_THRESHOLDS.debt_to_equity_max,
            }
        };

        // 12. Badges
        let (equity_percent, liabilities_percent) = if total_assets > 0.0 {
            (
                net_worth / total_assets * 100.0,
                total_liabilities / total_assets * 100.0,
            )
        } else {
            (0.0, 0.0)
        };

        tracing::debug!(
            total_assets,
            total_liabilities,
            net_worth,
            total_annual_income,
            total_annual_payment,
            annual_cash_flow,
            "recomputed dashboard"
        );

        AggregateResult {
            total_assets,
            total_liabilities,
            net_worth,
            equity,
            total_annual_income,
            total_annual_costs,
            mortgage_payment,
            interest_only_others,
            total_annual_payment,
            annual_cash_flow,
            recommended_liquidity_buffer,
            income_to_debt,
            payment_to_income,
            loan_to_income,
            debt_to_equity,
            equity_percent,
            liabilities_percent,
        }
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}

fn sum_values(items: &[LineItem]) -> f64 {
    items.iter().map(|item| item.value as f64).sum()
}
