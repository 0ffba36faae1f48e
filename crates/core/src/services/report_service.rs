use std::fmt::Write;

use chrono::{Local, NaiveDateTime};

use crate::errors::CoreError;
use crate::format::{
    format_currency, format_percent_badge, format_percentage, format_ratio_multiple,
};
use crate::models::aggregate::{AggregateResult, RatioKind};
use crate::models::controls::{CostControls, LoanControls};
use crate::models::line_item::LineItem;
use crate::services::aggregation_service::AggregationService;
use crate::services::kpi_service::recommendation;
use crate::services::ledger_service::LedgerService;

/// Shown instead of the report when generation fails for any reason.
pub const REPORT_FALLBACK: &str = "The report could not be generated. Please try again.";

/// Timestamp layout of the report's first data line.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders the whole dashboard state as a plain-text report for copying.
///
/// Output is deterministic for a given snapshot and timestamp. The public
/// entry points never fail: any internal error is logged and replaced by
/// [`REPORT_FALLBACK`] so the export can never break the dashboard.
pub struct ReportService {
    aggregation_service: AggregationService,
}

impl ReportService {
    pub fn new() -> Self {
        Self {
            aggregation_service: AggregationService::new(),
        }
    }

    /// Generate the report stamped with the current local time.
    pub fn generate_report(
        &self,
        assets: &[LineItem],
        liabilities: &[LineItem],
        income: &[LineItem],
        loan: &LoanControls,
        costs: &CostControls,
    ) -> String {
        let now = Local::now().naive_local();
        self.generate_report_at(assets, liabilities, income, loan, costs, now)
    }

    /// Generate the report stamped with `timestamp`, falling back to
    /// [`REPORT_FALLBACK`] on failure.
    pub fn generate_report_at(
        &self,
        assets: &[LineItem],
        liabilities: &[LineItem],
        income: &[LineItem],
        loan: &LoanControls,
        costs: &CostControls,
        timestamp: NaiveDateTime,
    ) -> String {
        let result = self
            .aggregation_service
            .recompute(assets, liabilities, income, loan, costs);
        match self.render(assets, liabilities, income, loan, costs, &result, timestamp) {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!(error = %e, "report generation failed; returning fallback text");
                REPORT_FALLBACK.to_string()
            }
        }
    }

    /// Render the report for an already computed `result`.
    ///
    /// Fails with [`CoreError::Report`] when a figure is not a finite number.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &self,
        assets: &[LineItem],
        liabilities: &[LineItem],
        income: &[LineItem],
        loan: &LoanControls,
        costs: &CostControls,
        result: &AggregateResult,
        timestamp: NaiveDateTime,
    ) -> Result<String, CoreError> {
        ensure_finite(result)?;

        let derived_value = LedgerService::derived_asset_value(liabilities);
        let mut out = String::new();

        writeln!(out, "BALANCE SHEET REPORT")?;
        writeln!(out, "Generated: {}", timestamp.format(TIMESTAMP_FORMAT))?;

        writeln!(out)?;
        writeln!(out, "ASSETS")?;
        for asset in assets {
            let value = if asset.is_derived() { derived_value } else { asset.value };
            writeln!(out, "  {}: {}", asset.name, format_currency(value as f64))?;
        }
        writeln!(out, "  Total assets: {}", format_currency(result.total_assets))?;

        writeln!(out)?;
        writeln!(out, "LIABILITIES")?;
        for liability in liabilities {
            writeln!(out, "  {}: {}", liability.name, format_currency(liability.value as f64))?;
        }
        writeln!(out, "  Total liabilities: {}", format_currency(result.total_liabilities))?;
        writeln!(
            out,
            "  Share of total assets: {}",
            format_percent_badge(result.liabilities_percent)
        )?;

        writeln!(out)?;
        writeln!(out, "EQUITY")?;
        writeln!(out, "  Net worth: {}", format_currency(result.net_worth))?;
        writeln!(
            out,
            "  Share of total assets: {}",
            format_percent_badge(result.equity_percent)
        )?;

        writeln!(out)?;
        writeln!(out, "INCOME AND COSTS")?;
        for item in income {
            writeln!(out, "  {}: {}", item.name, format_currency(item.value as f64))?;
        }
        writeln!(out, "  Total income: {}", format_currency(result.total_annual_income))?;
        writeln!(out, "  Annual costs: {}", format_currency(costs.annual_costs as f64))?;
        writeln!(out, "  Annual tax: {}", format_currency(costs.annual_tax as f64))?;
        writeln!(
            out,
            "  Interest and principal per year: {}",
            format_currency(result.total_annual_payment)
        )?;
        writeln!(out, "  Cash flow per year: {}", format_currency(result.annual_cash_flow))?;

        writeln!(out)?;
        writeln!(out, "LOAN")?;
        writeln!(out, "  Interest rate: {}", format_percentage(loan.effective_rate()))?;
        writeln!(out, "  Term: {} years", loan.term_years)?;
        writeln!(out, "  Amortization: {}", loan.amortization_type)?;
        writeln!(
            out,
            "  Mortgage payment per month: {}",
            format_currency(result.mortgage_payment.monthly)
        )?;

        writeln!(out)?;
        writeln!(out, "RATIOS")?;
        for check in result.ratios() {
            let value = match check.kind {
                RatioKind::PaymentToIncome => format_percentage(check.value),
                _ => format_ratio_multiple(check.value),
            };
            let verdict = if check.passed { "OK" } else { "NOT OK" };
            writeln!(
                out,
                "  {}: {} (recommended {}) {}",
                check.kind,
                value,
                recommendation(&check),
                verdict
            )?;
        }
        writeln!(
            out,
            "  Recommended liquidity buffer: {}",
            format_currency(result.recommended_liquidity_buffer)
        )?;

        Ok(out)
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_finite(result: &AggregateResult) -> Result<(), CoreError> {
    let figures = [
        ("total assets", result.total_assets),
        ("total liabilities", result.total_liabilities),
        ("net worth", result.net_worth),
        ("total income", result.total_annual_income),
        ("total payment", result.total_annual_payment),
        ("cash flow", result.annual_cash_flow),
    ];
    match figures.iter().find(|(_, value)| !value.is_finite()) {
        Some((name, value)) => Err(CoreError::Report(format!("{name} is not finite ({value})"))),
        None => Ok(()),
    }
}
