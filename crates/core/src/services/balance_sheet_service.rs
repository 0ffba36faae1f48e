use crate::models::aggregate::AggregateResult;
use crate::models::balance_sheet::{BalanceSegment, BalanceSheet};
use crate::models::line_item::LineItem;
use crate::services::ledger_service::LedgerService;

/// Colour of the liabilities bar on the financing side.
pub const LIABILITIES_COLOR: &str = "#D9576F";

/// Colour of the equity bar on the financing side.
pub const EQUITY_COLOR: &str = "#52CC7B";

/// Lays out both sides of the T-account from the line items and a result.
pub struct BalanceSheetService;

impl BalanceSheetService {
    pub fn new() -> Self {
        Self
    }

    /// Build the T-account segments.
    ///
    /// Left side: every asset with a positive value, sized against the sum of
    /// all asset values. Right side: liabilities (if positive) then equity
    /// (if positive), sized against liabilities + net worth.
    pub fn build(
        &self,
        assets: &[LineItem],
        liabilities: &[LineItem],
        result: &AggregateResult,
    ) -> BalanceSheet {
        let derived_value = LedgerService::derived_asset_value(liabilities);
        let asset_values: Vec<(&LineItem, f64)> = assets
            .iter()
            .map(|a| {
                let value = if a.is_derived() { derived_value } else { a.value };
                (a, value as f64)
            })
            .collect();
        let asset_total: f64 = asset_values.iter().map(|(_, v)| v).sum();

        let assets = asset_values
            .into_iter()
            .filter(|(_, value)| *value > 0.0)
            .map(|(item, value)| BalanceSegment {
                id: item.id.clone(),
                label: item.name.clone(),
                value,
                share_pct: share(value, asset_total),
                color: item.color.clone(),
            })
            .collect();

        let financing_total = result.total_liabilities + result.net_worth;
        let mut financing = Vec::with_capacity(2);
        if result.total_liabilities > 0.0 {
            financing.push(BalanceSegment {
                id: "liabilities".into(),
                label: "Liabilities".into(),
                value: result.total_liabilities,
                share_pct: share(result.total_liabilities, financing_total),
                color: LIABILITIES_COLOR.into(),
            });
        }
        if result.net_worth > 0.0 {
            financing.push(BalanceSegment {
                id: "equity".into(),
                label: "Equity".into(),
                value: result.net_worth,
                share_pct: share(result.net_worth, financing_total),
                color: EQUITY_COLOR.into(),
            });
        }

        BalanceSheet { assets, financing }
    }
}

impl Default for BalanceSheetService {
    fn default() -> Self {
        Self::new()
    }
}

fn share(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value / total * 100.0
    } else {
        0.0
    }
}
