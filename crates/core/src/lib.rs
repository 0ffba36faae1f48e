pub mod errors;
pub mod format;
pub mod models;
pub mod services;

use chrono::NaiveDateTime;
use models::{
    aggregate::AggregateResult,
    balance_sheet::BalanceSheet,
    controls::{AmortizationType, CostControls, LoanControls},
    kpi::KpiRow,
    ledger::Ledger,
    line_item::{ItemCollection, LineItem, LineItemPatch},
    settings::{ItemDefaults, Settings},
    snapshot::DashboardSnapshot,
};
use services::{
    aggregation_service::AggregationService, balance_sheet_service::BalanceSheetService,
    kpi_service::KpiService, ledger_service::LedgerService, report_service::ReportService,
};

use errors::CoreError;

/// Longest loan term the term control accepts, in years.
const MAX_TERM_YEARS: u32 = 100;

/// Main entry point for the balance-dashboard core library.
///
/// Owns one session's line items and controls. Every mutation synchronously
/// re-derives the cash-from-financing asset and recomputes the whole
/// [`AggregateResult`] from scratch, so reads never see stale figures.
#[must_use]
pub struct Dashboard {
    ledger: Ledger,
    loan: LoanControls,
    costs: CostControls,
    settings: Settings,
    result: AggregateResult,
    ledger_service: LedgerService,
    aggregation_service: AggregationService,
    balance_sheet_service: BalanceSheetService,
    kpi_service: KpiService,
    report_service: ReportService,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("assets", &self.ledger.assets.len())
            .field("liabilities", &self.ledger.liabilities.len())
            .field("income", &self.ledger.income.len())
            .field("loan", &self.loan)
            .field("costs", &self.costs)
            .field("net_worth", &self.result.net_worth)
            .finish()
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::create_new()
    }
}

impl Dashboard {
    /// Create a dashboard with the default line items and settings.
    pub fn create_new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// Create a dashboard with the default line items and custom settings.
    pub fn with_settings(settings: Settings) -> Self {
        let snapshot = DashboardSnapshot::new(Ledger::with_defaults(), settings.loan, settings.costs);
        Self::build(snapshot, settings)
    }

    /// Restore a dashboard from a previously taken snapshot.
    /// Fails when an id is empty or duplicated within a collection.
    pub fn from_snapshot(snapshot: DashboardSnapshot) -> Result<Self, CoreError> {
        LedgerService::new().validate(&snapshot.ledger)?;
        Ok(Self::build(snapshot, Settings::default()))
    }

    /// Restore a dashboard from JSON produced by [`Dashboard::to_json`].
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let snapshot: DashboardSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    // ── Line Items ──────────────────────────────────────────────────

    /// Add an item with the configured defaults for `kind`. Returns its new id.
    pub fn add_item(&mut self, kind: ItemCollection) -> String {
        let defaults = self.defaults_for(kind).clone();
        let id = self
            .ledger_service
            .add_item(&mut self.ledger, kind, &defaults)
            .last()
            .map(|item| item.id.clone())
            .unwrap_or_default();
        self.refresh();
        id
    }

    /// Edit the name and/or value of an item. Unknown ids are ignored.
    pub fn update_item(&mut self, kind: ItemCollection, id: &str, patch: LineItemPatch) -> &[LineItem] {
        self.ledger_service
            .update_item(&mut self.ledger, kind, id, &patch);
        self.refresh();
        self.ledger.collection(kind)
    }

    /// Remove an item. Unknown ids are ignored.
    pub fn remove_item(&mut self, kind: ItemCollection, id: &str) -> &[LineItem] {
        self.ledger_service
            .remove_item(&mut self.ledger, kind, id);
        self.refresh();
        self.ledger.collection(kind)
    }

    /// Remove an item and hand it back, e.g. for an undo buffer.
    ///
    /// Unlike [`Dashboard::remove_item`] this reports unknown ids, and refuses
    /// the derived cash-from-financing asset.
    pub fn take_item(&mut self, kind: ItemCollection, id: &str) -> Result<LineItem, CoreError> {
        let item = self
            .ledger
            .find(kind, id)
            .cloned()
            .ok_or_else(|| CoreError::ItemNotFound(format!("{kind}/{id}")))?;
        if item.is_derived() {
            return Err(CoreError::ValidationError(
                "The cash-from-financing asset is derived and cannot be removed".into(),
            ));
        }

        self.ledger_service.remove_item(&mut self.ledger, kind, id);
        self.refresh();
        Ok(item)
    }

    pub fn add_asset(&mut self) -> String {
        self.add_item(ItemCollection::Assets)
    }

    pub fn add_liability(&mut self) -> String {
        self.add_item(ItemCollection::Liabilities)
    }

    pub fn add_income(&mut self) -> String {
        self.add_item(ItemCollection::Income)
    }

    /// Set an item's value from a raw control reading (NaN and negatives become 0).
    pub fn set_item_value(&mut self, kind: ItemCollection, id: &str, value: f64) -> &[LineItem] {
        self.update_item(kind, id, LineItemPatch::new().value(value))
    }

    pub fn rename_item(&mut self, kind: ItemCollection, id: &str, name: impl Into<String>) -> &[LineItem] {
        self.update_item(kind, id, LineItemPatch::new().name(name))
    }

    #[must_use]
    pub fn assets(&self) -> &[LineItem] {
        &self.ledger.assets
    }

    #[must_use]
    pub fn liabilities(&self) -> &[LineItem] {
        &self.ledger.liabilities
    }

    #[must_use]
    pub fn income(&self) -> &[LineItem] {
        &self.ledger.income
    }

    #[must_use]
    pub fn get_item(&self, kind: ItemCollection, id: &str) -> Option<&LineItem> {
        self.ledger.find(kind, id)
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    // ── Controls ────────────────────────────────────────────────────

    /// Set the annual interest rate as a fraction (0.05 = 5 %).
    /// Non-finite or negative values are stored as 0.
    pub fn set_interest_rate(&mut self, annual_rate: f64) {
        self.loan.annual_interest_rate = if annual_rate.is_finite() && annual_rate > 0.0 {
            annual_rate
        } else {
            0.0
        };
        self.refresh();
    }

    /// Set the interest rate from a percentage control, e.g. `4.5` → 0.045.
    pub fn set_interest_rate_percent(&mut self, percent: f64) {
        self.set_interest_rate(percent / 100.0);
    }

    /// Set the loan term in years, capped at 100.
    pub fn set_term_years(&mut self, years: u32) {
        self.loan.term_years = years.min(MAX_TERM_YEARS);
        self.refresh();
    }

    pub fn set_amortization_type(&mut self, amortization_type: AmortizationType) {
        self.loan.amortization_type = amortization_type;
        self.refresh();
    }

    pub fn set_annual_costs(&mut self, value: f64) {
        self.costs.annual_costs = format::coerce_value(value);
        self.refresh();
    }

    pub fn set_annual_tax(&mut self, value: f64) {
        self.costs.annual_tax = format::coerce_value(value);
        self.refresh();
    }

    /// Replace both loan and cost controls at once.
    pub fn set_controls(&mut self, loan: LoanControls, costs: CostControls) {
        self.loan = loan;
        self.costs = costs;
        self.refresh();
    }

    #[must_use]
    pub fn loan_controls(&self) -> &LoanControls {
        &self.loan
    }

    #[must_use]
    pub fn cost_controls(&self) -> &CostControls {
        &self.costs
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Results ─────────────────────────────────────────────────────

    /// The result of the latest recomputation.
    #[must_use]
    pub fn result(&self) -> &AggregateResult {
        &self.result
    }

    /// Recompute from the current state without mutating it.
    #[must_use]
    pub fn recompute(&self) -> AggregateResult {
        self.aggregation_service.recompute(
            &self.ledger.assets,
            &self.ledger.liabilities,
            &self.ledger.income,
            &self.loan,
            &self.costs,
        )
    }

    /// Both sides of the T-account for the current state.
    #[must_use]
    pub fn balance_sheet(&self) -> BalanceSheet {
        self.balance_sheet_service
            .build(&self.ledger.assets, &self.ledger.liabilities, &self.result)
    }

    /// The key-figures table for the current state.
    #[must_use]
    pub fn kpi_rows(&self) -> Vec<KpiRow> {
        self.kpi_service.rows(&self.result)
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Plain-text report stamped with the current time. Never fails.
    #[must_use]
    pub fn report(&self) -> String {
        self.report_service.generate_report(
            &self.ledger.assets,
            &self.ledger.liabilities,
            &self.ledger.income,
            &self.loan,
            &self.costs,
        )
    }

    /// Plain-text report stamped with `timestamp`. Never fails.
    #[must_use]
    pub fn report_at(&self, timestamp: NaiveDateTime) -> String {
        self.report_service.generate_report_at(
            &self.ledger.assets,
            &self.ledger.liabilities,
            &self.ledger.income,
            &self.loan,
            &self.costs,
            timestamp,
        )
    }

    /// A copy of the current input state.
    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot::new(self.ledger.clone(), self.loan, self.costs)
    }

    /// Export the current input state as pretty JSON.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize dashboard: {e}")))
    }

    /// Export every line item as CSV.
    /// Columns: collection, id, name, value, max, color
    #[must_use]
    pub fn export_items_to_csv(&self) -> String {
        let mut csv = String::from("collection,id,name,value,max,color\n");
        for kind in [
            ItemCollection::Assets,
            ItemCollection::Liabilities,
            ItemCollection::Income,
        ] {
            for item in self.ledger.collection(kind) {
                csv.push_str(&format!(
                    "{},{},{},{},{},{}\n",
                    kind,
                    escape_csv(&item.id),
                    escape_csv(&item.name),
                    item.value,
                    item.max,
                    escape_csv(&item.color),
                ));
            }
        }
        csv
    }

    // ── Internal ────────────────────────────────────────────────────

    fn defaults_for(&self, kind: ItemCollection) -> &ItemDefaults {
        match kind {
            ItemCollection::Assets => &self.settings.new_asset,
            ItemCollection::Liabilities => &self.settings.new_liability,
            ItemCollection::Income => &self.settings.new_income,
        }
    }

    /// Derive the cash-from-financing asset, then recompute everything.
    fn refresh(&mut self) {
        self.ledger_service.sync_derived_asset(&mut self.ledger);
        self.result = self.recompute();
    }

    fn build(snapshot: DashboardSnapshot, settings: Settings) -> Self {
        let DashboardSnapshot {
            mut ledger,
            loan,
            costs,
        } = snapshot;
        let ledger_service = LedgerService::new();
        let aggregation_service = AggregationService::new();

        ledger_service.sync_derived_asset(&mut ledger);
        let result = aggregation_service.recompute(
            &ledger.assets,
            &ledger.liabilities,
            &ledger.income,
            &loan,
            &costs,
        );

        Self {
            ledger,
            loan,
            costs,
            settings,
            result,
            ledger_service,
            aggregation_service,
            balance_sheet_service: BalanceSheetService::new(),
            kpi_service: KpiService::new(),
            report_service: ReportService::new(),
        }
    }
}

/// Quote a CSV field when it contains a comma, quote or newline.
fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
