pub mod aggregation_service;
pub mod balance_sheet_service;
pub mod kpi_service;
pub mod ledger_service;
pub mod loan_service;
pub mod report_service;
