pub mod aggregate;
pub mod balance_sheet;
pub mod controls;
pub mod kpi;
pub mod ledger;
pub mod line_item;
pub mod settings;
pub mod snapshot;
