//! Yearly accounting reports of politicians' political organisations.

mod model;
mod page;

pub use model::{AccountingReports, LedgerEntry, Profile, Report, ReportData};
pub use page::{get_politician_report_page, get_uniformed_report_page};
