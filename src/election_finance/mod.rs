//! Election finance reports
//!
//! Provides the report page, which breaks a candidate's campaign income and
//! expenses down by purpose, income type and funding source, and a JSON
//! summary of each report.

mod model;
mod page;
mod summary;

pub use model::{CategorySummary, EfData, EfMetadata, summarize_by_category};
pub use page::get_election_finance_page;
pub use summary::get_election_finance_summary;
