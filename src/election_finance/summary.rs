//! The JSON summary of an election finance report.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::{
    Error,
    aggregation::Totals,
    data::DataSource,
    election_finance::model::{CategorySummary, EfMetadata, summarize_by_category},
};

/// The JSON summary of an election finance report.
#[derive(Debug, Serialize)]
pub struct ElectionFinanceSummary {
    /// The election and candidate.
    pub metadata: EfMetadata,
    /// The report's totals.
    pub totals: Totals,
    /// One entry per category, in first-seen order.
    pub categories: Vec<CategorySummary>,
}

/// Get the totals and per-category summaries of the election finance report `name`.
pub async fn get_election_finance_summary(
    State(data): State<DataSource>,
    Path(name): Path<String>,
) -> Result<Json<ElectionFinanceSummary>, Error> {
    let report = data.load_election_finance(&name).await?;

    Ok(Json(ElectionFinanceSummary {
        totals: Totals::from_transactions(&report.transactions),
        categories: summarize_by_category(&report.transactions),
        metadata: report.metadata,
    }))
}
