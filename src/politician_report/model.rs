//! The accounting report files published for each politician.

use serde::Deserialize;

use crate::{
    category::TransactionKind,
    transaction::{Transaction, yen_format},
};

/// Every yearly accounting report of one politician.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountingReports {
    /// The politician's ID.
    pub id: String,
    /// The ID of the most recent entry in `data`.
    pub latest_report_id: String,
    /// Who the reports are about.
    pub profile: Profile,
    /// One entry per year.
    pub data: Vec<ReportData>,
}

impl AccountingReports {
    /// The report and transactions for `year`, if there is one.
    pub fn report_for_year(&self, year: i32) -> Option<&ReportData> {
        self.data.iter().find(|data| data.report.year == year)
    }

    /// The report whose ID is [AccountingReports::latest_report_id], if any.
    pub fn latest_report(&self) -> Option<&ReportData> {
        self.data
            .iter()
            .find(|data| data.report.id == self.latest_report_id)
    }

    /// The reports of every year, in file order.
    pub fn reports(&self) -> impl Iterator<Item = &Report> {
        self.data.iter().map(|data| &data.report)
    }
}

/// The politician a set of reports is about.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    /// Full name.
    pub name: String,
    /// The politician's position, e.g. a council seat.
    #[serde(default)]
    pub title: String,
    /// Party affiliation, empty for independents.
    #[serde(default)]
    pub party: String,
    /// The URL of a portrait.
    #[serde(default)]
    pub image: Option<String>,
}

/// The summary of one year's report, as filed with the election commission.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Report {
    /// Unique across all of a politician's reports.
    pub id: String,
    /// 収入総額
    #[serde(deserialize_with = "yen_format::deserialize")]
    pub total_income: i64,
    /// 支出総額
    #[serde(deserialize_with = "yen_format::deserialize")]
    pub total_expense: i64,
    /// 翌年への繰越額
    #[serde(deserialize_with = "yen_format::deserialize")]
    pub total_balance: i64,
    /// The year the report covers.
    pub year: i32,
    /// 政治団体の区分
    pub org_type: String,
    /// 政治団体の名称
    pub org_name: String,
    /// 活動区域
    pub activity_area: String,
    /// 代表者
    pub representative: String,
    /// 資金管理団体の指定
    pub fund_management_org: String,
    /// 会計責任者
    pub accounting_manager: String,
    /// 事務担当者
    pub administrative_manager: String,
    /// When the report was last updated.
    pub last_update: String,
}

/// One year's report with its transactions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportData {
    /// The year's summary.
    pub report: Report,
    /// The year's income and expenses.
    #[serde(default)]
    pub transactions: Vec<LedgerEntry>,
}

impl ReportData {
    /// The transactions that went in the direction `direction`, in file order.
    pub fn transactions(&self, direction: TransactionKind) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|entry| entry.direction == direction)
            .map(|entry| entry.transaction.clone())
            .collect()
    }
}

/// A transaction in an accounting report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LedgerEntry {
    /// The line item.
    #[serde(flatten)]
    pub transaction: Transaction,
    /// Whether the line item is income or an expense.
    pub direction: TransactionKind,
}
