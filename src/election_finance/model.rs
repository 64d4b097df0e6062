//! The election finance report files.

use serde::{Deserialize, Serialize};

use crate::{
    category::{INCOME_CATEGORY, TransactionKind, categorize_transaction_type, category_label},
    transaction::{Transaction, sort_newest_first},
};

/// Describes the election a report was filed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EfMetadata {
    /// The date of the election.
    pub date: String,
    /// The name of the election.
    pub title: String,
    /// The name of the candidate.
    pub name: String,
}

/// An election finance report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EfData {
    /// The election and candidate.
    pub metadata: EfMetadata,
    /// Income and expenses, in file order until sorted.
    pub transactions: Vec<Transaction>,
}

impl EfData {
    /// Sort the transactions newest first, with undated transactions last.
    pub fn sort_transactions(&mut self) {
        sort_newest_first(&mut self.transactions);
    }

    /// The transactions in the income category.
    pub fn income(&self) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|transaction| transaction.category == INCOME_CATEGORY)
            .cloned()
            .collect()
    }

    /// The transactions in every category except income.
    pub fn expenses(&self) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|transaction| transaction.category != INCOME_CATEGORY)
            .cloned()
            .collect()
    }
}

/// The total and number of transactions for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    /// The display name of the category.
    pub category: String,
    /// The sum of the category's transactions.
    pub total: i64,
    /// The number of transactions in the category.
    pub count: usize,
    /// Classified from the type of the first transaction in the category.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// Summarise `transactions` by category, in the order categories are first seen.
pub fn summarize_by_category(transactions: &[Transaction]) -> Vec<CategorySummary> {
    let mut summaries: Vec<(String, CategorySummary)> = Vec::new();

    for transaction in transactions {
        let position = match summaries
            .iter()
            .position(|(key, _)| *key == transaction.category)
        {
            Some(position) => position,
            None => {
                let kind = categorize_transaction_type(transaction.kind.as_deref().unwrap_or(""));
                summaries.push((
                    transaction.category.clone(),
                    CategorySummary {
                        category: category_label(&transaction.category).to_owned(),
                        total: 0,
                        count: 0,
                        kind,
                    },
                ));
                summaries.len() - 1
            }
        };

        let summary = &mut summaries[position].1;
        summary.total = summary.total.saturating_add(transaction.price);
        summary.count += 1;
    }

    summaries.into_iter().map(|(_, summary)| summary).collect()
}
