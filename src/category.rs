//! Display names for the categories used in election finance reports.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The category key for income in election finance reports.
pub const INCOME_CATEGORY: &str = "income";

/// The categories that election finance reports may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// 収入
    Income,
    /// 人件費
    Personnel,
    /// 家屋費
    Building,
    /// 通信費
    Communication,
    /// 交通費
    Transportation,
    /// 印刷費
    Printing,
    /// 広告費
    Advertising,
    /// 文具費
    Stationery,
    /// 食料費
    Food,
    /// 休泊費
    Accommodation,
    /// 雑費
    Miscellaneous,
}

impl Category {
    /// Every category, in the order they appear in a report.
    pub const ALL: [Category; 11] = [
        Category::Income,
        Category::Personnel,
        Category::Building,
        Category::Communication,
        Category::Transportation,
        Category::Printing,
        Category::Advertising,
        Category::Stationery,
        Category::Food,
        Category::Accommodation,
        Category::Miscellaneous,
    ];

    /// The key used in report files.
    pub fn key(self) -> &'static str {
        match self {
            Category::Income => INCOME_CATEGORY,
            Category::Personnel => "personnel",
            Category::Building => "building",
            Category::Communication => "communication",
            Category::Transportation => "transportation",
            Category::Printing => "printing",
            Category::Advertising => "advertising",
            Category::Stationery => "stationery",
            Category::Food => "food",
            Category::Accommodation => "accommodation",
            Category::Miscellaneous => "miscellaneous",
        }
    }

    /// The Japanese display name.
    pub fn label(self) -> &'static str {
        match self {
            Category::Income => "収入",
            Category::Personnel => "人件",
            Category::Building => "家屋",
            Category::Communication => "通信",
            Category::Transportation => "交通",
            Category::Printing => "印刷",
            Category::Advertising => "広告",
            Category::Stationery => "文具",
            Category::Food => "食料",
            Category::Accommodation => "休泊",
            Category::Miscellaneous => "雑費",
        }
    }

    /// Find the category with the key `key`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.key() == key)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Get the display name for the category `key`.
///
/// Keys that are not a known [Category] are returned as is.
pub fn category_label(key: &str) -> &str {
    match Category::from_key(key) {
        Some(category) => category.label(),
        None => key,
    }
}

/// Whether a transaction type counts as income or expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
}

/// The transaction types that are counted as income.
const INCOME_TYPES: [&str; 2] = ["その他の収入", "寄附"];

/// Classify a transaction type, e.g. "寄附", as income or expense.
///
/// Anything that is not a known income type is an expense.
pub fn categorize_transaction_type(kind: &str) -> TransactionKind {
    if INCOME_TYPES.contains(&kind) {
        TransactionKind::Income
    } else {
        TransactionKind::Expense
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, TransactionKind, categorize_transaction_type, category_label};

    #[test]
    fn known_keys_map_to_japanese_labels() {
        assert_eq!(category_label("income"), "収入");
        assert_eq!(category_label("personnel"), "人件");
        assert_eq!(category_label("miscellaneous"), "雑費");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        assert_eq!(category_label("donations"), "donations");
        assert_eq!(category_label(""), "");
    }

    #[test]
    fn keys_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_key(category.key()), Some(category));
        }
    }

    #[test]
    fn classifies_income_types() {
        assert_eq!(categorize_transaction_type("寄附"), TransactionKind::Income);
        assert_eq!(
            categorize_transaction_type("その他の収入"),
            TransactionKind::Income
        );
        assert_eq!(categorize_transaction_type("人件費"), TransactionKind::Expense);
        assert_eq!(categorize_transaction_type(""), TransactionKind::Expense);
    }
}
