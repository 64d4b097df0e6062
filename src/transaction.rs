//! The transaction model shared by every report format.
//!
//! A transaction is a single income or expense line item. Transactions are
//! loaded once from a report file and never modified afterwards.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// The date format used in report files, e.g. "2024-10-27".
const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

pub(crate) mod yen_format {
    //! Deserializes amounts of money as whole yen.
    //!
    //! Report files are generated from spreadsheets, so an amount may arrive as
    //! a float such as `1200.0` or `99.5`. Floats are rounded half away from
    //! zero, and those outside the range of `i64` saturate at its bounds.
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Integer(i64),
        Float(f64),
    }

    impl From<RawAmount> for i64 {
        fn from(value: RawAmount) -> Self {
            match value {
                RawAmount::Integer(amount) => amount,
                RawAmount::Float(amount) => amount.round() as i64,
            }
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawAmount::deserialize(deserializer).map(i64::from)
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<RawAmount>::deserialize(deserializer).map(|amount| amount.map(i64::from))
    }
}

/// A single income or expense line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Identifies the transaction within its report.
    pub data_id: String,

    /// The date of the transaction, e.g. "2024-10-27", if it was recorded.
    #[serde(default)]
    pub date: Option<String>,

    /// The category key, e.g. "personnel".
    pub category: String,

    /// What the money was spent on or received for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,

    /// The amount in whole yen.
    #[serde(deserialize_with = "yen_format::deserialize")]
    pub price: i64,

    /// Free text written in the report's 備考 column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// A finer grained classification than the category, e.g. "寄附".
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// The part of `price` that was paid for with public money.
    #[serde(
        default,
        deserialize_with = "yen_format::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub public_expense_amount: Option<i64>,

    /// How a non-monetary contribution was valued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_monetary_basis: Option<String>,
}

impl Transaction {
    /// Create a transaction with only the required fields set.
    pub fn build(data_id: &str, category: &str, price: i64) -> Self {
        Self {
            data_id: data_id.to_owned(),
            date: None,
            category: category.to_owned(),
            purpose: None,
            price,
            note: None,
            kind: None,
            public_expense_amount: None,
            non_monetary_basis: None,
        }
    }

    /// Set the date.
    pub fn date(mut self, date: &str) -> Self {
        self.date = Some(date.to_owned());
        self
    }

    /// Set the purpose.
    pub fn purpose(mut self, purpose: &str) -> Self {
        self.purpose = Some(purpose.to_owned());
        self
    }

    /// Set the note.
    pub fn note(mut self, note: &str) -> Self {
        self.note = Some(note.to_owned());
        self
    }

    /// Set the type.
    pub fn kind(mut self, kind: &str) -> Self {
        self.kind = Some(kind.to_owned());
        self
    }

    /// Set the amount paid for with public money.
    pub fn public_expense_amount(mut self, amount: i64) -> Self {
        self.public_expense_amount = Some(amount);
        self
    }

    /// The transaction date, or `None` if it is missing or not a valid date.
    pub fn parsed_date(&self) -> Option<Date> {
        self.date
            .as_deref()
            .and_then(|date| Date::parse(date, DATE_FORMAT).ok())
    }
}

/// Sort `transactions` newest first.
///
/// Transactions without a valid date are placed last, in their original order.
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| match (a.parsed_date(), b.parsed_date()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
