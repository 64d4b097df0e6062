//! Transaction aggregation for charts and lists.
//!
//! Groups transactions into buckets, sums each bucket, orders the buckets for
//! display and assigns each bucket a chart colour. Also derives the summary
//! totals of a report.
//!
//! Everything in this module is a pure function of its input: running an
//! aggregation twice over the same transactions in the same order yields the
//! same buckets, values and colours.

use std::collections::HashMap;

use serde::Serialize;

use crate::{category::INCOME_CATEGORY, transaction::Transaction};

/// The label of the bucket for the publicly funded part of expenses.
pub const PUBLIC_LABEL: &str = "公費";
/// The label of the bucket for the privately funded part of expenses.
pub const PRIVATE_LABEL: &str = "自費";

/// The chart colours, assigned to buckets in display order.
pub const PALETTE: [&str; 6] = [
    "#e8c1a0", "#f47560", "#f1e15b", "#e8a838", "#61cdbb", "#97e3d5",
];

/// How transactions are assigned to buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// One bucket per category.
    ByCategory,
    /// One bucket per transaction type, falling back to the category for
    /// transactions without a type.
    ByType,
    /// Two buckets: the publicly funded and the privately funded parts of each
    /// transaction.
    ///
    /// A transaction that is partly publicly funded is listed in both buckets.
    PublicPrivateSplit,
}

/// The summed value and display identity of one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryAggregate {
    /// The grouping key.
    pub id: String,
    /// The name shown in legends and charts.
    pub label: String,
    /// The summed amount in yen.
    pub value: i64,
}

impl CategoryAggregate {
    fn new(key: &str, value: i64) -> Self {
        Self {
            id: key.to_owned(),
            label: key.to_owned(),
            value,
        }
    }
}

/// Transactions grouped by bucket key.
///
/// Keys are kept in the order they were first seen and the transactions in
/// each group keep their source order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GroupedTransactions<'a> {
    groups: Vec<(String, Vec<&'a Transaction>)>,
    index: HashMap<String, usize>,
}

impl<'a> GroupedTransactions<'a> {
    /// Add `transaction` to the group `key`, creating the group if needed.
    fn push(&mut self, key: &str, transaction: &'a Transaction) {
        match self.index.get(key) {
            Some(&position) => self.groups[position].1.push(transaction),
            None => {
                self.index.insert(key.to_owned(), self.groups.len());
                self.groups.push((key.to_owned(), vec![transaction]));
            }
        }
    }

    /// The transactions in the group `key`, empty if there is no such group.
    pub fn get(&self, key: &str) -> &[&'a Transaction] {
        self.index
            .get(key)
            .map(|&position| self.groups[position].1.as_slice())
            .unwrap_or(&[])
    }

    /// The group keys in the order they were first seen.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(key, _)| key.as_str())
    }

    /// The number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no transaction was put in any group.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// The result of aggregating a list of transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation<'a> {
    /// The grouping that produced this aggregation.
    pub grouping: Grouping,
    /// One entry per bucket in display order.
    pub aggregates: Vec<CategoryAggregate>,
    /// The transactions that make up each bucket.
    pub groups: GroupedTransactions<'a>,
    /// The chart colour of each entry in `aggregates`.
    pub colors: Vec<&'static str>,
}

impl Aggregation<'_> {
    /// The chart colour for the bucket `id`, or the first palette colour if
    /// there is no such bucket.
    pub fn color_of(&self, id: &str) -> &'static str {
        self.aggregates
            .iter()
            .position(|aggregate| aggregate.id == id)
            .map(|position| self.colors[position])
            .unwrap_or(PALETTE[0])
    }

    /// The sum of all bucket values.
    pub fn total(&self) -> i64 {
        self.aggregates
            .iter()
            .fold(0, |total, aggregate| total.saturating_add(aggregate.value))
    }

    /// The amount that `transaction` contributes to the bucket `key`.
    pub fn member_amount(&self, key: &str, transaction: &Transaction) -> i64 {
        match self.grouping {
            Grouping::PublicPrivateSplit if key == PUBLIC_LABEL => public_part(transaction),
            Grouping::PublicPrivateSplit => private_part(transaction),
            Grouping::ByCategory | Grouping::ByType => transaction.price,
        }
    }
}

/// Aggregate `transactions` into buckets according to `grouping`.
pub fn aggregate(transactions: &[Transaction], grouping: Grouping) -> Aggregation<'_> {
    let (aggregates, groups) = match grouping {
        Grouping::ByCategory => {
            group_by(transactions, |transaction| transaction.category.as_str())
        }
        Grouping::ByType => group_by(transactions, type_or_category),
        Grouping::PublicPrivateSplit => split_public_private(transactions),
    };
    let colors = assign_colors(&aggregates);

    Aggregation {
        grouping,
        aggregates,
        groups,
        colors,
    }
}

/// Pick a colour for each aggregate by its position, cycling through [PALETTE].
pub fn assign_colors(aggregates: &[CategoryAggregate]) -> Vec<&'static str> {
    (0..aggregates.len())
        .map(|index| PALETTE[index % PALETTE.len()])
        .collect()
}

fn type_or_category(transaction: &Transaction) -> &str {
    match transaction.kind.as_deref() {
        Some(kind) if !kind.is_empty() => kind,
        _ => &transaction.category,
    }
}

fn group_by<'a>(
    transactions: &'a [Transaction],
    get_key: impl Fn(&'a Transaction) -> &'a str,
) -> (Vec<CategoryAggregate>, GroupedTransactions<'a>) {
    let mut groups = GroupedTransactions::default();

    for transaction in transactions {
        groups.push(get_key(transaction), transaction);
    }

    let mut aggregates: Vec<CategoryAggregate> = groups
        .groups
        .iter()
        .map(|(key, members)| {
            let value = members
                .iter()
                .fold(0i64, |total, member| total.saturating_add(member.price));
            CategoryAggregate::new(key, value)
        })
        .collect();

    // `sort_by` is stable, so ties keep the order the keys were first seen.
    aggregates.sort_by(|a, b| b.value.cmp(&a.value));

    (aggregates, groups)
}

fn public_part(transaction: &Transaction) -> i64 {
    transaction.public_expense_amount.unwrap_or(0)
}

fn private_part(transaction: &Transaction) -> i64 {
    transaction
        .price
        .saturating_sub(public_part(transaction))
        .max(0)
}

fn split_public_private(
    transactions: &[Transaction],
) -> (Vec<CategoryAggregate>, GroupedTransactions<'_>) {
    let mut groups = GroupedTransactions::default();
    let mut public_total = 0i64;
    let mut private_total = 0i64;

    for transaction in transactions {
        let public_amount = public_part(transaction);
        let private_amount = private_part(transaction);

        if public_amount > 0 {
            groups.push(PUBLIC_LABEL, transaction);
            public_total = public_total.saturating_add(public_amount);
        }

        if private_amount > 0 || (public_amount == 0 && transaction.price > 0) {
            groups.push(PRIVATE_LABEL, transaction);
            private_total = private_total.saturating_add(private_amount);
        }
    }

    let aggregates = vec![
        CategoryAggregate::new(PUBLIC_LABEL, public_total),
        CategoryAggregate::new(PRIVATE_LABEL, private_total),
    ];

    (aggregates, groups)
}

/// The summary totals of a report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// The sum of income transactions.
    pub total_income: i64,
    /// The sum of all other transactions.
    pub total_expense: i64,
    /// The part of `total_expense` that was paid for with public money.
    pub total_expense_public: i64,
    /// What is left after expenses are paid for with income and public money.
    ///
    /// May be negative.
    pub carryover: i64,
}

impl Totals {
    /// Calculate the totals for `transactions`.
    ///
    /// Transactions in the income category count as income, everything else
    /// counts as an expense. Sums saturate at the bounds of `i64`.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut totals = Totals::default();

        for transaction in transactions {
            if transaction.category == INCOME_CATEGORY {
                totals.total_income = totals.total_income.saturating_add(transaction.price);
            } else {
                totals.total_expense = totals.total_expense.saturating_add(transaction.price);
                totals.total_expense_public = totals
                    .total_expense_public
                    .saturating_add(public_part(transaction));
            }
        }

        totals.carryover = totals
            .total_income
            .saturating_add(totals.total_expense_public)
            .saturating_sub(totals.total_expense);

        totals
    }
}
