//! A report section that breaks a list of transactions down into buckets.
//!
//! Each section shows a donut chart of the buckets, a legend with the value of
//! each bucket, and a collapsible list of the transactions in each bucket.

use maud::{Markup, html};

use crate::{
    aggregation::{Aggregation, Grouping, aggregate},
    category::category_label,
    charts::{ReportChart, chart_container, donut_chart},
    html::{BOARD_STYLE, format_yen},
    transaction::Transaction,
};

/// The colour of the value badges in a section's legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    /// Used for expenses.
    Red,
    /// Used for income.
    Green,
    /// Used for the funding source split.
    Blue,
}

impl BadgeColor {
    fn class(self) -> &'static str {
        match self {
            BadgeColor::Red => {
                "text-red-800 border-red-300 bg-red-50 dark:bg-red-900 dark:text-red-300"
            }
            BadgeColor::Green => {
                "text-green-800 border-green-300 bg-green-50 dark:bg-green-900 dark:text-green-300"
            }
            BadgeColor::Blue => {
                "text-blue-800 border-blue-300 bg-blue-50 dark:bg-blue-900 dark:text-blue-300"
            }
        }
    }
}

/// A section of a report page.
pub struct TransactionSection<'a> {
    /// Used to derive the HTML IDs of the section and its chart.
    pub id: &'a str,
    /// The section heading.
    pub title: &'a str,
    /// The transactions to aggregate.
    pub transactions: &'a [Transaction],
    /// How the transactions are bucketed.
    pub grouping: Grouping,
    /// The colour of the legend badges.
    pub badge_color: BadgeColor,
    /// Show category keys by their display name.
    pub localise_categories: bool,
    /// Appended to the bucket headings in the detail list, e.g. "費".
    pub heading_suffix: Option<&'a str>,
}

impl TransactionSection<'_> {
    /// Aggregate the section's transactions and render the section.
    ///
    /// Returns the section markup and the chart that must be initialised for
    /// it with [crate::charts::charts_script].
    pub fn render(&self) -> (Markup, ReportChart) {
        let mut aggregation = aggregate(self.transactions, self.grouping);

        if self.localise_categories {
            for aggregate in &mut aggregation.aggregates {
                aggregate.label = category_label(&aggregate.id).to_owned();
            }
        }

        let chart = ReportChart::new(&format!("{}-chart", self.id), &donut_chart(&aggregation));
        let markup = self.view(&aggregation, &chart);

        (markup, chart)
    }

    fn heading(&self, label: &str) -> String {
        match self.heading_suffix {
            Some(suffix) => format!("{label}{suffix}"),
            None => label.to_owned(),
        }
    }

    fn view(&self, aggregation: &Aggregation<'_>, chart: &ReportChart) -> Markup {
        html!(
            section id=(self.id) class=(BOARD_STYLE)
            {
                h2 class="text-xl font-bold mb-4" { (self.title) }

                div class="grid grid-cols-1 md:grid-cols-2 gap-4 items-center"
                {
                    (chart_container(chart, "min-h-[300px]"))

                    ul class="space-y-2"
                    {
                        @for (aggregate, color) in aggregation.aggregates.iter().zip(&aggregation.colors) {
                            li class="flex items-center justify-between gap-2"
                            {
                                span class="flex items-center gap-2"
                                {
                                    span
                                        class="inline-block w-3 h-3 rounded-full"
                                        style={ "background-color: " (color) }
                                    {}
                                    span { (aggregate.label) }
                                }

                                span
                                    class={
                                        "px-2.5 py-0.5 text-xs font-semibold rounded-full border "
                                        (self.badge_color.class())
                                    }
                                {
                                    (format_yen(aggregate.value))
                                }
                            }
                        }
                    }
                }

                details class="mt-6"
                {
                    summary
                        class="px-6 py-2 rounded-full cursor-pointer font-bold text-sm
                            text-white bg-violet-600 hover:bg-violet-700"
                    {
                        "詳しく見る"
                    }

                    div class="mt-2 p-4 space-y-4 rounded-lg bg-violet-50 dark:bg-gray-700"
                    {
                        @for (aggregate, color) in aggregation.aggregates.iter().zip(&aggregation.colors) {
                            div
                            {
                                div class="flex items-center justify-between mb-2 pl-2 pr-4"
                                {
                                    div class="flex items-center gap-2 font-bold"
                                    {
                                        span
                                            class="inline-block w-3 h-3 rounded-full"
                                            style={ "background-color: " (color) }
                                        {}
                                        h3 { (self.heading(&aggregate.label)) }
                                    }

                                    span class="font-bold text-gray-700 dark:text-gray-200"
                                    {
                                        (format_yen(aggregate.value))
                                    }
                                }

                                ul class="p-2 rounded-lg bg-white dark:bg-gray-800 divide-y
                                    divide-gray-200 dark:divide-gray-600"
                                {
                                    @for transaction in aggregation.groups.get(&aggregate.id) {
                                        (transaction_entry(
                                            transaction,
                                            aggregation.member_amount(&aggregate.id, transaction),
                                        ))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        )
    }
}

fn transaction_entry(transaction: &Transaction, amount: i64) -> Markup {
    html!(
        li class="p-2 flex flex-col gap-1" data-id=(transaction.data_id)
        {
            span class="hidden md:block text-sm text-gray-600 dark:text-gray-400"
            {
                (transaction.date.as_deref().unwrap_or("-"))
            }

            span class="flex justify-between items-start w-full text-sm"
            {
                span { (transaction.purpose.as_deref().unwrap_or("-")) }
                span class="font-bold" { (format_yen(amount)) }
            }

            @if let Some(note) = &transaction.note {
                span class="text-xs text-gray-500 dark:text-gray-400" { "【備考】" (note) }
            }
        }
    )
}
