//! The election finance report page.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    aggregation::{Grouping, Totals},
    charts::{ECHARTS_SCRIPT, ReportChart, chart_container, charts_script, funding_chart},
    data::DataSource,
    election_finance::model::{EfData, EfMetadata},
    endpoints,
    html::{BOARD_STYLE, HeadElement, PAGE_CONTAINER_STYLE, base, format_yen},
    navigation::NavBar,
    transaction_section::{BadgeColor, TransactionSection},
};

const FUNDING_CHART_ID: &str = "funding-chart";

/// Display the election finance report `name`.
///
/// Unknown or unreadable reports are shown as a 404 page.
pub async fn get_election_finance_page(
    State(data): State<DataSource>,
    Path(name): Path<String>,
) -> Result<Response, Error> {
    let mut report = data.load_election_finance(&name).await?;
    report.sort_transactions();

    Ok(election_finance_view(&report).into_response())
}

fn election_finance_view(report: &EfData) -> Markup {
    let totals = Totals::from_transactions(&report.transactions);
    let income = report.income();
    let expenses = report.expenses();

    let sections = [
        TransactionSection {
            id: "expense-by-purpose",
            title: "支出目的で見る",
            transactions: &expenses,
            grouping: Grouping::ByCategory,
            badge_color: BadgeColor::Red,
            localise_categories: true,
            heading_suffix: Some("費"),
        },
        TransactionSection {
            id: "income-by-type",
            title: "収入で見る",
            transactions: &income,
            grouping: Grouping::ByType,
            badge_color: BadgeColor::Green,
            localise_categories: true,
            heading_suffix: None,
        },
        TransactionSection {
            id: "expense-by-funding",
            title: "公費で見る",
            transactions: &expenses,
            grouping: Grouping::PublicPrivateSplit,
            badge_color: BadgeColor::Blue,
            localise_categories: false,
            heading_suffix: None,
        },
    ];

    let funding_chart = ReportChart::new(FUNDING_CHART_ID, &funding_chart(&totals));
    let (section_views, mut charts): (Vec<Markup>, Vec<ReportChart>) =
        sections.iter().map(TransactionSection::render).unzip();

    let header = summary_view(&report.metadata, &totals, &funding_chart);
    charts.insert(0, funding_chart);

    let nav_bar = NavBar::new(endpoints::ELECTION_FINANCE_VIEW, true).into_html();
    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (header)

            @for section in &section_views {
                (section)
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
        charts_script(&charts),
    ];

    base(
        &format!("{} 選挙運動費用収支報告", report.metadata.name),
        &scripts,
        &content,
    )
}

fn summary_view(metadata: &EfMetadata, totals: &Totals, funding_chart: &ReportChart) -> Markup {
    let total_style = "text-xl font-bold";
    let amounts = [
        ("収入", totals.total_income, "text-blue-500"),
        ("公費", totals.total_expense_public, "text-purple-500"),
        ("支出", totals.total_expense, "text-red-500"),
        ("繰越", totals.carryover, "text-green-500"),
    ];

    html!(
        section id="summary" class=(BOARD_STYLE)
        {
            h1 class="text-2xl font-bold mb-4" { "選挙運動費用収支報告" }

            dl class="grid grid-cols-[80px_1fr] gap-2 mb-4"
            {
                dt class="font-bold text-gray-700 dark:text-gray-300" { "対象" }
                dd { (metadata.title) }
                dt class="font-bold text-gray-700 dark:text-gray-300" { "執行" }
                dd { (metadata.date) }
                dt class="font-bold text-gray-700 dark:text-gray-300" { "候補者" }
                dd { (metadata.name) }
            }

            div class="flex flex-col md:flex-row gap-6 w-full"
            {
                (chart_container(funding_chart, "h-[200px] w-full"))

                div class="grid grid-cols-2 md:flex md:flex-col gap-4 md:min-w-[200px]"
                {
                    @for (label, amount, color) in amounts {
                        div
                        {
                            p class="text-sm" { (label) }
                            p class={ (total_style) " " (color) } data-total=(label)
                            {
                                (format_yen(amount))
                            }
                        }
                    }
                }
            }
        }
    )
}
