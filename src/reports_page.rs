//! The index page that lists every available report.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use maud::{Markup, html};

use crate::{
    auth::is_signed_in,
    data::{DataSource, ReportKind, ReportListing},
    endpoints::{self, format_endpoint},
    html::{
        BOARD_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base,
    },
    navigation::NavBar,
};

/// Display the report index.
///
/// Uniformed reports are only listed for signed in viewers.
pub async fn get_reports_page(State(data): State<DataSource>, jar: PrivateCookieJar) -> Response {
    let signed_in = is_signed_in(&jar);

    let politician_reports = data.list_politician_reports(ReportKind::Standard).await;
    let uniformed_reports = if signed_in {
        data.list_politician_reports(ReportKind::Uniformed).await
    } else {
        Vec::new()
    };
    let election_finance_names = data.list_election_finance_names().await;

    let nav_bar = NavBar::new(endpoints::REPORTS_VIEW, signed_in).into_html();
    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (politician_reports_view(
                "politician-reports",
                "政治資金収支報告書",
                &politician_reports,
                endpoints::POLITICIAN_REPORT_VIEW,
            ))

            @if signed_in {
                (politician_reports_view(
                    "uniformed-reports",
                    "政治資金収支報告書 (統一形式)",
                    &uniformed_reports,
                    endpoints::UNIFORMED_REPORT_VIEW,
                ))
            }

            (election_finance_view(&election_finance_names, signed_in))
        }
    );

    base("レポート一覧", &[], &content).into_response()
}

fn politician_reports_view(
    id: &str,
    title: &str,
    listings: &[ReportListing],
    endpoint: &str,
) -> Markup {
    html!(
        section id=(id) class=(BOARD_STYLE)
        {
            h2 class="text-xl font-bold mb-4" { (title) }

            @if listings.is_empty() {
                p class="text-gray-500" { "レポートがありません。" }
            } @else {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "政治家" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "年" }
                        }
                    }

                    tbody
                    {
                        @for listing in listings {
                            @let year = listing.year.to_string();
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td class=(TABLE_CELL_STYLE) { (listing.name) }
                                td class=(TABLE_CELL_STYLE)
                                {
                                    a
                                        href=(format_endpoint(endpoint, &[listing.politician_id.as_str(), year.as_str()]))
                                        class=(LINK_STYLE)
                                    {
                                        (year) "年"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}

fn election_finance_view(names: &[String], signed_in: bool) -> Markup {
    html!(
        section id="election-finance-reports" class=(BOARD_STYLE)
        {
            h2 class="text-xl font-bold mb-4" { "選挙運動費用収支報告書" }

            @if !signed_in {
                p class="text-sm text-gray-500 mb-2" { "閲覧にはログインが必要です。" }
            }

            @if names.is_empty() {
                p class="text-gray-500" { "レポートがありません。" }
            } @else {
                ul class="list-disc list-inside space-y-1"
                {
                    @for name in names {
                        li
                        {
                            a
                                href=(format_endpoint(endpoints::ELECTION_FINANCE_VIEW, &[name.as_str()]))
                                class=(LINK_STYLE)
                            {
                                (name)
                            }
                        }
                    }
                }
            }
        }
    )
}
