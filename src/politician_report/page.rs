//! The page for one year of a politician's accounting reports.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use maud::{Markup, html};

use crate::{
    Error,
    aggregation::Grouping,
    auth::is_signed_in,
    category::TransactionKind,
    charts::{ECHARTS_SCRIPT, ReportChart, charts_script},
    data::{DataSource, ReportKind},
    endpoints::{self, format_endpoint},
    html::{
        BOARD_STYLE, HeadElement, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_yen,
    },
    navigation::NavBar,
    politician_report::model::{AccountingReports, Profile, Report, ReportData},
    transaction::sort_newest_first,
    transaction_section::{BadgeColor, TransactionSection},
};

/// Display one year of a politician's published accounting reports.
///
/// Unknown politicians and years are shown as a 404 page.
pub async fn get_politician_report_page(
    State(data): State<DataSource>,
    jar: PrivateCookieJar,
    Path((politician_id, year)): Path<(String, String)>,
) -> Result<Response, Error> {
    let signed_in = is_signed_in(&jar);

    report_page(&data, ReportKind::Standard, &politician_id, &year, signed_in).await
}

/// Display one year of a politician's uniformed accounting reports.
///
/// Only reachable behind the auth guard, so the viewer is always signed in.
pub async fn get_uniformed_report_page(
    State(data): State<DataSource>,
    Path((politician_id, year)): Path<(String, String)>,
) -> Result<Response, Error> {
    report_page(&data, ReportKind::Uniformed, &politician_id, &year, true).await
}

async fn report_page(
    data: &DataSource,
    kind: ReportKind,
    politician_id: &str,
    year: &str,
    signed_in: bool,
) -> Result<Response, Error> {
    let year: i32 = year.parse().map_err(|_| Error::NotFound)?;
    let reports = data.load_politician_reports(kind, politician_id).await?;
    let report_data = reports.report_for_year(year).ok_or(Error::NotFound)?;

    Ok(report_view(&reports, report_data, kind, signed_in).into_response())
}

fn endpoint_for(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Standard => endpoints::POLITICIAN_REPORT_VIEW,
        ReportKind::Uniformed => endpoints::UNIFORMED_REPORT_VIEW,
    }
}

fn report_view(
    reports: &AccountingReports,
    report_data: &ReportData,
    kind: ReportKind,
    signed_in: bool,
) -> Markup {
    let report = &report_data.report;
    let mut income = report_data.transactions(TransactionKind::Income);
    let mut expenses = report_data.transactions(TransactionKind::Expense);
    sort_newest_first(&mut income);
    sort_newest_first(&mut expenses);

    let sections = [
        TransactionSection {
            id: "income",
            title: "収入",
            transactions: &income,
            grouping: Grouping::ByCategory,
            badge_color: BadgeColor::Green,
            localise_categories: false,
            heading_suffix: None,
        },
        TransactionSection {
            id: "expense",
            title: "支出",
            transactions: &expenses,
            grouping: Grouping::ByCategory,
            badge_color: BadgeColor::Red,
            localise_categories: false,
            heading_suffix: None,
        },
    ];
    let (section_views, charts): (Vec<Markup>, Vec<ReportChart>) =
        sections.iter().map(TransactionSection::render).unzip();

    let nav_bar = NavBar::new(endpoint_for(kind), signed_in).into_html();
    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (profile_view(&reports.profile))
            (summary_view(report))
            (year_links(reports, report.year, kind))

            @for section in &section_views {
                (section)
            }

            (metadata_table(report))
        }
    );

    let mut head_elements = vec![
        HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
        charts_script(&charts),
    ];
    if kind == ReportKind::Uniformed {
        head_elements.push(HeadElement::NoIndex);
    }

    base(
        &format!("{} ({}年)", reports.profile.name, report.year),
        &head_elements,
        &content,
    )
}

fn profile_view(profile: &Profile) -> Markup {
    html!(
        section id="profile" class={ (BOARD_STYLE) " flex items-center gap-4" }
        {
            @if let Some(image) = &profile.image {
                img src=(image) alt=(profile.name) class="w-20 h-20 rounded-full object-cover";
            }

            div
            {
                h1 class="text-2xl font-bold" { (profile.name) }
                p class="text-gray-600 dark:text-gray-400"
                {
                    (profile.title)
                    @if !profile.party.is_empty() {
                        " / " (profile.party)
                    }
                }
            }
        }
    )
}

fn summary_view(report: &Report) -> Markup {
    let amounts = [
        ("収入", report.total_income, "text-blue-500"),
        ("支出", report.total_expense, "text-red-500"),
        ("残高", report.total_balance, "text-green-500"),
    ];

    html!(
        section id="summary" class={ (BOARD_STYLE) " grid grid-cols-3 gap-4" }
        {
            @for (label, amount, color) in amounts {
                div
                {
                    p class="text-sm" { (label) }
                    p class={ "text-xl font-bold " (color) } data-total=(label)
                    {
                        (format_yen(amount))
                    }
                }
            }
        }
    )
}

fn year_links(reports: &AccountingReports, current_year: i32, kind: ReportKind) -> Markup {
    let mut years: Vec<i32> = reports.reports().map(|report| report.year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();

    html!(
        nav id="years" class="w-full flex flex-wrap gap-4 mb-4" aria-label="年度"
        {
            @for year in years {
                @if year == current_year {
                    span class="font-bold" aria-current="page" { (year) "年" }
                } @else {
                    @let year_string = year.to_string();
                    a
                        href=(format_endpoint(endpoint_for(kind), &[reports.id.as_str(), year_string.as_str()]))
                        class=(LINK_STYLE)
                    {
                        (year) "年"
                    }
                }
            }
        }
    )
}

fn metadata_table(report: &Report) -> Markup {
    let year = report.year.to_string();
    let rows = [
        ("報告年", year.as_str()),
        ("団体区分", report.org_type.as_str()),
        ("団体名", report.org_name.as_str()),
        ("活動区域", report.activity_area.as_str()),
        ("代表者", report.representative.as_str()),
        ("資金管理団体", report.fund_management_org.as_str()),
        ("会計責任者", report.accounting_manager.as_str()),
        ("事務担当者", report.administrative_manager.as_str()),
        ("最終更新", report.last_update.as_str()),
    ];

    html!(
        section id="metadata" class=(BOARD_STYLE)
        {
            h2 class="text-xl font-bold mb-4" { "報告書の情報" }

            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "項目" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "内容" }
                    }
                }

                tbody
                {
                    @for (label, value) in rows {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            th scope="row" class={ (TABLE_CELL_STYLE) " font-medium" } { (label) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                @if value.is_empty() { "-" } @else { (value) }
                            }
                        }
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use axum_extra::extract::PrivateCookieJar;
    use scraper::{Html, Selector};
    use tempfile::TempDir;
    use time::Duration;

    use crate::{
        Error,
        app_state::create_cookie_key,
        auth::set_auth_cookie,
        data::DataSource,
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::{get_politician_report_page, get_uniformed_report_page};

    const REPORTS_JSON: &str = r#"{
        "id": "taro",
        "latestReportId": "taro-2023",
        "profile": { "name": "山田太郎", "title": "衆議院議員", "party": "無所属" },
        "data": [
            {
                "report": {
                    "id": "taro-2022",
                    "totalIncome": 1000,
                    "totalExpense": 800,
                    "totalBalance": 200,
                    "year": 2022
                },
                "transactions": []
            },
            {
                "report": {
                    "id": "taro-2023",
                    "totalIncome": 5000,
                    "totalExpense": 3000,
                    "totalBalance": 2000,
                    "year": 2023,
                    "orgName": "山田太郎後援会",
                    "representative": "山田太郎"
                },
                "transactions": [
                    { "data_id": "i1", "category": "個人からの寄附", "date": "2023-04-01", "price": 3000, "direction": "income" },
                    { "data_id": "i2", "category": "機関紙誌の発行", "date": "2023-06-01", "price": 2000, "direction": "income" },
                    { "data_id": "e1", "category": "人件費", "date": "2023-05-01", "price": 3000, "purpose": "事務員給与", "direction": "expense" }
                ]
            }
        ]
    }"#;

    fn data_dir() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for directory in ["politicians", "uniformed"] {
            let path = dir.path().join(directory);
            std::fs::create_dir_all(&path).unwrap();
            std::fs::write(path.join("taro.json"), REPORTS_JSON).unwrap();
        }
        dir
    }

    fn get_jar() -> PrivateCookieJar {
        PrivateCookieJar::new(create_cookie_key("test"))
    }

    fn path(politician_id: &str, year: &str) -> Path<(String, String)> {
        Path((politician_id.to_owned(), year.to_owned()))
    }

    async fn get_page(dir: &TempDir, year: &str, jar: PrivateCookieJar) -> Result<Html, Error> {
        let response = get_politician_report_page(
            State(DataSource::new(dir.path())),
            jar,
            path("taro", year),
        )
        .await?;

        assert_eq!(response.status(), StatusCode::OK);
        Ok(parse_html_document(response).await)
    }

    fn texts(html: &Html, selector: &str) -> Vec<String> {
        let selector = Selector::parse(selector).unwrap();
        html.select(&selector)
            .map(|element| element.text().collect::<String>().trim().to_owned())
            .collect()
    }

    #[tokio::test]
    async fn renders_profile_and_totals() {
        let dir = data_dir();

        let html = get_page(&dir, "2023", get_jar()).await.unwrap();

        assert_valid_html(&html);
        assert_eq!(texts(&html, "#profile h1"), ["山田太郎"]);
        assert_eq!(texts(&html, "[data-total='収入']"), ["¥5,000"]);
        assert_eq!(texts(&html, "[data-total='支出']"), ["¥3,000"]);
        assert_eq!(texts(&html, "[data-total='残高']"), ["¥2,000"]);
        assert_eq!(texts(&html, "title"), ["山田太郎 (2023年) | Polimoney (ポリマネー)"]);
    }

    #[tokio::test]
    async fn renders_sections_by_category() {
        let dir = data_dir();

        let html = get_page(&dir, "2023", get_jar()).await.unwrap();

        assert_eq!(
            texts(&html, "#income details h3"),
            ["個人からの寄附", "機関紙誌の発行"]
        );
        assert_eq!(texts(&html, "#expense details h3"), ["人件費"]);
        let selector = Selector::parse("#income-chart").unwrap();
        assert!(html.select(&selector).next().is_some());
    }

    #[tokio::test]
    async fn links_to_other_years() {
        let dir = data_dir();

        let html = get_page(&dir, "2023", get_jar()).await.unwrap();

        let selector = Selector::parse("#years a").unwrap();
        let links: Vec<_> = html
            .select(&selector)
            .filter_map(|link| link.value().attr("href"))
            .collect();
        assert_eq!(links, ["/taro/2022"]);
        assert_eq!(texts(&html, "#years [aria-current=page]"), ["2023年"]);
    }

    #[tokio::test]
    async fn metadata_table_shows_dash_for_missing_values() {
        let dir = data_dir();

        let html = get_page(&dir, "2023", get_jar()).await.unwrap();

        let cells = texts(&html, "#metadata td");
        assert_eq!(cells[0], "2023");
        assert_eq!(cells[2], "山田太郎後援会");
        assert_eq!(cells[1], "-");
    }

    #[tokio::test]
    async fn unknown_year_is_not_found() {
        let dir = data_dir();

        assert_eq!(
            get_page(&dir, "1999", get_jar()).await.unwrap_err(),
            Error::NotFound
        );
        assert_eq!(
            get_page(&dir, "latest", get_jar()).await.unwrap_err(),
            Error::NotFound
        );
    }

    #[tokio::test]
    async fn nav_bar_reflects_log_in() {
        let dir = data_dir();
        let signed_in_jar = set_auth_cookie(get_jar(), Duration::minutes(5)).unwrap();

        let signed_out = get_page(&dir, "2023", get_jar()).await.unwrap();
        let signed_in = get_page(&dir, "2023", signed_in_jar).await.unwrap();

        assert!(texts(&signed_out, "nav a").contains(&"ログイン".to_owned()));
        assert!(texts(&signed_in, "nav a").contains(&"ログアウト".to_owned()));
    }

    #[tokio::test]
    async fn uniformed_page_is_not_indexed() {
        let dir = data_dir();

        let response =
            get_uniformed_report_page(State(DataSource::new(dir.path())), path("taro", "2023"))
                .await
                .unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let selector = Selector::parse("meta[name=robots]").unwrap();
        assert!(html.select(&selector).next().is_some());
        let selector = Selector::parse("#years a").unwrap();
        let link = html.select(&selector).next().unwrap();
        assert_eq!(link.value().attr("href"), Some("/uniformed/taro/2022"));
    }
}
