//! Chart generation and rendering for report pages.
//!
//! This module creates ECharts visualizations for report data:
//! - **Donut chart**: the buckets of an [Aggregation], with the total in the centre
//! - **Funding chart**: a stacked bar chart of where the money came from and
//!   where it went
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Color, Emphasis, EmphasisFocus,
        ItemStyle, JsFunction, Label, Tooltip, Trigger,
    },
    series::{Bar, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    aggregation::{Aggregation, Totals},
    html::{HeadElement, format_yen},
};

/// The path of the ECharts library under the static route.
pub const ECHARTS_SCRIPT: &str = "/static/echarts.6.0.0.min.js";

/// Funding chart colour of the 支出 series.
pub const EXPENSE_COLOR: &str = "#f87171";
/// Funding chart colour of the 繰越 series.
pub const CARRYOVER_COLOR: &str = "#4ade80";
/// Funding chart colour of the 公費 series.
pub const PUBLIC_COLOR: &str = "#c084fc";
/// Funding chart colour of the 収入 series.
pub const INCOME_COLOR: &str = "#60a5fa";

/// A report chart with its HTML container ID and ECharts configuration.
pub struct ReportChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: String,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

impl ReportChart {
    /// Serialise `chart` for the element with the ID `id`.
    pub fn new(id: &str, chart: &Chart) -> Self {
        Self {
            id: id.to_owned(),
            options: chart.to_string(),
        }
    }
}

/// Renders the HTML container for a single chart.
pub fn chart_container(chart: &ReportChart, class: &str) -> Markup {
    html!(
        div id=(chart.id) class=(class) {}
    )
}

/// Generates JavaScript initialization code for report charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub fn charts_script(charts: &[ReportChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id,
                escape_closing_tags(&chart.options)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Chart labels come from report files, so `</` must not end the inline script.
fn escape_closing_tags(options: &str) -> String {
    options.replace("</", "<\\/")
}

/// A donut chart of the buckets in `aggregation` with the formatted total in
/// the centre.
///
/// Slices use the colours assigned by the aggregation, in display order.
pub fn donut_chart(aggregation: &Aggregation<'_>) -> Chart {
    let data: Vec<(f64, &str)> = aggregation
        .aggregates
        .iter()
        .map(|aggregate| (aggregate.value as f64, aggregate.label.as_str()))
        .collect();
    let colors: Vec<Color> = aggregation
        .colors
        .iter()
        .map(|&color| Color::from(color))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text(format_yen(aggregation.total()))
                .left("center")
                .top("center"),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(yen_formatter()),
        )
        .color(colors)
        .series(
            Pie::new()
                .radius(vec!["55%", "80%"])
                .avoid_label_overlap(true)
                .label(Label::new().show(false))
                .data(data),
        )
}

/// A stacked bar chart comparing expenses plus carryover against public
/// funding plus income.
///
/// A negative carryover is drawn as zero.
pub fn funding_chart(totals: &Totals) -> Chart {
    let labels = vec!["支出", "収入"];
    let series: [(&str, &str, [f64; 2]); 4] = [
        ("支出", EXPENSE_COLOR, [totals.total_expense as f64, 0.0]),
        ("繰越", CARRYOVER_COLOR, [totals.carryover.max(0) as f64, 0.0]),
        ("公費", PUBLIC_COLOR, [0.0, totals.total_expense_public as f64]),
        ("収入", INCOME_COLOR, [0.0, totals.total_income as f64]),
    ];

    let mut chart = Chart::new()
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .value_formatter(yen_formatter())
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .legend(Legend::new().top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(50)
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(yen_formatter())),
        )
        .y_axis(Axis::new().type_(AxisType::Category).data(labels));

    for (name, color, data) in series {
        chart = chart.series(
            Bar::new()
                .name(name)
                .stack("funding")
                .item_style(ItemStyle::new().color(color))
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(data.to_vec()),
        );
    }

    chart
}

#[inline]
fn yen_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const yenFormatter = new Intl.NumberFormat('ja-JP', {
              style: 'currency',
              currency: 'JPY'
            });
            return (number) ? yenFormatter.format(number) : \"¥0\";",
    )
}
