//! ECharts figures for the dashboard.
//!
//! The summary feeds two charts: a line chart of posted expenses per day
//! over the last thirty days, and a pie chart of this month's spending
//! grouped by category. Each figure is a JSON options blob that a small
//! inline script hands to ECharts on page load.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    datatype::DataPointItem,
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, JsFunction, Tooltip, Trigger,
    },
    series::{Line, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    dashboard::summary::{BreakdownSlice, TrendPoint},
    html::HeadElement,
};

/// The ECharts runtime loaded into the page head.
pub(super) const ECHARTS_CDN: &str =
    "https://cdn.jsdelivr.net/npm/echarts@5.6.0/dist/echarts.min.js";

/// An ECharts figure waiting to be mounted.
pub(super) struct DashboardChart {
    /// ID of the `div` the chart renders into.
    pub id: &'static str,
    /// Serialized ECharts options.
    pub options: String,
}

/// The chart grid, one mount point `div` per figure.
///
/// Shows a short note instead of the grid when there is nothing to plot,
/// such as a month with income but no spending.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    if charts.is_empty() {
        return html! {
            section id="charts" class="mx-auto mb-4 w-full" {
                p class="text-center text-gray-600 dark:text-gray-400" {
                    "No spending recorded in the last thirty days."
                }
            }
        };
    }

    html! {
        section id="charts" class="mx-auto mb-4 w-full" {
            div class="grid gap-4 grid-cols-1 xl:grid-cols-2" {
                @for chart in charts {
                    div id=(chart.id) class="rounded min-h-[380px] dark:bg-gray-100" {}
                }
            }
        }
    }
}

/// Builds the inline script that mounts every chart once the page loads.
///
/// Each ECharts instance follows the browser's color scheme and resizes
/// with the window.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let initializers: Vec<String> = charts.iter().map(chart_initializer).collect();

    let script = format!(
        "document.addEventListener('DOMContentLoaded', () => {{\n{}\n}});",
        initializers.join("\n")
    );

    HeadElement::InlineScript(PreEscaped(script))
}

fn chart_initializer(chart: &DashboardChart) -> String {
    format!(
        r#"(() => {{
            const container = document.getElementById("{}");
            if (container === null) {{
                return;
            }}

            const chart = echarts.init(container);
            chart.setOption({});

            window.addEventListener('resize', chart.resize);

            const colorScheme = window.matchMedia('(prefers-color-scheme: dark)');
            const applyTheme = () => chart.setTheme(colorScheme.matches ? 'dark' : 'default');
            colorScheme.addEventListener('change', applyTheme);
            applyTheme();
        }})();"#,
        chart.id, chart.options
    )
}

pub(super) fn trend_chart(trend: &[TrendPoint]) -> Chart {
    let labels = format_day_labels(trend);
    let values: Vec<f64> = trend.iter().map(|point| point.total).collect();

    let title = Title::new().text("Daily spending").subtext("Last thirty days");
    let plot_area = Grid::new().left("3%").right("4%").bottom("3%").contain_label(true);
    let day_axis = Axis::new().type_(AxisType::Category).data(labels);
    let amount_axis = Axis::new()
        .type_(AxisType::Value)
        .axis_label(AxisLabel::new().formatter(currency_formatter()));

    Chart::new()
        .title(title)
        .tooltip(currency_tooltip())
        .grid(plot_area)
        .x_axis(day_axis)
        .y_axis(amount_axis)
        .series(Line::new().name("Spent").data(values))
}

pub(super) fn breakdown_chart(breakdown: &[BreakdownSlice]) -> Chart {
    let slices: Vec<DataPointItem> = breakdown
        .iter()
        .map(|slice| DataPointItem::new(slice.total).name(slice.name.clone()))
        .collect();

    let title = Title::new().text("Spending by category").subtext("This month");
    let tooltip = Tooltip::new()
        .trigger(Trigger::Item)
        .value_formatter(currency_formatter());
    let pie = Pie::new()
        .name("Spending")
        .radius(vec!["45%", "70%"])
        .center(vec!["50%", "45%"])
        .item_style(ItemStyle::new().border_radius(6.0))
        .data(slices);

    Chart::new()
        .title(title)
        .tooltip(tooltip)
        .legend(Legend::new().top("bottom"))
        .series(pie)
}

/// Formats trend dates as short "Oct 2" style labels.
fn format_day_labels(trend: &[TrendPoint]) -> Vec<String> {
    trend
        .iter()
        .map(|point| {
            // English month names are ASCII, so the first three bytes spell
            // the usual abbreviation.
            let month = point.date.month().to_string();
            format!("{} {}", &month[..3], point.date.day())
        })
        .collect()
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const formatCop = new Intl.NumberFormat('es-CO', {
                currency: 'COP', style: 'currency', maximumFractionDigits: 0,
            });
            return number == null ? '-' : formatCop.format(number);",
    )
}

/// Axis-trigger tooltip with every value run through the currency formatter.
fn currency_tooltip() -> Tooltip {
    let pointer = AxisPointer::new().type_(AxisPointerType::Shadow);
    Tooltip::new()
        .trigger(Trigger::Axis)
        .axis_pointer(pointer)
        .value_formatter(currency_formatter())
}
