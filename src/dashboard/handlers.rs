//! The dashboard, the landing page of the app.
//!
//! The page shows the selected account's balance, this month's income and
//! spending, budget alerts and limit usage, the spending charts, and the most
//! recent transactions. Accounts are switched via the `account` query
//! parameter.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::{OffsetDateTime, UtcOffset};

use crate::{
    AppState, Error,
    account::{Account, AccountId, account_picker_view, get_all_accounts, pick_account},
    app_state::lock_database,
    budget::{get_budget, get_budget_limits},
    category::{Category, get_all_categories},
    dashboard::{
        charts::{
            DashboardChart, ECHARTS_CDN, breakdown_chart, charts_script, charts_view, trend_chart,
        },
        query::{LedgerRow, get_ledger_rows},
        summary::{
            AlertItem, AlertSeverity, BudgetProgressRow, Summary, SummaryWindow, assemble_summary,
            category_label,
        },
    },
    endpoints,
    html::{
        CATEGORY_BADGE_CLASS, FORM_CONTAINER_CLASS, HeadElement, LINK_CLASS, PRIMARY_BUTTON_CLASS,
        TABLE_CELL_CLASS, TABLE_CLASS, TABLE_HEADER_CLASS, TABLE_ROW_CLASS, base,
        currency_with_tooltip, format_currency, inline_link, loading_spinner,
    },
    navigation::NavBar,
    timezone::get_local_offset,
};

/// How many rows the recent transaction list shows.
const RECENT_TRANSACTIONS_LIMIT: usize = 10;

/// The state needed for the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading the ledger.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "America/Bogota".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters of the dashboard page.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// The account to summarize. Defaults to the account with the lowest ID.
    pub account: Option<AccountId>,
}

/// Everything [dashboard_view] needs to render.
struct DashboardData {
    accounts: Vec<Account>,
    selected_account: Account,
    categories: Vec<Category>,
    summary: Summary,
    /// The month's overall spending limit, when one is configured.
    total_limit: Option<f64>,
    charts: Vec<DashboardChart>,
    local_offset: UtcOffset,
}

/// Display an overview of the selected account: balance, monthly totals,
/// budget alerts and progress, spending charts, and recent transactions.
///
/// Without any accounts the page offers to provision a starter ledger, and an
/// account without transactions gets an empty state instead of zeroed charts.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Err(Error::InvalidTimezone(state.local_timezone.clone()));
    };

    let window = SummaryWindow::around(OffsetDateTime::now_utc(), local_offset);

    let (accounts, selected_account, categories, rows, budget, limits) = {
        let connection = lock_database(&state.db_connection)?;

        let accounts = get_all_accounts(&connection)
            .inspect_err(|error| tracing::error!("could not get accounts: {error}"))?;

        let Some(selected_account) = pick_account(&accounts, query.account).cloned() else {
            return Ok(bootstrap_view().into_response());
        };

        let categories = get_all_categories(&connection)
            .inspect_err(|error| tracing::error!("could not get categories: {error}"))?;

        let rows = get_ledger_rows(selected_account.id, &connection)
            .inspect_err(|error| tracing::error!("could not get the account ledger: {error}"))?;

        let budget = get_budget(selected_account.id, window.month_start, &connection)
            .inspect_err(|error| tracing::error!("could not get the budget: {error}"))?;

        let limits = match &budget {
            Some(budget) => get_budget_limits(budget.id, &connection)
                .inspect_err(|error| tracing::error!("could not get the budget limits: {error}"))?,
            None => Vec::new(),
        };

        (accounts, selected_account, categories, rows, budget, limits)
    };

    if rows.is_empty() {
        return Ok(no_data_view(&selected_account, &accounts).into_response());
    }

    let summary = assemble_summary(
        &rows,
        &categories,
        budget.as_ref(),
        &limits,
        &window,
        RECENT_TRANSACTIONS_LIMIT,
    );
    let total_limit = budget.and_then(|budget| budget.total_limit);
    let charts = build_dashboard_charts(&summary);

    Ok(dashboard_view(&DashboardData {
        accounts,
        selected_account,
        categories,
        summary,
        total_limit,
        charts,
        local_offset,
    })
    .into_response())
}

/// Creates the dashboard charts from the summary.
///
/// A chart is only produced when it has something to plot, so a month with
/// income but no spending renders a note instead of empty chart shells.
fn build_dashboard_charts(summary: &Summary) -> Vec<DashboardChart> {
    let mut charts = Vec::new();

    if !summary.trend.is_empty() {
        charts.push(DashboardChart {
            id: "trend-chart",
            options: trend_chart(&summary.trend).to_string(),
        });
    }

    if !summary.breakdown.is_empty() {
        charts.push(DashboardChart {
            id: "breakdown-chart",
            options: breakdown_chart(&summary.breakdown).to_string(),
        });
    }

    charts
}

/// Renders the welcome page shown before any account exists.
fn bootstrap_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let spinner = loading_spinner();

    let content = html!(
        (nav_bar)

        main class=(FORM_CONTAINER_CLASS)
        {
            h1 class="text-xl font-bold mb-2" { "Welcome to BiYú" }

            p class="text-gray-600 dark:text-gray-400 mb-4"
            {
                "There is nothing to show yet. Create a starter account with a
                handful of everyday categories, or "
                a href=(endpoints::NEW_ACCOUNT_VIEW) class=(LINK_CLASS)
                {
                    "set things up yourself"
                }
                "."
            }

            form hx-post=(endpoints::POST_BOOTSTRAP) hx-target-error="#alert-container"
                class="w-full max-w-sm"
            {
                button type="submit" id="submit-button" tabindex="0" class=(PRIMARY_BUTTON_CLASS) {
                    span id="indicator" class="inline htmx-indicator" { (spinner) }
                    " Create Starter Ledger"
                }
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the dashboard when the selected account has no transactions.
fn no_data_view(selected_account: &Account, accounts: &[Account]) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let new_transaction_link =
        inline_link(endpoints::NEW_TRANSACTION_VIEW, "record a transaction");

    let content = html!(
        (nav_bar)

        main class=(DASHBOARD_CONTAINER_CLASS)
        {
            @if accounts.len() > 1 {
                (account_picker_view(endpoints::DASHBOARD_VIEW, accounts, selected_account.id))
            }

            h1 class="text-xl font-bold mb-2" { "Nothing here yet..." }

            p class="text-gray-600 dark:text-gray-400"
            {
                "The overview will show up once " (selected_account.name) " has some
                transactions. You can " (new_transaction_link) " to get started."
            }
        }
    );

    base("Dashboard", &[], &content)
}

const DASHBOARD_CONTAINER_CLASS: &str = "flex flex-col px-4 py-8 lg:py-5 mx-auto w-full \
    max-w-screen-xl text-gray-900 dark:text-white";

/// Renders the full dashboard page.
fn dashboard_view(data: &DashboardData) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main id="dashboard-content" class=(DASHBOARD_CONTAINER_CLASS)
        {
            @if data.accounts.len() > 1 {
                (account_picker_view(
                    endpoints::DASHBOARD_VIEW,
                    &data.accounts,
                    data.selected_account.id,
                ))
            }

            (summary_cards_view(&data.selected_account, &data.summary, data.total_limit))

            (alerts_view(&data.summary.alerts))

            (charts_view(&data.charts))

            @if !data.summary.progress.is_empty() {
                (budget_progress_view(&data.summary.progress))
            }

            (recent_transactions_view(&data.summary.recent, &data.categories, data.local_offset))
        }
    );

    let scripts = [
        HeadElement::Script(ECHARTS_CDN.to_owned()),
        charts_script(&data.charts),
    ];

    base("Dashboard", &scripts, &content)
}

/// Renders the headline numbers: the balance and this month's totals.
fn summary_cards_view(account: &Account, summary: &Summary, total_limit: Option<f64>) -> Markup {
    html!(
        section id="summary-cards" class="w-full mx-auto mb-4"
        {
            header class="flex justify-between items-baseline flex-wrap mb-4"
            {
                h1 class="text-xl font-bold" { (account.name) }
                span class="text-sm text-gray-600 dark:text-gray-400" { (account.currency) }
            }

            div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4"
            {
                (stat_card("balance-card", "Balance", summary.balance, ""))
                (stat_card(
                    "income-card",
                    "Income this month",
                    summary.monthly.income,
                    "text-green-700 dark:text-green-300",
                ))
                (stat_card(
                    "expense-card",
                    "Spent this month",
                    summary.monthly.expense,
                    "text-red-700 dark:text-red-300",
                ))
                (stat_card("net-card", "Net this month", summary.monthly.net, ""))
            }

            @if let Some(limit) = total_limit.filter(|limit| *limit > 0.0) {
                (total_limit_card(summary.monthly.expense, limit))
            }
        }
    )
}

const CARD_CLASS: &str = "bg-white border border-gray-200 rounded-lg p-4 shadow-md \
    dark:bg-gray-800 dark:border-gray-700";

/// Renders a single headline number card.
fn stat_card(id: &str, label: &str, amount: f64, amount_classes: &str) -> Markup {
    html!(
        div id=(id) class=(CARD_CLASS)
        {
            h4 class="text-sm text-gray-600 dark:text-gray-400 mb-1" { (label) }
            p class={ "text-3xl font-bold " (amount_classes) }
            {
                (currency_with_tooltip(amount))
            }
        }
    )
}

/// Renders this month's spending against the overall limit.
fn total_limit_card(spent: f64, limit: f64) -> Markup {
    html!(
        div id="total-limit-card" class={ (CARD_CLASS) " mt-4" }
        {
            div class="flex justify-between items-baseline mb-2"
            {
                h4 class="text-sm text-gray-600 dark:text-gray-400" { "Monthly spending limit" }
                span class="text-sm"
                {
                    (currency_with_tooltip(spent))
                    " of "
                    (currency_with_tooltip(limit))
                }
            }

            (usage_bar(spent, limit))
        }
    )
}

/// The fill color of a usage bar: red once the limit is hit, amber from 80%.
fn usage_color(ratio: f64) -> &'static str {
    if ratio >= 1.0 {
        "#ef4444"
    } else if ratio >= 0.8 {
        "#f59e0b"
    } else {
        "#22c55e"
    }
}

/// Renders a horizontal bar showing how much of a limit has been used.
fn usage_bar(spent: f64, limit: f64) -> Markup {
    let ratio = if limit > 0.0 { spent / limit } else { 0.0 };
    let percentage = (ratio * 100.0).clamp(0.0, 100.0);

    // Ensure minimum 3% width so rounded corners are visible
    let display_percentage = if percentage > 0.0 && percentage < 3.0 {
        3.0
    } else {
        percentage
    };

    html!(
        div
            class="w-full bg-gray-200 rounded-full h-2.5 dark:bg-gray-700"
            role="progressbar"
            aria-valuenow=(format!("{percentage:.0}"))
            aria-valuemin="0"
            aria-valuemax="100"
        {
            @if percentage > 0.0 {
                div
                    class="h-2.5 rounded-full transition-all"
                    style=(format!(
                        "width: {display_percentage:.1}%; background-color: {};",
                        usage_color(ratio)
                    ))
                {}
            }
        }
    )
}

/// Renders the budget alert list. There is always at least one entry.
fn alerts_view(alerts: &[AlertItem]) -> Markup {
    html!(
        section id="alerts" class="w-full mx-auto mb-4"
        {
            h2 class="text-xl font-semibold mb-4" { "Alerts" }

            ul class="space-y-2"
            {
                @for alert in alerts {
                    li
                        id={ "alert-" (alert.key) }
                        class={ (CARD_CLASS) " p-3 flex items-center gap-2" }
                    {
                        span aria-hidden="true" { (severity_icon(alert.severity)) }
                        span { (alert.message) }
                    }
                }
            }
        }
    )
}

/// The icon shown next to an alert.
fn severity_icon(severity: AlertSeverity) -> &'static str {
    match severity {
        AlertSeverity::Ok => "✅",
        AlertSeverity::Warning => "🟠",
        AlertSeverity::Danger => "🔴",
    }
}

/// Renders a usage bar for every configured category limit.
fn budget_progress_view(progress: &[BudgetProgressRow]) -> Markup {
    html!(
        section id="budget-progress" class="w-full mx-auto mb-4"
        {
            header class="flex justify-between items-baseline flex-wrap mb-4"
            {
                h2 class="text-xl font-semibold" { "Budget" }
                a href=(endpoints::BUDGETS_VIEW) class=(LINK_CLASS) { "Edit Budget" }
            }

            div class="grid grid-cols-1 md:grid-cols-2 gap-4"
            {
                @for row in progress {
                    div class=(CARD_CLASS)
                    {
                        div class="flex justify-between items-baseline gap-2 mb-2"
                        {
                            h4 class="font-semibold truncate" title=(row.category_name)
                            {
                                (row.category_name)
                            }
                            span class="text-sm text-gray-600 dark:text-gray-400 whitespace-nowrap"
                            {
                                (currency_with_tooltip(row.spent))
                                " of "
                                (currency_with_tooltip(row.limit))
                            }
                        }

                        (usage_bar(row.spent, row.limit))
                    }
                }
            }
        }
    )
}

/// Renders the newest transactions of the account, pending rows included.
fn recent_transactions_view(
    recent: &[LedgerRow],
    categories: &[Category],
    local_offset: UtcOffset,
) -> Markup {
    html!(
        section id="recent-transactions" class="w-full mx-auto mb-8"
        {
            header class="flex justify-between items-baseline flex-wrap mb-4"
            {
                h2 class="text-xl font-semibold" { "Recent Transactions" }
                a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_CLASS) { "View All" }
            }

            div class="relative w-full overflow-x-auto shadow-md rounded-lg" {
                table class=(TABLE_CLASS) {
                    thead class=(TABLE_HEADER_CLASS) {
                        tr {
                            th scope="col" class=(TABLE_CELL_CLASS) { "Date" }
                            th scope="col" class=(TABLE_CELL_CLASS) { "Description" }
                            th scope="col" class=(TABLE_CELL_CLASS) { "Category" }
                            th scope="col" class="px-6 py-3 text-right" { "Amount" }
                            th scope="col" class=(TABLE_CELL_CLASS) { "Status" }
                        }
                    }

                    tbody {
                        @for row in recent {
                            (recent_row_view(row, categories, local_offset))
                        }
                    }
                }
            }
        }
    )
}

fn recent_row_view(row: &LedgerRow, categories: &[Category], local_offset: UtcOffset) -> Markup {
    let occurred_on = row.occurred_at.to_offset(local_offset).date();

    html! {
        tr class=(TABLE_ROW_CLASS) {
            th scope="row"
                class="px-6 py-4 font-medium whitespace-nowrap text-gray-900 dark:text-white" {
                time datetime=(occurred_on) { (occurred_on) }
            }
            td class=(TABLE_CELL_CLASS) { (row.description) }
            td class=(TABLE_CELL_CLASS) {
                span class=(CATEGORY_BADGE_CLASS) { (category_label(row.category_id, categories)) }
            }
            td class={ "px-6 py-4 text-right whitespace-nowrap " (amount_class(&row.kind)) } {
                (amount_text(row))
            }
            td class=(TABLE_CELL_CLASS) {
                @if row.status.is_empty() { "posted" } @else { (row.status) }
            }
        }
    }
}

/// The color for an amount by the row's raw kind. Unknown kinds stay neutral.
fn amount_class(kind: &str) -> &'static str {
    match kind {
        "income" => "text-green-700 dark:text-green-300",
        "expense" => "text-red-700 dark:text-red-300",
        _ => "",
    }
}

/// The amount of a ledger row, signed by its kind.
///
/// Rows with an unrecognized kind show the stored amount as-is, since their
/// direction is unknown.
fn amount_text(row: &LedgerRow) -> String {
    match row.kind.as_str() {
        "income" | "expense" => format_currency(row.signed_amount()),
        _ => format_currency(row.amount),
    }
}
