//! The page for editing an account's monthly budget.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error,
    account::{Account, AccountId, account_picker_view, get_all_accounts, pick_account},
    app_state::lock_database,
    budget::core::{get_budget, get_budget_limits, month_start},
    category::{Category, CategoryId, get_all_categories},
    endpoints,
    html::{
        FIELD_LABEL_CLASS, FORM_CONTAINER_CLASS, LINK_CLASS, PRIMARY_BUTTON_CLASS, TEXT_FIELD_CLASS,
        base, currency_input_styles, loading_spinner,
    },
    navigation::NavBar,
    timezone::get_local_offset,
};

/// The state needed for the budget editor page.
#[derive(Debug, Clone)]
pub struct BudgetsPageState {
    /// The local timezone as a canonical timezone name, e.g. "America/Bogota".
    pub local_timezone: String,
    /// The database connection for accessing budgets.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BudgetsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters for the budget editor page.
#[derive(Debug, Deserialize)]
pub struct BudgetsQuery {
    /// The account whose budget to edit. Defaults to the account with the
    /// lowest ID.
    pub account: Option<AccountId>,
}

/// Renders the page for editing the current month's budget of an account.
pub async fn get_budgets_page(
    State(state): State<BudgetsPageState>,
    Query(query): Query<BudgetsQuery>,
) -> Result<Response, Error> {
    let local_offset = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezone(state.local_timezone.clone())
    })?;

    let month = month_start(OffsetDateTime::now_utc().to_offset(local_offset).date());

    let (accounts, selected_account, categories, total_limit, category_limits) = {
        let connection = lock_database(&state.db_connection)?;

        let accounts = get_all_accounts(&connection)
            .inspect_err(|error| tracing::error!("could not get accounts: {error}"))?;

        let Some(selected_account) = pick_account(&accounts, query.account).cloned() else {
            return Ok(no_accounts_view().into_response());
        };

        let categories = get_all_categories(&connection)
            .inspect_err(|error| tracing::error!("could not get categories: {error}"))?;

        let budget = get_budget(selected_account.id, month, &connection)
            .inspect_err(|error| tracing::error!("could not get the budget: {error}"))?;

        let category_limits = match &budget {
            Some(budget) => get_budget_limits(budget.id, &connection)
                .inspect_err(|error| tracing::error!("could not get the budget limits: {error}"))?
                .into_iter()
                .map(|limit| (limit.category_id, limit.amount))
                .collect(),
            None => HashMap::new(),
        };

        let total_limit = budget.and_then(|budget| budget.total_limit);

        (
            accounts,
            selected_account,
            categories,
            total_limit,
            category_limits,
        )
    };

    Ok(budgets_view(
        month,
        &selected_account,
        &accounts,
        &categories,
        total_limit,
        &category_limits,
    )
    .into_response())
}

fn no_accounts_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::BUDGETS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_CLASS) {
            h2 class="text-xl font-bold" { "Budgets" }

            p class="text-gray-500 dark:text-gray-400" {
                "Budgets are set per account, and there are no accounts yet. "
                a href=(endpoints::NEW_ACCOUNT_VIEW) class=(LINK_CLASS) { "Create an account" }
            }
        }
    };

    base("Budgets", &[], &content)
}

fn budgets_view(
    month: Date,
    selected_account: &Account,
    accounts: &[Account],
    categories: &[Category],
    total_limit: Option<f64>,
    category_limits: &HashMap<CategoryId, f64>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::BUDGETS_VIEW).into_html();
    let spinner = loading_spinner();
    let month_label = format!("{} {}", month.month(), month.year());

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_CLASS) {
            @if accounts.len() > 1 {
                (account_picker_view(endpoints::BUDGETS_VIEW, accounts, selected_account.id))
            }

            form hx-post=(endpoints::POST_BUDGET) hx-target-error="#alert-container"
                class="space-y-4 md:space-y-6 w-full"
            {
                h2 class="text-xl font-bold" { "Budget for " (month_label) }

                p class="text-gray-500 dark:text-gray-400" {
                    (selected_account.name) " (" (selected_account.currency) ")"
                }

                input type="hidden" name="account_id" value=(selected_account.id);
                input type="hidden" name="month" value=(month);

                div {
                    label for="total_limit" class=(FIELD_LABEL_CLASS) { "Total monthly limit" }

                    div class="currency-input w-full" {
                        input name="total_limit" id="total_limit" type="number" step="0.01"
                            min="0" placeholder="No limit" value=[total_limit]
                            class=(TEXT_FIELD_CLASS);
                    }

                    p class="mt-1 text-sm text-gray-500 dark:text-gray-400" {
                        "Leave empty for no total limit."
                    }
                }

                @if categories.is_empty() {
                    p class="text-gray-500 dark:text-gray-400" {
                        "Per-category limits need categories, and there are none yet. "
                        a href=(endpoints::NEW_CATEGORY_VIEW) class=(LINK_CLASS) {
                            "Create a category"
                        }
                    }
                } @else {
                    fieldset class="space-y-2" {
                        legend class=(FIELD_LABEL_CLASS) { "Category limits" }

                        @for category in categories {
                            div {
                                label for={ "limit-" (category.id) } class=(FIELD_LABEL_CLASS) {
                                    @if let Some(icon) = &category.icon {
                                        (icon) " "
                                    }
                                    (category.name)
                                }

                                input type="hidden" name="category_id" value=(category.id);

                                div class="currency-input w-full" {
                                    input name="limit" id={ "limit-" (category.id) } type="number"
                                        step="0.01" min="0" placeholder="No limit"
                                        value=[category_limits.get(&category.id)]
                                        class=(TEXT_FIELD_CLASS);
                                }
                            }
                        }
                    }
                }

                button type="submit" id="submit-button" tabindex="0" class=(PRIMARY_BUTTON_CLASS) {
                    span id="indicator" class="inline htmx-indicator" { (spinner) }
                    " Save Budget"
                }
            }
        }
    };

    base("Budgets", &[currency_input_styles()], &content)
}
