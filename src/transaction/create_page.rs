//! The page with the form for recording a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error,
    account::{Account, get_all_accounts},
    app_state::lock_database,
    category::{Category, get_all_categories},
    endpoints,
    html::{
        FIELD_LABEL_CLASS, FORM_CONTAINER_CLASS, LINK_CLASS, PRIMARY_BUTTON_CLASS,
        RADIO_GROUP_CLASS, RADIO_INPUT_CLASS, RADIO_LABEL_CLASS, TEXT_FIELD_CLASS, base,
        currency_input_styles, loading_spinner,
    },
    navigation::NavBar,
    timezone::get_local_offset,
};

/// The state needed for the [get_create_transaction_page] route handler.
#[derive(Debug, Clone)]
pub struct CreateTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "America/Bogota".
    pub local_timezone: String,
    /// The shared database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the new-transaction form, or a prompt to create an account first
/// when there are none.
///
/// The date input is capped at today in the instance's local timezone.
pub async fn get_create_transaction_page(
    State(state): State<CreateTransactionPageState>,
) -> Result<Response, Error> {
    let (accounts, categories) = {
        let connection = lock_database(&state.db_connection)?;
        let accounts = get_all_accounts(&connection)
            .inspect_err(|error| tracing::error!("could not list accounts: {error}"))?;
        let categories = get_all_categories(&connection)
            .inspect_err(|error| tracing::error!("could not list categories: {error}"))?;
        (accounts, categories)
    };

    if accounts.is_empty() {
        return Ok(no_accounts_view().into_response());
    }

    let local_offset = get_local_offset(&state.local_timezone)
        .ok_or_else(|| Error::InvalidTimezone(state.local_timezone))?;
    let max_date = OffsetDateTime::now_utc().to_offset(local_offset).date();

    Ok(create_transaction_view(max_date, &accounts, &categories).into_response())
}

fn no_accounts_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_CLASS) {
            h2 class="text-xl font-bold" { "New Transaction" }

            p class="text-gray-500 dark:text-gray-400" {
                "Transactions are recorded against an account, and there are no accounts yet. "
                a href=(endpoints::NEW_ACCOUNT_VIEW) class=(LINK_CLASS) { "Create an account" }
            }
        }
    };

    base("New Transaction", &[], &content)
}

fn create_transaction_view(
    max_date: Date,
    accounts: &[Account],
    categories: &[Category],
) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_CLASS) {
            form hx-post=(endpoints::POST_TRANSACTION) hx-target-error="#alert-container"
                class="space-y-4 md:space-y-6 w-full" {
                h2 class="text-xl font-bold" { "New Transaction" }

                fieldset class="space-y-2" {
                    legend class=(FIELD_LABEL_CLASS) { "Kind" }

                    div class=(RADIO_GROUP_CLASS) {
                        div class="flex items-center gap-3" {
                            input name="kind" id="kind-expense" type="radio" value="expense"
                                checked required tabindex="0" class=(RADIO_INPUT_CLASS);
                            label for="kind-expense" class=(RADIO_LABEL_CLASS) { "Expense" }
                        }

                        div class="flex items-center gap-3" {
                            input name="kind" id="kind-income" type="radio" value="income"
                                required tabindex="0" class=(RADIO_INPUT_CLASS);
                            label for="kind-income" class=(RADIO_LABEL_CLASS) { "Income" }
                        }
                    }
                }

                div {
                    label for="amount" class=(FIELD_LABEL_CLASS) { "Amount" }
                    // w-full keeps the input at full width inside the prefix wrapper.
                    div class="currency-input w-full" {
                        input name="amount" id="amount" type="number" step="0.01" min="0.01"
                            placeholder="0.00" required autofocus class=(TEXT_FIELD_CLASS);
                    }
                }

                div {
                    label for="account_id" class=(FIELD_LABEL_CLASS) { "Account" }
                    select name="account_id" id="account_id" required class=(TEXT_FIELD_CLASS) {
                        @for account in accounts {
                            option value=(account.id) { (account.name) }
                        }
                    }
                }

                div {
                    label for="category_id" class=(FIELD_LABEL_CLASS) { "Category" }
                    select name="category_id" id="category_id" class=(TEXT_FIELD_CLASS) {
                        option value="" { "Uncategorized" }

                        @for category in categories {
                            option value=(category.id) {
                                @if let Some(icon) = &category.icon {
                                    (icon) " "
                                }
                                (category.name)
                            }
                        }
                    }
                }

                div {
                    label for="date" class=(FIELD_LABEL_CLASS) { "Date" }
                    input name="date" id="date" type="date" max=(max_date) value=(max_date)
                        required class=(TEXT_FIELD_CLASS);
                }

                div {
                    label for="description" class=(FIELD_LABEL_CLASS) { "Description" }
                    input name="description" id="description" type="text"
                        placeholder="Description" class=(TEXT_FIELD_CLASS);
                }

                div {
                    label for="status" class=(FIELD_LABEL_CLASS) { "Status" }
                    select name="status" id="status" class=(TEXT_FIELD_CLASS) {
                        option value="posted" selected { "Posted" }
                        option value="pending" { "Pending" }
                    }
                }

                button type="submit" id="submit-button" tabindex="0" class=(PRIMARY_BUTTON_CLASS) {
                    span id="indicator" class="inline htmx-indicator" { (loading_spinner()) }
                    " Record Transaction"
                }
            }
        }
    };

    base("New Transaction", &[currency_input_styles()], &content)
}
