//! The accounts page: every account listed with a balance derived from its
//! transaction history.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    account::{get_account_balance, get_all_accounts},
    app_state::lock_database,
    endpoints::{self, format_endpoint},
    html::{
        LINK_CLASS, PAGE_CONTAINER_CLASS, TABLE_CELL_CLASS, TABLE_CLASS, TABLE_HEADER_CLASS,
        TABLE_ROW_CLASS, TABLE_WRAPPER_CLASS, base, edit_delete_action_links, format_currency,
    },
    navigation::NavBar,
};

/// The state needed for the [get_accounts_page] route handler.
#[derive(Debug, Clone)]
pub struct AccountState {
    /// The shared database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// One row of the accounts table.
#[derive(Debug, PartialEq)]
struct AccountTableRow {
    name: String,
    currency: String,
    balance: f64,
    edit_url: String,
    delete_url: String,
}

fn confirm_delete_message(account_name: &str) -> String {
    format!(
        "Are you sure you want to delete the account '{account_name}'? \
        Its transactions and budgets will also be deleted. This cannot be undone."
    )
}

fn account_row(account: &AccountTableRow) -> Markup {
    let action_links = edit_delete_action_links(
        &account.edit_url,
        &account.delete_url,
        &confirm_delete_message(&account.name),
        "closest tr",
        "delete",
    );

    html! {
        tr class=(TABLE_ROW_CLASS) {
            th scope="row" class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white" {
                (account.name)
            }
            td class=(TABLE_CELL_CLASS) { (account.currency) }
            td class="px-6 py-4 text-right" { (format_currency(account.balance)) }
            td class=(TABLE_CELL_CLASS) {
                div class="flex gap-4" { (action_links) }
            }
        }
    }
}

fn accounts_view(accounts: &[AccountTableRow]) -> Markup {
    let new_account_url = endpoints::NEW_ACCOUNT_VIEW;
    let nav_bar = NavBar::new(endpoints::ACCOUNTS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_CLASS) {
            section class="space-y-4" {
                header class="flex justify-between flex-wrap items-end" {
                    h1 class="text-xl font-bold" { "Accounts" }
                    a href=(new_account_url) class=(LINK_CLASS) { "Add account" }
                }

                (accounts_cards_view(accounts, new_account_url))

                section class=(TABLE_WRAPPER_CLASS) {
                    table class=(TABLE_CLASS) {
                        thead class=(TABLE_HEADER_CLASS) {
                            tr {
                                th scope="col" class=(TABLE_CELL_CLASS) { "Name" }
                                th scope="col" class=(TABLE_CELL_CLASS) { "Currency" }
                                th scope="col" class="px-6 py-3 text-right" { "Balance" }
                                th scope="col" class=(TABLE_CELL_CLASS) { "Actions" }
                            }
                        }

                        tbody {
                            @for account in accounts {
                                (account_row(account))
                            }

                            @if accounts.is_empty() {
                                tr {
                                    td colspan="4" class="px-6 py-4 text-center text-gray-500 dark:text-gray-400" {
                                        "No accounts yet. Add your first account "
                                        a href=(new_account_url) class=(LINK_CLASS) { "here" }
                                        "."
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Accounts", &[], &content)
}

fn accounts_cards_view(accounts: &[AccountTableRow], new_account_url: &str) -> Markup {
    html! {
        ul class="lg:hidden space-y-4" {
            @for account in accounts {
                li data-account-card="true"
                    class="rounded border border-gray-200 bg-white px-4 py-3 shadow-sm dark:border-gray-700 dark:bg-gray-800"
                {
                    div class="flex items-start justify-between gap-3" {
                        div class="text-sm font-semibold text-gray-900 dark:text-white" { (account.name) }
                        div class="text-sm tabular-nums text-right text-gray-900 dark:text-white" {
                            (format_currency(account.balance))
                        }
                    }

                    div class="mt-1 text-xs text-gray-500 dark:text-gray-400" { (account.currency) }

                    div class="mt-2 flex items-center gap-4 text-sm" {
                        (edit_delete_action_links(
                            &account.edit_url,
                            &account.delete_url,
                            &confirm_delete_message(&account.name),
                            "closest [data-account-card='true']",
                            "outerHTML",
                        ))
                    }
                }
            }

            @if accounts.is_empty() {
                li class="rounded border border-dashed border-gray-300 bg-white px-4 py-6 text-center text-sm text-gray-500 dark:border-gray-700 dark:bg-gray-800 dark:text-gray-400" {
                    "No accounts yet. Add your first account "
                    a href=(new_account_url) class=(LINK_CLASS) { "here" }
                    "."
                }
            }
        }
    }
}

/// Render the accounts page listing every account and its balance.
pub async fn get_accounts_page(State(state): State<AccountState>) -> Result<Response, Error> {
    let connection = lock_database(&state.db_connection)?;
    let accounts = get_all_account_rows(&connection)
        .inspect_err(|error| tracing::error!("could not list accounts: {error}"))?;

    Ok(accounts_view(&accounts).into_response())
}

/// Build one table row per account, ordered by name, with derived balances.
fn get_all_account_rows(connection: &Connection) -> Result<Vec<AccountTableRow>, Error> {
    get_all_accounts(connection)?
        .into_iter()
        .map(|account| {
            let balance = get_account_balance(account.id, connection)?;

            Ok(AccountTableRow {
                name: account.name,
                currency: account.currency,
                balance,
                edit_url: format_endpoint(endpoints::EDIT_ACCOUNT_VIEW, account.id),
                delete_url: format_endpoint(endpoints::DELETE_ACCOUNT, account.id),
            })
        })
        .collect()
}
