//! The page with the form for editing an account.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    account::{AccountId, get_account},
    app_state::lock_database,
    endpoints::{self, format_endpoint},
    html::{FIELD_LABEL_CLASS, FORM_CONTAINER_CLASS, PRIMARY_BUTTON_CLASS, TEXT_FIELD_CLASS, base},
    internal_server_error::fallback_internal_server_error,
    navigation::NavBar,
    not_found::get_404_not_found_response,
};

/// The state needed for the [get_edit_account_page] route handler.
#[derive(Debug, Clone)]
pub struct EditAccountPageState {
    /// The shared database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditAccountPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the edit form for `account_id`, or a 404 page when no such account
/// exists.
pub async fn get_edit_account_page(
    State(state): State<EditAccountPageState>,
    Path(account_id): Path<AccountId>,
) -> Response {
    let connection = match lock_database(&state.db_connection) {
        Ok(connection) => connection,
        Err(_) => return fallback_internal_server_error(),
    };
    let account = match get_account(account_id, &connection) {
        Ok(account) => account,
        Err(Error::NotFound) => return get_404_not_found_response(),
        Err(error) => {
            tracing::error!("could not retrieve account {account_id}: {error}");
            return fallback_internal_server_error();
        }
    };

    let edit_endpoint = format_endpoint(endpoints::EDIT_ACCOUNT_VIEW, account_id);
    let update_endpoint = format_endpoint(endpoints::PUT_ACCOUNT, account_id);
    let nav_bar = NavBar::new(&edit_endpoint).into_html();
    let form = edit_account_form_view(&update_endpoint, &account.name, &account.currency, "");

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_CLASS) { (form) }
    };

    base("Edit Account", &[], &content).into_response()
}

pub(super) fn edit_account_form_view(
    update_endpoint: &str,
    name: &str,
    currency: &str,
    error_message: &str,
) -> Markup {
    html! {
        form hx-put=(update_endpoint) class="space-y-4 md:space-y-6 w-full" {
            div {
                label for="name" class=(FIELD_LABEL_CLASS) { "Account Name" }
                input id="name" type="text" name="name" placeholder="Account Name"
                    value=(name) required autofocus class=(TEXT_FIELD_CLASS);
            }

            div {
                label for="currency" class=(FIELD_LABEL_CLASS) { "Currency" }
                input id="currency" type="text" name="currency" placeholder="COP"
                    value=(currency) maxlength="3" required class=(TEXT_FIELD_CLASS);
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400" { (error_message) }
            }

            button type="submit" class=(PRIMARY_BUTTON_CLASS) { "Update Account" }
        }
    }
}
