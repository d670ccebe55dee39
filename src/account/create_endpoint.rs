//! The API endpoint that creates an account.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::{Connection, params};
use serde::Deserialize;

use crate::{
    AppState, Error,
    account::{Account, create_page::new_account_form_view},
    app_state::lock_database,
    db::is_constraint_violation,
    endpoints,
};

/// The state needed for the [create_account_endpoint] route handler.
#[derive(Debug, Clone)]
pub struct CreateAccountState {
    /// The shared database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateAccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form fields for creating an account.
#[derive(Debug, Deserialize)]
pub struct AccountForm {
    /// The account name.
    pub name: String,
    /// The ISO 4217 currency code, e.g. "COP".
    pub currency: String,
}

/// Create an account from the submitted form.
///
/// Success redirects to the accounts page. A blank or duplicate name
/// re-renders the form with an error message.
pub async fn create_account_endpoint(
    State(state): State<CreateAccountState>,
    Form(form): Form<AccountForm>,
) -> Response {
    let name = form.name.trim();
    if name.is_empty() {
        let message = format!("Error: {}", Error::EmptyAccountName);
        return new_account_form_view(&form.name, &form.currency, &message).into_response();
    }
    let currency = normalize_currency(&form.currency);

    let connection = match lock_database(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_alert_response(),
    };

    match create_account(name, &currency, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::ACCOUNTS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error @ Error::DuplicateAccountName(_)) => {
            let message = format!("Error: {error}");
            new_account_form_view(name, &currency, &message).into_response()
        }
        Err(error) => {
            tracing::error!("could not create account: {error}");
            error.into_alert_response()
        }
    }
}

/// Uppercase the currency code, falling back to "COP" when blank.
pub(super) fn normalize_currency(currency: &str) -> String {
    let currency = currency.trim();

    if currency.is_empty() {
        "COP".to_string()
    } else {
        currency.to_uppercase()
    }
}

/// Create an account and return it with its generated ID.
///
/// # Errors
/// Returns [Error::DuplicateAccountName] when an account with the same name
/// exists, or [Error::SqlError] for any other SQL failure.
pub fn create_account(
    name: &str,
    currency: &str,
    connection: &Connection,
) -> Result<Account, Error> {
    connection
        .execute(
            "INSERT INTO account (name, currency) VALUES (?1, ?2)",
            params![name, currency],
        )
        .map_err(|error| {
            if is_constraint_violation(&error, rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE) {
                Error::DuplicateAccountName(name.to_string())
            } else {
                Error::from(error)
            }
        })?;

    Ok(Account {
        id: connection.last_insert_rowid(),
        name: name.to_string(),
        currency: currency.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Form, extract::State, http::StatusCode};
    use rusqlite::Connection;

    use crate::{
        Error,
        account::{
            Account, create_account, create_account_endpoint,
            create_endpoint::{AccountForm, CreateAccountState},
            get_account,
        },
        db::initialize,
        endpoints,
        test_utils::{assert_error_text, assert_hx_redirects_to, form_element, parse_fragment},
    };

    fn get_test_state() -> CreateAccountState {
        let connection = Connection::open_in_memory().expect("could not open in-memory database");
        initialize(&connection).expect("could not initialize test DB");

        CreateAccountState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn creates_the_account_and_redirects() {
        let state = get_test_state();
        let form = AccountForm {
            name: "Nequi".to_owned(),
            currency: "cop".to_owned(),
        };

        let response = create_account_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirects_to(&response, endpoints::ACCOUNTS_VIEW);
        let created = get_account(1, &state.db_connection.lock().unwrap())
            .expect("could not get account");
        assert_eq!(
            created,
            Account {
                id: 1,
                name: "Nequi".to_owned(),
                currency: "COP".to_owned(),
            }
        );
    }

    #[tokio::test]
    async fn a_blank_name_re_renders_the_form() {
        let state = get_test_state();
        let form = AccountForm {
            name: "   ".to_owned(),
            currency: "COP".to_owned(),
        };

        let response = create_account_endpoint(State(state), Form(form)).await;

        let html = parse_fragment(response).await;
        let form = form_element(&html);
        assert_error_text(&form, "Error: Account name cannot be empty");
    }

    #[tokio::test]
    async fn a_duplicate_name_re_renders_the_form() {
        let state = get_test_state();
        create_account("Bancolombia", "COP", &state.db_connection.lock().unwrap())
            .expect("could not create test account");
        let form = AccountForm {
            name: "Bancolombia".to_owned(),
            currency: "COP".to_owned(),
        };

        let response = create_account_endpoint(State(state), Form(form)).await;

        let html = parse_fragment(response).await;
        let form = form_element(&html);
        assert_error_text(
            &form,
            "Error: the account \"Bancolombia\" already exists in the database",
        );
    }

    #[test]
    fn duplicate_names_map_to_a_duplicate_error() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        create_account("Davivienda", "COP", &connection).unwrap();

        let duplicate = create_account("Davivienda", "USD", &connection);

        assert_eq!(
            duplicate,
            Err(Error::DuplicateAccountName("Davivienda".to_string()))
        );
    }
}
