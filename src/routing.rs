//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{delete, get, post, put},
};

use crate::{
    AppState,
    account::{
        create_account_endpoint, delete_account_endpoint, edit_account_endpoint, get_accounts_page,
        get_create_account_page, get_edit_account_page,
    },
    bootstrap::bootstrap_endpoint,
    budget::{get_budgets_page, save_budget_endpoint},
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories_page,
        get_edit_category_page, get_new_category_page, update_category_endpoint,
    },
    dashboard::get_dashboard_page,
    endpoints,
    internal_server_error::get_internal_server_error_page,
    logging::logging_middleware,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_create_transaction_page,
        get_transactions_page,
    },
};

/// Build the router that serves every page and API endpoint.
pub fn build_router(state: AppState) -> Router {
    let pages = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_create_transaction_page),
        )
        .route(endpoints::ACCOUNTS_VIEW, get(get_accounts_page))
        .route(endpoints::NEW_ACCOUNT_VIEW, get(get_create_account_page))
        .route(endpoints::EDIT_ACCOUNT_VIEW, get(get_edit_account_page))
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .route(endpoints::NEW_CATEGORY_VIEW, get(get_new_category_page))
        .route(endpoints::EDIT_CATEGORY_VIEW, get(get_edit_category_page))
        .route(endpoints::BUDGETS_VIEW, get(get_budgets_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api = Router::new()
        .route(endpoints::TINTO, get(get_tinto))
        .route(
            endpoints::POST_TRANSACTION,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            delete(delete_transaction_endpoint),
        )
        .route(endpoints::POST_ACCOUNT, post(create_account_endpoint))
        .route(endpoints::PUT_ACCOUNT, put(edit_account_endpoint))
        .route(endpoints::DELETE_ACCOUNT, delete(delete_account_endpoint))
        .route(endpoints::POST_CATEGORY, post(create_category_endpoint))
        .route(endpoints::PUT_CATEGORY, put(update_category_endpoint))
        .route(endpoints::DELETE_CATEGORY, delete(delete_category_endpoint))
        .route(endpoints::POST_BUDGET, post(save_budget_endpoint))
        .route(endpoints::POST_BOOTSTRAP, post(bootstrap_endpoint));

    pages
        .merge(api)
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// Try to order a tinto. The server is a teapot.
async fn get_tinto() -> Response {
    (StatusCode::IM_A_TEAPOT, Html("Soy una tetera, no hay tinto")).into_response()
}

/// Send visitors from `/` straight to the dashboard.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
