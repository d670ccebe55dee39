//! The URI of every route the app serves.
//!
//! Endpoints that take a parameter, e.g. '/accounts/{account_id}/edit', are
//! formatted with [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The overview page with balances, trends, breakdowns and alerts.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for displaying the transaction history.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for recording a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page for listing all accounts.
pub const ACCOUNTS_VIEW: &str = "/accounts";
/// The page for creating a new account.
pub const NEW_ACCOUNT_VIEW: &str = "/accounts/new";
/// The page for editing an existing account.
pub const EDIT_ACCOUNT_VIEW: &str = "/accounts/{account_id}/edit";
/// The page for listing all categories.
pub const CATEGORIES_VIEW: &str = "/categories";
/// The page for creating a new category.
pub const NEW_CATEGORY_VIEW: &str = "/categories/new";
/// The page for editing an existing category.
pub const EDIT_CATEGORY_VIEW: &str = "/categories/{category_id}/edit";
/// The page for editing the monthly budget of an account.
pub const BUDGETS_VIEW: &str = "/budgets";
/// The page shown when the server fails with an internal error.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to order a tinto.
pub const TINTO: &str = "/api/tinto";
/// The route to create a transaction.
pub const POST_TRANSACTION: &str = "/api/transactions";
/// The route to delete a transaction.
pub const DELETE_TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to create an account.
pub const POST_ACCOUNT: &str = "/api/accounts";
/// The route to update an account.
pub const PUT_ACCOUNT: &str = "/api/accounts/{account_id}";
/// The route to delete an account.
pub const DELETE_ACCOUNT: &str = "/api/accounts/{account_id}";
/// The route to create a category.
pub const POST_CATEGORY: &str = "/api/categories";
/// The route to update a category.
pub const PUT_CATEGORY: &str = "/api/categories/{category_id}";
/// The route to delete a category.
pub const DELETE_CATEGORY: &str = "/api/categories/{category_id}";
/// The route to save the monthly budget of an account.
pub const POST_BUDGET: &str = "/api/budgets";
/// The route to provision the starter account and categories.
pub const POST_BOOTSTRAP: &str = "/api/bootstrap";

/// Replace the brace-delimited parameter in `endpoint_path` with `id`.
///
/// For example, '/accounts/{account_id}/edit' with id 7 becomes
/// '/accounts/7/edit'. Paths are assumed to hold at most one parameter;
/// a path without one is returned unchanged.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{id}{}",
        &endpoint_path[..param_start],
        &endpoint_path[param_end..]
    )
}
