//! Monthly budget management.
//!
//! A budget caps an account's spending for one calendar month, either as a
//! total limit across all categories, per-category limits, or both. Budgets
//! feed the dashboard's alert and progress computations.

mod core;
mod edit_page;
mod save_endpoint;

pub use core::{
    Budget, BudgetId, BudgetLimit, BudgetLimitId, create_budget_tables, get_budget,
    get_budget_limits, month_start, next_month_start, save_budget,
};
pub use edit_page::get_budgets_page;
pub use save_endpoint::save_budget_endpoint;
