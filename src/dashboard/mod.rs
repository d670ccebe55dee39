//! The dashboard, the landing page of the app.
//!
//! Shows the selected account's balance, this month's income and spending,
//! budget alerts and limit usage, the spending charts, and the newest
//! transactions.

mod charts;
mod handlers;
mod query;
mod summary;

pub use handlers::{DashboardQuery, DashboardState, get_dashboard_page};
