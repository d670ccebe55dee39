//! Spending accounts and their handlers.
//!
//! Covers the `Account` model, the database functions that store rows and
//! compute balances, the account picker fragment shared with the dashboard,
//! and the pages for listing, creating, and editing accounts.

mod accounts_page;
mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod picker;

pub use accounts_page::get_accounts_page;
pub use core::{
    Account, AccountId, create_account_table, get_account, get_account_balance, get_all_accounts,
    map_row_to_account, pick_account,
};
pub use create_endpoint::{AccountForm, create_account, create_account_endpoint};
pub use create_page::get_create_account_page;
pub use delete_endpoint::delete_account_endpoint;
pub use edit_endpoint::edit_account_endpoint;
pub use edit_page::get_edit_account_page;
pub use picker::account_picker_view;
