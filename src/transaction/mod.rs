//! Records of money moving in or out of an account.
//!
//! Covers the `Transaction` model and its builder, the database functions
//! that store and count rows, and the handlers for the entry form and the
//! history table.

mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod transactions_page;

pub use core::{
    Transaction, TransactionBuilder, TransactionId, TransactionKind, count_transactions,
    create_transaction, create_transaction_table, get_transaction,
};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_create_transaction_page;
pub use delete_endpoint::delete_transaction_endpoint;
pub use transactions_page::get_transactions_page;
