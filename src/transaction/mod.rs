//! Transaction management for the finance API.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model, the `TransactionForm` clients send and its validation rules
//! - The `TransactionStore` and the SQL queries behind each of its operations
//! - The route handlers for the transaction endpoints

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod list_endpoint;
mod store;
mod summary_endpoint;

pub use core::{
    EXPENSE, INCOME, Summary, Transaction, TransactionForm, create_transaction_table,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::{DeleteConfirmation, delete_transaction_endpoint};
pub use edit_endpoint::edit_transaction_endpoint;
pub use list_endpoint::{get_transaction_endpoint, list_transactions_endpoint};
pub use store::TransactionStore;
pub use summary_endpoint::get_summary_endpoint;
