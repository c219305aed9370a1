//! Defines the endpoint for the income and expense totals.
use axum::{Json, extract::State};

use crate::{
    Error,
    transaction::{Summary, TransactionStore},
};

/// A route handler for the totals of income and expense transactions.
///
/// Transactions with any other type are left out of both totals.
pub async fn get_summary_endpoint(
    State(store): State<TransactionStore>,
) -> Result<Json<Summary>, Error> {
    store.summarize().map(Json)
}
