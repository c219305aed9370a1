//! Defines the endpoints for reading transactions.
use axum::{Json, extract::State};

use crate::{
    Error,
    database_id::TransactionId,
    extract::PathParam,
    transaction::{Transaction, TransactionStore},
};

/// A route handler for listing every transaction, most recent first.
pub async fn list_transactions_endpoint(
    State(store): State<TransactionStore>,
) -> Result<Json<Vec<Transaction>>, Error> {
    store.list().map(Json)
}

/// A route handler for getting a transaction by its database ID.
///
/// Responds with the status code 404 if the transaction does not exist.
pub async fn get_transaction_endpoint(
    State(store): State<TransactionStore>,
    PathParam(transaction_id): PathParam<TransactionId>,
) -> Result<Json<Transaction>, Error> {
    store.get(transaction_id).map(Json)
}
