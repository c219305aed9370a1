//! Defines the endpoint for updating an existing transaction.
use axum::{Json, extract::State};

use crate::{
    Error,
    database_id::TransactionId,
    extract::{JsonBody, PathParam},
    transaction::{Transaction, TransactionForm, TransactionStore},
};

/// A route handler for replacing the description, amount, type and category
/// of a transaction, responds with the updated transaction.
///
/// The ID and date of the transaction never change. Responds with the status
/// code 404 if the transaction does not exist.
pub async fn edit_transaction_endpoint(
    State(store): State<TransactionStore>,
    PathParam(transaction_id): PathParam<TransactionId>,
    JsonBody(form): JsonBody<TransactionForm>,
) -> Result<Json<Transaction>, Error> {
    let transaction = store.update(transaction_id, form).inspect_err(|error| {
        tracing::debug!("could not update transaction {transaction_id}: {error}");
    })?;

    tracing::info!("updated transaction {transaction_id}");

    Ok(Json(transaction))
}
