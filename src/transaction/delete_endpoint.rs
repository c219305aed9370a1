//! Defines the endpoint for deleting a transaction.
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::TransactionId,
    extract::PathParam,
    transaction::TransactionStore,
};

/// The confirmation sent after a delete request.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    /// A human readable confirmation.
    pub message: String,
}

/// The message sent whether or not the transaction existed.
pub const DELETE_CONFIRMATION_MESSAGE: &str = "Transaction deleted successfully";

/// A route handler for deleting a transaction, responds with a confirmation.
///
/// Deleting a transaction that does not exist succeeds, so the client cannot
/// tell whether the transaction was deleted or was already gone.
pub async fn delete_transaction_endpoint(
    State(store): State<TransactionStore>,
    PathParam(transaction_id): PathParam<TransactionId>,
) -> Result<Json<DeleteConfirmation>, Error> {
    match store.delete(transaction_id)? {
        0 => tracing::debug!("transaction {transaction_id} was already absent"),
        _ => tracing::info!("deleted transaction {transaction_id}"),
    }

    Ok(Json(DeleteConfirmation {
        message: DELETE_CONFIRMATION_MESSAGE.to_owned(),
    }))
}
