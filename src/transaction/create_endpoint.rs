//! Defines the endpoint for creating a new transaction.
use axum::{Json, extract::State};

use crate::{
    Error,
    extract::JsonBody,
    transaction::{Transaction, TransactionForm, TransactionStore},
};

/// A route handler for creating a new transaction, responds with the stored transaction.
pub async fn create_transaction_endpoint(
    State(store): State<TransactionStore>,
    JsonBody(form): JsonBody<TransactionForm>,
) -> Result<Json<Transaction>, Error> {
    let transaction = store.create(form).inspect_err(|error| {
        tracing::debug!("could not create transaction: {error}");
    })?;

    tracing::info!("created transaction {}", transaction.id);

    Ok(Json(transaction))
}
