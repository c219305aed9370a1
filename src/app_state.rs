//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{db::initialize, transaction::TransactionStore};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The store for managing [transactions](crate::Transaction).
    pub transaction_store: TransactionStore,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will try to initialize the database by adding the tables
    /// for the domain models. A failure is logged rather than returned so that
    /// the server can still start, in which case requests fail individually
    /// until the schema exists.
    pub fn new(db_connection: Connection) -> Self {
        match initialize(&db_connection) {
            Ok(()) => tracing::info!("transaction table created or verified"),
            Err(error) => tracing::error!("could not initialize the database: {error}"),
        }

        let connection = Arc::new(Mutex::new(db_connection));

        Self {
            transaction_store: TransactionStore::new(connection),
        }
    }
}

impl FromRef<AppState> for TransactionStore {
    fn from_ref(state: &AppState) -> Self {
        state.transaction_store.clone()
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::AppState;

    #[test]
    fn new_initializes_database() {
        let conn = Connection::open_in_memory().unwrap();

        let state = AppState::new(conn);

        assert_eq!(state.transaction_store.list(), Ok(vec![]));
    }
}
