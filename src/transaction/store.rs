//! The transaction store and the SQL queries behind each of its operations.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, params};
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::TransactionId,
    transaction::core::{
        EXPENSE, INCOME, Summary, Transaction, TransactionForm, ValidatedTransaction, from_cents,
        map_transaction_row,
    },
};

/// The number of rows changed by a statement.
pub type RowsAffected = usize;

/// Stores transactions in a SQLite database.
///
/// The store is cheap to clone; all clones share the same connection. Every
/// operation holds the connection for a single statement and releases it
/// before returning, including on failure.
#[derive(Debug, Clone)]
pub struct TransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl TransactionStore {
    /// Create a new store for the SQLite `connection`.
    ///
    /// The transaction table must have been created with
    /// [initialize](crate::initialize_db) beforehand.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }

    /// Validate `form` and store it as a new transaction dated now.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidTransaction] if `form` fails validation,
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::SqlError] if there is some other SQL error.
    pub fn create(&self, form: TransactionForm) -> Result<Transaction, Error> {
        let transaction = form.validate()?;

        create_transaction(transaction, OffsetDateTime::now_utc(), &*self.connection()?)
    }

    /// Retrieve every transaction, most recent first.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn list(&self) -> Result<Vec<Transaction>, Error> {
        list_transactions(&*self.connection()?)
    }

    /// Retrieve a transaction by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    pub fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        get_transaction(id, &*self.connection()?)
    }

    /// Replace the description, amount, type and category of the transaction `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidTransaction] if `form` fails validation,
    /// - [Error::UpdateMissingTransaction] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    pub fn update(&self, id: TransactionId, form: TransactionForm) -> Result<Transaction, Error> {
        let transaction = form.validate()?;

        update_transaction(id, transaction, &*self.connection()?)
    }

    /// Delete the transaction `id` if it exists.
    ///
    /// Deleting a transaction that does not exist is not an error, callers can
    /// check the returned row count if they care.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn delete(&self, id: TransactionId) -> Result<RowsAffected, Error> {
        delete_transaction(id, &*self.connection()?)
    }

    /// Total the amounts of income and expense transactions.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn summarize(&self) -> Result<Summary, Error> {
        summarize_transactions(&*self.connection()?)
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Insert a validated transaction recorded at `date`.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    transaction: ValidatedTransaction,
    date: OffsetDateTime,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO transactions (description, amount, type, category, date)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, description, amount, type, category, date",
        )?
        .query_row(
            params![
                transaction.description,
                transaction.amount_cents,
                transaction.type_,
                transaction.category,
                date,
            ],
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve all transactions ordered by date, newest first.
///
/// Transactions with the same date are ordered by ID, highest first.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn list_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, description, amount, type, category, date FROM transactions
             ORDER BY date DESC, id DESC",
        )?
        .query_map([], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, description, amount, type, category, date FROM transactions WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Overwrite the mutable fields of the transaction `id`, keeping its ID and date.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingTransaction] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    transaction: ValidatedTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "UPDATE transactions
             SET description = ?1, amount = ?2, type = ?3, category = ?4
             WHERE id = ?5
             RETURNING id, description, amount, type, category, date",
        )?
        .query_row(
            params![
                transaction.description,
                transaction.amount_cents,
                transaction.type_,
                transaction.category,
                id,
            ],
            map_transaction_row,
        )
        .optional()?
        .ok_or(Error::UpdateMissingTransaction)
}

/// Delete the transaction `id`, returning the number of rows removed (zero or one).
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM transactions WHERE id = :id", &[(":id", &id)])
        .map_err(Error::from)
}

/// Sum the amounts of income and expense transactions.
///
/// Both totals are zero when there are no matching transactions.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn summarize_transactions(connection: &Connection) -> Result<Summary, Error> {
    let (income_cents, expense_cents): (i64, i64) = connection.query_row(
        "SELECT
            COALESCE(SUM(CASE WHEN type = ?1 THEN amount ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN type = ?2 THEN amount ELSE 0 END), 0)
         FROM transactions",
        params![INCOME, EXPENSE],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    Ok(Summary {
        total_income: from_cents(income_cents),
        total_expenses: from_cents(expense_cents),
    })
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM transactions;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use rust_decimal_macros::dec;
    use time::{Duration, OffsetDateTime};

    use crate::{
        Error,
        db::initialize,
        transaction::{
            Summary, TransactionForm,
            store::{
                count_transactions, create_transaction, delete_transaction, get_transaction,
                list_transactions, summarize_transactions, update_transaction,
            },
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn form(description: &str, amount: rust_decimal::Decimal, type_: &str) -> TransactionForm {
        TransactionForm::new(description, amount, type_, "misc")
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();
        let date = OffsetDateTime::now_utc();

        let transaction = create_transaction(
            TransactionForm::new("Salary", dec!(1000.00), "income", "job")
                .validate()
                .unwrap(),
            date,
            &conn,
        )
        .expect("Could not create transaction");

        assert_eq!(transaction.id, 1);
        assert_eq!(transaction.description, "Salary");
        assert_eq!(transaction.amount, dec!(1000.00));
        assert_eq!(transaction.type_, "income");
        assert_eq!(transaction.category, "job");
        assert_eq!(transaction.date, date);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let conn = get_test_connection();
        let now = OffsetDateTime::now_utc();
        let first = create_transaction(form("a", dec!(1), "income").validate().unwrap(), now, &conn)
            .unwrap();
        delete_transaction(first.id, &conn).unwrap();

        let second =
            create_transaction(form("b", dec!(2), "income").validate().unwrap(), now, &conn)
                .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn list_orders_by_date_descending() {
        let conn = get_test_connection();
        let now = OffsetDateTime::now_utc();
        let oldest = create_transaction(
            form("oldest", dec!(1), "income").validate().unwrap(),
            now - Duration::days(2),
            &conn,
        )
        .unwrap();
        let newest = create_transaction(
            form("newest", dec!(2), "income").validate().unwrap(),
            now,
            &conn,
        )
        .unwrap();
        let middle = create_transaction(
            form("middle", dec!(3), "income").validate().unwrap(),
            now - Duration::days(1),
            &conn,
        )
        .unwrap();

        let transactions = list_transactions(&conn).unwrap();

        assert_eq!(transactions, vec![newest, middle, oldest]);
    }

    #[test]
    fn list_breaks_date_ties_by_id_descending() {
        let conn = get_test_connection();
        let now = OffsetDateTime::now_utc();
        let first =
            create_transaction(form("a", dec!(1), "income").validate().unwrap(), now, &conn)
                .unwrap();
        let second =
            create_transaction(form("b", dec!(1), "income").validate().unwrap(), now, &conn)
                .unwrap();

        let ids: Vec<_> = list_transactions(&conn)
            .unwrap()
            .into_iter()
            .map(|transaction| transaction.id)
            .collect();

        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn list_empty_table() {
        let conn = get_test_connection();

        assert_eq!(list_transactions(&conn), Ok(vec![]));
    }

    #[test]
    fn update_replaces_mutable_fields() {
        let conn = get_test_connection();
        let date = OffsetDateTime::now_utc() - Duration::hours(3);
        let original =
            create_transaction(form("old", dec!(1.23), "income").validate().unwrap(), date, &conn)
                .unwrap();
        let other =
            create_transaction(form("other", dec!(5), "income").validate().unwrap(), date, &conn)
                .unwrap();

        let updated = update_transaction(
            original.id,
            TransactionForm::new("new", dec!(3.21), "expense", "food")
                .validate()
                .unwrap(),
            &conn,
        )
        .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.date, original.date);
        assert_eq!(updated.description, "new");
        assert_eq!(updated.amount, dec!(3.21));
        assert_eq!(updated.type_, "expense");
        assert_eq!(updated.category, "food");
        assert_eq!(get_transaction(original.id, &conn), Ok(updated));
        assert_eq!(get_transaction(other.id, &conn), Ok(other));
    }

    #[test]
    fn update_missing_transaction_changes_nothing() {
        let conn = get_test_connection();
        let existing = create_transaction(
            form("existing", dec!(1), "income").validate().unwrap(),
            OffsetDateTime::now_utc(),
            &conn,
        )
        .unwrap();

        let result = update_transaction(
            42,
            form("new", dec!(2), "expense").validate().unwrap(),
            &conn,
        );

        assert_eq!(result, Err(Error::UpdateMissingTransaction));
        assert_eq!(count_transactions(&conn), Ok(1));
        assert_eq!(list_transactions(&conn), Ok(vec![existing]));
    }

    #[test]
    fn delete_removes_only_matching_transaction() {
        let conn = get_test_connection();
        let now = OffsetDateTime::now_utc();
        let doomed =
            create_transaction(form("a", dec!(1), "income").validate().unwrap(), now, &conn)
                .unwrap();
        let kept =
            create_transaction(form("b", dec!(1), "income").validate().unwrap(), now, &conn)
                .unwrap();

        let rows_affected = delete_transaction(doomed.id, &conn).unwrap();

        assert_eq!(rows_affected, 1);
        assert_eq!(get_transaction(doomed.id, &conn), Err(Error::NotFound));
        assert_eq!(list_transactions(&conn), Ok(vec![kept]));
    }

    #[test]
    fn delete_missing_transaction_is_noop() {
        let conn = get_test_connection();
        create_transaction(
            form("a", dec!(1), "income").validate().unwrap(),
            OffsetDateTime::now_utc(),
            &conn,
        )
        .unwrap();

        let rows_affected = delete_transaction(1337, &conn).unwrap();

        assert_eq!(rows_affected, 0);
        assert_eq!(count_transactions(&conn), Ok(1));
    }

    #[test]
    fn summary_of_empty_table_is_zero() {
        let conn = get_test_connection();

        let summary = summarize_transactions(&conn).unwrap();

        assert_eq!(
            summary,
            Summary {
                total_income: dec!(0),
                total_expenses: dec!(0),
            }
        );
        assert_eq!(summary.total_income.to_string(), "0.00");
    }

    #[test]
    fn summary_totals_income_and_expenses_only() {
        let conn = get_test_connection();
        let now = OffsetDateTime::now_utc();
        for (amount, type_) in [
            (dec!(100), "income"),
            (dec!(40), "expense"),
            (dec!(0.55), "income"),
            (dec!(999), "transfer"),
            (dec!(12), "Income"),
        ] {
            create_transaction(form("t", amount, type_).validate().unwrap(), now, &conn).unwrap();
        }

        let summary = summarize_transactions(&conn).unwrap();

        assert_eq!(summary.total_income, dec!(100.55));
        assert_eq!(summary.total_expenses, dec!(40.00));
    }

    #[test]
    fn get_missing_transaction_is_not_found() {
        let conn = get_test_connection();

        assert_eq!(get_transaction(1, &conn), Err(Error::NotFound));
    }
}
