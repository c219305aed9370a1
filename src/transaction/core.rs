//! Defines the core data models, validation rules and row mapping for transactions.

use rusqlite::{Connection, Row};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// The transaction type counted as income in a [Summary].
pub const INCOME: &str = "income";
/// The transaction type counted as an expense in a [Summary].
pub const EXPENSE: &str = "expense";

/// The maximum number of characters in a transaction description.
pub const MAX_DESCRIPTION_LENGTH: usize = 255;
/// The maximum number of characters in a transaction type or category.
pub const MAX_LABEL_LENGTH: usize = 50;
/// The number of fractional digits amounts are stored with.
pub const AMOUNT_SCALE: u32 = 2;
/// Amounts must be strictly less than this in magnitude, which allows for
/// ten digits in total with [AMOUNT_SCALE] of them after the decimal point.
pub const AMOUNT_LIMIT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned, with two decimal places.
    pub amount: Decimal,
    /// The kind of transaction, usually either "income" or "expense".
    #[serde(rename = "type")]
    pub type_: String,
    /// A free-form label for grouping transactions, e.g. "Groceries".
    pub category: String,
    /// When the transaction was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

/// The fields a client supplies to create or update a [Transaction].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionForm {
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money, as a JSON number or a decimal string.
    pub amount: Decimal,
    /// The kind of transaction, usually either "income" or "expense".
    #[serde(rename = "type")]
    pub type_: String,
    /// A free-form label for grouping transactions.
    pub category: String,
}

impl TransactionForm {
    /// Create a new form.
    pub fn new(description: &str, amount: Decimal, type_: &str, category: &str) -> Self {
        Self {
            description: description.to_owned(),
            amount,
            type_: type_.to_owned(),
            category: category.to_owned(),
        }
    }

    /// Check the form against the constraints of the transaction table.
    ///
    /// Returns the form with `amount` rounded to [AMOUNT_SCALE] decimal places.
    ///
    /// # Errors
    /// Returns an [Error::InvalidTransaction] describing the first field that
    /// fails validation.
    pub fn validate(self) -> Result<ValidatedTransaction, Error> {
        check_text("description", &self.description, MAX_DESCRIPTION_LENGTH)?;
        check_text("type", &self.type_, MAX_LABEL_LENGTH)?;
        check_text("category", &self.category, MAX_LABEL_LENGTH)?;
        let amount_cents = to_cents(self.amount)?;

        Ok(ValidatedTransaction {
            description: self.description,
            amount_cents,
            type_: self.type_,
            category: self.category,
        })
    }
}

/// A [TransactionForm] that passed validation and is ready to be written to the database.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTransaction {
    pub(crate) description: String,
    pub(crate) amount_cents: i64,
    pub(crate) type_: String,
    pub(crate) category: String,
}

/// The income and expense totals over all transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// The sum of the amounts of all "income" transactions.
    pub total_income: Decimal,
    /// The sum of the amounts of all "expense" transactions.
    pub total_expenses: Decimal,
}

fn check_text(field: &str, value: &str, max_length: usize) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::InvalidTransaction(format!("{field} cannot be empty")));
    }

    let length = value.chars().count();
    if length > max_length {
        return Err(Error::InvalidTransaction(format!(
            "{field} must be at most {max_length} characters, got {length}"
        )));
    }

    Ok(())
}

/// Round `amount` to two decimal places and express it in hundredths.
fn to_cents(amount: Decimal) -> Result<i64, Error> {
    let mut rounded =
        amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);

    if rounded.abs() >= AMOUNT_LIMIT {
        return Err(Error::InvalidTransaction(format!(
            "amount must be less than {AMOUNT_LIMIT} in magnitude, got {amount}"
        )));
    }

    rounded.rescale(AMOUNT_SCALE);

    i64::try_from(rounded.mantissa())
        .map_err(|_| Error::InvalidTransaction(format!("amount {amount} is out of range")))
}

/// Convert hundredths back into a decimal with two decimal places.
pub(crate) fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, AMOUNT_SCALE)
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the transaction table in the database.
///
/// Does nothing if the table already exists.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    // Amounts are stored in hundredths so that sums are exact.
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL CHECK (length(description) BETWEEN 1 AND 255),
                amount INTEGER NOT NULL,
                type TEXT NOT NULL CHECK (length(type) BETWEEN 1 AND 50),
                category TEXT NOT NULL CHECK (length(category) BETWEEN 1 AND 50),
                date TEXT NOT NULL
                )",
        (),
    )?;

    // Add index used for listing transactions newest first.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let description = row.get(1)?;
    let amount_cents: i64 = row.get(2)?;
    let type_ = row.get(3)?;
    let category = row.get(4)?;
    let date = row.get(5)?;

    Ok(Transaction {
        id,
        description,
        amount: from_cents(amount_cents),
        type_,
        category,
        date,
    })
}

// ============================================================================
// TESTS
// ============================================================================
