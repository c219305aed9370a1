//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}',
//! use [format_endpoint].

/// The root route which reports that the server is up.
pub const ROOT: &str = "/";
/// The route to create and list transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to get, update or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route for the income and expense totals.
pub const TRANSACTIONS_SUMMARY: &str = "/api/transactions/summary";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// Expects `endpoint_path` to contain exactly one parameter in curly braces,
/// e.g. `/api/transactions/{transaction_id}`. Returns `endpoint_path`
/// unchanged if it has no parameter.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let (Some(start), Some(end)) = (endpoint_path.find('{'), endpoint_path.find('}')) else {
        return endpoint_path.to_owned();
    };

    format!(
        "{}{}{}",
        &endpoint_path[..start],
        id,
        &endpoint_path[end + 1..]
    )
}
