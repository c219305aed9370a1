//! Application router configuration.

use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::{
    AppState, Error, endpoints,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_summary_endpoint, get_transaction_endpoint, list_transactions_endpoint,
    },
};

/// The message the root route responds with while the server is up.
pub const LIVENESS_MESSAGE: &str = "Personal finance API online";

/// A response body holding a single human readable message.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// The message.
    pub message: String,
}

/// Return a router with all the app's routes.
///
/// Cross-origin requests are allowed from any origin so that browser front
/// ends served from elsewhere can use the API.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_liveness))
        .route(
            endpoints::TRANSACTIONS_API,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(endpoints::TRANSACTIONS_SUMMARY, get(get_summary_endpoint))
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .put(edit_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .fallback(get_404_not_found)
        .method_not_allowed_fallback(get_405_method_not_allowed)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// The root path '/' reports that the server is running.
async fn get_liveness() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: LIVENESS_MESSAGE.to_owned(),
    })
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}

async fn get_405_method_not_allowed() -> Error {
    Error::MethodNotAllowed
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::routing::{LIVENESS_MESSAGE, get_liveness};

    #[tokio::test]
    async fn root_reports_liveness() {
        let response = get_liveness().await;

        assert_eq!(response.0.message, LIVENESS_MESSAGE);
        assert_eq!(response.into_response().status(), StatusCode::OK);
    }
}
