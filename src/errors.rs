use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    /// No authenticated session; protected pages bounce to the sign-in page
    /// before any order data is touched.
    #[error("authentication required")]
    Unauthenticated,

    /// No order could be resolved for the tracking page. Covers both a user
    /// with no orders and an order id owned by someone else.
    #[error("no active order found")]
    NoActiveOrder,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthenticated => Redirect::to("/login").into_response(),
            AppError::NoActiveOrder => {
                Redirect::to("/dashboard?notice=no-active-order").into_response()
            }
            AppError::Database(err) => {
                error!("database error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "something went wrong").into_response()
            }
        }
    }
}
