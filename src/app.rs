use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::get,
};
use tower_cookies::CookieManagerLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/login", get(handlers::login_page).post(handlers::login))
        .route("/logout", get(handlers::logout))
        .route("/dashboard", get(handlers::dashboard))
        .route("/track_order", get(handlers::track_order))
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
