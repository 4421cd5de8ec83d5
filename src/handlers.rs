use crate::errors::AppError;
use crate::models::SessionUser;
use crate::progress::project_steps;
use crate::repo;
use crate::sessions;
use crate::spend::build_spend_series;
use crate::state::AppState;
use crate::ui;
use axum::{
    Form,
    extract::{Query, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use std::collections::HashMap;
use tower_cookies::Cookies;
use tracing::{info, warn};

pub async fn root() -> Redirect {
    Redirect::to("/dashboard")
}

pub async fn login_page(Query(params): Query<HashMap<String, String>>) -> Html<String> {
    let error = params
        .get("error")
        .and_then(|code| match code.as_str() {
            "unknown-account" => Some("No account found for that email."),
            _ => None,
        });
    Html(ui::render_login(error))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
}

/// Resolves a known account to a session. Credential verification is the
/// out-of-scope login flow; this endpoint is only the session writer.
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, AppError> {
    let Some(user) = repo::find_user_by_email(&state.db, form.email.trim()).await? else {
        warn!("sign-in attempt for unknown account");
        return Ok(Redirect::to("/login?error=unknown-account"));
    };

    sessions::open(&state, &cookies, SessionUser::from_user(&user)).await;
    info!(user_id = user.id, "session opened");
    Ok(Redirect::to("/dashboard"))
}

pub async fn logout(State(state): State<AppState>, cookies: Cookies) -> Redirect {
    sessions::close(&state, &cookies).await;
    info!("session closed");
    Redirect::to("/login")
}

pub async fn dashboard(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, AppError> {
    let user = sessions::require_user(&state, &cookies).await?;

    let notice = params
        .get("notice")
        .and_then(|code| match code.as_str() {
            "no-active-order" => Some("No active order found."),
            _ => None,
        });

    Ok(Html(ui::render_dashboard(&user, notice)))
}

pub async fn track_order(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, AppError> {
    let user = sessions::require_user(&state, &cookies).await?;

    // Malformed order_id values are treated as absent and fall back to the
    // most recent order.
    let requested = params.get("order_id").and_then(|raw| raw.parse::<i64>().ok());
    let order_id = match requested {
        Some(id) => id,
        None => repo::find_most_recent_order(&state.db, user.user_id)
            .await?
            .ok_or(AppError::NoActiveOrder)?,
    };

    let order = repo::find_order(&state.db, order_id, user.user_id)
        .await?
        .ok_or(AppError::NoActiveOrder)?;

    let steps = project_steps(order.status());
    let rows = repo::sum_spend_by_cylinder_type(&state.db, user.user_id).await?;
    let spend = build_spend_series(&rows);

    Ok(Html(ui::render_track_order(&order, &steps, &spend)))
}
