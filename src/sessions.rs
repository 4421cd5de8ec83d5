use crate::errors::AppError;
use crate::models::SessionUser;
use crate::state::AppState;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;
use tower_cookies::{Cookie, Cookies};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "session_id";

/// In-process session store, keyed by opaque token. Written only at sign-in,
/// read by every protected page.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, SessionUser>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: SessionUser) -> String {
        let token = Uuid::new_v4().to_string();
        self.inner.lock().await.insert(token.clone(), user);
        token
    }

    pub async fn get(&self, token: &str) -> Option<SessionUser> {
        self.inner.lock().await.get(token).cloned()
    }

    pub async fn remove(&self, token: &str) {
        self.inner.lock().await.remove(token);
    }
}

/// Opens a session for `user` and sets the session cookie.
pub async fn open(state: &AppState, cookies: &Cookies, user: SessionUser) {
    let token = state.sessions.insert(user).await;
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookies.add(cookie);
}

/// Ends the session named by the request cookie, if any.
pub async fn close(state: &AppState, cookies: &Cookies) {
    if let Some(cookie) = cookies.get(SESSION_COOKIE) {
        state.sessions.remove(cookie.value()).await;
    }
    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    cookies.remove(removal);
}

/// Session guard: resolves the authenticated user or fails with the
/// redirect-to-login error, halting the page before any query runs.
pub async fn require_user(state: &AppState, cookies: &Cookies) -> Result<SessionUser, AppError> {
    let token = cookies.get(SESSION_COOKIE).ok_or(AppError::Unauthenticated)?;
    state
        .sessions
        .get(token.value())
        .await
        .ok_or(AppError::Unauthenticated)
}
