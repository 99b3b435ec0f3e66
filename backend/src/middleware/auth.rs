//! Session-cookie authentication for the protected HTTP routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    repositories::{sessions, users},
    state::AppState,
    types::UserId,
    utils::cookies::{extract_cookie_value, SESSION_COOKIE_NAME},
};

/// Authenticated user attached to the request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub login: String,
    pub email: String,
}

pub async fn auth(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    match authenticate(&state, request.headers()).await {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        // Missing, invalid, and expired sessions all land here; the
        // client sees one and the same redirect.
        None => Redirect::to("/login").into_response(),
    }
}

async fn authenticate(state: &AppState, headers: &HeaderMap) -> Option<CurrentUser> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    let token = extract_cookie_value(raw, SESSION_COOKIE_NAME)?;

    let user_id = match sessions::validate_session(&state.pool, &token).await {
        Ok(user_id) => user_id?,
        Err(e) => {
            // Fail closed if the store cannot be reached.
            tracing::error!(error = %e, "session lookup failed");
            return None;
        }
    };
    let user = match users::find_user_by_id(&state.pool, user_id).await {
        Ok(user) => user?,
        Err(e) => {
            tracing::error!(user_id, error = %e, "user lookup failed");
            return None;
        }
    };
    Some(CurrentUser {
        id: user.id,
        login: user.login,
        email: user.email,
    })
}
