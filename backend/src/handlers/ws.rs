//! WebSocket handshake. Authentication happens here, before the
//! upgrade: a connection with a missing, invalid, or expired session
//! never reaches the event loop and cannot influence any room.

use axum::{
    extract::{ws::WebSocketUpgrade, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::{
    gateway::socket,
    repositories::sessions,
    state::AppState,
    utils::cookies::{extract_cookie_value, SESSION_COOKIE_NAME},
};

pub async fn upgrade(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let token = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| extract_cookie_value(raw, SESSION_COOKIE_NAME));
    let Some(token) = token else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    let user_id = match sessions::validate_session(&state.pool, &token).await {
        Ok(Some(user_id)) => user_id,
        Ok(None) => return StatusCode::UNAUTHORIZED.into_response(),
        Err(e) => {
            // Fail closed: an unreachable store rejects the handshake.
            tracing::error!(error = %e, "session lookup failed during handshake");
            return StatusCode::UNAUTHORIZED.into_response();
        }
    };

    ws.on_upgrade(move |socket| socket::run(socket, state, user_id))
}
