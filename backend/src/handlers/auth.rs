//! Registration, login, and logout.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{LoginForm, RegisterForm},
    repositories::{
        sessions,
        users::{self, RegisterError, VerifyError},
    },
    state::AppState,
    utils::cookies::{
        build_clear_cookie, build_session_cookie, extract_cookie_value, SESSION_COOKIE_NAME,
    },
};

pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    if form.login.trim().is_empty() || form.password.is_empty() || form.email.trim().is_empty() {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    }
    form.validate()?;
    if form.password != form.confirm_password {
        return Err(AppError::BadRequest("Passwords do not match".to_string()));
    }

    match users::create_user(&state.pool, form.login.trim(), form.email.trim(), &form.password)
        .await
    {
        Ok(user_id) => {
            tracing::info!(user_id, "registered new user");
            Ok(Redirect::to("/login").into_response())
        }
        Err(RegisterError::DuplicateEmail) => Err(AppError::Conflict(
            "Email is already registered".to_string(),
        )),
        Err(RegisterError::Database(e)) => Err(AppError::InternalServerError(e.into())),
    }
}

pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if form.email.is_empty() || form.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let user = match users::verify_credentials(&state.pool, &form.email, &form.password).await {
        Ok(user) => user,
        // Unknown email and wrong password are indistinguishable to the client.
        Err(VerifyError::NotFound) | Err(VerifyError::BadPassword) => {
            return Ok(Redirect::to("/login").into_response());
        }
        Err(VerifyError::Database(e)) => return Err(AppError::InternalServerError(e.into())),
    };

    let key = sessions::create_session(&state.pool, user.id, state.config.session_ttl_seconds)
        .await
        .map_err(|e| AppError::InternalServerError(e.into()))?;
    tracing::info!(user_id = user.id, "login");

    let cookie = build_session_cookie(&key, state.config.cookie_secure);
    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response())
}

/// Destroys the caller's sessions if the cookie is still valid, then
/// clears the cookie either way.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let token = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| extract_cookie_value(raw, SESSION_COOKIE_NAME));

    if let Some(token) = token {
        match sessions::validate_session(&state.pool, &token).await {
            Ok(Some(user_id)) => {
                if let Err(e) = sessions::delete_sessions_for_user(&state.pool, user_id).await {
                    tracing::error!(user_id, error = %e, "failed to destroy session");
                }
            }
            Ok(None) => {}
            Err(e) => tracing::error!(error = %e, "session lookup failed during logout"),
        }
    }

    let cookie = build_clear_cookie(state.config.cookie_secure);
    ([(header::SET_COOKIE, cookie)], Redirect::to("/login")).into_response()
}
