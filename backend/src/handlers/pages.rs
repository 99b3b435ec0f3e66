//! JSON view-models for the index and chat pages. Rendering is the
//! frontend's job.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
};
use serde::Serialize;

use crate::{
    error::AppError,
    middleware::auth::CurrentUser,
    models::friend::Friend,
    repositories::{friendships, users},
    state::AppState,
    types::UserId,
};

#[derive(Debug, Serialize)]
pub struct PageContext {
    pub current_user_id: UserId,
    pub user_email: String,
    pub session_timeout: u64,
    pub friends: Vec<Friend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_friend: Option<Friend>,
}

pub async fn index(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<PageContext>, AppError> {
    let friends = friendships::friends_of(&state.pool, user.id).await?;
    Ok(Json(PageContext {
        current_user_id: user.id,
        user_email: user.email,
        session_timeout: state.config.session_ttl_seconds,
        friends,
        selected_friend: None,
    }))
}

/// Same context as the index plus the selected conversation partner.
/// Self, strangers, and unknown ids all 404 identically.
pub async fn chat(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(friend_id): Path<i64>,
) -> Result<Json<PageContext>, AppError> {
    if friend_id == user.id || !friendships::are_friends(&state.pool, user.id, friend_id).await? {
        return Err(AppError::NotFound("No such conversation".to_string()));
    }
    let friend = users::find_user_by_id(&state.pool, friend_id)
        .await?
        .map(|u| Friend {
            id: u.id,
            email: u.email,
        })
        .ok_or_else(|| AppError::NotFound("No such conversation".to_string()))?;

    let friends = friendships::friends_of(&state.pool, user.id).await?;
    Ok(Json(PageContext {
        current_user_id: user.id,
        user_email: user.email,
        session_timeout: state.config.session_ttl_seconds,
        friends,
        selected_friend: Some(friend),
    }))
}
