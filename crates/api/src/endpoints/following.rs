//! Following endpoints.

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use soundlink_common::AppResult;

use super::users::UserResponse;
use crate::{
    extractors::AuthUser,
    middleware::AppState,
    response::{ApiResponse, no_content},
};

/// Follow result response.
#[derive(Serialize)]
pub struct FollowResponse {
    pub detail: String,
}

/// Follow a user.
async fn follow(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.following_service.follow(&user.id, &user_id).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(FollowResponse {
            detail: "Followed successfully.".to_string(),
        }),
    ))
}

/// Unfollow a user.
async fn unfollow(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.following_service.unfollow(&user.id, &user_id).await?;
    Ok(no_content())
}

/// Users the authenticated user follows, in the order they were followed.
async fn following(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let users = state.following_service.list_following(&user.id).await?;
    Ok(ApiResponse::ok(users.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/follow/{user_id}", post(follow).delete(unfollow))
        .route("/following", get(following))
}
