//! User endpoints.

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::get,
};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use soundlink_common::AppResult;
use soundlink_core::TrackStatus;
use soundlink_db::entities::user;

use crate::{extractors::Pagination, middleware::AppState, response::ApiResponse};

/// Public view of a user.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<FixedOffset>,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
        }
    }
}

/// List users, oldest first.
async fn list(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let users = state
        .user_service
        .list(page.limit(), page.offset())
        .await?;

    Ok(ApiResponse::ok(users.into_iter().map(Into::into).collect()))
}

/// Show a user.
async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.get(&id).await?;
    Ok(ApiResponse::ok(user.into()))
}

/// What a user is playing or last played.
async fn track(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<TrackStatus>> {
    let user = state.user_service.get(&id).await?;
    let Ok(status) = state.track_service.current_track(&user.id).await;
    Ok(ApiResponse::ok(status))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list))
        .route("/users/{id}", get(show))
        .route("/users/{id}/track", get(track))
}
