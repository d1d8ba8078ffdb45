//! Endpoints for the authenticated user.

use axum::{Json, Router, extract::State, routing::get};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use soundlink_common::AppResult;
use soundlink_core::{TrackStatus, UpdateUserInput};
use soundlink_db::entities::user;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// The authenticated user's own profile.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    pub following_count: u64,
    pub followers_count: u64,
    pub music_linked: bool,
}

async fn me_response(state: &AppState, user: user::Model) -> AppResult<MeResponse> {
    let (following_count, followers_count) = state.following_service.counts(&user.id).await?;
    let music_linked = state.music_link_service.is_linked(&user.id).await?;

    Ok(MeResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        created_at: user.created_at,
        following_count,
        followers_count,
        music_linked,
    })
}

/// Show the authenticated user.
async fn show(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<MeResponse>> {
    Ok(ApiResponse::ok(me_response(&state, user).await?))
}

/// Update request.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Update the authenticated user.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateRequest>,
) -> AppResult<ApiResponse<MeResponse>> {
    let updated = state
        .user_service
        .update(
            &user.id,
            UpdateUserInput {
                username: req.username,
                email: req.email,
            },
        )
        .await?;

    Ok(ApiResponse::ok(me_response(&state, updated).await?))
}

/// What the authenticated user is playing or last played.
async fn track(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> ApiResponse<TrackStatus> {
    let Ok(status) = state.track_service.current_track(&user.id).await;
    ApiResponse::ok(status)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/i", get(show).patch(update))
        .route("/i/track", get(track))
}
