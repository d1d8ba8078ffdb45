//! Music account linking endpoints.

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use soundlink_common::AppResult;
use soundlink_core::AuthorizeRedirect;

use crate::{
    extractors::AuthUser,
    middleware::AppState,
    response::{ApiResponse, no_content},
};

/// Get the provider URL to start linking.
async fn authorize(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
) -> ApiResponse<AuthorizeRedirect> {
    ApiResponse::ok(state.music_link_service.authorize())
}

/// Link request, carrying the code from the provider redirect.
#[derive(Debug, Deserialize)]
pub struct LinkRequest {
    pub code: String,
}

/// Complete linking with an authorization code.
async fn link(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<LinkRequest>,
) -> AppResult<impl IntoResponse> {
    state.music_link_service.link(&user.id, &req.code).await?;
    Ok(no_content())
}

/// Remove the linked account.
async fn unlink(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    state.music_link_service.unlink(&user.id).await?;
    Ok(no_content())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/authorize", get(authorize))
        .route("/link", post(link).delete(unlink))
}
