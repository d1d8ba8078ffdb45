//! API endpoints.

mod auth;
mod following;
mod i;
mod music;
mod users;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(i::router())
        .merge(users::router())
        .merge(following::router())
        .nest("/music", music::router())
}
