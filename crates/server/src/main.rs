//! soundlink server entry point.

use std::sync::Arc;

use axum::{Router, middleware};
use sea_orm::DatabaseConnection;
use soundlink_api::{AppState, middleware::auth_middleware, router as api_router};
use soundlink_common::Config;
use soundlink_core::{
    FollowingService, MusicLinkService, TrackService, UserService,
    music::{MusicApi, SpotifyClient},
};
use soundlink_db::repositories::{FollowingRepository, MusicAccountRepository, UserRepository};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

/// Wire repositories and services over a database connection.
fn build_state(db: DatabaseConnection, music_api: Arc<dyn MusicApi>) -> AppState {
    let db = Arc::new(db);

    let user_repo = UserRepository::new(Arc::clone(&db));
    let following_repo = FollowingRepository::new(Arc::clone(&db));
    let account_repo = MusicAccountRepository::new(db);

    AppState {
        user_service: UserService::new(user_repo.clone()),
        following_service: FollowingService::new(following_repo, user_repo),
        track_service: TrackService::new(Arc::clone(&music_api), account_repo.clone()),
        music_link_service: MusicLinkService::new(music_api, account_repo),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soundlink=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting soundlink server...");

    let config = Config::load()?;

    let db = soundlink_db::init(&config).await?;
    info!("Connected to database");

    info!("Running database migrations...");
    soundlink_db::migrate(&db).await?;
    info!("Migrations completed");

    let music_api: Arc<dyn MusicApi> = Arc::new(SpotifyClient::new(&config.music)?);
    let state = build_state(db, music_api);

    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
