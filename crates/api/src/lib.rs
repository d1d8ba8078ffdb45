//! HTTP API layer for soundlink.
//!
//! - **Endpoints**: accounts, users, follow graph, linked music accounts
//! - **Extractors**: authenticated user, pagination
//! - **Middleware**: bearer token authentication
//!
//! Built on Axum 0.8.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
