//! External music streaming API integration.
//!
//! The wire types in [`dto`] match the provider's JSON exactly; the
//! [`MusicApi`] trait is the seam the track lookup depends on, so tests
//! can substitute an in-memory implementation for [`SpotifyClient`].

mod client;
pub mod dto;
mod error;
mod traits;

pub use client::{SCOPE, SpotifyClient};
pub use error::MusicApiError;
pub use traits::MusicApi;
