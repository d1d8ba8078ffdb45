//! Core business logic for soundlink.

pub mod music;
pub mod services;

pub use services::*;
