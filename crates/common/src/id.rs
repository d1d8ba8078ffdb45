//! ID and token generation.

use ulid::Ulid;
use uuid::Uuid;

/// ID generator for entities and opaque tokens.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    _private: (),
}

impl IdGenerator {
    /// Create a new ID generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Generate a new lower-case ULID.
    ///
    /// ULIDs sort by creation time, so edge IDs double as a stable
    /// tie-breaker when two rows share a timestamp.
    #[must_use]
    pub fn generate(&self) -> String {
        Ulid::new().to_string().to_lowercase()
    }

    /// Generate an opaque bearer token (32 hex chars, no time component).
    #[must_use]
    pub fn generate_token(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}
