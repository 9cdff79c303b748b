//! Client-side wire DTOs that are not record types.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The signed-in principal as returned by `GET /api/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl Principal {
    /// Name to show in the UI; falls back to the email when no username is set.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.username.trim().is_empty() { &self.email } else { &self.username }
    }
}
