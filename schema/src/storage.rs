//! Object-storage access policy.
//!
//! DESIGN
//! ======
//! Access is declared per path prefix. A prefix pattern ends in `/*` and
//! matches every key strictly below it. Keys outside every declared prefix
//! are denied to everyone. Key shape is validated separately so a policy
//! match can never be reached through `..` traversal.

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

use crate::data::PrincipalKind;

/// Bucket-level prefix holding recipe images.
pub const RECIPE_IMAGE_PREFIX: &str = "recipe-manager/";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageAction {
    Read,
    Write,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageDenied {
    #[error("invalid object key: {0}")]
    InvalidKey(String),
    #[error("no storage rule covers {0}")]
    Undeclared(String),
    #[error("{action:?} on {key} requires an authenticated principal")]
    Unauthenticated { key: String, action: StorageAction },
    #[error("{action:?} on {key} is not permitted")]
    Forbidden { key: String, action: StorageAction },
}

/// Actions granted on keys under one prefix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PathRule {
    /// Pattern such as `recipe-manager/*`.
    pub pattern: &'static str,
    pub authenticated: Vec<StorageAction>,
    pub guest: Vec<StorageAction>,
}

impl PathRule {
    fn prefix(&self) -> &str {
        self.pattern.strip_suffix('*').unwrap_or(self.pattern)
    }

    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        let prefix = self.prefix();
        key.len() > prefix.len() && key.starts_with(prefix)
    }

    #[must_use]
    pub fn grants(&self, principal: PrincipalKind, action: StorageAction) -> bool {
        match principal {
            PrincipalKind::Authenticated => self.authenticated.contains(&action),
            PrincipalKind::Guest => self.guest.contains(&action),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StoragePolicy {
    pub bucket: &'static str,
    pub rules: Vec<PathRule>,
}

impl StoragePolicy {
    /// `recipe-manager/*`: authenticated read/write/delete, guest read.
    #[must_use]
    pub fn recipe_manager() -> Self {
        Self {
            bucket: "recipe-manager-bucket",
            rules: vec![PathRule {
                pattern: "recipe-manager/*",
                authenticated: vec![StorageAction::Read, StorageAction::Write, StorageAction::Delete],
                guest: vec![StorageAction::Read],
            }],
        }
    }

    /// Check whether `principal` may perform `action` on `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageDenied`] when the key is malformed, outside every
    /// declared prefix, or not granted to the caller's class.
    pub fn check(&self, key: &str, principal: PrincipalKind, action: StorageAction) -> Result<(), StorageDenied> {
        validate_object_key(key)?;

        let matching = self.rules.iter().filter(|rule| rule.matches(key)).collect::<Vec<_>>();
        if matching.is_empty() {
            return Err(StorageDenied::Undeclared(key.to_owned()));
        }
        if matching.iter().any(|rule| rule.grants(principal, action)) {
            return Ok(());
        }
        match principal {
            PrincipalKind::Guest => Err(StorageDenied::Unauthenticated { key: key.to_owned(), action }),
            PrincipalKind::Authenticated => Err(StorageDenied::Forbidden { key: key.to_owned(), action }),
        }
    }
}

/// Reject keys that are empty, absolute, contain backslashes, or contain
/// empty, `.` or `..` segments.
///
/// # Errors
///
/// Returns [`StorageDenied::InvalidKey`] describing the offending key.
pub fn validate_object_key(key: &str) -> Result<(), StorageDenied> {
    let invalid = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key.contains('\0')
        || key
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if invalid {
        return Err(StorageDenied::InvalidKey(key.to_owned()));
    }
    Ok(())
}

/// Build a key for a recipe image upload under [`RECIPE_IMAGE_PREFIX`].
///
/// `unique` disambiguates uploads of files with the same name. Path
/// separators and whitespace in the file name are replaced.
#[must_use]
pub fn recipe_image_key(unique: &str, file_name: &str) -> String {
    let cleaned = file_name
        .chars()
        .map(|c| if c == '/' || c == '\\' || c.is_whitespace() { '_' } else { c })
        .collect::<String>();
    let cleaned = cleaned.trim_start_matches('.');
    let cleaned = if cleaned.is_empty() { "image" } else { cleaned };
    format!("{RECIPE_IMAGE_PREFIX}{unique}-{cleaned}")
}
