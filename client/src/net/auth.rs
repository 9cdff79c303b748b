//! Auth service seam.
//!
//! DESIGN
//! ======
//! The auth store and the navigation guard both talk to the server through
//! [`AuthService`] so they can be exercised with a fake in tests. The guard
//! calls it on every guarded navigation; nothing here caches.

use super::types::Principal;

/// Session operations offered by the server.
#[allow(async_fn_in_trait)]
pub trait AuthService {
    /// The current principal, or an error when there is no valid session
    /// or the request fails.
    async fn current_principal(&self) -> Result<Principal, String>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), String>;
}

/// [`AuthService`] backed by the `/api/auth/*` endpoints.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpAuthService;

impl AuthService for HttpAuthService {
    async fn current_principal(&self) -> Result<Principal, String> {
        super::api::fetch_current_user().await
    }

    async fn sign_out(&self) -> Result<(), String> {
        super::api::logout().await
    }
}
