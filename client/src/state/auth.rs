//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `RwSignal<AuthState>` is provided for the whole app. Views read it
//! for identity-dependent rendering; the navigation guard does not trust it
//! and re-queries the server on every guarded navigation, so the two can
//! briefly disagree.
//!
//! ERROR HANDLING
//! ==============
//! Service failures are logged and never propagated. A failed check resets
//! the state to signed-out; a failed sign-out leaves it untouched, so the
//! store may keep claiming a session the server no longer has.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::net::auth::AuthService;
use crate::net::types::Principal;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub user: Option<Principal>,
    /// A session check is in flight.
    pub loading: bool,
}

impl AuthState {
    /// Apply the outcome of a current-principal query.
    pub fn apply_check(&mut self, result: Result<Principal, String>) {
        self.loading = false;
        match result {
            Ok(user) => {
                self.is_authenticated = true;
                self.user = Some(user);
            }
            Err(e) => {
                self.is_authenticated = false;
                self.user = None;
                leptos::logging::log!("not authenticated: {e}");
            }
        }
    }

    /// Apply the outcome of a sign-out request.
    pub fn apply_sign_out(&mut self, result: Result<(), String>) {
        match result {
            Ok(()) => {
                self.is_authenticated = false;
                self.user = None;
            }
            Err(e) => leptos::logging::error!("error signing out: {e}"),
        }
    }
}

/// Query `service` for the current principal and record the outcome in
/// `auth`. No borrow of the store is held across the request.
pub async fn check_auth(auth: RwSignal<AuthState>, service: &impl AuthService) {
    auth.update(|a| a.loading = true);
    let result = service.current_principal().await;
    auth.update(|a| a.apply_check(result));
}

/// Ask `service` to end the session and record the outcome in `auth`.
/// Returns whether the server accepted the sign-out.
pub async fn sign_out(auth: RwSignal<AuthState>, service: &impl AuthService) -> bool {
    let result = service.sign_out().await;
    let signed_out = result.is_ok();
    auth.update(|a| a.apply_sign_out(result));
    signed_out
}
