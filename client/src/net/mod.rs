//! Networking modules for the server's REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles raw REST calls, `auth` wraps the session endpoints behind
//! the [`auth::AuthService`] seam used by the auth store and navigation
//! guard, and `types` defines client-only wire shapes. Record payloads come
//! from the shared `schema` crate.

pub mod api;
pub mod auth;
pub mod types;
