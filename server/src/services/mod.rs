//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on protocol translation and auth plumbing.
//! `records` defines the generic CRUD contract; `recipe`, `review`,
//! `saved_recipe`, and `user` implement it per model.

pub mod email_auth;
pub mod recipe;
pub mod records;
pub mod review;
pub mod saved_recipe;
pub mod session;
pub mod storage;
pub mod user;
