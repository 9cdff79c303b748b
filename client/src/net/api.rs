//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning errors since these endpoints are only
//! meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, String>` outputs instead of panics so request
//! failures degrade UI behavior without crashing hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::marker::PhantomData;

use schema::Record;
#[cfg(any(test, feature = "hydrate"))]
use schema::{ListFilter, Model};
#[cfg(feature = "hydrate")]
use serde::Deserialize;
use uuid::Uuid;

use super::types::Principal;
use crate::util::encode::encode_path;
#[cfg(any(test, feature = "hydrate"))]
use crate::util::encode::encode_component;

#[cfg(not(feature = "hydrate"))]
const SERVER_ONLY: &str = "not available on server";

#[cfg(any(test, feature = "hydrate"))]
fn collection_endpoint(model: Model) -> String {
    format!("/api/{}", model.collection())
}

#[cfg(any(test, feature = "hydrate"))]
fn record_endpoint(model: Model, id: Uuid) -> String {
    format!("/api/{}/{id}", model.collection())
}

#[cfg(any(test, feature = "hydrate"))]
fn list_endpoint(model: Model, filter: &impl ListFilter) -> String {
    let query = filter
        .query_pairs()
        .into_iter()
        .map(|(key, value)| format!("{key}={}", encode_component(&value)))
        .collect::<Vec<_>>()
        .join("&");
    if query.is_empty() { collection_endpoint(model) } else { format!("{}?{query}", collection_endpoint(model)) }
}

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(what: &str, status: u16) -> String {
    format!("{what} failed: {status}")
}

/// URL an object can be downloaded from, e.g. for an `<img src>`.
#[must_use]
pub fn object_url(key: &str) -> String {
    format!("/api/storage/{}", encode_path(key))
}

// =============================================================================
// AUTH
// =============================================================================

/// Fetch the currently authenticated user from `/api/auth/me`.
///
/// # Errors
///
/// Returns an error string when there is no valid session, the request
/// fails, or when called on the server.
pub async fn fetch_current_user() -> Result<Principal, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/auth/me")
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("current user", resp.status()));
        }
        resp.json::<Principal>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(SERVER_ONLY.to_owned())
    }
}

/// Log out the current user by calling `POST /api/auth/logout`.
///
/// # Errors
///
/// Returns an error string if the request fails or is rejected.
pub async fn logout() -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/api/auth/logout")
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("sign out", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(SERVER_ONLY.to_owned())
    }
}

#[cfg(feature = "hydrate")]
#[derive(Debug, Deserialize)]
struct RequestEmailCodeResponse {
    ok: bool,
    code: Option<String>,
}

/// Request a 6-character email login code via `POST /api/auth/email/request-code`.
///
/// Returns an optional code string when the server is configured to echo codes.
///
/// # Errors
///
/// Returns an error string if the HTTP request fails or the server responds with a non-OK status.
pub async fn request_email_login_code(email: &str) -> Result<Option<String>, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "email": email });
        let resp = gloo_net::http::Request::post("/api/auth/email/request-code")
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("request code", resp.status()));
        }
        let body: RequestEmailCodeResponse = resp.json().await.map_err(|e| e.to_string())?;
        if !body.ok {
            return Err("request code failed".to_owned());
        }
        Ok(body.code)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = email;
        Err(SERVER_ONLY.to_owned())
    }
}

/// Verify an email login code via `POST /api/auth/email/verify-code`.
///
/// # Errors
///
/// Returns an error string if the HTTP request fails or the code is rejected.
pub async fn verify_email_login_code(email: &str, code: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "email": email, "code": code });
        let resp = gloo_net::http::Request::post("/api/auth/email/verify-code")
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("verify code", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, code);
        Err(SERVER_ONLY.to_owned())
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// Typed CRUD client for one record type.
///
/// ```ignore
/// let recipes = RecordClient::<Recipe>::new().list(&RecipeFilter::default()).await?;
/// ```
#[derive(Clone, Copy, Debug)]
pub struct RecordClient<R> {
    _record: PhantomData<R>,
}

impl<R> Default for RecordClient<R> {
    fn default() -> Self {
        Self { _record: PhantomData }
    }
}

impl<R: Record> RecordClient<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `GET /api/{collection}?{filter}`.
    ///
    /// # Errors
    ///
    /// Returns an error string if the request fails or is rejected.
    pub async fn list(&self, filter: &R::Filter) -> Result<Vec<R>, String> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&list_endpoint(R::MODEL, filter))
                .send()
                .await
                .map_err(|e| e.to_string())?;
            if !resp.ok() {
                return Err(request_failed_message("list", resp.status()));
            }
            resp.json::<Vec<R>>().await.map_err(|e| e.to_string())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = filter;
            Err(SERVER_ONLY.to_owned())
        }
    }

    /// `GET /api/{collection}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error string if the request fails or is rejected.
    pub async fn get(&self, id: Uuid) -> Result<R, String> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&record_endpoint(R::MODEL, id))
                .send()
                .await
                .map_err(|e| e.to_string())?;
            if !resp.ok() {
                return Err(request_failed_message("get", resp.status()));
            }
            resp.json::<R>().await.map_err(|e| e.to_string())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
            Err(SERVER_ONLY.to_owned())
        }
    }

    /// `POST /api/{collection}`.
    ///
    /// # Errors
    ///
    /// Returns an error string if the request fails or is rejected.
    pub async fn create(&self, draft: &R::Draft) -> Result<R, String> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(&collection_endpoint(R::MODEL))
                .json(draft)
                .map_err(|e| e.to_string())?
                .send()
                .await
                .map_err(|e| e.to_string())?;
            if !resp.ok() {
                return Err(request_failed_message("create", resp.status()));
            }
            resp.json::<R>().await.map_err(|e| e.to_string())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = draft;
            Err(SERVER_ONLY.to_owned())
        }
    }

    /// `PATCH /api/{collection}/{id}` with only the fields set in `draft`.
    ///
    /// # Errors
    ///
    /// Returns an error string if the request fails or is rejected.
    pub async fn update(&self, id: Uuid, draft: &R::Draft) -> Result<R, String> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::patch(&record_endpoint(R::MODEL, id))
                .json(draft)
                .map_err(|e| e.to_string())?
                .send()
                .await
                .map_err(|e| e.to_string())?;
            if !resp.ok() {
                return Err(request_failed_message("update", resp.status()));
            }
            resp.json::<R>().await.map_err(|e| e.to_string())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, draft);
            Err(SERVER_ONLY.to_owned())
        }
    }

    /// `DELETE /api/{collection}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error string if the request fails or is rejected.
    pub async fn delete(&self, id: Uuid) -> Result<(), String> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::delete(&record_endpoint(R::MODEL, id))
                .send()
                .await
                .map_err(|e| e.to_string())?;
            if !resp.ok() {
                return Err(request_failed_message("delete", resp.status()));
            }
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
            Err(SERVER_ONLY.to_owned())
        }
    }
}

// =============================================================================
// STORAGE
// =============================================================================

/// Upload a browser file to `key` via `PUT /api/storage/{key}`.
///
/// # Errors
///
/// Returns an error string if the request fails or is rejected.
#[cfg(feature = "hydrate")]
pub async fn upload_file(key: &str, file: &web_sys::File) -> Result<(), String> {
    let mut request = gloo_net::http::Request::put(&object_url(key));
    let content_type = file.type_();
    if !content_type.is_empty() {
        request = request.header("Content-Type", &content_type);
    }
    let resp = request
        .body(file.clone())
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(request_failed_message("upload", resp.status()));
    }
    Ok(())
}

/// Remove the object at `key` via `DELETE /api/storage/{key}`.
///
/// # Errors
///
/// Returns an error string if the request fails or is rejected.
pub async fn delete_object(key: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::delete(&object_url(key))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("delete object", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        Err(SERVER_ONLY.to_owned())
    }
}
