//! Auth routes: email access-code sign-in, session lookup, and logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! Sessions travel in an `HttpOnly` cookie. [`AuthUser`] requires one;
//! [`Caller`] classifies the request as authenticated or guest so routes
//! with guest grants (storage reads) can serve both.

use axum::extract::{FromRef, FromRequestParts, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use schema::PrincipalKind;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::services::email_auth::{self, EmailAuthError};
use crate::services::session::{self, SessionUser};
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

fn cleared_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

fn session_token(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    jar.get(COOKIE_NAME)
        .map(Cookie::value)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}

async fn lookup_session(state: &AppState, token: &str) -> Result<Option<SessionUser>, StatusCode> {
    session::validate_session(&state.pool, token).await.map_err(|e| {
        tracing::error!(error = %e, "session lookup failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

// =============================================================================
// EXTRACTORS
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: SessionUser,
    pub token: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = session_token(parts).ok_or(StatusCode::UNAUTHORIZED)?;
        let app_state = AppState::from_ref(state);
        let user = lookup_session(&app_state, &token)
            .await?
            .ok_or(StatusCode::UNAUTHORIZED)?;
        Ok(Self { user, token })
    }
}

/// The requesting principal, signed in or not.
///
/// A missing, unknown, or expired session yields a guest; only a failed
/// session lookup rejects the request.
pub struct Caller {
    pub user: Option<SessionUser>,
}

impl Caller {
    #[must_use]
    pub fn kind(&self) -> PrincipalKind {
        if self.user.is_some() { PrincipalKind::Authenticated } else { PrincipalKind::Guest }
    }
}

impl<S> FromRequestParts<S> for Caller
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = session_token(parts) else {
            return Ok(Self { user: None });
        };
        let app_state = AppState::from_ref(state);
        let user = lookup_session(&app_state, &token).await?;
        Ok(Self { user })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/auth/me` — return current user.
pub async fn me(auth: AuthUser) -> Json<SessionUser> {
    Json(auth.user)
}

/// `POST /api/auth/logout` — delete session, clear cookie.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(e) = session::delete_session(&state.pool, &auth.token).await {
        tracing::warn!(error = %e, user_id = %auth.user.id, "session delete failed during logout");
    }

    let jar = CookieJar::new().add(cleared_session_cookie(state.cookie_secure));
    (jar, StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct RequestCodeBody {
    pub email: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RequestCodeResponse {
    pub ok: bool,
    /// Present only when code echo is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// `POST /api/auth/email/request-code` — issue a one-time access code.
pub async fn request_email_code(
    State(state): State<AppState>,
    Json(body): Json<RequestCodeBody>,
) -> Result<Json<RequestCodeResponse>, StatusCode> {
    let code = email_auth::request_access_code(&state.pool, &body.email)
        .await
        .map_err(email_auth_error_to_status)?;

    if let Some(api_key) = state.email.resend_api_key.as_deref() {
        email_auth::send_access_code_email(api_key, &state.email.resend_from, body.email.trim(), &code)
            .await
            .map_err(email_auth_error_to_status)?;
    } else if !state.email.echo_code {
        tracing::warn!("RESEND_API_KEY unset and code echo disabled; access code was not delivered");
    }

    let code = state.email.echo_code.then_some(code);
    Ok(Json(RequestCodeResponse { ok: true, code }))
}

#[derive(Deserialize)]
pub struct VerifyCodeBody {
    pub email: String,
    pub code: String,
}

/// `POST /api/auth/email/verify-code` — exchange a code for a session cookie.
pub async fn verify_email_code(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<VerifyCodeBody>,
) -> Result<impl IntoResponse, StatusCode> {
    let user_id = email_auth::verify_access_code(&state.pool, &body.email, &body.code)
        .await
        .map_err(email_auth_error_to_status)?;

    let token = session::create_session(&state.pool, user_id).await.map_err(|e| {
        tracing::error!(error = %e, "session creation failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    tracing::info!(%user_id, "email sign-in succeeded");
    let jar = jar.add(session_cookie(token, state.cookie_secure));
    Ok((jar, Json(serde_json::json!({ "ok": true }))))
}

pub(crate) fn email_auth_error_to_status(err: EmailAuthError) -> StatusCode {
    match err {
        EmailAuthError::InvalidEmail | EmailAuthError::InvalidCode => StatusCode::BAD_REQUEST,
        EmailAuthError::VerificationFailed => StatusCode::UNAUTHORIZED,
        EmailAuthError::EmailDelivery(e) => {
            tracing::error!(error = %e, "access code delivery failed");
            StatusCode::BAD_GATEWAY
        }
        EmailAuthError::Db(e) => {
            tracing::error!(error = %e, "email auth database error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
