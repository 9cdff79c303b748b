//! Email access-code login.
//!
//! Creates and verifies short-lived six-character codes linked to an email.
//! Requesting a code also creates the `User` record for that address, so a
//! first login doubles as sign-up.

use rand::Rng;
use resend_rs::Resend;
use resend_rs::types::CreateEmailBaseOptions;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use super::user;

const CODE_LEN: usize = 6;
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const MAX_FAILED_ATTEMPTS: i32 = 5;
const EMAIL_AUTH_TEMPLATE: &str = include_str!("../../templates/email_auth.html");

/// Newest unconsumed, unexpired code row for the email bound to `$1`.
const LATEST_PENDING_CODE: &str = "SELECT id FROM email_login_codes \
     WHERE email = $1 AND consumed_at IS NULL AND expires_at > now() \
     ORDER BY created_at DESC LIMIT 1";

#[derive(Debug, thiserror::Error)]
pub enum EmailAuthError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid code")]
    InvalidCode,
    #[error("expired or incorrect code")]
    VerificationFailed,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("email delivery failed: {0}")]
    EmailDelivery(String),
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(normalized)
}

#[must_use]
pub fn normalize_code(code: &str) -> Option<String> {
    let normalized = code.trim().to_ascii_uppercase();
    if normalized.len() != CODE_LEN || !normalized.bytes().all(|b| CODE_ALPHABET.contains(&b)) {
        return None;
    }
    Some(normalized)
}

#[must_use]
pub fn generate_access_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

#[must_use]
pub fn hash_access_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    super::session::bytes_to_hex(&hasher.finalize())
}

/// Make sure a user exists for `email`, replace any pending code, and
/// return the new plaintext code. Only its hash is stored.
pub async fn request_access_code(pool: &PgPool, email: &str) -> Result<String, EmailAuthError> {
    let normalized = normalize_email(email).ok_or(EmailAuthError::InvalidEmail)?;
    user::ensure_for_email(pool, &normalized).await?;

    sqlx::query("DELETE FROM email_login_codes WHERE email = $1 AND consumed_at IS NULL")
        .bind(&normalized)
        .execute(pool)
        .await?;

    let code = generate_access_code();
    sqlx::query("INSERT INTO email_login_codes (email, code_hash) VALUES ($1, $2)")
        .bind(&normalized)
        .bind(hash_access_code(&code))
        .execute(pool)
        .await?;

    Ok(code)
}

/// Consume the latest pending code for `email` and return the user id.
///
/// A wrong code counts as a failed attempt; the code is burned after
/// [`MAX_FAILED_ATTEMPTS`].
pub async fn verify_access_code(pool: &PgPool, email: &str, code: &str) -> Result<Uuid, EmailAuthError> {
    let normalized_email = normalize_email(email).ok_or(EmailAuthError::InvalidEmail)?;
    let normalized_code = normalize_code(code).ok_or(EmailAuthError::InvalidCode)?;
    let code_hash = hash_access_code(&normalized_code);

    let consume = format!(
        "UPDATE email_login_codes SET consumed_at = now() \
         WHERE id = ({LATEST_PENDING_CODE}) AND code_hash = $2 RETURNING id"
    );
    let consumed = sqlx::query(&consume)
        .bind(&normalized_email)
        .bind(&code_hash)
        .fetch_optional(pool)
        .await?;

    if consumed.is_none() {
        record_failed_attempt(pool, &normalized_email).await?;
        return Err(EmailAuthError::VerificationFailed);
    }

    user::id_for_email(pool, &normalized_email)
        .await?
        .ok_or(EmailAuthError::VerificationFailed)
}

/// Count a wrong guess against the pending code, burning it at
/// [`MAX_FAILED_ATTEMPTS`].
async fn record_failed_attempt(pool: &PgPool, email: &str) -> Result<(), sqlx::Error> {
    let sql = format!(
        "UPDATE email_login_codes \
         SET attempts = attempts + 1, \
             consumed_at = CASE WHEN attempts + 1 >= $2 THEN now() ELSE consumed_at END \
         WHERE id = ({LATEST_PENDING_CODE})"
    );
    sqlx::query(&sql).bind(email).bind(MAX_FAILED_ATTEMPTS).execute(pool).await?;
    Ok(())
}

pub async fn send_access_code_email(
    resend_api_key: &str,
    resend_from: &str,
    to_email: &str,
    code: &str,
) -> Result<(), EmailAuthError> {
    let resend = Resend::new(resend_api_key);
    let to = [to_email];
    let subject = "Your Recipe Manager sign-in code";
    let html = render_email_auth_template(to_email, code);

    let email = CreateEmailBaseOptions::new(resend_from, to, subject).with_html(&html);
    resend
        .emails
        .send(email)
        .await
        .map_err(|e| EmailAuthError::EmailDelivery(e.to_string()))?;
    Ok(())
}

#[must_use]
pub fn render_email_auth_template(email: &str, code: &str) -> String {
    EMAIL_AUTH_TEMPLATE
        .replace("{{EMAIL}}", email)
        .replace("{{CODE}}", code)
}

#[cfg(test)]
#[path = "email_auth_test.rs"]
mod tests;
