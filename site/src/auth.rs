// Session tokens and the request extractors built on them.
//
// A session is an HS256 JWT carried in the `Authorization: Bearer` header or
// the `app_session_id` cookie. Every request with a valid token refreshes the
// stored user, whose role decides access to the admin surface.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use chrono::{TimeDelta, Utc};
use inceptum_content::{UpsertUser, User};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::AppState;

pub const SESSION_COOKIE: &str = "app_session_id";

/// Upper bound accepted for `SESSION_TTL_DAYS`.
pub const MAX_SESSION_TTL_DAYS: i64 = 36_500;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// JWT claims of a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// The user's open id
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_method: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn to_upsert(&self) -> UpsertUser {
        UpsertUser {
            open_id: self.sub.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            login_method: self.login_method.clone(),
            role: None,
            last_signed_in: Some(Utc::now()),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("session secret is not configured")]
    NotConfigured,
    #[error("open id must not be empty")]
    MissingSubject,
    #[error("invalid session token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("session lifetime of {0} days is out of range")]
    InvalidTtl(i64),
}

/// Who a session token is minted for.
#[derive(Debug, Clone, Default)]
pub struct SessionIdentity {
    pub open_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub login_method: Option<String>,
}

#[derive(Clone)]
pub struct SessionSettings {
    secret: Option<Arc<str>>,
    ttl_days: i64,
    secure_cookies: bool,
}

impl std::fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSettings")
            .field("enabled", &self.secret.is_some())
            .field("ttl_days", &self.ttl_days)
            .field("secure_cookies", &self.secure_cookies)
            .finish()
    }
}

impl SessionSettings {
    pub fn new(secret: Option<&str>, ttl_days: i64, secure_cookies: bool) -> Self {
        Self {
            secret: secret
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(Arc::from),
            ttl_days: ttl_days.max(1),
            secure_cookies,
        }
    }

    /// Every request is anonymous.
    pub fn disabled() -> Self {
        Self::new(None, 365, false)
    }

    pub fn is_enabled(&self) -> bool {
        self.secret.is_some()
    }

    pub fn issue(&self, identity: &SessionIdentity) -> Result<String, AuthError> {
        let secret = self.secret.as_deref().ok_or(AuthError::NotConfigured)?;
        if identity.open_id.trim().is_empty() {
            return Err(AuthError::MissingSubject);
        }
        let now = Utc::now();
        let expires = TimeDelta::try_days(self.ttl_days)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or(AuthError::InvalidTtl(self.ttl_days))?;
        let claims = Claims {
            sub: identity.open_id.clone(),
            name: identity.name.clone(),
            email: identity.email.clone(),
            login_method: identity.login_method.clone(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };
        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )?)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let secret = self.secret.as_deref().ok_or(AuthError::NotConfigured)?;
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )?;
        if data.claims.sub.trim().is_empty() {
            return Err(AuthError::MissingSubject);
        }
        Ok(data.claims)
    }

    /// `Set-Cookie` value carrying a fresh session.
    pub fn session_cookie(&self, token: &str) -> String {
        self.cookie(token, self.ttl_days.saturating_mul(SECONDS_PER_DAY))
    }

    /// `Set-Cookie` value that removes the session.
    pub fn clear_cookie(&self) -> String {
        self.cookie("", 0)
    }

    fn cookie(&self, value: &str, max_age: i64) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            SESSION_COOKIE, value, max_age
        );
        if self.secure_cookies {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

/// Session token from the bearer header, falling back to the session cookie.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// Resolve the signed-in user for a request, refreshing their stored row.
pub fn resolve_viewer(headers: &HeaderMap, state: &AppState) -> Option<User> {
    if !state.sessions.is_enabled() {
        return None;
    }
    let token = extract_token(headers)?;
    let claims = match state.sessions.verify(&token) {
        Ok(claims) => claims,
        Err(e) => {
            debug!("Ignoring session token: {}", e);
            return None;
        }
    };
    match state.store.upsert_user(claims.to_upsert()) {
        Ok(user) => Some(user),
        Err(e) => {
            warn!("Failed to refresh user {}: {}", claims.sub, e);
            None
        }
    }
}

/// The current visitor, if signed in.
pub struct Viewer(pub Option<User>);

impl Viewer {
    pub fn is_admin(&self) -> bool {
        self.0.as_ref().map(User::is_admin).unwrap_or(false)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Viewer {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Viewer(resolve_viewer(&parts.headers, state)))
    }
}

/// A signed-in admin. Rejects with 401 without a session and 403 for
/// non-admins.
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match resolve_viewer(&parts.headers, state) {
            Some(user) if user.is_admin() => Ok(AdminUser(user)),
            Some(user) => {
                warn!("Admin access denied for {}", user.open_id);
                Err(AppError::forbidden())
            }
            None => Err(AppError::unauthorized()),
        }
    }
}
