//! `AuthUser` extractor: turns the gateway-injected identity header into a
//! request context.
//!
//! FitPulse sits behind an API gateway that authenticates the caller and
//! forwards the verified account id in `X-User-Id`. The extractor trusts
//! that header; a missing or malformed value is rejected as unauthorized.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use fitpulse_core::error::AppError;
use fitpulse_core::types::UserId;
use fitpulse_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the authenticated account id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing X-User-Id header"))?;

        let user_id = raw
            .parse::<Uuid>()
            .map_err(|_| AppError::unauthorized("Invalid X-User-Id header"))?;

        Ok(AuthUser(RequestContext::new(UserId::from_uuid(user_id))))
    }
}
