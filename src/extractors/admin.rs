//! Admin credentials: bearer token from the `Authorization` header or a `token` query parameter.

use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query, Request, State},
    http::{header::AUTHORIZATION, request::Parts, Method},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;

/// Token presented by the client, if any.
#[derive(Clone, Debug)]
pub struct AdminToken(pub Option<String>);

impl AdminToken {
    fn from_parts(parts: &Parts) -> Self {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.trim().to_string());
        let query = || {
            Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
                .ok()
                .and_then(|Query(mut params)| params.remove("token"))
        };
        AdminToken(header.or_else(query).filter(|s| !s.is_empty()))
    }

    /// Ok when no admin token is configured or the presented one matches.
    pub fn authorize(&self, expected: Option<&str>) -> Result<(), AppError> {
        match expected {
            None => Ok(()),
            Some(expected) if self.0.as_deref() == Some(expected) => Ok(()),
            Some(_) => Err(AppError::Unauthorized),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminToken
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(AdminToken::from_parts(parts))
    }
}

/// Middleware guarding mutating API requests. Reads pass through.
pub async fn require_admin_for_writes(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !matches!(*request.method(), Method::GET | Method::HEAD | Method::OPTIONS) {
        let (parts, body) = request.into_parts();
        AdminToken::from_parts(&parts).authorize(state.config.admin_token.as_deref())?;
        return Ok(next.run(Request::from_parts(parts, body)).await);
    }
    Ok(next.run(request).await)
}
