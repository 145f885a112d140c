//! Caller metadata (address and user agent) for sessions and analytics.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;

/// Best-effort description of the calling client. Never rejects.
#[derive(Debug, Clone, Default)]
pub struct ClientMeta {
    /// First hop of `X-Forwarded-For`, else `X-Real-IP`.
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl<S: Send + Sync> FromRequestParts<S> for ClientMeta {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let ip_address = header("x-forwarded-for")
            .and_then(|v| v.split(',').next().map(|ip| ip.trim().to_string()))
            .filter(|ip| !ip.is_empty())
            .or_else(|| header("x-real-ip"));

        Ok(ClientMeta {
            ip_address,
            user_agent: header(USER_AGENT.as_str()),
        })
    }
}
