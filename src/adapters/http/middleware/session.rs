//! Session middleware and extractor for axum.
//!
//! This module provides:
//! - `session_middleware` - Layer that resolves the Bearer token into a
//!   `SessionSnapshot` and injects it into request extensions
//! - `CurrentSession` - Extractor that reads the snapshot back
//!
//! ```text
//! Request → session_middleware → injects SessionSnapshot into extensions
//!                                      ↓
//!                      guard / handler → CurrentSession reads from extensions
//! ```
//!
//! Unlike a strict auth layer, this middleware never rejects. A missing or
//! bad token yields an anonymous snapshot and the gates decide what that
//! means for the route.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::domain::foundation::SessionSnapshot;
use crate::ports::SessionLoader;

/// Session middleware state - wraps the session loader.
pub type SessionState = Arc<dyn SessionLoader>;

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolves the request's session and injects it into extensions.
pub async fn session_middleware(
    State(loader): State<SessionState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .map(str::to_owned);

    let snapshot = match token {
        Some(token) => SessionSnapshot::resolved(loader.load(&token).await),
        None => SessionSnapshot::anonymous(),
    };

    request.extensions_mut().insert(snapshot);
    next.run(request).await
}

/// Extractor for the request's session snapshot.
///
/// Falls back to an anonymous session when `session_middleware` did not run.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub SessionSnapshot);

impl<S> axum::extract::FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let snapshot = parts
                .extensions
                .get::<SessionSnapshot>()
                .cloned()
                .unwrap_or_else(SessionSnapshot::anonymous);
            Ok(CurrentSession(snapshot))
        })
    }
}
