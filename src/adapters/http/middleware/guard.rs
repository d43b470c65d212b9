//! Route guard middleware for API routes.
//!
//! Applies a `RouteGuard` to every route of a router. The session comes from
//! `session_middleware`, which must wrap the guarded routes. `app_router`
//! mounts `/api/me` behind it; other routers can use `guard_routes` the same
//! way.
//!
//! | Gate outcome                      | Response |
//! |-----------------------------------|----------|
//! | Render                            | handler  |
//! | Redirect to `/login`              | 401      |
//! | Redirect to `/complete-profile`   | 409      |
//! | AccessDenied                      | 403      |
//! | Loading                           | 503      |

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Json, Router,
};

use crate::domain::access::{GateOutcome, GuardOptions, Redirect, RouteGuard, LOGIN_PATH};
use crate::domain::foundation::{ErrorCode, SessionSnapshot};

/// Wraps every route of `router` in a guard built from `options`.
pub fn guard_routes<S>(router: Router<S>, options: GuardOptions) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let guard = Arc::new(RouteGuard::new(options));
    router.route_layer(middleware::from_fn_with_state(guard, route_guard_middleware))
}

/// Rejects requests the guard would not render.
pub async fn route_guard_middleware(
    State(guard): State<Arc<RouteGuard>>,
    request: Request,
    next: Next,
) -> Response {
    let session = request
        .extensions()
        .get::<SessionSnapshot>()
        .cloned()
        .unwrap_or_else(SessionSnapshot::anonymous);

    let outcome = guard.evaluate(&session, request.uri().path());
    match outcome {
        GateOutcome::Render => next.run(request).await,
        GateOutcome::Redirect(redirect) => GuardRejection::from_redirect(redirect).into_response(),
        GateOutcome::AccessDenied => GuardRejection::Forbidden.into_response(),
        GateOutcome::Loading => GuardRejection::SessionLoading.into_response(),
    }
}

/// Rejection produced by the route guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardRejection {
    Unauthenticated { redirect: String },
    ProfileIncomplete { redirect: String },
    Forbidden,
    SessionLoading,
}

impl GuardRejection {
    fn from_redirect(redirect: Redirect) -> Self {
        if redirect.target == LOGIN_PATH {
            GuardRejection::Unauthenticated {
                redirect: redirect.target,
            }
        } else {
            GuardRejection::ProfileIncomplete {
                redirect: redirect.target,
            }
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            GuardRejection::Unauthenticated { .. } => ErrorCode::Unauthorized,
            GuardRejection::ProfileIncomplete { .. } => ErrorCode::ProfileIncomplete,
            GuardRejection::Forbidden => ErrorCode::Forbidden,
            GuardRejection::SessionLoading => ErrorCode::SessionLoading,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GuardRejection::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            GuardRejection::ProfileIncomplete { .. } => StatusCode::CONFLICT,
            GuardRejection::Forbidden => StatusCode::FORBIDDEN,
            GuardRejection::SessionLoading => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            GuardRejection::Unauthenticated { .. } => "Authentication required",
            GuardRejection::ProfileIncomplete { .. } => "Profile completion required",
            GuardRejection::Forbidden => "Access denied",
            GuardRejection::SessionLoading => "Session not resolved",
        }
    }
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = serde_json::json!({
            "error": self.message(),
            "code": self.code().to_string(),
        });
        if let GuardRejection::Unauthenticated { redirect }
        | GuardRejection::ProfileIncomplete { redirect } = self
        {
            body["redirect"] = serde_json::Value::String(redirect);
        }

        (status, Json(body)).into_response()
    }
}
