//! Authentication middleware.
//!
//! Every request passes through: a valid bearer token marks the request as
//! authenticated, anything else leaves it anonymous. Rejection is left to the
//! handlers and resolvers that need a user.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use tracing::debug;

use common::{AppError, AppResult};

use crate::state::AppState;

/// Authentication state of the current request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    pub is_auth: bool,
    pub user_id: Option<String>,
}

impl AuthContext {
    /// Context for a verified user.
    pub fn authenticated(user_id: impl Into<String>) -> Self {
        Self {
            is_auth: true,
            user_id: Some(user_id.into()),
        }
    }

    /// Context for a request without a valid token.
    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Return the caller's id, or 401 for anonymous requests.
pub fn require_auth(auth: &AuthContext) -> AppResult<&str> {
    match auth.user_id.as_deref() {
        Some(user_id) if auth.is_auth => Ok(user_id),
        _ => Err(AppError::Unauthorized),
    }
}

/// Authentication middleware that validates JWT tokens.
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth = match bearer {
        Some(TypedHeader(authorization)) => match state.auth.verify_token(authorization.token()) {
            Ok(claims) => {
                debug!(user_id = %claims.user_id, "Authenticated request");
                AuthContext::authenticated(claims.user_id)
            }
            Err(e) => {
                debug!(error = %e, "Bearer token rejected");
                AuthContext::anonymous()
            }
        },
        None => AuthContext::anonymous(),
    };

    request.extensions_mut().insert(auth);
    next.run(request).await
}
