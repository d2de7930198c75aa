// HTTP basic auth in front of the admin page and the admin API.

use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose};

use crate::shared::core::envelope::MessageEnvelope;
use crate::shell::state::AppState;

#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AdminCredentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Check an `Authorization` header value of the form `Basic base64(user:password)`.
    pub fn accepts(&self, authorization: &str) -> bool {
        let Some(encoded) = authorization.strip_prefix("Basic ") else {
            return false;
        };
        let Ok(decoded) = general_purpose::STANDARD.decode(encoded.trim()) else {
            return false;
        };
        let Ok(decoded) = String::from_utf8(decoded) else {
            return false;
        };
        match decoded.split_once(':') {
            Some((user, password)) => {
                let user_ok = constant_time_eq(user.as_bytes(), self.user.as_bytes());
                let password_ok = constant_time_eq(password.as_bytes(), self.password.as_bytes());
                user_ok & password_ok
            }
            None => false,
        }
    }
}

/// Byte comparison whose running time depends only on the longer input's length.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let mut diff = a.len() ^ b.len();
    for i in 0..a.len().max(b.len()) {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        diff |= usize::from(x ^ y);
    }
    diff == 0
}

fn unauthorized() -> Response {
    let mut response = (
        StatusCode::UNAUTHORIZED,
        Json(MessageEnvelope::failure("Authentication required")),
    )
        .into_response();
    response.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"admin\""),
    );
    response
}

pub async fn require_admin(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| state.admin.accepts(value));

    if !authorized {
        tracing::warn!(path = %request.uri().path(), "admin request rejected");
        return unauthorized();
    }
    next.run(request).await
}
