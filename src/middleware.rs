use std::sync::Arc;

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{utils::token::{self, SessionClaims}, AppState};

pub const SESSION_COOKIE: &str = "session";

/// Result of reading the session token. A missing or invalid token leaves
/// the session unloaded rather than rejecting the request.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub claims: Option<SessionClaims>,
}

impl Session {
    pub fn is_loaded(&self) -> bool {
        self.claims.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.claims.as_ref().map(|claims| claims.is_admin).unwrap_or(false)
    }
}

pub async fn load_session(
    cookie_jar: CookieJar,
    Extension(app_state): Extension<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let session_token = cookie_jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer "))
                .map(str::to_owned)
        });

    let claims = session_token.and_then(|session_token| {
        match token::decode_token(session_token, app_state.env.jwt_secret.as_bytes()) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!("ignoring session token: {}", e);
                None
            }
        }
    });

    req.extensions_mut().insert(Session { claims });

    next.run(req).await
}

/// Sends admin sessions back to the site root. Everyone else, including
/// requests without a session, passes through.
pub async fn redirect_admins(req: Request, next: Next) -> Response {
    let is_admin = req
        .extensions()
        .get::<Session>()
        .map(|session| session.is_loaded() && session.is_admin())
        .unwrap_or(false);

    if is_admin {
        return Redirect::to("/").into_response();
    }

    next.run(req).await
}
