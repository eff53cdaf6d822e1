// src/auth.rs

use actix_web::http::header;
use actix_web::HttpRequest;
use serde::Serialize;
use utoipa::ToSchema;

/// Whether the browser holds a backend session. The backend sets the cookie
/// HTTP-only, so its presence is all this side can check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AuthStatus {
    Authenticated,
    Unauthenticated,
}

impl AuthStatus {
    pub fn from_cookie_header(cookie: Option<&str>) -> Self {
        match cookie {
            Some(value) if !value.trim().is_empty() => AuthStatus::Authenticated,
            _ => AuthStatus::Unauthenticated,
        }
    }

    pub fn is_authenticated(self) -> bool {
        self == AuthStatus::Authenticated
    }
}

pub fn cookie_header(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
}

pub fn auth_status(req: &HttpRequest) -> AuthStatus {
    AuthStatus::from_cookie_header(cookie_header(req))
}

/// Cookie names present in a `Cookie` request header.
pub fn cookie_names(cookie: &str) -> Vec<&str> {
    cookie
        .split(';')
        .filter_map(|pair| pair.split_once('=').map(|(name, _)| name.trim()))
        .filter(|name| !name.is_empty())
        .collect()
}
