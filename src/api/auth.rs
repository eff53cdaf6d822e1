// src/api/auth.rs
//
// Sign-in is owned by the backend (nonce + signed message). These routes only
// relay it so the session cookie ends up on this origin.

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use reqwest::Method;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::forward::{forward, parse_body};
use crate::auth::{auth_status, AuthStatus};
use crate::error::ProxyError;
use crate::AppState;

const AUTH_BODY_LIMIT: usize = 64 * 1024;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatusResponse {
    pub auth_status: AuthStatus,
}

#[utoipa::path(
    get,
    path = "/api/auth/nonce",
    tag = "auth",
    responses((status = 200, description = "Nonce issued by the backend"))
)]
#[get("/api/auth/nonce")]
pub async fn nonce(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, ProxyError> {
    forward(&state, &req, Method::GET, "/api/nonce", None, false).await
}

#[utoipa::path(
    post,
    path = "/api/auth/signIn",
    tag = "auth",
    responses((status = 200, description = "Signed message accepted, session cookie set"))
)]
#[post("/api/auth/signIn")]
pub async fn sign_in(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ProxyError> {
    let body = parse_body(&body, AUTH_BODY_LIMIT)?;
    forward(&state, &req, Method::POST, "/api/sign_in", body, false).await
}

#[utoipa::path(
    post,
    path = "/api/auth/signOut",
    tag = "auth",
    responses((status = 200, description = "Session closed, session cookie expired"))
)]
#[post("/api/auth/signOut")]
pub async fn sign_out(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, ProxyError> {
    forward(&state, &req, Method::POST, "/api/sign_out", None, true).await
}

#[utoipa::path(
    get,
    path = "/api/auth/status",
    tag = "auth",
    responses((status = 200, description = "Whether a session cookie is present", body = AuthStatusResponse))
)]
#[get("/api/auth/status")]
pub async fn status(req: HttpRequest) -> HttpResponse {
    HttpResponse::Ok().json(AuthStatusResponse {
        auth_status: auth_status(&req),
    })
}
