// src/api/integration.rs

use actix_web::{post, web, HttpRequest, HttpResponse};
use reqwest::Method;

use crate::api::forward::{forward, parse_body};
use crate::error::ProxyError;
use crate::AppState;

const INTEGRATION_BODY_LIMIT: usize = 16 * 1024;

async fn relay(
    req: &HttpRequest,
    state: &AppState,
    body: &[u8],
    backend_path: &str,
) -> Result<HttpResponse, ProxyError> {
    let body = parse_body(body, INTEGRATION_BODY_LIMIT)?;
    forward(state, req, Method::POST, backend_path, body, false).await
}

/// Binds a Telegram chat to a subscription with the code the bot handed out.
/// A wrong code is reported inside a 200 body, see `TgIntegrationDto`.
#[utoipa::path(
    post,
    path = "/api/integration/telegram",
    tag = "integration",
    request_body = crate::models::BindTelegramRequest,
    responses((status = 200, description = "Bind result", body = crate::models::TgIntegrationDto))
)]
#[post("/api/integration/telegram")]
pub async fn telegram(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ProxyError> {
    relay(&req, &state, &body, "/telegram/bind-chat").await
}

#[utoipa::path(
    post,
    path = "/api/integration/telegramChat",
    tag = "integration",
    request_body = crate::models::SubscriptionIdDto,
    responses((status = 200, description = "Chat binding status", body = crate::models::TgChatDto))
)]
#[post("/api/integration/telegramChat")]
pub async fn telegram_chat(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ProxyError> {
    relay(&req, &state, &body, "/telegram/get-chat-binding-status").await
}

#[utoipa::path(
    post,
    path = "/api/integration/generateInviteCode",
    tag = "integration",
    request_body = crate::models::SubscriptionIdDto,
    responses((status = 200, description = "Invite code for the current viewer", body = crate::models::TgChatStatusDto))
)]
#[post("/api/integration/generateInviteCode")]
pub async fn generate_invite_code(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ProxyError> {
    relay(&req, &state, &body, "/telegram/generate-invite-code").await
}
