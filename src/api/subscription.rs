// src/api/subscription.rs

use actix_web::{post, web, HttpRequest, HttpResponse};
use reqwest::Method;
use serde_json::Value;

use crate::api::forward::{forward, parse_body, parse_object, substitute_image};
use crate::error::ProxyError;
use crate::AppState;

pub const SUBSCRIPTION_BODY_LIMIT: usize = 5 * 1024 * 1024;
const ID_BODY_LIMIT: usize = 16 * 1024;

/// Upsert of a subscription. New main/preview images arrive as base64 data
/// URIs; they are stored first and only their keys are sent on.
#[utoipa::path(
    post,
    path = "/api/subscription/update",
    tag = "subscription",
    request_body = crate::models::UpdateSubscriptionDto,
    responses(
        (status = 200, description = "Backend response relayed"),
        (status = 400, description = "Invalid body or image payload"),
        (status = 413, description = "Body too large")
    )
)]
#[post("/api/subscription/update")]
pub async fn update(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ProxyError> {
    let mut payload = parse_object(&body, SUBSCRIPTION_BODY_LIMIT)?;
    let bucket = state.config.subscription_bucket.clone();

    substitute_image(&state, &mut payload, "newMainBase64Image", "mainImageId", &bucket).await?;
    substitute_image(&state, &mut payload, "newPreviewBase64Image", "previewImageId", &bucket)
        .await?;

    forward(
        &state,
        &req,
        Method::POST,
        "/subscription/update",
        Some(Value::Object(payload)),
        false,
    )
    .await
}

#[utoipa::path(
    post,
    path = "/api/subscription/processPayment",
    tag = "subscription",
    request_body = crate::models::SubscriptionIdDto,
    responses((status = 200, description = "Resulting status", body = crate::models::ProcessPaymentResponse))
)]
#[post("/api/subscription/processPayment")]
pub async fn process_payment(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ProxyError> {
    let body = parse_body(&body, ID_BODY_LIMIT)?;
    forward(&state, &req, Method::POST, "/subscription/process-payment", body, false).await
}

#[utoipa::path(
    post,
    path = "/api/subscription/publish",
    tag = "subscription",
    request_body = crate::models::SubscriptionIdDto,
    responses((status = 200, description = "Backend acknowledgement relayed"))
)]
#[post("/api/subscription/publish")]
pub async fn publish(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ProxyError> {
    let body = parse_body(&body, ID_BODY_LIMIT)?;
    forward(&state, &req, Method::POST, "/subscription/publish", body, false).await
}

#[utoipa::path(
    post,
    path = "/api/subscription/unpublish",
    tag = "subscription",
    request_body = crate::models::SubscriptionIdDto,
    responses((status = 200, description = "Backend acknowledgement relayed"))
)]
#[post("/api/subscription/unpublish")]
pub async fn unpublish(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ProxyError> {
    let body = parse_body(&body, ID_BODY_LIMIT)?;
    forward(&state, &req, Method::POST, "/subscription/unpublish", body, false).await
}
