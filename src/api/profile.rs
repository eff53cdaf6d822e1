// src/api/profile.rs

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use reqwest::Method;
use serde_json::Value;

use serde::Serialize;
use utoipa::ToSchema;

use crate::api::forward::{forward, parse_object, substitute_image};
use crate::backend::{load_featured_profiles, BackendClient};
use crate::error::ProxyError;
use crate::models::BriefProfile;
use crate::s3_utils::profile_image_link;
use crate::AppState;

pub const PROFILE_BODY_LIMIT: usize = 3 * 1024 * 1024;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedProfile {
    pub id: String,
    pub title: String,
    pub logo_id: String,
    pub logo_url: String,
}

#[utoipa::path(
    post,
    path = "/api/profile/update",
    tag = "profile",
    request_body = crate::models::UpdateProfileDto,
    responses(
        (status = 200, description = "Updated profile relayed from the backend"),
        (status = 400, description = "Invalid body or image payload"),
        (status = 413, description = "Body too large")
    )
)]
#[post("/api/profile/update")]
pub async fn update(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ProxyError> {
    let mut payload = parse_object(&body, PROFILE_BODY_LIMIT)?;
    let bucket = state.config.profile_bucket.clone();

    substitute_image(&state, &mut payload, "newBase64Image", "logoId", &bucket).await?;

    forward(
        &state,
        &req,
        Method::POST,
        "/profile/update",
        Some(Value::Object(payload)),
        false,
    )
    .await
}

/// Profiles shown on the landing page. Profiles the backend fails to return
/// are left out rather than failing the whole list.
#[utoipa::path(
    get,
    path = "/api/profile/featured",
    tag = "profile",
    responses((status = 200, description = "Featured profiles sorted by id", body = [FeaturedProfile]))
)]
#[get("/api/profile/featured")]
pub async fn featured(state: web::Data<AppState>) -> HttpResponse {
    let backend = BackendClient::from_state(&state);
    let profiles: Vec<FeaturedProfile> =
        load_featured_profiles(&backend, &state.config.featured_profile_ids)
            .await
            .into_iter()
            .map(|BriefProfile { id, title, logo_id }| FeaturedProfile {
                logo_url: profile_image_link(&state.config, &logo_id),
                id,
                title,
                logo_id,
            })
            .collect();
    HttpResponse::Ok().json(profiles)
}
