// src/api/forward.rs

use actix_web::http::{header, StatusCode};
use actix_web::{HttpRequest, HttpResponse};
use reqwest::Method;
use serde_json::{Map, Value};

use crate::auth::{cookie_header, cookie_names};
use crate::error::ProxyError;
use crate::s3_utils::upload_image;
use crate::AppState;

/// Sends one request to the backend on behalf of the browser and relays the
/// answer: status, body and every `Set-Cookie` the backend issued.
///
/// With `delete_session_cookie` the response additionally expires the
/// session cookie in the browser (sign-out).
pub async fn forward(
    state: &AppState,
    req: &HttpRequest,
    method: Method,
    backend_path: &str,
    body: Option<Value>,
    delete_session_cookie: bool,
) -> Result<HttpResponse, ProxyError> {
    let url = format!("{}{}", state.config.backend_base_url, backend_path);
    let cookie = cookie_header(req);

    let mut request = state
        .http
        .request(method.clone(), &url)
        .header(reqwest::header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        request = request.header(reqwest::header::COOKIE, cookie);
    }
    if let Some(body) = body {
        request = request.json(&body);
    }

    let resp = request.send().await.map_err(|e| {
        log::error!("backend request failed method={} path={}: {}", method, backend_path, e);
        ProxyError::Backend(e)
    })?;

    let status = resp.status().as_u16();
    let set_cookies: Vec<String> = resp
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_string))
        .collect();
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json")
        .to_string();
    let bytes = resp.bytes().await?;

    if status >= 400 {
        log::warn!("backend responded status={} path={}", status, backend_path);
    }

    let mut builder =
        HttpResponse::build(StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY));
    for value in set_cookies {
        builder.append_header((header::SET_COOKIE, value));
    }
    if delete_session_cookie {
        for value in expired_session_cookies(state.config.session_cookie_name.as_deref(), cookie) {
            builder.append_header((header::SET_COOKIE, value));
        }
    }

    Ok(builder.content_type(content_type).body(bytes.to_vec()))
}

/// `Set-Cookie` values that make the browser drop its session.
pub fn expired_session_cookies(session_cookie_name: Option<&str>, cookie: Option<&str>) -> Vec<String> {
    match session_cookie_name {
        Some(name) => vec![expire(name)],
        None => cookie
            .map(|c| cookie_names(c).into_iter().map(expire).collect())
            .unwrap_or_default(),
    }
}

fn expire(name: &str) -> String {
    format!("{}=; Path=/; Max-Age=0", name)
}

/// Request body as JSON, `None` when empty. Bodies above `limit` are refused.
pub fn parse_body(body: &[u8], limit: usize) -> Result<Option<Value>, ProxyError> {
    if body.len() > limit {
        return Err(ProxyError::PayloadTooLarge { limit });
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| ProxyError::InvalidBody(e.to_string()))
}

pub fn parse_object(body: &[u8], limit: usize) -> Result<Map<String, Value>, ProxyError> {
    match parse_body(body, limit)? {
        Some(Value::Object(map)) => Ok(map),
        _ => Err(ProxyError::InvalidBody("expected a JSON object".to_string())),
    }
}

/// Uploads the base64 image found under `payload_field` (if any) and puts
/// the storage key under `key_field`. The payload field is removed so the
/// image bytes never reach the backend.
pub async fn substitute_image(
    state: &AppState,
    body: &mut Map<String, Value>,
    payload_field: &str,
    key_field: &str,
    bucket: &str,
) -> Result<(), ProxyError> {
    let image = match body.remove(payload_field) {
        Some(Value::String(image)) if !image.is_empty() => image,
        _ => return Ok(()),
    };

    let key = upload_image(state, bucket, &image).await?;
    body.insert(key_field.to_string(), Value::String(key));
    Ok(())
}
