// src/config.rs

use std::env;

use crate::error::ConfigError;

pub const DEFAULT_PROFILE_BUCKET: &str = "community-profile-images-1r34goy";
pub const DEFAULT_SUBSCRIPTION_BUCKET: &str = "community-subscription-images-321t9587g";
pub const DEFAULT_FEATURED_PROFILE_IDS: [&str; 3] = ["1", "2", "7"];

/// Everything the service needs at start-up. Built once in `main` and handed
/// to `AppState`; nothing below reads the environment on its own.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_base_url: String,
    pub bind_addr: String,
    pub port: u16,
    pub profile_bucket: String,
    pub subscription_bucket: String,
    pub s3_endpoint: Option<String>,
    pub s3_public_base_url: Option<String>,
    /// Name of the backend session cookie. When unset, sign-out expires every
    /// cookie the browser sent.
    pub session_cookie_name: Option<String>,
    pub mock_s3: bool,
    pub featured_profile_ids: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup` instead.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_base_url = lookup("BACKEND_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("BACKEND_BASE_URL"))?;

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: raw,
            })?,
            None => 3000,
        };

        let mock_s3 = match lookup("MOCK_S3") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid {
                key: "MOCK_S3",
                value: raw,
            })?,
            None => false,
        };

        let featured_profile_ids = lookup("FEATURED_PROFILE_IDS")
            .map(|raw| {
                raw.split(',')
                    .map(|id| id.trim().to_string())
                    .filter(|id| !id.is_empty())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_else(|| {
                DEFAULT_FEATURED_PROFILE_IDS
                    .iter()
                    .map(|id| id.to_string())
                    .collect()
            });

        Ok(Self {
            backend_base_url,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            profile_bucket: lookup("PROFILE_BUCKET")
                .unwrap_or_else(|| DEFAULT_PROFILE_BUCKET.to_string()),
            subscription_bucket: lookup("SUBSCRIPTION_BUCKET")
                .unwrap_or_else(|| DEFAULT_SUBSCRIPTION_BUCKET.to_string()),
            s3_endpoint: lookup("S3_ENDPOINT").filter(|v| !v.trim().is_empty()),
            s3_public_base_url: lookup("S3_PUBLIC_BASE_URL").filter(|v| !v.trim().is_empty()),
            session_cookie_name: lookup("SESSION_COOKIE_NAME").filter(|v| !v.trim().is_empty()),
            mock_s3,
            featured_profile_ids,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}
