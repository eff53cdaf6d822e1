#![allow(dead_code)]

use aws_sdk_s3::config::{BehaviorVersion, Region};
use aws_sdk_s3::Client as S3Client;

use nodde_community::config::AppConfig;
use nodde_community::AppState;

pub const PROFILE_BUCKET: &str = "test-profile-images";
pub const SUBSCRIPTION_BUCKET: &str = "test-subscription-images";

pub fn test_config(backend_base_url: &str) -> AppConfig {
    let backend = backend_base_url.to_string();
    AppConfig::from_lookup(move |key| match key {
        "BACKEND_BASE_URL" => Some(backend.clone()),
        "PROFILE_BUCKET" => Some(PROFILE_BUCKET.to_string()),
        "SUBSCRIPTION_BUCKET" => Some(SUBSCRIPTION_BUCKET.to_string()),
        "S3_PUBLIC_BASE_URL" => Some("http://localhost:9000".to_string()),
        "MOCK_S3" => Some("true".to_string()),
        _ => None,
    })
    .expect("test config")
}

pub fn build_state(config: AppConfig) -> AppState {
    let s3_config = aws_sdk_s3::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .force_path_style(true)
        .build();

    AppState {
        config,
        http: reqwest::Client::new(),
        s3_client: S3Client::from_conf(s3_config),
    }
}

pub fn data_uri(bytes: &[u8]) -> String {
    use base64::Engine as _;
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}
