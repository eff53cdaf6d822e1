pub mod api;
pub mod auth;
pub mod backend;
pub mod client;
pub mod config;
pub mod contract;
pub mod docs;
pub mod error;
pub mod ids;
pub mod models;
pub mod s3_utils;
pub mod tokens;
pub mod workflow;

use aws_sdk_s3::Client as S3Client;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub http: reqwest::Client,
    pub s3_client: S3Client,
}
