// src/client.rs
//
// Browser-side client of the proxy routes in `api`. The session cookie is
// whatever the proxy last set; callers hand it in explicitly.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::models::{
    BaseProfileDto, BindTelegramRequest, ProcessPaymentResponse, ResponseDto, SubscriptionIdDto,
    SubscriptionStatus, TgChatDto, TgChatStatusDto, TgIntegrationDto, UpdateProfileDto,
    UpdateSubscriptionDto,
};
use crate::workflow::{ProfileApi, SubscriptionApi};

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    cookie: Option<String>,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cookie: None,
        }
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    async fn send<B>(&self, path: &str, body: &B) -> Result<String, ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let mut request = self.http.post(format!("{}{}", self.base_url, path)).json(body);
        if let Some(cookie) = &self.cookie {
            request = request.header(reqwest::header::COOKIE, cookie);
        }

        let resp = request.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let text = self.send(path, body).await?;
        serde_json::from_str::<T>(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("{e}; body={text}")))
    }
}

#[async_trait]
impl SubscriptionApi for ApiClient {
    async fn update_subscription(&self, request: &UpdateSubscriptionDto) -> Result<(), ApiError> {
        self.send("/api/subscription/update", request).await.map(|_| ())
    }

    async fn process_payment(&self, subscription_id: &str) -> Result<SubscriptionStatus, ApiError> {
        let resp: ProcessPaymentResponse = self
            .post(
                "/api/subscription/processPayment",
                &SubscriptionIdDto::new(subscription_id),
            )
            .await?;
        Ok(resp.status)
    }

    async fn publish(&self, subscription_id: &str) -> Result<(), ApiError> {
        self.send("/api/subscription/publish", &SubscriptionIdDto::new(subscription_id))
            .await
            .map(|_| ())
    }

    async fn unpublish(&self, subscription_id: &str) -> Result<(), ApiError> {
        self.send("/api/subscription/unpublish", &SubscriptionIdDto::new(subscription_id))
            .await
            .map(|_| ())
    }

    async fn bind_telegram(&self, subscription_id: &str, code: &str) -> Result<TgIntegrationDto, ApiError> {
        self.post(
            "/api/integration/telegram",
            &BindTelegramRequest {
                code: code.to_string(),
                subscription_id: subscription_id.to_string(),
            },
        )
        .await
    }

    async fn get_chat(&self, subscription_id: &str) -> Result<TgChatDto, ApiError> {
        self.post(
            "/api/integration/telegramChat",
            &SubscriptionIdDto::new(subscription_id),
        )
        .await
    }

    async fn generate_invite_code(&self, subscription_id: &str) -> Result<TgChatStatusDto, ApiError> {
        self.post(
            "/api/integration/generateInviteCode",
            &SubscriptionIdDto::new(subscription_id),
        )
        .await
    }
}

#[async_trait]
impl ProfileApi for ApiClient {
    async fn update_profile(&self, request: &UpdateProfileDto) -> Result<BaseProfileDto, ApiError> {
        let resp: ResponseDto<BaseProfileDto> = self.post("/api/profile/update", request).await?;
        Ok(resp.data)
    }
}
