// src/models.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatus {
    Draft,
    NotPaid,
    PaymentProcessing,
    Unpublished,
    Published,
}

impl SubscriptionStatus {
    pub const ALL: [SubscriptionStatus; 5] = [
        SubscriptionStatus::Draft,
        SubscriptionStatus::NotPaid,
        SubscriptionStatus::PaymentProcessing,
        SubscriptionStatus::Unpublished,
        SubscriptionStatus::Published,
    ];
}

/// Upsert payload for a subscription, also what the backend returns when a
/// subscription is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionDto {
    /// `0x`-prefixed hex identifier, assigned once by the editor.
    pub id: String,
    pub owner_id: String,
    pub status: SubscriptionStatus,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_image_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_main_base64_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_preview_base64_image: Option<String>,
    pub price: String,
    pub coin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionIdDto {
    pub subscription_id: String,
}

impl SubscriptionIdDto {
    pub fn new(subscription_id: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BriefSubscriptionInfo {
    pub id: String,
    pub status: SubscriptionStatus,
    pub owner_id: String,
    pub title: String,
    pub preview_image_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Paid,
    NotPaid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionPaymentStatus {
    pub status: PaymentStatus,
}

/// Body of `/subscription/process-payment`: the authoritative status after
/// the backend looked at the chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProcessPaymentResponse {
    pub status: SubscriptionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChatBindingStatus {
    Binded,
    NotBinded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatInfo {
    pub title: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TgChatDto {
    pub status: ChatBindingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat: Option<ChatInfo>,
}

impl TgChatDto {
    pub fn is_binded(&self) -> bool {
        self.status == ChatBindingStatus::Binded
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DomainError {
    pub code: String,
    pub message: String,
}

/// Result of a bind attempt. A rejected code comes back as a successful HTTP
/// response carrying `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TgIntegrationDto {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<DomainError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BindTelegramRequest {
    pub code: String,
    pub subscription_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InviteLinkStatus {
    NotGenerated,
    CodeGenerated,
    CodeUsed,
}

/// A subscriber's personal invite code state for one subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TgChatStatusDto {
    pub status: InviteLinkStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BaseProfileDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub logo_id: String,
    #[serde(default)]
    pub social_media_links: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub logo_id: String,
    #[serde(default)]
    pub social_media_links: Vec<String>,
    #[serde(default)]
    pub subscriptions: Vec<BriefSubscriptionInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDto {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_base64_image: Option<String>,
    #[serde(default)]
    pub social_media_links: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BriefProfile {
    pub id: String,
    pub title: String,
    pub logo_id: String,
}

impl From<&ProfileDto> for BriefProfile {
    fn from(dto: &ProfileDto) -> Self {
        Self {
            id: dto.id.clone(),
            title: dto.title.clone(),
            logo_id: dto.logo_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Envelope the backend wraps loaded records in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseDto<T> {
    pub status: ResponseStatus,
    pub data: T,
}
