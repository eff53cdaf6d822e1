//! Client-side workflows: the subscription editor wizard with its embedded
//! chat-integration step, the status-driven actions of the subscription page,
//! profile minting and editing, and donations.
//!
//! Workflows never own authoritative state. They call the proxy through
//! [`SubscriptionApi`] / [`ProfileApi`] and the chain through the contract
//! traits, then adopt whatever those return.

pub mod actions;
pub mod donate;
pub mod editor;
pub mod integration;
pub mod mint;
pub mod profile;

#[cfg(test)]
mod testing;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{
    BaseProfileDto, SubscriptionStatus, TgChatDto, TgChatStatusDto, TgIntegrationDto,
    UpdateProfileDto, UpdateSubscriptionDto,
};

pub use actions::{ActionOutcome, PrimaryAction, SubscriptionDetail, ViewerAction};
pub use donate::{CoinOption, DonateStep, Donation, DonationResult, StepState, StepStatus};
pub use editor::{AdvanceOutcome, BaseInfoData, BaseInfoErrors, EditorOutcome, EditorStep, SubscriptionEditor};
pub use integration::{ChatIntegration, IntegrationEvent, IntegrationStep};
pub use mint::{find_profile, mint_profile};
pub use profile::{BaseProfile, ProfileEditor, ProfileErrors, SaveOutcome};

#[async_trait]
pub trait SubscriptionApi: Send + Sync {
    async fn update_subscription(&self, request: &UpdateSubscriptionDto) -> Result<(), ApiError>;

    /// Asks the backend to reconcile the on-chain payment; returns the
    /// resulting status.
    async fn process_payment(&self, subscription_id: &str) -> Result<SubscriptionStatus, ApiError>;

    async fn publish(&self, subscription_id: &str) -> Result<(), ApiError>;

    async fn unpublish(&self, subscription_id: &str) -> Result<(), ApiError>;

    async fn bind_telegram(&self, subscription_id: &str, code: &str) -> Result<TgIntegrationDto, ApiError>;

    async fn get_chat(&self, subscription_id: &str) -> Result<TgChatDto, ApiError>;

    async fn generate_invite_code(&self, subscription_id: &str) -> Result<TgChatStatusDto, ApiError>;
}

#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn update_profile(&self, request: &UpdateProfileDto) -> Result<BaseProfileDto, ApiError>;
}
