// Recording fakes for workflow unit tests.

use std::sync::Mutex;

use alloy_primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use crate::contract::{DonationContract, ProfileContract};
use crate::error::{ApiError, ContractError};
use crate::models::{
    BaseProfileDto, ChatBindingStatus, ChatInfo, DomainError, InviteLinkStatus, SubscriptionStatus,
    TgChatDto, TgChatStatusDto, TgIntegrationDto, UpdateProfileDto, UpdateSubscriptionDto,
};
use crate::workflow::{ProfileApi, SubscriptionApi};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Update(UpdateSubscriptionDto),
    ProcessPayment(String),
    Publish(String),
    Unpublish(String),
    Bind(String, String),
    GetChat(String),
    GenerateInviteCode(String),
    UpdateProfile(UpdateProfileDto),
}

pub struct FakeApi {
    pub calls: Mutex<Vec<Call>>,
    pub chat: Mutex<TgChatDto>,
    pub bind_error: Mutex<Option<String>>,
    pub payment_status: Mutex<SubscriptionStatus>,
    pub fail_update: Mutex<bool>,
    pub fail_process_payment: Mutex<bool>,
    pub fail_publish: Mutex<bool>,
    pub fail_get_chat: Mutex<bool>,
}

pub fn binded_chat() -> TgChatDto {
    TgChatDto {
        status: ChatBindingStatus::Binded,
        chat: Some(ChatInfo {
            title: "Gold members".to_string(),
            link: "https://t.me/+gold".to_string(),
        }),
    }
}

fn unavailable() -> ApiError {
    ApiError::Status {
        status: 503,
        body: "unavailable".to_string(),
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            chat: Mutex::new(TgChatDto {
                status: ChatBindingStatus::NotBinded,
                chat: None,
            }),
            bind_error: Mutex::new(None),
            payment_status: Mutex::new(SubscriptionStatus::Unpublished),
            fail_update: Mutex::new(false),
            fail_process_payment: Mutex::new(false),
            fail_publish: Mutex::new(false),
            fail_get_chat: Mutex::new(false),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(flag: &Mutex<bool>) -> Result<(), ApiError> {
        if *flag.lock().unwrap() {
            return Err(unavailable());
        }
        Ok(())
    }
}

#[async_trait]
impl SubscriptionApi for FakeApi {
    async fn update_subscription(&self, request: &UpdateSubscriptionDto) -> Result<(), ApiError> {
        self.record(Call::Update(request.clone()));
        Self::check(&self.fail_update)
    }

    async fn process_payment(&self, subscription_id: &str) -> Result<SubscriptionStatus, ApiError> {
        self.record(Call::ProcessPayment(subscription_id.to_string()));
        Self::check(&self.fail_process_payment)?;
        Ok(*self.payment_status.lock().unwrap())
    }

    async fn publish(&self, subscription_id: &str) -> Result<(), ApiError> {
        self.record(Call::Publish(subscription_id.to_string()));
        Self::check(&self.fail_publish)
    }

    async fn unpublish(&self, subscription_id: &str) -> Result<(), ApiError> {
        self.record(Call::Unpublish(subscription_id.to_string()));
        Self::check(&self.fail_publish)
    }

    async fn bind_telegram(&self, subscription_id: &str, code: &str) -> Result<TgIntegrationDto, ApiError> {
        self.record(Call::Bind(subscription_id.to_string(), code.to_string()));
        let error = self.bind_error.lock().unwrap().clone();
        if error.is_none() {
            *self.chat.lock().unwrap() = binded_chat();
        }
        Ok(TgIntegrationDto {
            status: if error.is_some() { "error" } else { "success" }.to_string(),
            error: error.map(|message| DomainError {
                code: "BIND_FAILED".to_string(),
                message,
            }),
        })
    }

    async fn get_chat(&self, subscription_id: &str) -> Result<TgChatDto, ApiError> {
        self.record(Call::GetChat(subscription_id.to_string()));
        Self::check(&self.fail_get_chat)?;
        Ok(self.chat.lock().unwrap().clone())
    }

    async fn generate_invite_code(&self, subscription_id: &str) -> Result<TgChatStatusDto, ApiError> {
        self.record(Call::GenerateInviteCode(subscription_id.to_string()));
        Ok(TgChatStatusDto {
            status: InviteLinkStatus::CodeGenerated,
            code: Some("INV-42".to_string()),
        })
    }
}

#[async_trait]
impl ProfileApi for FakeApi {
    async fn update_profile(&self, request: &UpdateProfileDto) -> Result<BaseProfileDto, ApiError> {
        self.record(Call::UpdateProfile(request.clone()));
        Ok(BaseProfileDto {
            id: request.id.clone(),
            title: request.title.clone(),
            description: request.description.clone(),
            logo_id: request
                .logo_id
                .clone()
                .unwrap_or_else(|| "stored-logo".to_string()),
            social_media_links: request.social_media_links.clone(),
        })
    }
}

/// Recording fake of the profile and donation contracts.
pub struct FakeChain {
    pub calls: Mutex<Vec<String>>,
    pub mint_price: U256,
    pub minted_profile: Mutex<Option<String>>,
    pub donation_tokens: Mutex<Vec<Address>>,
    /// Name of the call that should fail, with the error code it fails with.
    pub fail_on: Mutex<Option<(&'static str, Option<i64>)>>,
}

impl FakeChain {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            mint_price: U256::from(10_000_000_000_000_000u64),
            minted_profile: Mutex::new(None),
            donation_tokens: Mutex::new(Vec::new()),
            fail_on: Mutex::new(None),
        }
    }

    pub fn fail_on(&self, call: &'static str, code: Option<i64>) {
        *self.fail_on.lock().unwrap() = Some((call, code));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, name: &'static str, call: String) -> Result<(), ContractError> {
        self.calls.lock().unwrap().push(call);
        match *self.fail_on.lock().unwrap() {
            Some((failing, code)) if failing == name => Err(ContractError::new(code, "rejected")),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ProfileContract for FakeChain {
    async fn price_to_mint(&self, owner: Address) -> Result<U256, ContractError> {
        self.record("price_to_mint", format!("price_to_mint {owner}"))?;
        Ok(self.mint_price)
    }

    async fn safe_mint(&self, value: U256) -> Result<(), ContractError> {
        self.record("safe_mint", format!("safe_mint {value}"))?;
        *self.minted_profile.lock().unwrap() = Some("42".to_string());
        Ok(())
    }

    async fn owner_of(&self, _profile_id: &str) -> Result<Address, ContractError> {
        Ok(Address::ZERO)
    }

    async fn donation_tokens(&self, profile_id: &str) -> Result<Vec<Address>, ContractError> {
        self.record("donation_tokens", format!("donation_tokens {profile_id}"))?;
        Ok(self.donation_tokens.lock().unwrap().clone())
    }

    async fn set_donation_token(
        &self,
        profile_id: &str,
        token: Address,
        enabled: bool,
    ) -> Result<(), ContractError> {
        self.record(
            "set_donation_token",
            format!("set_donation_token {profile_id} {token} {enabled}"),
        )?;
        let mut tokens = self.donation_tokens.lock().unwrap();
        tokens.retain(|t| *t != token);
        if enabled {
            tokens.push(token);
        }
        Ok(())
    }

    async fn nft_balance(&self, _owner: Address) -> Result<U256, ContractError> {
        let minted = self.minted_profile.lock().unwrap().is_some();
        Ok(U256::from(u64::from(minted)))
    }

    async fn profile_id_by_owner_and_index(
        &self,
        _owner: Address,
        index: U256,
    ) -> Result<String, ContractError> {
        self.record("profile_id_by_owner_and_index", format!("profile_by_index {index}"))?;
        self.minted_profile
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ContractError::new(None, "owner has no tokens"))
    }
}

#[async_trait]
impl DonationContract for FakeChain {
    async fn donate_eth(&self, profile_id: &str, value: U256) -> Result<TxHash, ContractError> {
        self.record("donate_eth", format!("donate_eth {profile_id} {value}"))?;
        Ok(TxHash::repeat_byte(1))
    }

    async fn approve(&self, token: Address, amount: U256) -> Result<TxHash, ContractError> {
        self.record("approve", format!("approve {token} {amount}"))?;
        Ok(TxHash::repeat_byte(2))
    }

    async fn donate_from_swap(
        &self,
        token: Address,
        amount: U256,
        profile_id: &str,
    ) -> Result<TxHash, ContractError> {
        self.record(
            "donate_from_swap",
            format!("donate_from_swap {token} {amount} {profile_id}"),
        )?;
        Ok(TxHash::repeat_byte(3))
    }

    async fn wait_for_transaction(&self, hash: TxHash) -> Result<(), ContractError> {
        self.record("wait_for_transaction", format!("wait {}", hash[0]))
    }
}
