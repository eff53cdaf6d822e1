// src/contract.rs
//
// On-chain calls the workflows depend on. Signing and RPC transport live in
// the wallet layer. Subscription and profile writes return once confirmed;
// donation writes hand back the hash so each wait is its own step.

use alloy_primitives::utils::parse_ether;
use alloy_primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use crate::error::{ContractError, WorkflowError};

pub const WAIT_BLOCK_CONFIRMATIONS: u64 = 1;

#[async_trait]
pub trait SubscriptionContract: Send + Sync {
    /// Registers a paid subscription tier for `profile_id`, paying `price` in
    /// the native coin.
    async fn create_subscription_by_eth(
        &self,
        subscription_id: &str,
        profile_id: &str,
        price: U256,
    ) -> Result<(), ContractError>;

    async fn subscription_index(&self, subscription_id: &str) -> Result<U256, ContractError>;

    /// A viewer buys access to the subscription at `index`.
    async fn pay_for_subscription_by_eth(
        &self,
        subscription_id: &str,
        profile_id: &str,
        index: U256,
        price: U256,
    ) -> Result<(), ContractError>;
}

#[async_trait]
pub trait ProfileContract: Send + Sync {
    /// Native-coin value `owner` has to send to mint a profile NFT.
    async fn price_to_mint(&self, owner: Address) -> Result<U256, ContractError>;

    /// Mints a profile NFT for the signing wallet, paying `value`.
    async fn safe_mint(&self, value: U256) -> Result<(), ContractError>;

    async fn owner_of(&self, profile_id: &str) -> Result<Address, ContractError>;

    async fn donation_tokens(&self, profile_id: &str) -> Result<Vec<Address>, ContractError>;

    async fn set_donation_token(
        &self,
        profile_id: &str,
        token: Address,
        enabled: bool,
    ) -> Result<(), ContractError>;

    async fn nft_balance(&self, owner: Address) -> Result<U256, ContractError>;

    async fn profile_id_by_owner_and_index(
        &self,
        owner: Address,
        index: U256,
    ) -> Result<String, ContractError>;
}

/// Donations to a profile, in the base coin or in one of its tokens. Writes
/// return the transaction hash; `wait_for_transaction` blocks until it has
/// `WAIT_BLOCK_CONFIRMATIONS` confirmations.
#[async_trait]
pub trait DonationContract: Send + Sync {
    async fn donate_eth(&self, profile_id: &str, value: U256) -> Result<TxHash, ContractError>;

    /// Allows the donation contract to spend `amount` of `token`.
    async fn approve(&self, token: Address, amount: U256) -> Result<TxHash, ContractError>;

    async fn donate_from_swap(
        &self,
        token: Address,
        amount: U256,
        profile_id: &str,
    ) -> Result<TxHash, ContractError>;

    async fn wait_for_transaction(&self, hash: TxHash) -> Result<(), ContractError>;
}

/// Maps the wallet's insufficient-funds code to its own workflow error.
pub fn into_workflow_error(e: ContractError) -> WorkflowError {
    if e.is_insufficient_funds() {
        WorkflowError::InsufficientFunds
    } else {
        WorkflowError::Contract(e)
    }
}

/// Decimal price string in whole coins to wei.
pub fn price_to_wei(price: &str) -> Result<U256, WorkflowError> {
    parse_ether(price.trim()).map_err(|e| WorkflowError::InvalidPrice(format!("{price}: {e}")))
}
