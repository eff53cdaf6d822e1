// src/workflow/mint.rs
//
// Landing-page profile flow: a wallet holds at most one profile NFT, found at
// owner index 0. Minting pays the price the contract asks for that wallet.

use alloy_primitives::{Address, U256};

use crate::contract::{into_workflow_error, ProfileContract};
use crate::error::WorkflowError;

pub fn profile_path(profile_id: &str) -> String {
    format!("/profile/{}", profile_id)
}

/// Profile id owned by `owner`, `None` when the wallet has not minted yet.
pub async fn find_profile<C>(contract: &C, owner: Address) -> Result<Option<String>, WorkflowError>
where
    C: ProfileContract + ?Sized,
{
    let balance = contract.nft_balance(owner).await?;
    if balance.is_zero() {
        return Ok(None);
    }
    let id = contract.profile_id_by_owner_and_index(owner, U256::ZERO).await?;
    Ok(Some(id))
}

/// Mints a profile NFT for `owner` and returns the path of the new profile.
pub async fn mint_profile<C>(contract: &C, owner: Address) -> Result<String, WorkflowError>
where
    C: ProfileContract + ?Sized,
{
    let price = contract.price_to_mint(owner).await.map_err(|e| {
        log::error!("can't load mint price owner={}: {}", owner, e);
        WorkflowError::from(e)
    })?;

    contract.safe_mint(price).await.map_err(|e| {
        log::error!("safe mint failed owner={}: {}", owner, e);
        into_workflow_error(e)
    })?;
    log::info!("profile minted owner={} price={}", owner, price);

    let id = contract
        .profile_id_by_owner_and_index(owner, U256::ZERO)
        .await?;
    Ok(profile_path(&id))
}
