// src/workflow/actions.rs
//
// What the subscription page offers: the owner gets one primary action picked
// from the lifecycle status, a viewer gets subscribe / invite-code actions.

use alloy_primitives::Address;

use crate::contract::{into_workflow_error, price_to_wei, SubscriptionContract};
use crate::error::WorkflowError;
use crate::models::{InviteLinkStatus, SubscriptionStatus, TgChatStatusDto, UpdateSubscriptionDto};
use crate::workflow::SubscriptionApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAction {
    ContinueEditing,
    Pay,
    CheckPayment,
    Publish,
    Unpublish,
}

impl PrimaryAction {
    pub fn for_status(status: SubscriptionStatus) -> Self {
        match status {
            SubscriptionStatus::Draft => PrimaryAction::ContinueEditing,
            SubscriptionStatus::NotPaid => PrimaryAction::Pay,
            SubscriptionStatus::PaymentProcessing => PrimaryAction::CheckPayment,
            SubscriptionStatus::Unpublished => PrimaryAction::Publish,
            SubscriptionStatus::Published => PrimaryAction::Unpublish,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PrimaryAction::ContinueEditing => "Continue editing",
            PrimaryAction::Pay => "Pay",
            PrimaryAction::CheckPayment => "Check payment",
            PrimaryAction::Publish => "Publish",
            PrimaryAction::Unpublish => "Unpublish",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Navigate(String),
    StatusChanged(SubscriptionStatus),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerAction {
    RefreshPage,
    GenerateInviteCode,
    CopyCodeAndOpenTelegram { code: String },
    OpenTelegram,
}

impl ViewerAction {
    /// `None` means the invite state could not be loaded.
    pub fn for_invite_status(invite: Option<&TgChatStatusDto>) -> Self {
        let Some(invite) = invite else {
            return ViewerAction::RefreshPage;
        };
        match (invite.status, invite.code.as_ref()) {
            (InviteLinkStatus::NotGenerated, _) => ViewerAction::GenerateInviteCode,
            (InviteLinkStatus::CodeGenerated, Some(code)) => ViewerAction::CopyCodeAndOpenTelegram {
                code: code.clone(),
            },
            (InviteLinkStatus::CodeGenerated, None) => ViewerAction::GenerateInviteCode,
            (InviteLinkStatus::CodeUsed, _) => ViewerAction::OpenTelegram,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewerAction::RefreshPage => "Refresh page",
            ViewerAction::GenerateInviteCode => "Generate invite code",
            ViewerAction::CopyCodeAndOpenTelegram { .. } => "Copy invite code and Go to telegram",
            ViewerAction::OpenTelegram => "Go to telegram",
        }
    }
}

/// The page wallet is the owner only when it is connected, matches the
/// profile NFT owner and the subscription belongs to that profile.
pub fn is_owner(
    connected: bool,
    wallet: Option<Address>,
    owner: Option<Address>,
    subscription_owner_id: &str,
    profile_id: &str,
) -> bool {
    if subscription_owner_id != profile_id {
        return false;
    }
    match (connected, wallet, owner) {
        (true, Some(wallet), Some(owner)) => wallet == owner,
        _ => false,
    }
}

pub struct SubscriptionDetail {
    subscription: UpdateSubscriptionDto,
    profile_id: String,
    status: SubscriptionStatus,
    invite_status: Option<TgChatStatusDto>,
}

impl SubscriptionDetail {
    pub fn new(
        subscription: UpdateSubscriptionDto,
        profile_id: impl Into<String>,
        invite_status: Option<TgChatStatusDto>,
    ) -> Self {
        let status = subscription.status;
        Self {
            subscription,
            profile_id: profile_id.into(),
            status,
            invite_status,
        }
    }

    pub fn subscription(&self) -> &UpdateSubscriptionDto {
        &self.subscription
    }

    pub fn status(&self) -> SubscriptionStatus {
        self.status
    }

    pub fn invite_status(&self) -> Option<&TgChatStatusDto> {
        self.invite_status.as_ref()
    }

    pub fn primary_action(&self) -> PrimaryAction {
        PrimaryAction::for_status(self.status)
    }

    pub fn viewer_action(&self) -> ViewerAction {
        ViewerAction::for_invite_status(self.invite_status.as_ref())
    }

    pub fn edit_path(&self) -> String {
        format!("/subscription/{}?editing=true", self.subscription.id)
    }

    pub async fn execute_primary<A, C>(&mut self, api: &A, contract: &C) -> Result<ActionOutcome, WorkflowError>
    where
        A: SubscriptionApi + ?Sized,
        C: SubscriptionContract + ?Sized,
    {
        match self.primary_action() {
            PrimaryAction::ContinueEditing => Ok(ActionOutcome::Navigate(self.edit_path())),
            PrimaryAction::Pay => self.pay(api, contract).await,
            PrimaryAction::CheckPayment => self.check_payment(api).await,
            PrimaryAction::Publish => self.publish(api).await,
            PrimaryAction::Unpublish => self.unpublish(api).await,
        }
    }

    /// Registers the tier on chain, then lets the backend reconcile. Once the
    /// chain call went through the local status stays at PAYMENT_PROCESSING
    /// even if the backend call fails.
    pub async fn pay<A, C>(&mut self, api: &A, contract: &C) -> Result<ActionOutcome, WorkflowError>
    where
        A: SubscriptionApi + ?Sized,
        C: SubscriptionContract + ?Sized,
    {
        let id = self.subscription.id.clone();
        let price = price_to_wei(&self.subscription.price)?;

        contract
            .create_subscription_by_eth(&id, &self.profile_id, price)
            .await
            .map_err(|e| {
                log::error!("create subscription on chain failed id={}: {}", id, e);
                into_workflow_error(e)
            })?;
        self.status = SubscriptionStatus::PaymentProcessing;
        log::info!("subscription paid on chain id={}", id);

        self.check_payment(api).await
    }

    pub async fn check_payment<A>(&mut self, api: &A) -> Result<ActionOutcome, WorkflowError>
    where
        A: SubscriptionApi + ?Sized,
    {
        let status = api.process_payment(&self.subscription.id).await.map_err(|e| {
            log::error!("process payment failed id={}: {}", self.subscription.id, e);
            e
        })?;
        self.status = status;
        Ok(ActionOutcome::StatusChanged(status))
    }

    pub async fn publish<A>(&mut self, api: &A) -> Result<ActionOutcome, WorkflowError>
    where
        A: SubscriptionApi + ?Sized,
    {
        api.publish(&self.subscription.id).await?;
        self.status = SubscriptionStatus::Published;
        Ok(ActionOutcome::StatusChanged(self.status))
    }

    pub async fn unpublish<A>(&mut self, api: &A) -> Result<ActionOutcome, WorkflowError>
    where
        A: SubscriptionApi + ?Sized,
    {
        api.unpublish(&self.subscription.id).await?;
        self.status = SubscriptionStatus::Unpublished;
        Ok(ActionOutcome::StatusChanged(self.status))
    }

    pub async fn generate_invite_code<A>(&mut self, api: &A) -> Result<ViewerAction, WorkflowError>
    where
        A: SubscriptionApi + ?Sized,
    {
        let generated = api.generate_invite_code(&self.subscription.id).await?;
        self.invite_status = Some(TgChatStatusDto {
            status: InviteLinkStatus::CodeGenerated,
            code: generated.code,
        });
        Ok(self.viewer_action())
    }

    /// A viewer buys access at the subscription's on-chain index.
    pub async fn subscribe<C>(&self, contract: &C) -> Result<(), WorkflowError>
    where
        C: SubscriptionContract + ?Sized,
    {
        let id = &self.subscription.id;
        let price = price_to_wei(&self.subscription.price)?;
        let result = match contract.subscription_index(id).await {
            Ok(index) => {
                contract
                    .pay_for_subscription_by_eth(id, &self.profile_id, index, price)
                    .await
            }
            Err(e) => Err(e),
        };

        result.map_err(|e| {
            log::error!("subscribe failed id={}: {}", id, e);
            into_workflow_error(e)
        })
    }
}
