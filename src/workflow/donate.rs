// src/workflow/donate.rs
//
// Donation modal: pick a coin and an amount, then walk the step list while the
// wallet signs. Tokens need an allowance first; the base coin is sent as value.

use crate::contract::{into_workflow_error, price_to_wei, DonationContract};
use crate::error::WorkflowError;
use crate::tokens::TokenRegistry;

pub const BASE_COIN_DONATE_SIZES: [&str; 3] = ["0.05", "0.1", "0.2"];
pub const TOKEN_DONATE_SIZES: [&str; 3] = ["10", "20", "50"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonateStep {
    SetSize,
    ApproveSpending,
    ApproveTransaction,
    Verification,
    Done,
}

impl DonateStep {
    pub fn title(self) -> &'static str {
        match self {
            DonateStep::SetSize => "Set donate size",
            DonateStep::ApproveSpending => "Approve spending",
            DonateStep::ApproveTransaction => "Approve transaction",
            DonateStep::Verification => "Verification",
            DonateStep::Done => "Done",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Wait,
    Process,
    Finish,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepState {
    pub step: DonateStep,
    pub status: StepStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonationResult {
    Success,
    Error,
}

impl DonationResult {
    pub fn title(self) -> &'static str {
        match self {
            DonationResult::Success => "Thanks for the donation!",
            DonationResult::Error => "Something went wrong!",
        }
    }
}

/// A coin button in the modal. `via_swap` marks tokens the profile does not
/// accept directly; those are swapped on the way in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinOption {
    pub symbol: String,
    pub via_swap: bool,
}

impl CoinOption {
    pub fn label(&self) -> String {
        if self.via_swap {
            format!("{} by 🦄", self.symbol.to_uppercase())
        } else {
            self.symbol.to_uppercase()
        }
    }
}

/// Step list for `coin`; the base coin has no allowance step.
pub fn donate_steps(coin: &str, base_coin: &str) -> Vec<StepState> {
    [
        DonateStep::SetSize,
        DonateStep::ApproveSpending,
        DonateStep::ApproveTransaction,
        DonateStep::Verification,
        DonateStep::Done,
    ]
    .into_iter()
    .filter(|step| coin != base_coin || *step != DonateStep::ApproveSpending)
    .enumerate()
    .map(|(i, step)| StepState {
        step,
        status: if i == 0 { StepStatus::Process } else { StepStatus::Wait },
    })
    .collect()
}

pub fn donate_size_options(coin: &str, base_coin: &str) -> &'static [&'static str] {
    if coin == base_coin {
        &BASE_COIN_DONATE_SIZES
    } else {
        &TOKEN_DONATE_SIZES
    }
}

pub struct Donation {
    profile_id: String,
    base_coin: String,
    is_owner: bool,
    coin: String,
    size: String,
    steps: Vec<StepState>,
    current: usize,
    donating: bool,
    result: Option<DonationResult>,
}

impl Donation {
    pub fn new(profile_id: impl Into<String>, base_coin: impl Into<String>, is_owner: bool) -> Self {
        let base_coin = base_coin.into();
        Self {
            profile_id: profile_id.into(),
            coin: base_coin.clone(),
            size: BASE_COIN_DONATE_SIZES[0].to_string(),
            steps: donate_steps(&base_coin, &base_coin),
            base_coin,
            is_owner,
            current: 0,
            donating: false,
            result: None,
        }
    }

    pub fn coin(&self) -> &str {
        &self.coin
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn size_options(&self) -> &'static [&'static str] {
        donate_size_options(&self.coin, &self.base_coin)
    }

    pub fn steps(&self) -> &[StepState] {
        &self.steps
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn is_donating(&self) -> bool {
        self.donating
    }

    pub fn result(&self) -> Option<DonationResult> {
        self.result
    }

    /// Switching coin rebuilds the step list and picks the first preset size.
    pub fn set_coin(&mut self, coin: impl Into<String>) {
        self.coin = coin.into();
        self.result = None;
        self.current = 0;
        self.steps = donate_steps(&self.coin, &self.base_coin);
        self.size = self.size_options()[0].to_string();
    }

    pub fn set_size(&mut self, size: impl Into<String>) {
        self.result = None;
        self.size = size.into();
    }

    /// Owners cannot donate to themselves; an empty or zero size is rejected.
    pub fn can_donate(&self) -> bool {
        let zero = self.size.trim().parse::<f64>().map(|v| v == 0.0).unwrap_or(false);
        !self.is_owner && !self.donating && !self.size.is_empty() && !zero
    }

    /// Base coin first, then every known token.
    pub fn coin_options(&self, registry: &TokenRegistry, available: &[String]) -> Vec<CoinOption> {
        std::iter::once(CoinOption {
            symbol: self.base_coin.clone(),
            via_swap: false,
        })
        .chain(registry.tokens().iter().map(|t| CoinOption {
            symbol: t.symbol.clone(),
            via_swap: !available.contains(&t.symbol),
        }))
        .collect()
    }

    /// Closing the modal starts over from the first step.
    pub fn close(&mut self) {
        self.donating = false;
        self.current = 0;
        self.steps = donate_steps(&self.coin, &self.base_coin);
        self.result = None;
    }

    fn mark(&mut self, index: usize, status: StepStatus) {
        self.current = index;
        for (i, state) in self.steps.iter_mut().enumerate() {
            if i == index {
                state.status = status;
            } else if i < index {
                state.status = StepStatus::Finish;
            }
        }
    }

    pub async fn donate<C>(&mut self, contract: &C, registry: &TokenRegistry) -> Result<(), WorkflowError>
    where
        C: DonationContract + ?Sized,
    {
        self.result = None;
        if !self.can_donate() {
            return Err(WorkflowError::InvalidState("donation is not allowed"));
        }

        self.donating = true;
        let outcome = self.execute(contract, registry).await;
        self.donating = false;

        match outcome {
            Ok(()) => {
                log::info!("donation sent profile={} coin={} size={}", self.profile_id, self.coin, self.size);
                self.result = Some(DonationResult::Success);
                Ok(())
            }
            Err(e) => {
                log::error!("donation failed profile={} coin={}: {}", self.profile_id, self.coin, e);
                self.steps = donate_steps(&self.coin, &self.base_coin);
                self.current = 0;
                self.result = Some(DonationResult::Error);
                Err(e)
            }
        }
    }

    async fn execute<C>(&mut self, contract: &C, registry: &TokenRegistry) -> Result<(), WorkflowError>
    where
        C: DonationContract + ?Sized,
    {
        let amount = price_to_wei(&self.size)?;
        let token = if self.coin == self.base_coin {
            None
        } else {
            let address = registry
                .address_by_symbol(&self.coin)
                .ok_or_else(|| WorkflowError::UnknownToken(self.coin.clone()))?;
            Some(address)
        };

        let mut index = 1;
        if let Some(token) = token {
            self.mark(index, StepStatus::Process);
            index += 1;
            let approval = contract.approve(token, amount).await.map_err(into_workflow_error)?;
            contract.wait_for_transaction(approval).await?;
        }

        self.mark(index, StepStatus::Process);
        index += 1;
        let hash = match token {
            None => contract.donate_eth(&self.profile_id, amount).await,
            Some(token) => contract.donate_from_swap(token, amount, &self.profile_id).await,
        }
        .map_err(into_workflow_error)?;

        self.mark(index, StepStatus::Process);
        index += 1;
        log::debug!("donate hash: {}", hash);
        contract.wait_for_transaction(hash).await?;

        self.mark(index, StepStatus::Finish);
        Ok(())
    }
}
