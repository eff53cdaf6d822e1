// src/workflow/integration.rs
//
// Three-step wizard that links a subscription to a Telegram chat: read the
// instructions, paste the code the bot posted in the chat, done.

use crate::error::WorkflowError;
use crate::models::TgChatDto;
use crate::workflow::SubscriptionApi;

pub const TG_BOT_NAME: &str = "nodde_bot";
pub const EMPTY_CODE_MESSAGE: &str = "Please enter token!";

pub fn bot_link() -> String {
    format!("https://t.me/{}", TG_BOT_NAME)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Telegram,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IntegrationStep {
    Instructions,
    CodeEntry,
    Completed,
}

impl IntegrationStep {
    pub fn index(self) -> usize {
        match self {
            IntegrationStep::Instructions => 0,
            IntegrationStep::CodeEntry => 1,
            IntegrationStep::Completed => 2,
        }
    }
}

/// What a transition of the sub-workflow means for its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationEvent {
    Moved(IntegrationStep),
    Stayed,
    /// The child cannot go further back; the parent owns the transition.
    DelegateBack,
    Done,
}

#[derive(Debug, Clone)]
pub struct ChatIntegration {
    subscription_id: String,
    platform: Platform,
    step: IntegrationStep,
    code: String,
    error_message: Option<String>,
    chat: Option<TgChatDto>,
}

fn is_code_valid(code: &str) -> bool {
    !code.trim().is_empty()
}

impl ChatIntegration {
    /// A chat that is already bound puts the wizard straight on its last step.
    pub fn new(subscription_id: impl Into<String>, bound_chat: Option<TgChatDto>) -> Self {
        let step = if bound_chat.is_some() {
            IntegrationStep::Completed
        } else {
            IntegrationStep::Instructions
        };
        Self {
            subscription_id: subscription_id.into(),
            platform: Platform::Telegram,
            step,
            code: String::new(),
            error_message: None,
            chat: bound_chat,
        }
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn step(&self) -> IntegrationStep {
        self.step
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn chat(&self) -> Option<&TgChatDto> {
        self.chat.as_ref()
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
        self.error_message = if is_code_valid(&self.code) {
            None
        } else {
            Some(EMPTY_CODE_MESSAGE.to_string())
        };
    }

    pub async fn next<A>(&mut self, api: &A) -> Result<IntegrationEvent, WorkflowError>
    where
        A: SubscriptionApi + ?Sized,
    {
        match self.step {
            IntegrationStep::Instructions => {
                self.error_message = None;
                self.step = IntegrationStep::CodeEntry;
                Ok(IntegrationEvent::Moved(self.step))
            }
            IntegrationStep::CodeEntry => self.bind(api).await,
            IntegrationStep::Completed => Ok(IntegrationEvent::Stayed),
        }
    }

    /// Sends the entered code. A rejected code is shown inline and the
    /// wizard stays on the code step; transport errors are returned.
    pub async fn bind<A>(&mut self, api: &A) -> Result<IntegrationEvent, WorkflowError>
    where
        A: SubscriptionApi + ?Sized,
    {
        if self.step != IntegrationStep::CodeEntry {
            return Err(WorkflowError::InvalidState("bind outside the code step"));
        }
        if !is_code_valid(&self.code) {
            self.error_message = Some(EMPTY_CODE_MESSAGE.to_string());
            return Ok(IntegrationEvent::Stayed);
        }

        let result = api
            .bind_telegram(&self.subscription_id, &self.code)
            .await
            .map_err(|e| {
                log::error!("telegram bind failed subscription_id={}: {}", self.subscription_id, e);
                e
            })?;

        if let Some(error) = result.error {
            log::info!(
                "telegram bind rejected subscription_id={} code={}",
                self.subscription_id,
                error.code
            );
            self.error_message = Some(error.message);
            return Ok(IntegrationEvent::Stayed);
        }

        let chat = api.get_chat(&self.subscription_id).await?;
        self.chat = Some(chat);
        self.step = IntegrationStep::Completed;
        Ok(IntegrationEvent::Moved(self.step))
    }

    pub fn back(&mut self) -> IntegrationEvent {
        self.error_message = None;
        if self.step == IntegrationStep::Instructions || self.chat.is_some() {
            return IntegrationEvent::DelegateBack;
        }
        self.step = match self.step {
            IntegrationStep::Completed => IntegrationStep::CodeEntry,
            _ => IntegrationStep::Instructions,
        };
        IntegrationEvent::Moved(self.step)
    }

    pub fn done(&self) -> Result<IntegrationEvent, WorkflowError> {
        if self.step != IntegrationStep::Completed {
            return Err(WorkflowError::InvalidState("done before the chat is bound"));
        }
        Ok(IntegrationEvent::Done)
    }
}
