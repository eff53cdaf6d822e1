// src/workflow/editor.rs
//
// Subscription editor: step 0 edits the base info and saves a draft, step 1
// hosts the chat-integration wizard. Status is never decided here; new records
// are sent as DRAFT and existing ones keep the status the backend reported.

use crate::error::WorkflowError;
use crate::ids::new_subscription_id;
use crate::models::{BriefProfile, SubscriptionStatus, TgChatDto, UpdateSubscriptionDto};
use crate::tokens::BASE_COIN;
use crate::workflow::integration::{ChatIntegration, IntegrationEvent};
use crate::workflow::SubscriptionApi;

pub const MAX_DESCRIPTION_LEN: usize = 2000;

#[derive(Debug, Clone, PartialEq)]
pub struct BaseInfoData {
    pub title: String,
    pub description: String,
    pub main_image_id: Option<String>,
    pub new_main_base64_image: Option<String>,
    pub preview_image_id: Option<String>,
    pub new_preview_base64_image: Option<String>,
    pub price: f64,
    pub coin: String,
}

impl BaseInfoData {
    pub fn empty(coin: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            main_image_id: None,
            new_main_base64_image: None,
            preview_image_id: None,
            new_preview_base64_image: None,
            price: 0.0,
            coin: coin.into(),
        }
    }

    pub fn from_persisted(dto: &UpdateSubscriptionDto) -> Self {
        Self {
            title: dto.title.clone(),
            description: dto.description.clone(),
            main_image_id: dto.main_image_id.clone(),
            new_main_base64_image: dto.new_main_base64_image.clone(),
            preview_image_id: dto.preview_image_id.clone(),
            new_preview_base64_image: dto.new_preview_base64_image.clone(),
            price: dto.price.trim().parse().unwrap_or(0.0),
            coin: dto.coin.clone(),
        }
    }

    /// Decimal string sent to the backend, `5` rather than `5.0`.
    pub fn price_string(&self) -> String {
        self.price.to_string()
    }
}

impl Default for BaseInfoData {
    fn default() -> Self {
        Self::empty(BASE_COIN)
    }
}

/// One flag per field; `true` means the field blocks saving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseInfoErrors {
    pub title: bool,
    pub description: bool,
    pub price: bool,
    pub main_image: bool,
    pub preview_image: bool,
}

impl BaseInfoErrors {
    pub fn validate(data: &BaseInfoData) -> Self {
        let description_len = data.description.chars().count();
        Self {
            title: data.title.trim().is_empty(),
            description: data.description.trim().is_empty() || description_len > MAX_DESCRIPTION_LEN,
            price: !(data.price > 0.0),
            main_image: data.main_image_id.is_none() && data.new_main_base64_image.is_none(),
            preview_image: data.preview_image_id.is_none() && data.new_preview_base64_image.is_none(),
        }
    }

    pub fn has_error(&self) -> bool {
        self.title || self.description || self.price || self.main_image || self.preview_image
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorStep {
    BaseInfo,
    Integration,
}

impl EditorStep {
    pub fn index(self) -> usize {
        match self {
            EditorStep::BaseInfo => 0,
            EditorStep::Integration => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// Validation failed; nothing was sent.
    Invalid(BaseInfoErrors),
    Advanced { subscription_id: String, saved: bool },
}

/// Where the page should go after a parent-level transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOutcome {
    Stay,
    LeaveToProfile(String),
    Finished { redirect: String },
}

pub struct SubscriptionEditor {
    profile: BriefProfile,
    step: EditorStep,
    draft: BaseInfoData,
    last_persisted: Option<UpdateSubscriptionDto>,
    chat: Option<TgChatDto>,
    errors: Option<BaseInfoErrors>,
    integration: Option<ChatIntegration>,
}

impl SubscriptionEditor {
    /// `existing` is the record loaded from the backend when editing; `None`
    /// starts a brand-new subscription.
    pub fn new(profile: BriefProfile, existing: Option<UpdateSubscriptionDto>, base_coin: &str) -> Self {
        let draft = existing
            .as_ref()
            .map(BaseInfoData::from_persisted)
            .unwrap_or_else(|| BaseInfoData::empty(base_coin));
        Self {
            profile,
            step: EditorStep::BaseInfo,
            draft,
            last_persisted: existing,
            chat: None,
            errors: None,
            integration: None,
        }
    }

    pub fn step(&self) -> EditorStep {
        self.step
    }

    pub fn draft(&self) -> &BaseInfoData {
        &self.draft
    }

    pub fn errors(&self) -> Option<BaseInfoErrors> {
        self.errors
    }

    pub fn last_persisted(&self) -> Option<&UpdateSubscriptionDto> {
        self.last_persisted.as_ref()
    }

    pub fn subscription_id(&self) -> Option<&str> {
        self.last_persisted.as_ref().map(|p| p.id.as_str())
    }

    pub fn chat(&self) -> Option<&TgChatDto> {
        self.chat.as_ref()
    }

    pub fn integration(&self) -> Option<&ChatIntegration> {
        self.integration.as_ref()
    }

    pub fn integration_mut(&mut self) -> Option<&mut ChatIntegration> {
        self.integration.as_mut()
    }

    /// Label of the step-0 submit button.
    pub fn submit_label(&self) -> &'static str {
        if self.last_persisted.is_some() {
            "Update"
        } else {
            "Create"
        }
    }

    /// Applies an edit to the draft. Once a save was attempted, errors are
    /// recomputed on every edit.
    pub fn edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut BaseInfoData),
    {
        f(&mut self.draft);
        if self.errors.is_some() {
            self.errors = Some(BaseInfoErrors::validate(&self.draft));
        }
    }

    fn has_changes(&self) -> bool {
        match &self.last_persisted {
            None => true,
            Some(persisted) => BaseInfoData::from_persisted(persisted) != self.draft,
        }
    }

    fn build_request(&self, id: &str) -> UpdateSubscriptionDto {
        let status = self
            .last_persisted
            .as_ref()
            .map(|p| p.status)
            .unwrap_or(SubscriptionStatus::Draft);
        UpdateSubscriptionDto {
            id: id.to_string(),
            owner_id: self.profile.id.clone(),
            status,
            title: self.draft.title.clone(),
            description: self.draft.description.clone(),
            main_image_id: self.draft.main_image_id.clone(),
            new_main_base64_image: self.draft.new_main_base64_image.clone(),
            preview_image_id: self.draft.preview_image_id.clone(),
            new_preview_base64_image: self.draft.new_preview_base64_image.clone(),
            price: self.draft.price_string(),
            coin: self.draft.coin.clone(),
        }
    }

    /// Leaves step 0: validate, save the draft when it changed, look up the
    /// chat binding, then open the integration step.
    pub async fn advance<A>(&mut self, api: &A) -> Result<AdvanceOutcome, WorkflowError>
    where
        A: SubscriptionApi + ?Sized,
    {
        if self.step != EditorStep::BaseInfo {
            return Err(WorkflowError::InvalidState("advance outside the base info step"));
        }

        let errors = BaseInfoErrors::validate(&self.draft);
        self.errors = Some(errors);
        if errors.has_error() {
            log::info!("subscription draft invalid errors={:?}", errors);
            return Ok(AdvanceOutcome::Invalid(errors));
        }

        let id = match &self.last_persisted {
            Some(persisted) => persisted.id.clone(),
            None => new_subscription_id(),
        };

        let mut saved = false;
        if self.has_changes() {
            let request = self.build_request(&id);
            if let Err(e) = api.update_subscription(&request).await {
                log::error!("catch error during updating subscription id={}: {}", id, e);
                return Err(e.into());
            }
            log::info!("subscription saved id={} status={:?}", id, request.status);
            self.last_persisted = Some(request);
            saved = true;
        }

        let chat = api.get_chat(&id).await.map_err(|e| {
            log::error!("chat binding lookup failed id={}: {}", id, e);
            e
        })?;
        if chat.is_binded() {
            self.chat = Some(chat);
        }

        self.integration = Some(ChatIntegration::new(id.clone(), self.chat.clone()));
        self.step = EditorStep::Integration;
        Ok(AdvanceOutcome::Advanced {
            subscription_id: id,
            saved,
        })
    }

    /// Forwards "next" to the integration step.
    pub async fn integration_next<A>(&mut self, api: &A) -> Result<IntegrationEvent, WorkflowError>
    where
        A: SubscriptionApi + ?Sized,
    {
        let integration = self
            .integration
            .as_mut()
            .ok_or(WorkflowError::InvalidState("integration step not open"))?;
        let event = integration.next(api).await?;
        if let Some(chat) = integration.chat() {
            self.chat = Some(chat.clone());
        }
        Ok(event)
    }

    pub fn back(&mut self) -> EditorOutcome {
        match self.step {
            EditorStep::BaseInfo => EditorOutcome::LeaveToProfile(format!("/profile/{}", self.profile.id)),
            EditorStep::Integration => {
                let event = self
                    .integration
                    .as_mut()
                    .map(ChatIntegration::back)
                    .unwrap_or(IntegrationEvent::DelegateBack);
                if event == IntegrationEvent::DelegateBack {
                    self.integration = None;
                    self.step = EditorStep::BaseInfo;
                }
                EditorOutcome::Stay
            }
        }
    }

    pub fn done(&self) -> Result<EditorOutcome, WorkflowError> {
        let integration = self
            .integration
            .as_ref()
            .ok_or(WorkflowError::InvalidState("integration step not open"))?;
        integration.done()?;
        Ok(EditorOutcome::Finished {
            redirect: format!(
                "/subscription/{}?profileId={}",
                integration.subscription_id(),
                self.profile.id
            ),
        })
    }
}
