// src/workflow/profile.rs

use crate::contract::ProfileContract;
use crate::error::WorkflowError;
use crate::models::{BaseProfileDto, UpdateProfileDto};
use crate::tokens::TokenRegistry;
use crate::workflow::ProfileApi;

pub const MAX_PROFILE_DESCRIPTION_LEN: usize = 220;
pub const MAX_SOCIAL_MEDIA_LINKS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseProfile {
    pub id: String,
    pub title: String,
    pub description: String,
    pub logo_id: Option<String>,
    pub new_base64_image: Option<String>,
    pub social_media_links: Vec<String>,
}

impl From<&BaseProfileDto> for BaseProfile {
    fn from(dto: &BaseProfileDto) -> Self {
        Self {
            id: dto.id.clone(),
            title: dto.title.clone(),
            description: dto.description.clone(),
            logo_id: Some(dto.logo_id.clone()).filter(|id| !id.is_empty()),
            new_base64_image: None,
            social_media_links: dto.social_media_links.clone(),
        }
    }
}

impl BaseProfile {
    fn to_request(&self) -> UpdateProfileDto {
        UpdateProfileDto {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            logo_id: self.logo_id.clone(),
            new_base64_image: self.new_base64_image.clone(),
            social_media_links: self.social_media_links.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileErrors {
    pub logo: bool,
    pub title: bool,
    pub description: bool,
    pub social_media_links: bool,
}

impl ProfileErrors {
    pub fn validate(profile: &BaseProfile) -> Self {
        Self {
            logo: profile.logo_id.is_none() && profile.new_base64_image.is_none(),
            title: profile.title.trim().is_empty(),
            description: profile.description.trim().is_empty()
                || profile.description.chars().count() > MAX_PROFILE_DESCRIPTION_LEN,
            social_media_links: profile.social_media_links.is_empty(),
        }
    }

    pub fn has_error(&self) -> bool {
        self.logo || self.title || self.description || self.social_media_links
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Invalid(ProfileErrors),
    Saved,
    Unchanged,
}

pub struct ProfileEditor {
    base: BaseProfile,
    draft: BaseProfile,
    editing: bool,
    available_tokens: Vec<String>,
    processing_token: Option<String>,
}

impl ProfileEditor {
    pub fn new(profile: &BaseProfileDto) -> Self {
        let base = BaseProfile::from(profile);
        Self {
            draft: base.clone(),
            base,
            editing: false,
            available_tokens: Vec::new(),
            processing_token: None,
        }
    }

    /// Symbols of the tokens the profile accepts as donations.
    pub fn available_tokens(&self) -> &[String] {
        &self.available_tokens
    }

    pub fn processing_token(&self) -> Option<&str> {
        self.processing_token.as_deref()
    }

    pub async fn load_donation_tokens<C>(
        &mut self,
        contract: &C,
        registry: &TokenRegistry,
    ) -> Result<&[String], WorkflowError>
    where
        C: ProfileContract + ?Sized,
    {
        let addresses = contract.donation_tokens(&self.base.id).await?;
        self.available_tokens = registry.symbols_for(&addresses);
        Ok(&self.available_tokens)
    }

    /// Flips whether the profile accepts `symbol`, then reloads the list from
    /// the chain. The list is left as it was when either call fails.
    pub async fn toggle_donation_token<C>(
        &mut self,
        contract: &C,
        registry: &TokenRegistry,
        symbol: &str,
    ) -> Result<&[String], WorkflowError>
    where
        C: ProfileContract + ?Sized,
    {
        let token = registry
            .address_by_symbol(symbol)
            .ok_or_else(|| WorkflowError::UnknownToken(symbol.to_string()))?;
        let enabled = self.available_tokens.iter().any(|t| t == symbol);

        let id = self.base.id.clone();
        self.processing_token = Some(symbol.to_string());
        let result = match contract.set_donation_token(&id, token, !enabled).await {
            Ok(()) => contract.donation_tokens(&id).await,
            Err(e) => Err(e),
        };
        self.processing_token = None;

        let addresses = result.map_err(|e| {
            log::error!("donation token toggle failed id={} token={}: {}", id, symbol, e);
            e
        })?;
        log::info!("donation token {} id={} enabled={}", symbol, id, !enabled);
        self.available_tokens = registry.symbols_for(&addresses);
        Ok(&self.available_tokens)
    }

    pub fn base(&self) -> &BaseProfile {
        &self.base
    }

    pub fn draft(&self) -> &BaseProfile {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn start_editing(&mut self) {
        self.draft = self.base.clone();
        self.editing = true;
    }

    pub fn cancel(&mut self) {
        self.draft = self.base.clone();
        self.editing = false;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    /// Input past the limit is cut off, the way the text area does it.
    pub fn set_description(&mut self, description: &str) {
        self.draft.description = description.chars().take(MAX_PROFILE_DESCRIPTION_LEN).collect();
    }

    pub fn set_logo(&mut self, base64_image: impl Into<String>) {
        self.draft.new_base64_image = Some(base64_image.into());
    }

    /// Returns false when the link was not added.
    pub fn add_social_link(&mut self, link: &str) -> bool {
        let link = link.trim();
        if link.is_empty()
            || self.draft.social_media_links.len() >= MAX_SOCIAL_MEDIA_LINKS
            || self.draft.social_media_links.iter().any(|l| l == link)
        {
            return false;
        }
        self.draft.social_media_links.push(link.to_string());
        true
    }

    pub fn edit_social_link(&mut self, index: usize, link: &str) -> bool {
        let link = link.trim();
        if link.is_empty() {
            return false;
        }
        match self.draft.social_media_links.get_mut(index) {
            Some(slot) => {
                *slot = link.to_string();
                true
            }
            None => false,
        }
    }

    pub fn remove_social_link(&mut self, index: usize) -> Option<String> {
        if index < self.draft.social_media_links.len() {
            Some(self.draft.social_media_links.remove(index))
        } else {
            None
        }
    }

    pub async fn save<P>(&mut self, api: &P) -> Result<SaveOutcome, WorkflowError>
    where
        P: ProfileApi + ?Sized,
    {
        let errors = ProfileErrors::validate(&self.draft);
        if errors.has_error() {
            return Ok(SaveOutcome::Invalid(errors));
        }
        if self.draft == self.base {
            self.editing = false;
            return Ok(SaveOutcome::Unchanged);
        }

        let updated = api.update_profile(&self.draft.to_request()).await.map_err(|e| {
            log::error!("profile update failed id={}: {}", self.draft.id, e);
            e
        })?;
        log::info!("profile updated id={}", updated.id);

        self.base = BaseProfile::from(&updated);
        self.draft = self.base.clone();
        self.editing = false;
        Ok(SaveOutcome::Saved)
    }
}
