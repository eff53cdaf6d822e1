// src/backend.rs
//
// Server-side reads against the external backend, used to assemble page data.
// Every call carries the browser's cookie so the backend sees the same session.

use std::cmp::Ordering;

use alloy_primitives::Address;
use async_trait::async_trait;
use futures_util::future::join_all;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::auth::AuthStatus;
use crate::contract::ProfileContract;
use crate::error::ApiError;
use crate::models::{
    BriefProfile, PaymentStatus, ProfileDto, ResponseDto, ResponseStatus,
    SubscriptionPaymentStatus, TgChatStatusDto, UpdateSubscriptionDto,
};
use crate::AppState;

#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn load_profile(&self, profile_id: &str, cookie: Option<&str>) -> Result<ProfileDto, ApiError>;

    async fn load_subscription(
        &self,
        subscription_id: &str,
        cookie: Option<&str>,
    ) -> Result<UpdateSubscriptionDto, ApiError>;

    async fn payment_status(
        &self,
        subscription_id: &str,
        cookie: Option<&str>,
    ) -> Result<SubscriptionPaymentStatus, ApiError>;

    async fn invite_link_status(
        &self,
        subscription_id: &str,
        cookie: Option<&str>,
    ) -> Result<TgChatStatusDto, ApiError>;
}

#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.http.clone(), state.config.backend_base_url.clone())
    }

    async fn post<B, T>(&self, path: &str, body: &B, cookie: Option<&str>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let mut request = self.http.post(format!("{}{}", self.base_url, path)).json(body);
        if let Some(cookie) = cookie {
            request = request.header(reqwest::header::COOKIE, cookie);
        }

        let resp = request.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str::<T>(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("{e}; body={text}")))
    }

    async fn post_enveloped<T>(&self, path: &str, body: &Value, cookie: Option<&str>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let envelope: ResponseDto<T> = self.post(path, body, cookie).await?;
        match envelope.status {
            ResponseStatus::Success => Ok(envelope.data),
            ResponseStatus::Error => Err(ApiError::InvalidResponse(format!(
                "backend returned error status for {path}"
            ))),
        }
    }
}

#[async_trait]
impl BackendApi for BackendClient {
    async fn load_profile(&self, profile_id: &str, cookie: Option<&str>) -> Result<ProfileDto, ApiError> {
        self.post_enveloped("/profile/", &json!({ "profileId": profile_id }), cookie)
            .await
    }

    async fn load_subscription(
        &self,
        subscription_id: &str,
        cookie: Option<&str>,
    ) -> Result<UpdateSubscriptionDto, ApiError> {
        self.post_enveloped(
            "/subscription/",
            &json!({ "subscriptionId": subscription_id }),
            cookie,
        )
        .await
    }

    async fn payment_status(
        &self,
        subscription_id: &str,
        cookie: Option<&str>,
    ) -> Result<SubscriptionPaymentStatus, ApiError> {
        self.post(
            "/subscription/get-subscription-payment-status",
            &json!({ "subscriptionId": subscription_id }),
            cookie,
        )
        .await
    }

    async fn invite_link_status(
        &self,
        subscription_id: &str,
        cookie: Option<&str>,
    ) -> Result<TgChatStatusDto, ApiError> {
        self.post(
            "/telegram/get-invite-link-status",
            &json!({ "subscriptionId": subscription_id }),
            cookie,
        )
        .await
    }
}

/// Numeric ids compare numerically, anything else lexicographically.
fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

pub async fn load_featured_profiles<B>(backend: &B, ids: &[String]) -> Vec<BriefProfile>
where
    B: BackendApi + ?Sized,
{
    let loads = ids.iter().map(|id| async move {
        let result = backend.load_profile(id, None).await;
        (id, result)
    });

    let mut profiles: Vec<BriefProfile> = join_all(loads)
        .await
        .into_iter()
        .filter_map(|(id, result)| match result {
            Ok(profile) => Some(BriefProfile::from(&profile)),
            Err(e) => {
                log::warn!("featured profile load failed profile_id={}: {}", id, e);
                None
            }
        })
        .collect();

    profiles.sort_by(|a, b| compare_ids(&a.id, &b.id));
    profiles
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionPage {
    pub subscription: UpdateSubscriptionDto,
    pub profile: BriefProfile,
    pub profile_owner: Option<Address>,
    pub payment_status: PaymentStatus,
    pub invite_status: Option<TgChatStatusDto>,
}

/// Everything the subscription page needs. `Ok(None)` means the owning
/// profile could not be loaded and the caller should redirect.
pub async fn load_subscription_page<B, C>(
    backend: &B,
    contract: &C,
    subscription_id: &str,
    cookie: Option<&str>,
) -> Result<Option<SubscriptionPage>, ApiError>
where
    B: BackendApi + ?Sized,
    C: ProfileContract + ?Sized,
{
    log::info!("loading subscription subscription_id={}", subscription_id);
    let subscription = backend.load_subscription(subscription_id, cookie).await?;
    let profile_id = subscription.owner_id.clone();

    let (profile, owner, payment, invite) = futures_util::join!(
        backend.load_profile(&profile_id, cookie),
        contract.owner_of(&profile_id),
        backend.payment_status(subscription_id, cookie),
        backend.invite_link_status(subscription_id, cookie),
    );

    let profile = match profile {
        Ok(p) => BriefProfile::from(&p),
        Err(e) => {
            log::error!("profile load failed profile_id={}: {}", profile_id, e);
            return Ok(None);
        }
    };

    let profile_owner = owner
        .map_err(|e| log::error!("owner lookup failed profile_id={}: {}", profile_id, e))
        .ok();

    let payment_status = payment
        .map(|p| p.status)
        .unwrap_or(PaymentStatus::NotPaid);

    let invite_status = invite
        .map_err(|e| log::warn!("invite status failed subscription_id={}: {}", subscription_id, e))
        .ok();

    Ok(Some(SubscriptionPage {
        subscription,
        profile,
        profile_owner,
        payment_status,
        invite_status,
    }))
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatePage {
    pub profile: BriefProfile,
    pub profile_owner: Option<Address>,
}

/// Data for the "new subscription" page. Unauthenticated visitors and
/// unknown profiles get `None` (redirect home).
pub async fn load_create_page<B, C>(
    backend: &B,
    contract: &C,
    profile_id: &str,
    auth: AuthStatus,
    cookie: Option<&str>,
) -> Option<CreatePage>
where
    B: BackendApi + ?Sized,
    C: ProfileContract + ?Sized,
{
    if !auth.is_authenticated() {
        return None;
    }

    let (profile, owner) = futures_util::join!(
        backend.load_profile(profile_id, cookie),
        contract.owner_of(profile_id),
    );

    let profile = match profile {
        Ok(p) => BriefProfile::from(&p),
        Err(e) => {
            log::error!("can't find profile by id profile_id={}: {}", profile_id, e);
            return None;
        }
    };

    Some(CreatePage {
        profile,
        profile_owner: owner
            .map_err(|e| log::error!("can't find owner by profile id profile_id={}: {}", profile_id, e))
            .ok(),
    })
}
