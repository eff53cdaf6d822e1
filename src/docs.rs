use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::auth::nonce,
        crate::api::auth::sign_in,
        crate::api::auth::sign_out,
        crate::api::auth::status,
        crate::api::profile::update,
        crate::api::profile::featured,
        crate::api::subscription::update,
        crate::api::subscription::process_payment,
        crate::api::subscription::publish,
        crate::api::subscription::unpublish,
        crate::api::integration::telegram,
        crate::api::integration::telegram_chat,
        crate::api::integration::generate_invite_code
    ),
    components(
        schemas(
            crate::auth::AuthStatus,
            crate::api::auth::AuthStatusResponse,
            crate::api::profile::FeaturedProfile,
            crate::models::SubscriptionStatus,
            crate::models::UpdateSubscriptionDto,
            crate::models::SubscriptionIdDto,
            crate::models::ProcessPaymentResponse,
            crate::models::ChatBindingStatus,
            crate::models::ChatInfo,
            crate::models::TgChatDto,
            crate::models::DomainError,
            crate::models::TgIntegrationDto,
            crate::models::BindTelegramRequest,
            crate::models::InviteLinkStatus,
            crate::models::TgChatStatusDto,
            crate::models::UpdateProfileDto,
            crate::models::BriefProfile
        )
    ),
    tags(
        (name = "auth", description = "Session relay"),
        (name = "profile", description = "Profile updates and featured profiles"),
        (name = "subscription", description = "Subscription lifecycle"),
        (name = "integration", description = "Telegram chat integration")
    )
)]
pub struct ApiDoc;
