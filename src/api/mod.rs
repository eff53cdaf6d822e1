pub mod auth;
pub mod forward;
pub mod integration;
pub mod profile;
pub mod subscription;

use actix_web::web;

/// Largest body any proxy route accepts; per-route limits are checked in the
/// handlers.
pub const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
        .service(auth::nonce)
        .service(auth::sign_in)
        .service(auth::sign_out)
        .service(auth::status)
        .service(profile::update)
        .service(profile::featured)
        .service(subscription::update)
        .service(subscription::process_payment)
        .service(subscription::publish)
        .service(subscription::unpublish)
        .service(integration::telegram)
        .service(integration::telegram_chat)
        .service(integration::generate_invite_code);
}
