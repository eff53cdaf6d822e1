// Helpers for image payloads and their S3-compatible storage.

use aws_sdk_s3::primitives::ByteStream;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::ProxyError;
use crate::AppState;

const DATA_URI_PREFIX: &str = "data:image/";
const BASE64_MARKER: &str = ";base64,";

/// A decoded `data:image/<type>;base64,<payload>` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUriImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl DataUriImage {
    pub fn parse(raw: &str) -> Result<Self, ProxyError> {
        let rest = raw
            .strip_prefix(DATA_URI_PREFIX)
            .ok_or_else(|| ProxyError::InvalidImage("missing data:image/ prefix".to_string()))?;
        let (kind, payload) = rest
            .split_once(BASE64_MARKER)
            .ok_or_else(|| ProxyError::InvalidImage("missing ;base64, marker".to_string()))?;

        if kind.is_empty() || !kind.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.') {
            return Err(ProxyError::InvalidImage(format!("bad image type {kind:?}")));
        }

        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| ProxyError::InvalidImage(e.to_string()))?;

        Ok(Self {
            content_type: format!("image/{kind}"),
            bytes,
        })
    }
}

/// Stores a base64 data-URI image under a fresh random key and returns the
/// key. With `MOCK_S3` the key is generated but nothing is written.
pub async fn upload_image(state: &AppState, bucket: &str, base64_image: &str) -> Result<String, ProxyError> {
    let image = DataUriImage::parse(base64_image)?;
    let key = Uuid::new_v4().to_string();

    log::info!("saving new image bucket={} key={} type={}", bucket, key, image.content_type);

    if state.config.mock_s3 {
        return Ok(key);
    }

    state
        .s3_client
        .put_object()
        .bucket(bucket)
        .key(&key)
        .content_type(&image.content_type)
        .body(ByteStream::from(image.bytes))
        .send()
        .await
        .map_err(|e| {
            log::error!("s3 put_object failed bucket={} key={}: {}", bucket, key, e);
            ProxyError::Storage(e.to_string())
        })?;

    log::info!("new image saved key={}", key);
    Ok(key)
}

/// Public link to a stored object.
///
/// With no base configured the virtual-hosted AWS form is used. A configured
/// base may be a template (`https://host/{bucket}/{key}`), may already contain
/// the bucket, or is treated as a path-style endpoint.
pub fn build_public_url(base: Option<&str>, bucket: &str, key: &str) -> String {
    let Some(base) = base else {
        return format!("https://{}.s3.amazonaws.com/{}", bucket, key);
    };
    let trimmed = base.trim_end_matches('/');

    if trimmed.contains("{bucket}") || trimmed.contains("{key}") {
        return trimmed.replace("{bucket}", bucket).replace("{key}", key);
    }

    if trimmed.contains(bucket) {
        format!("{}/{}", trimmed, key)
    } else {
        format!("{}/{}/{}", trimmed, bucket, key)
    }
}

pub fn profile_image_link(config: &AppConfig, key: &str) -> String {
    build_public_url(config.s3_public_base_url.as_deref(), &config.profile_bucket, key)
}

pub fn subscription_image_link(config: &AppConfig, key: &str) -> String {
    build_public_url(
        config.s3_public_base_url.as_deref(),
        &config.subscription_bucket,
        key,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_png_data_uri() {
        let image = DataUriImage::parse("data:image/png;base64,aGVsbG8=").expect("parse");
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.bytes, b"hello");
    }

    #[test]
    fn rejects_payload_without_prefix() {
        assert!(matches!(
            DataUriImage::parse("aGVsbG8="),
            Err(ProxyError::InvalidImage(_))
        ));
        assert!(matches!(
            DataUriImage::parse("data:image/png,aGVsbG8="),
            Err(ProxyError::InvalidImage(_))
        ));
    }

    #[test]
    fn rejects_broken_base64() {
        assert!(DataUriImage::parse("data:image/jpeg;base64,@@@").is_err());
    }

    #[test]
    fn default_link_is_virtual_hosted() {
        assert_eq!(
            build_public_url(None, "bucket-1", "abc"),
            "https://bucket-1.s3.amazonaws.com/abc"
        );
    }

    #[test]
    fn configured_bases() {
        assert_eq!(
            build_public_url(Some("https://cdn.example/{bucket}/{key}"), "b", "k"),
            "https://cdn.example/b/k"
        );
        assert_eq!(
            build_public_url(Some("https://b.storage.example/"), "b", "k"),
            "https://b.storage.example/k"
        );
        assert_eq!(
            build_public_url(Some("http://minio:9000"), "b", "k"),
            "http://minio:9000/b/k"
        );
    }

    #[test]
    fn links_use_the_matching_bucket() {
        let config = AppConfig::from_lookup(|key| match key {
            "BACKEND_BASE_URL" => Some("http://backend".to_string()),
            "S3_PUBLIC_BASE_URL" => Some("http://minio:9000".to_string()),
            _ => None,
        })
        .expect("config");

        assert_eq!(
            profile_image_link(&config, "logo"),
            "http://minio:9000/community-profile-images-1r34goy/logo"
        );
        assert_eq!(
            subscription_image_link(&config, "main"),
            "http://minio:9000/community-subscription-images-321t9587g/main"
        );
    }
}
