//! Resolves a [`DependencyDescriptor`] to its license text.
//!
//! The four candidate URLs are probed one at a time in their fixed order and
//! the first plain-text response wins. Every failure on a candidate is a
//! [`FetchMiss`]: it is logged and the next candidate is tried. When all four
//! miss the result is `None`.

pub mod http;

use std::future::Future;

use thiserror::Error;
use url::Url;

use crate::models::{DependencyDescriptor, License};

/// Status, media type and body of one GET.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    /// Raw `Content-Type` header value, if any.
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Why a single candidate produced no license.
#[derive(Debug, Error)]
pub enum FetchMiss {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("content type {0:?} is not text/plain")]
    ContentType(Option<String>),
    #[error("body is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),
}

/// One network retrieval per call.
pub trait Transport {
    fn get(&self, url: &Url) -> impl Future<Output = Result<RawResponse, FetchMiss>> + Send;
}

pub struct LicenseFetcher<T> {
    transport: T,
}

impl<T: Transport> LicenseFetcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// First candidate that returns plain text, or `None` if all miss.
    pub async fn fetch_license(&self, descriptor: &DependencyDescriptor) -> Option<License> {
        for url in descriptor.candidate_license_urls() {
            match self.fetch_candidate(&url).await {
                Ok(text) => {
                    tracing::info!(name = %descriptor.name, %url, "license found");
                    return Some(License {
                        source_url: url,
                        text,
                    });
                }
                Err(miss) => {
                    tracing::debug!(name = %descriptor.name, %url, "miss: {}", miss);
                }
            }
        }
        tracing::info!(name = %descriptor.name, "no license found");
        None
    }

    async fn fetch_candidate(&self, url: &Url) -> Result<String, FetchMiss> {
        let response = self.transport.get(url).await?;

        if !(200..300).contains(&response.status) {
            return Err(FetchMiss::Status(response.status));
        }

        // An HTML body here is usually the host's "not found" page for the
        // wrong branch name.
        if !is_plain_text(response.content_type.as_deref()) {
            return Err(FetchMiss::ContentType(response.content_type));
        }

        Ok(String::from_utf8(response.body)?)
    }
}

/// `true` if the media type, ignoring parameters like `charset`, is `text/plain`.
fn is_plain_text(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("text/plain"))
        .unwrap_or(false)
}
