//! Client for the hosted backend's admin APIs (auth users and object storage).
//!
//! Table reads and writes go straight to Postgres through `db`; only the
//! operations that have no SQL equivalent go over HTTP, authenticated with the
//! service role key.

mod auth_admin;
mod storage;

use std::{sync::Arc, time::Duration};

use reqwest::{Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

pub use auth_admin::{AuthUserRecord, NewAuthUser, UserMetadata};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum BaasError {
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend rejected request ({status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<SupabaseClientInner>,
}

struct SupabaseClientInner {
    http: reqwest::Client,
    base_url: String,
    service_role_key: SecretString,
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.inner.base_url)
            .field("service_role_key", &"[REDACTED]")
            .finish()
    }
}

/// Error bodies differ between the auth and storage services.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .or(self.error)
    }
}

impl SupabaseClient {
    pub fn new(base_url: &str, service_role_key: SecretString) -> Result<Self, BaasError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(SupabaseClientInner {
                http,
                base_url: base_url.trim_end_matches('/').to_string(),
                service_role_key,
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let key = self.inner.service_role_key.expose_secret();
        self.inner
            .http
            .request(method, format!("{}{path}", self.inner.base_url))
            .header("apikey", key)
            .bearer_auth(key)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, BaasError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| {
                if text.is_empty() {
                    status.to_string()
                } else {
                    text
                }
            });

        Err(BaasError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
