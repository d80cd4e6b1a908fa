//! Authorized HTTP client.
//!
//! Every outbound call passes through two stages: the request stage
//! attaches the stored access token as a bearer credential, and the
//! response stage runs the token-refresh protocol on a 401. The one-shot
//! retry flag lives in the call's local state, so a resend that fails with
//! 401 again is passed through as a normal failure.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::credentials::{CredentialKey, CredentialStore, mask_token};
use crate::error::{Error, Result};

/// HTTP client bound to one backend and one credential store.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<CredentialStore>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: String,
}

impl ApiClient {
    /// Creates a client with the configured base URL and fixed timeout.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig, store: Arc<CredentialStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store,
        })
    }

    /// # Errors
    /// Returns an error if the request or response handling fails.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(Method::GET, path, None).await
    }

    /// # Errors
    /// Returns an error if the request or response handling fails.
    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        self.execute(Method::POST, path, Some(body)).await
    }

    /// # Errors
    /// Returns an error if the request or response handling fails.
    pub async fn put<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        self.execute(Method::PUT, path, Some(body)).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T> {
        // One-shot retry flag: local to this call, never global request state.
        let mut retried = false;
        loop {
            let response = self.dispatch(method.clone(), path, body).await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response.json::<T>().await?);
            }

            if status == StatusCode::UNAUTHORIZED && !retried {
                retried = true;
                if let Some(refresh_token) = self.store.get(CredentialKey::RefreshToken).await? {
                    debug!(
                        refresh = %mask_token(&refresh_token),
                        "request unauthorized, attempting token refresh"
                    );
                    match self.refresh_access_token(&refresh_token).await {
                        Ok(access_token) => {
                            self.store
                                .set(CredentialKey::AccessToken, &access_token)
                                .await?;
                            debug!(access = %mask_token(&access_token), "token refreshed, resending request");
                            continue;
                        }
                        Err(refresh_err) => {
                            // Refresh token rejected as well: forced logout.
                            warn!("token refresh failed, clearing stored credentials");
                            self.store.remove(&CredentialKey::ALL).await?;
                            return Err(refresh_err);
                        }
                    }
                }
            }

            return Err(error_from_response(response).await);
        }
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{path}", self.base_url);
        let mut builder = self.http.request(method, &url);
        if let Some(token) = self.store.get(CredentialKey::AccessToken).await? {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        Ok(builder.send().await?)
    }

    /// Calls the refresh endpoint, authorized with the refresh token. The
    /// refresh token itself is never rotated here.
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String> {
        let url = format!("{}/auth/refresh", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {refresh_token}"))
            .json(&serde_json::json!({}))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let parsed: RefreshResponse = response.json().await?;
        Ok(parsed.access_token)
    }
}

/// Maps a non-success response to the error taxonomy, extracting the
/// backend's `message` field when the body carries one.
async fn error_from_response(response: reqwest::Response) -> Error {
    let status = response.status();
    let message = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
        });

    if status == StatusCode::UNAUTHORIZED {
        Error::Unauthorized { message }
    } else {
        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}
