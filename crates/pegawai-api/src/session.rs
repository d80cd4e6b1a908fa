//! Session service: login, logout, restoration and account updates.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::credentials::{CredentialKey, CredentialStore};
use crate::error::Result;
use crate::http::ApiClient;
use crate::types::User;

/// Successful login payload. Expiry hints sent by the backend are ignored;
/// expiry is discovered through the 401 path instead.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// Credentials restored from the store without a network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoredSession {
    pub user: User,
    pub access_token: String,
}

/// Account fields that can be patched.
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub email: Option<String>,
    pub role: Option<String>,
}

impl AccountPatch {
    fn to_body(&self) -> Value {
        let mut body = Map::new();
        if let Some(email) = &self.email {
            body.insert("email".to_string(), json!(email));
        }
        if let Some(role) = &self.role {
            body.insert("role".to_string(), json!(role));
        }
        Value::Object(body)
    }
}

#[derive(Debug, Deserialize)]
struct AccountEnvelope {
    user: User,
}

/// Orchestrates authentication calls and mirrors their results into the
/// credential store.
#[derive(Debug)]
pub struct SessionService {
    api: Arc<ApiClient>,
    store: Arc<CredentialStore>,
}

impl SessionService {
    pub fn new(api: Arc<ApiClient>, store: Arc<CredentialStore>) -> Self {
        Self { api, store }
    }

    /// Posts credentials and persists the returned token pair and user.
    ///
    /// # Errors
    /// Returns the backend's message, or "Login gagal" if none is provided.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let response: LoginResponse = self
            .api
            .post("/auth/login", &json!({ "email": email, "password": password }))
            .await
            .map_err(|err| err.or_fallback("Login gagal"))?;

        self.store
            .set(CredentialKey::AccessToken, &response.access_token)
            .await?;
        self.store
            .set(CredentialKey::RefreshToken, &response.refresh_token)
            .await?;
        self.store.set_user(&response.user).await?;

        debug!(user_id = response.user.id, "login succeeded, credentials persisted");
        Ok(response)
    }

    /// Clears all persisted credentials. Best-effort: local clearance is the
    /// operation's definition of success, so this never fails observably.
    pub async fn logout(&self) {
        if let Err(err) = self.store.remove(&CredentialKey::ALL).await {
            warn!("logout could not clear credential store: {err}");
        }
    }

    /// Restores the persisted session without a network call. Either key
    /// missing (including a half-written pair) reads as "not authenticated";
    /// the 401 path validates the token on first real use.
    ///
    /// # Errors
    /// Returns an error if the credential store cannot be read.
    pub async fn restore_session(&self) -> Result<Option<RestoredSession>> {
        let Some(access_token) = self.store.get(CredentialKey::AccessToken).await? else {
            return Ok(None);
        };
        let Some(user) = self.store.stored_user().await? else {
            return Ok(None);
        };
        Ok(Some(RestoredSession { user, access_token }))
    }

    /// Whether an access token is currently stored. Presence only; validity
    /// is established by the first authorized request.
    pub async fn is_authenticated(&self) -> bool {
        matches!(
            self.store.get(CredentialKey::AccessToken).await,
            Ok(Some(_))
        )
    }

    /// Patches account fields. When the email changed, the persisted user
    /// record is overwritten with the backend's version.
    ///
    /// # Errors
    /// Returns the backend's message, or a generic failure message.
    pub async fn update_account(&self, user_id: u64, patch: &AccountPatch) -> Result<User> {
        let envelope: AccountEnvelope = self
            .api
            .put(&format!("/auth/users/{user_id}"), &patch.to_body())
            .await
            .map_err(|err| err.or_fallback("Gagal memperbarui akun"))?;

        match self.store.stored_user().await? {
            Some(current) if current.email == envelope.user.email => {}
            _ => self.store.set_user(&envelope.user).await?,
        }

        Ok(envelope.user)
    }
}
