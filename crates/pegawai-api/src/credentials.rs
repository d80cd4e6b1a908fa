//! Durable credential storage.
//!
//! A file-backed key-value store for the access token, refresh token and
//! last-known user record. Written with restricted permissions (0600);
//! tokens are never logged in full.
//!
//! Each operation is individually atomic, but there is no cross-key
//! transaction: a crash between two writes can leave one key without its
//! counterpart, and readers treat a missing counterpart as "not
//! authenticated".

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::types::User;

/// Credential cache filename.
pub const CREDENTIALS_FILE: &str = "credentials.json";

/// Keys persisted by the store. Their presence is the sole source of truth
/// for session restoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKey {
    AccessToken,
    RefreshToken,
    User,
}

impl CredentialKey {
    pub const ALL: [Self; 3] = [Self::AccessToken, Self::RefreshToken, Self::User];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccessToken => "accessToken",
            Self::RefreshToken => "refreshToken",
            Self::User => "user",
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CredentialFile {
    #[serde(flatten)]
    entries: HashMap<String, String>,
}

/// File-backed credential store.
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store located at `<dir>/credentials.json`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir.into().join(CREDENTIALS_FILE))
    }

    /// Reads one key. A missing file reads as an empty store.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or parsed.
    pub async fn get(&self, key: CredentialKey) -> Result<Option<String>, StorageError> {
        let file = self.load().await?;
        Ok(file.entries.get(key.as_str()).cloned())
    }

    /// Writes one key, leaving the others untouched.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    pub async fn set(&self, key: CredentialKey, value: &str) -> Result<(), StorageError> {
        let mut file = self.load().await?;
        file.entries.insert(key.as_str().to_string(), value.to_string());
        self.save(&file).await
    }

    /// Removes the given keys in one write.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    pub async fn remove(&self, keys: &[CredentialKey]) -> Result<(), StorageError> {
        let mut file = self.load().await?;
        for key in keys {
            file.entries.remove(key.as_str());
        }
        self.save(&file).await
    }

    /// Reads the persisted user record, if any.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or the record is corrupt.
    pub async fn stored_user(&self) -> Result<Option<User>, StorageError> {
        match self.get(CredentialKey::User).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Persists the user record under the `user` key.
    ///
    /// # Errors
    /// Returns an error if the store cannot be written.
    pub async fn set_user(&self, user: &User) -> Result<(), StorageError> {
        let raw = serde_json::to_string(user)?;
        self.set(CredentialKey::User, &raw).await
    }

    async fn load(&self) -> Result<CredentialFile, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(CredentialFile::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, file: &CredentialFile) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let contents = serde_json::to_string_pretty(file)?;
        tokio::fs::write(&self.path, contents).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600)).await?;
        }

        Ok(())
    }
}

/// Masked form of a token for log output (first 12 chars + ...).
#[must_use]
pub fn mask_token(token: &str) -> String {
    if token.len() <= 16 {
        return "***".to_string();
    }
    format!("{}...", &token[..12])
}
