//! Error taxonomy for client operations.
//!
//! Every failure a service can produce is representable here; nothing in
//! the core is fatal to the process.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure of a client operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Client-side validation failure, detected before any network call.
    #[error("{0}")]
    Validation(String),

    /// Network unreachable, timeout, or a malformed response body.
    #[error("tidak dapat terhubung ke server: {0}")]
    Transport(#[from] reqwest::Error),

    /// 401 after the refresh-and-resend path is exhausted.
    #[error("{}", message.as_deref().unwrap_or("sesi tidak valid"))]
    Unauthorized { message: Option<String> },

    /// Backend rejected the request with a business error.
    #[error("{}", message.clone().unwrap_or_else(|| format!("permintaan gagal (HTTP {status})")))]
    Api { status: u16, message: Option<String> },

    /// Credential store I/O or serialization failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl Error {
    /// Substitutes a per-operation fallback when the backend supplied no
    /// human-readable message. Transport and validation errors pass through
    /// verbatim.
    #[must_use]
    pub fn or_fallback(self, fallback: &str) -> Self {
        match self {
            Self::Api {
                status,
                message: None,
            } => Self::Api {
                status,
                message: Some(fallback.to_string()),
            },
            Self::Unauthorized { message: None } => Self::Unauthorized {
                message: Some(fallback.to_string()),
            },
            other => other,
        }
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Credential store failure.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("gagal mengakses penyimpanan kredensial: {0}")]
    Io(#[from] std::io::Error),
    #[error("data kredensial rusak: {0}")]
    Serde(#[from] serde_json::Error),
}
