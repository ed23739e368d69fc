use thiserror::Error;

/// All errors that can occur in kvprov.
#[derive(Debug, Error)]
pub enum KvError {
    // --- Local validation ---
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // --- Remote API errors ---
    #[error("Azure API returned {status} {code}: {message}")]
    RemoteApi {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Request failed: {0}")]
    Transport(String),

    // --- Authorization ---
    #[error("Authorizer error: {0}")]
    Authorizer(String),

    // --- Keyring errors ---
    #[error("Keyring error: {0}")]
    KeyringError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Coarse classification of a [`KvError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input detected before any network call.
    InvalidArgument,
    /// Anything the control or data plane returned, plus transport failures.
    RemoteApi,
    /// A bearer token could not be obtained.
    Authorizer,
    /// Configuration, IO and CLI plumbing.
    Local,
}

impl KvError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::RemoteApi { .. } | Self::Transport(_) => ErrorKind::RemoteApi,
            Self::Authorizer(_) | Self::KeyringError(_) => ErrorKind::Authorizer,
            _ => ErrorKind::Local,
        }
    }

    /// HTTP status of a remote API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteApi { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

/// Convenience type alias for kvprov results.
pub type Result<T> = std::result::Result<T, KvError>;
