use thiserror::Error;

/// Error types for profile operations.
///
/// The first three variants are user-facing rejections whose display text is
/// the exact message shown to the user. The rest wrap failures of the
/// persistence layer or the host and pass through unchanged.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Missing or empty profile name, or missing module payload.
    #[error("{0}")]
    InvalidArgument(String),

    /// A profile with the requested name already exists.
    #[error("{0}")]
    Conflict(String),

    /// The targeted profile does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Database layer error.
    #[error("Database layer error: {0}")]
    DatabaseLayer(#[from] modprofiles_db::DatabaseError),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] modprofiles_core::ConfigError),

    /// The host application failed to carry out a request.
    #[error("Host error: {0}")]
    Host(String),
}

impl ProfileError {
    /// Whether this error is a validation rejection reported to the user.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_) | Self::Conflict(_) | Self::NotFound(_)
        )
    }
}

/// Result type alias for profile operations.
pub type Result<T> = std::result::Result<T, ProfileError>;
