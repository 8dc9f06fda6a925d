//! Port for the user collection in the document store.

use async_trait::async_trait;

use crate::domain::{Error, SubjectId, UserProfile};

/// Errors raised by user directory adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserDirectoryError {
    /// Store connection could not be established.
    #[error("user directory connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user directory query failed: {message}")]
    Query { message: String },
}

impl UserDirectoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

impl From<UserDirectoryError> for Error {
    fn from(value: UserDirectoryError) -> Self {
        match value {
            UserDirectoryError::Connection { .. } => Self::service_unavailable(value.to_string()),
            UserDirectoryError::Query { .. } => Self::internal(value.to_string()),
        }
    }
}

/// Port for user profile documents, keyed by provider subject.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch a profile by subject identifier.
    async fn find(&self, subject: &SubjectId) -> Result<Option<UserProfile>, UserDirectoryError>;

    /// Persist a profile under its subject identifier.
    ///
    /// A concurrent insert for the same subject is resolved by the store
    /// (last write wins); callers do not guard against it.
    async fn insert(&self, profile: &UserProfile) -> Result<(), UserDirectoryError>;
}
