//! User profile data model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display name given to profiles created on first login.
pub const DEFAULT_DISPLAY_NAME: &str = "New member";

/// Validation errors returned by [`SubjectId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectValidationError {
    EmptySubject,
    InvalidSubject,
}

impl fmt::Display for SubjectValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySubject => write!(f, "subject identifier must not be empty"),
            Self::InvalidSubject => {
                write!(f, "subject identifier must not contain surrounding whitespace")
            }
        }
    }
}

impl std::error::Error for SubjectValidationError {}

/// Stable subject identifier issued by the identity provider.
///
/// Opaque to this application; only shape is validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubjectId(String);

impl SubjectId {
    /// Validate and construct a [`SubjectId`] from borrowed input.
    pub fn new(subject: impl AsRef<str>) -> Result<Self, SubjectValidationError> {
        Self::from_owned(subject.as_ref().to_owned())
    }

    fn from_owned(subject: String) -> Result<Self, SubjectValidationError> {
        if subject.is_empty() {
            return Err(SubjectValidationError::EmptySubject);
        }
        if subject.trim() != subject {
            return Err(SubjectValidationError::InvalidSubject);
        }
        Ok(Self(subject))
    }
}

impl AsRef<str> for SubjectId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<SubjectId> for String {
    fn from(value: SubjectId) -> Self {
        value.0
    }
}

impl TryFrom<String> for SubjectId {
    type Error = SubjectValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Application user profile, keyed by the provider's subject identifier.
///
/// ## Invariants
/// - Created lazily on first successful authentication, never updated by
///   this application afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub subject: SubjectId,
    pub display_name: String,
}

impl UserProfile {
    /// Build the default profile stored on first login.
    pub fn with_default_name(subject: SubjectId) -> Self {
        Self {
            subject,
            display_name: DEFAULT_DISPLAY_NAME.to_owned(),
        }
    }
}
