//! Port for the external identity verifier.
//!
//! In hexagonal terms this is a *driven* port: the session resolver submits
//! a raw bearer token and receives verified claims without knowing which
//! provider, transport, or key set sits behind the boundary.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::SubjectId;

/// Verified identity claims.
///
/// The provider may attach many claims; this application only relies on a
/// stable subject identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    pub subject: SubjectId,
}

/// Errors raised by identity verifier adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenVerifierError {
    /// The token is malformed, expired, or carries a bad signature.
    #[error("token rejected: {message}")]
    Rejected { message: String },
    /// The verifier endpoint could not be reached.
    #[error("verifier unreachable: {message}")]
    Transport { message: String },
    /// The verifier answered with a payload this adapter cannot read.
    #[error("verifier response unreadable: {message}")]
    Decode { message: String },
}

impl TokenVerifierError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Port for validating a signed bearer credential.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify a raw token and return the identity claims it asserts.
    async fn verify(&self, token: &str) -> Result<IdentityClaims, TokenVerifierError>;
}

/// Verifier backed by a fixed token table, for development and tests.
///
/// Any token absent from the table is rejected, mirroring how a real
/// provider fails on unknown credentials.
#[derive(Debug, Default, Clone)]
pub struct FixtureTokenVerifier {
    subjects: HashMap<String, SubjectId>,
}

impl FixtureTokenVerifier {
    /// Register a token that verifies to the given subject.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, subject: SubjectId) -> Self {
        self.subjects.insert(token.into(), subject);
        self
    }
}

#[async_trait]
impl TokenVerifier for FixtureTokenVerifier {
    async fn verify(&self, token: &str) -> Result<IdentityClaims, TokenVerifierError> {
        self.subjects
            .get(token)
            .map(|subject| IdentityClaims {
                subject: subject.clone(),
            })
            .ok_or_else(|| TokenVerifierError::rejected("unknown fixture token"))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn fixture_verifier_resolves_registered_tokens() {
        let subject = SubjectId::new("uid-1").expect("subject id");
        let verifier = FixtureTokenVerifier::default().with_token("good", subject.clone());

        let claims = verifier.verify("good").await.expect("claims");
        assert_eq!(claims.subject, subject);
    }

    #[tokio::test]
    async fn fixture_verifier_rejects_unknown_tokens() {
        let verifier = FixtureTokenVerifier::default();
        let err = verifier.verify("bad").await.expect_err("must reject");
        assert!(matches!(err, TokenVerifierError::Rejected { .. }));
    }
}
