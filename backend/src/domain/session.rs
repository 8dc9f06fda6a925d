//! Session resolution against the external identity verifier.
//!
//! Every route that cares about identity funnels through here. A missing or
//! unverifiable token is the anonymous session, never an error: browsing
//! stays open to everyone and only mutations are gated.

use std::sync::Arc;

use tracing::warn;

use crate::domain::ports::{IdentityClaims, TokenVerifier};

/// Resolves a raw bearer token to verified identity claims.
#[derive(Clone)]
pub struct SessionResolver {
    verifier: Arc<dyn TokenVerifier>,
}

impl SessionResolver {
    /// Build a resolver over the given verifier port.
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }

    /// Resolve an optional raw token to claims, or to the anonymous session.
    ///
    /// Absent or blank tokens short-circuit without calling the verifier.
    /// Verification failures are logged and degrade to anonymous; they are
    /// never surfaced to the caller.
    pub async fn resolve(&self, token: Option<&str>) -> Option<IdentityClaims> {
        let raw = token.map(str::trim).filter(|t| !t.is_empty())?;

        match self.verifier.verify(raw).await {
            Ok(claims) => Some(claims),
            Err(error) => {
                warn!(%error, "token verification failed, continuing as anonymous");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::SubjectId;
    use crate::domain::ports::{FixtureTokenVerifier, MockTokenVerifier, TokenVerifierError};
    use rstest::rstest;

    fn subject() -> SubjectId {
        SubjectId::new("uid-1").expect("subject id")
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    #[tokio::test]
    async fn blank_tokens_resolve_anonymous_without_verifier_call(#[case] token: Option<&str>) {
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify().never();

        let resolver = SessionResolver::new(Arc::new(verifier));
        assert!(resolver.resolve(token).await.is_none());
    }

    #[rstest]
    #[case(TokenVerifierError::rejected("expired"))]
    #[case(TokenVerifierError::transport("connection refused"))]
    #[case(TokenVerifierError::decode("bad payload"))]
    #[tokio::test]
    async fn verification_failures_degrade_to_anonymous(#[case] failure: TokenVerifierError) {
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .return_once(move |_| Err(failure));

        let resolver = SessionResolver::new(Arc::new(verifier));
        assert!(resolver.resolve(Some("some-token")).await.is_none());
    }

    #[tokio::test]
    async fn valid_tokens_resolve_to_claims() {
        let verifier = FixtureTokenVerifier::default().with_token("good", subject());
        let resolver = SessionResolver::new(Arc::new(verifier));

        let claims = resolver.resolve(Some("good")).await.expect("claims");
        assert_eq!(claims.subject, subject());
    }

    #[tokio::test]
    async fn tokens_are_trimmed_before_verification() {
        let verifier = FixtureTokenVerifier::default().with_token("good", subject());
        let resolver = SessionResolver::new(Arc::new(verifier));

        assert!(resolver.resolve(Some("  good  ")).await.is_some());
    }
}
