//! Reqwest-backed identity verifier adapter.
//!
//! This adapter owns transport details only: submitting the raw token to the
//! provider's verification endpoint, timeout and HTTP error mapping, and
//! JSON decoding into identity claims.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::domain::SubjectId;
use crate::domain::ports::{IdentityClaims, TokenVerifier, TokenVerifierError};

/// Request timeout applied when the caller does not choose one.
pub const DEFAULT_VERIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Identity verifier that POSTs tokens to one verification endpoint.
pub struct HttpTokenVerifier {
    client: Client,
    endpoint: Url,
}

impl HttpTokenVerifier {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl TokenVerifier for HttpTokenVerifier {
    async fn verify(&self, token: &str) -> Result<IdentityClaims, TokenVerifierError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[("token", token)])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_claims(body.as_ref())
    }
}

#[derive(Debug, Deserialize)]
struct ClaimsDto {
    sub: String,
}

fn parse_claims(body: &[u8]) -> Result<IdentityClaims, TokenVerifierError> {
    let decoded: ClaimsDto = serde_json::from_slice(body).map_err(|error| {
        TokenVerifierError::decode(format!("invalid claims payload: {error}"))
    })?;
    let subject = SubjectId::new(&decoded.sub)
        .map_err(|error| TokenVerifierError::decode(format!("invalid subject claim: {error}")))?;
    Ok(IdentityClaims { subject })
}

fn map_transport_error(error: reqwest::Error) -> TokenVerifierError {
    TokenVerifierError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> TokenVerifierError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };

    if status.is_client_error() {
        TokenVerifierError::rejected(message)
    } else {
        TokenVerifierError::transport(message)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network verifier mapping helpers.
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_claims_with_extra_fields() {
        let body = br#"{"sub":"provider-uid-1","email":"a@example.com","exp":1999999999}"#;
        let claims = parse_claims(body).expect("claims decode");
        assert_eq!(claims.subject.as_ref(), "provider-uid-1");
    }

    #[rstest]
    #[case::not_json(b"unauthorised".as_slice())]
    #[case::missing_subject(br#"{"aud":"catalogue"}"#.as_slice())]
    #[case::blank_subject(br#"{"sub":""}"#.as_slice())]
    fn unreadable_payloads_map_to_decode_errors(#[case] body: &[u8]) {
        let err = parse_claims(body).expect_err("decode must fail");
        assert!(matches!(err, TokenVerifierError::Decode { .. }));
    }

    #[rstest]
    #[case::unauthorised(StatusCode::UNAUTHORIZED, true)]
    #[case::bad_request(StatusCode::BAD_REQUEST, true)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, false)]
    #[case::bad_gateway(StatusCode::BAD_GATEWAY, false)]
    fn maps_http_statuses_to_expected_errors(
        #[case] status: StatusCode,
        #[case] rejected: bool,
    ) {
        let error = map_status_error(status, b"{\"error\":\"invalid token\"}");
        if rejected {
            assert!(
                matches!(error, TokenVerifierError::Rejected { .. }),
                "client statuses should reject the token",
            );
        } else {
            assert!(
                matches!(error, TokenVerifierError::Transport { .. }),
                "server statuses should map to transport failures",
            );
        }
    }

    #[test]
    fn long_bodies_are_previewed() {
        let body = "x".repeat(500);
        let error = map_status_error(StatusCode::SERVICE_UNAVAILABLE, body.as_bytes());
        let message = error.to_string();
        assert!(message.contains("..."));
        assert!(message.len() < body.len());
    }
}
