//! Identity provider adapters.

mod http_verifier;

pub use http_verifier::{DEFAULT_VERIFY_TIMEOUT, HttpTokenVerifier};
