//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and services and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{TokenVerifier, UserDirectory, VehicleStore};
use crate::domain::{Comparator, ProfileService, SessionResolver};

/// Dependency bundle for HTTP handlers.
///
/// Constructed once at startup and cloned into each worker; no handler
/// reaches for an ambient global.
#[derive(Clone)]
pub struct HttpState {
    pub store: Arc<dyn VehicleStore>,
    pub sessions: SessionResolver,
    pub profiles: ProfileService,
    pub comparator: Comparator,
}

impl HttpState {
    /// Wire the domain services over the given ports.
    pub fn new(
        store: Arc<dyn VehicleStore>,
        directory: Arc<dyn UserDirectory>,
        verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            sessions: SessionResolver::new(verifier),
            profiles: ProfileService::new(directory),
            comparator: Comparator::new(store.clone()),
            store,
        }
    }
}
