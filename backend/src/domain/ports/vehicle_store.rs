//! Port for the external document store holding the vehicle collection.
//!
//! The store owns all durable state and all concurrency control
//! (last-write-wins); this application never holds a copy of a document
//! beyond a single request.

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::domain::search::VehicleFilter;
use crate::domain::{CatalogueEntry, Error, Vehicle, VehicleId, VehicleUpdate};

/// Errors raised by vehicle store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VehicleStoreError {
    /// Store connection could not be established.
    #[error("vehicle store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("vehicle store query failed: {message}")]
    Query { message: String },
    /// The addressed document does not exist.
    #[error("vehicle {id} was not found")]
    NotFound { id: String },
}

impl VehicleStoreError {
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

    pub fn not_found(id: &VehicleId) -> Self {
        Self::NotFound {
            id: id.to_string(),
        }
    }
}

impl From<VehicleStoreError> for Error {
    fn from(value: VehicleStoreError) -> Self {
        match value {
            VehicleStoreError::Connection { .. } => Self::service_unavailable(value.to_string()),
            VehicleStoreError::Query { .. } => Self::internal(value.to_string()),
            VehicleStoreError::NotFound { .. } => Self::not_found(value.to_string()),
        }
    }
}

/// Result stream yielded by [`VehicleStore::stream`].
pub type VehicleStream = BoxStream<'static, Result<CatalogueEntry, VehicleStoreError>>;

/// Port for the vehicle document collection.
///
/// Iteration order of [`VehicleStore::stream`] is whatever the backing store
/// yields; callers must not rely on it being stable across calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Fetch a document by identifier.
    async fn get(&self, id: &VehicleId) -> Result<Option<Vehicle>, VehicleStoreError>;

    /// Persist a new document and return the store-assigned identifier.
    async fn create(&self, vehicle: &Vehicle) -> Result<VehicleId, VehicleStoreError>;

    /// Write the descriptive attributes of an existing document, leaving
    /// other fields (the review list) untouched.
    ///
    /// Fails with [`VehicleStoreError::NotFound`] when the identifier does
    /// not resolve.
    async fn update(&self, id: &VehicleId, update: &VehicleUpdate)
    -> Result<(), VehicleStoreError>;

    /// Remove a document.
    ///
    /// Fails with [`VehicleStoreError::NotFound`] when the identifier does
    /// not resolve.
    async fn delete(&self, id: &VehicleId) -> Result<(), VehicleStoreError>;

    /// Stream the collection through a filter.
    async fn stream(&self, filter: &VehicleFilter) -> Result<VehicleStream, VehicleStoreError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(VehicleStoreError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(VehicleStoreError::query("bad filter"), ErrorCode::InternalError)]
    #[case(
        VehicleStoreError::NotFound { id: "ev-1".to_owned() },
        ErrorCode::NotFound
    )]
    fn store_errors_map_to_domain_codes(
        #[case] store_error: VehicleStoreError,
        #[case] expected: ErrorCode,
    ) {
        let err = Error::from(store_error);
        assert_eq!(err.code(), expected);
    }
}
