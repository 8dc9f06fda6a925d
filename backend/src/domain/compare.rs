//! Side-by-side comparison of two catalogued vehicles.

use std::sync::Arc;

use futures_util::future::try_join;

use crate::domain::ports::{VehicleStore, VehicleStoreError};
use crate::domain::{CatalogueEntry, Error, VehicleId};

/// Errors raised while assembling a comparison.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompareError {
    /// One of the selected identifiers resolves to no document.
    #[error("vehicle {id} was not found, comparison aborted")]
    NotFound { id: String },
    #[error(transparent)]
    Store(#[from] VehicleStoreError),
}

impl From<CompareError> for Error {
    fn from(value: CompareError) -> Self {
        match value {
            CompareError::NotFound { .. } => Self::not_found(value.to_string()),
            CompareError::Store(store_error) => store_error.into(),
        }
    }
}

/// Both sides of a comparison with their full attribute sets.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleComparison {
    pub first: CatalogueEntry,
    pub second: CatalogueEntry,
}

/// Fetches two vehicles and pairs them for side-by-side presentation.
#[derive(Clone)]
pub struct Comparator {
    store: Arc<dyn VehicleStore>,
}

impl Comparator {
    /// Build a comparator over the given store port.
    pub fn new(store: Arc<dyn VehicleStore>) -> Self {
        Self { store }
    }

    /// Fetch both identifiers and pair the results.
    ///
    /// The fetches are side-effect free, so they run concurrently. When
    /// either identifier resolves to no document the whole comparison fails;
    /// there is no partial result.
    pub async fn compare(
        &self,
        first: &VehicleId,
        second: &VehicleId,
    ) -> Result<VehicleComparison, CompareError> {
        let (first_vehicle, second_vehicle) =
            try_join(self.store.get(first), self.store.get(second)).await?;

        let first_vehicle = first_vehicle.ok_or_else(|| CompareError::NotFound {
            id: first.to_string(),
        })?;
        let second_vehicle = second_vehicle.ok_or_else(|| CompareError::NotFound {
            id: second.to_string(),
        })?;

        Ok(VehicleComparison {
            first: CatalogueEntry {
                id: first.clone(),
                vehicle: first_vehicle,
            },
            second: CatalogueEntry {
                id: second.clone(),
                vehicle: second_vehicle,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockVehicleStore;
    use crate::domain::{ErrorCode, Vehicle};
    use mockall::predicate::eq;

    fn id(raw: &str) -> VehicleId {
        VehicleId::new(raw).expect("vehicle id")
    }

    fn model_3() -> Vehicle {
        Vehicle::new("Model 3", "Tesla", 2023, 75, 500, 40_000.0, 283.0)
    }

    fn kona() -> Vehicle {
        Vehicle::new("Kona Electric", "Hyundai", 2022, 64, 484, 35_000.0, 150.0)
    }

    #[tokio::test]
    async fn pairs_both_records_with_identifiers() {
        let mut store = MockVehicleStore::new();
        store
            .expect_get()
            .with(eq(id("ev-1")))
            .return_once(|_| Ok(Some(model_3())));
        store
            .expect_get()
            .with(eq(id("ev-2")))
            .return_once(|_| Ok(Some(kona())));

        let comparator = Comparator::new(Arc::new(store));
        let comparison = comparator
            .compare(&id("ev-1"), &id("ev-2"))
            .await
            .expect("comparison");

        assert_eq!(comparison.first.id, id("ev-1"));
        assert_eq!(comparison.first.vehicle, model_3());
        assert_eq!(comparison.second.id, id("ev-2"));
        assert_eq!(comparison.second.vehicle, kona());
    }

    #[tokio::test]
    async fn missing_side_fails_the_whole_comparison() {
        let mut store = MockVehicleStore::new();
        store
            .expect_get()
            .with(eq(id("ev-1")))
            .return_once(|_| Ok(Some(model_3())));
        store
            .expect_get()
            .with(eq(id("ev-missing")))
            .return_once(|_| Ok(None));

        let comparator = Comparator::new(Arc::new(store));
        let err = comparator
            .compare(&id("ev-1"), &id("ev-missing"))
            .await
            .expect_err("must fail");

        assert_eq!(
            err,
            CompareError::NotFound {
                id: "ev-missing".to_owned(),
            }
        );
        assert_eq!(Error::from(err).code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let mut store = MockVehicleStore::new();
        store
            .expect_get()
            .returning(|_| Err(VehicleStoreError::connection("refused")));

        let comparator = Comparator::new(Arc::new(store));
        let err = comparator
            .compare(&id("ev-1"), &id("ev-2"))
            .await
            .expect_err("must fail");
        assert!(matches!(err, CompareError::Store(_)));
    }
}
