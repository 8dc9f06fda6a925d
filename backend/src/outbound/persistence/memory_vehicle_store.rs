//! In-memory vehicle store adapter.
//!
//! Backs the store port for development and tests. Semantics mirror the
//! hosted document store: opaque minted identifiers, filter evaluation on
//! the server side, and no iteration-order guarantee.

use std::collections::HashMap;

use async_trait::async_trait;
use futures_util::StreamExt;
use futures_util::stream;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::ports::{VehicleStore, VehicleStoreError, VehicleStream};
use crate::domain::search::VehicleFilter;
use crate::domain::{CatalogueEntry, Vehicle, VehicleId, VehicleUpdate};

/// Vehicle collection held in process memory.
#[derive(Debug, Default)]
pub struct MemoryVehicleStore {
    documents: RwLock<HashMap<VehicleId, Vehicle>>,
}

impl MemoryVehicleStore {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    fn mint_id() -> Result<VehicleId, VehicleStoreError> {
        VehicleId::new(Uuid::new_v4().to_string())
            .map_err(|error| VehicleStoreError::query(error.to_string()))
    }
}

#[async_trait]
impl VehicleStore for MemoryVehicleStore {
    async fn get(&self, id: &VehicleId) -> Result<Option<Vehicle>, VehicleStoreError> {
        Ok(self.documents.read().await.get(id).cloned())
    }

    async fn create(&self, vehicle: &Vehicle) -> Result<VehicleId, VehicleStoreError> {
        let id = Self::mint_id()?;
        self.documents
            .write()
            .await
            .insert(id.clone(), vehicle.clone());
        Ok(id)
    }

    async fn update(
        &self,
        id: &VehicleId,
        update: &VehicleUpdate,
    ) -> Result<(), VehicleStoreError> {
        let mut documents = self.documents.write().await;
        match documents.get_mut(id) {
            Some(stored) => {
                stored.apply(update);
                Ok(())
            }
            None => Err(VehicleStoreError::not_found(id)),
        }
    }

    async fn delete(&self, id: &VehicleId) -> Result<(), VehicleStoreError> {
        self.documents
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| VehicleStoreError::not_found(id))
    }

    async fn stream(&self, filter: &VehicleFilter) -> Result<VehicleStream, VehicleStoreError> {
        // Snapshot under the read lock; the stream itself owns the matches.
        let entries: Vec<CatalogueEntry> = self
            .documents
            .read()
            .await
            .iter()
            .filter(|(_, vehicle)| filter.matches(vehicle))
            .map(|(id, vehicle)| CatalogueEntry {
                id: id.clone(),
                vehicle: vehicle.clone(),
            })
            .collect();

        Ok(stream::iter(entries.into_iter().map(Ok)).boxed())
    }
}
