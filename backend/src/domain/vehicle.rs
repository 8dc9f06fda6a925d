//! Electric vehicle data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors returned by [`VehicleId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleValidationError {
    EmptyId,
    InvalidId,
}

impl fmt::Display for VehicleValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "vehicle id must not be empty"),
            Self::InvalidId => write!(f, "vehicle id must not contain surrounding whitespace"),
        }
    }
}

impl std::error::Error for VehicleValidationError {}

/// Opaque store-assigned vehicle identifier.
///
/// The backing store mints identifiers; this type only guards against values
/// that cannot have come from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VehicleId(String);

impl VehicleId {
    /// Validate and construct a [`VehicleId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, VehicleValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    fn from_owned(id: String) -> Result<Self, VehicleValidationError> {
        if id.is_empty() {
            return Err(VehicleValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(VehicleValidationError::InvalidId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for VehicleId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<VehicleId> for String {
    fn from(value: VehicleId) -> Self {
        value.0
    }
}

impl TryFrom<String> for VehicleId {
    type Error = VehicleValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Catalogued electric vehicle.
///
/// ## Invariants
/// - Numeric fields are coerced at the HTTP boundary; a persisted document
///   never holds a textual year or battery size.
/// - `review_list` is always empty at creation and ordered thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[schema(example = "Model 3")]
    pub name: String,
    #[schema(example = "Tesla")]
    pub manufacturer: String,
    #[schema(example = 2023)]
    pub year: i32,
    /// Battery capacity in kWh.
    #[schema(example = 75)]
    pub battery_size: i32,
    /// WLTP range in km.
    #[schema(example = 500)]
    pub wltp_range: i32,
    #[schema(example = 40000.0)]
    pub cost: f64,
    /// Motor power in kW.
    #[schema(example = 283.0)]
    pub power: f64,
    pub review_list: Vec<String>,
}

impl Vehicle {
    /// Construct a vehicle as the add flow does: all attributes supplied,
    /// review list empty.
    pub fn new(
        name: impl Into<String>,
        manufacturer: impl Into<String>,
        year: i32,
        battery_size: i32,
        wltp_range: i32,
        cost: f64,
        power: f64,
    ) -> Self {
        Self {
            name: name.into(),
            manufacturer: manufacturer.into(),
            year,
            battery_size,
            wltp_range,
            cost,
            power,
            review_list: Vec::new(),
        }
    }
}

/// Attribute set written by the edit flow.
///
/// Deliberately excludes `review_list`: edits replace the descriptive
/// attributes and leave accumulated reviews in place.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleUpdate {
    pub name: String,
    pub manufacturer: String,
    pub year: i32,
    pub battery_size: i32,
    pub wltp_range: i32,
    pub cost: f64,
    pub power: f64,
}

impl Vehicle {
    /// Apply an attribute update in place, preserving the review list.
    pub fn apply(&mut self, update: &VehicleUpdate) {
        self.name = update.name.clone();
        self.manufacturer = update.manufacturer.clone();
        self.year = update.year;
        self.battery_size = update.battery_size;
        self.wltp_range = update.wltp_range;
        self.cost = update.cost;
        self.power = update.power;
    }
}

impl From<VehicleUpdate> for Vehicle {
    /// Creation is an update applied to a blank record: same attributes, an
    /// empty review list.
    fn from(update: VehicleUpdate) -> Self {
        Self {
            name: update.name,
            manufacturer: update.manufacturer,
            year: update.year,
            battery_size: update.battery_size,
            wltp_range: update.wltp_range,
            cost: update.cost,
            power: update.power,
            review_list: Vec::new(),
        }
    }
}

/// A vehicle paired with its store identifier, as yielded by collection
/// streams and used for side-by-side presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogueEntry {
    pub id: VehicleId,
    pub vehicle: Vehicle,
}
