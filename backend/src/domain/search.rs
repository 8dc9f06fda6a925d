//! Attribute search over the vehicle collection.
//!
//! Translates the search form into a store filter. Only a closed set of
//! vehicle attributes may be filtered on; unknown names are rejected at this
//! boundary instead of being forwarded to the store.

use std::fmt;
use std::str::FromStr;

use crate::domain::Vehicle;

/// Attributes the search form may filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterableField {
    Name,
    Manufacturer,
    Year,
    BatterySize,
    WltpRange,
    Cost,
    Power,
}

impl FilterableField {
    /// Wire name of the attribute as submitted by the search form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Manufacturer => "manufacturer",
            Self::Year => "year",
            Self::BatterySize => "battery_size",
            Self::WltpRange => "wltp_range",
            Self::Cost => "cost",
            Self::Power => "power",
        }
    }

    fn value_of(self, vehicle: &Vehicle) -> FieldValue<'_> {
        match self {
            Self::Name => FieldValue::Text(vehicle.name.as_str()),
            Self::Manufacturer => FieldValue::Text(vehicle.manufacturer.as_str()),
            Self::Year => FieldValue::Int(i64::from(vehicle.year)),
            Self::BatterySize => FieldValue::Int(i64::from(vehicle.battery_size)),
            Self::WltpRange => FieldValue::Int(i64::from(vehicle.wltp_range)),
            Self::Cost => FieldValue::Float(vehicle.cost),
            Self::Power => FieldValue::Float(vehicle.power),
        }
    }
}

impl fmt::Display for FilterableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterableField {
    type Err = SearchValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "manufacturer" => Ok(Self::Manufacturer),
            "year" => Ok(Self::Year),
            "battery_size" => Ok(Self::BatterySize),
            "wltp_range" => Ok(Self::WltpRange),
            "cost" => Ok(Self::Cost),
            "power" => Ok(Self::Power),
            other => Err(SearchValidationError::UnknownAttribute {
                attribute: other.to_owned(),
            }),
        }
    }
}

/// One typed attribute value, used when evaluating filters.
enum FieldValue<'a> {
    Text(&'a str),
    Int(i64),
    Float(f64),
}

/// Which end of a range a malformed bound belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    Min,
    Max,
}

impl RangeBound {
    /// Wire name of the form field carrying this bound.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Min => "min_value",
            Self::Max => "max_value",
        }
    }
}

/// Validation errors raised while building a filter from form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchValidationError {
    UnknownAttribute { attribute: String },
    InvalidBound { bound: RangeBound, value: String },
}

impl fmt::Display for SearchValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAttribute { attribute } => {
                write!(f, "{attribute:?} is not a filterable attribute")
            }
            Self::InvalidBound { bound, value } => {
                write!(f, "{} must be an integer, got {value:?}", bound.field_name())
            }
        }
    }
}

impl std::error::Error for SearchValidationError {}

/// Filter applied to the vehicle collection stream.
///
/// Selection precedence mirrors the search form: an equality value wins over
/// a range, and a range applies only when both bounds are supplied.
#[derive(Debug, Clone, PartialEq)]
pub enum VehicleFilter {
    /// No filter; the full collection streams back.
    Unfiltered,
    /// Exact match of a text value against one attribute.
    Exact {
        field: FilterableField,
        value: String,
    },
    /// Closed interval `min <= attribute <= max`.
    Range {
        field: FilterableField,
        min: i64,
        max: i64,
    },
}

impl VehicleFilter {
    /// Build a filter from raw search form fields.
    ///
    /// A value or bound counts as present only when the field was submitted
    /// and is non-empty after trimming; absent bounds are never a parse
    /// error. The attribute name is only validated when a filter will
    /// actually be applied, matching the unfiltered form submission where it
    /// is irrelevant.
    pub fn from_form(
        attribute: &str,
        text_value: Option<&str>,
        min_value: Option<&str>,
        max_value: Option<&str>,
    ) -> Result<Self, SearchValidationError> {
        if let Some(value) = present(text_value) {
            let field = attribute.parse()?;
            return Ok(Self::Exact {
                field,
                value: value.to_owned(),
            });
        }

        match (present(min_value), present(max_value)) {
            (Some(min), Some(max)) => {
                let field = attribute.parse()?;
                Ok(Self::Range {
                    field,
                    min: parse_bound(min, RangeBound::Min)?,
                    max: parse_bound(max, RangeBound::Max)?,
                })
            }
            _ => Ok(Self::Unfiltered),
        }
    }

    /// Evaluate the filter against one vehicle, using the store's comparison
    /// semantics: values of mismatched types never match.
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        match self {
            Self::Unfiltered => true,
            Self::Exact { field, value } => match field.value_of(vehicle) {
                FieldValue::Text(text) => text == value,
                FieldValue::Int(_) | FieldValue::Float(_) => false,
            },
            Self::Range { field, min, max } => match field.value_of(vehicle) {
                FieldValue::Int(number) => *min <= number && number <= *max,
                #[expect(clippy::cast_precision_loss, reason = "form bounds are small integers")]
                FieldValue::Float(number) => *min as f64 <= number && number <= *max as f64,
                FieldValue::Text(_) => false,
            },
        }
    }
}

/// Presence rule shared by the text value and both range bounds.
fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

fn parse_bound(raw: &str, bound: RangeBound) -> Result<i64, SearchValidationError> {
    raw.parse()
        .map_err(|_| SearchValidationError::InvalidBound {
            bound,
            value: raw.to_owned(),
        })
}
