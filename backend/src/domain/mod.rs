//! Domain primitives, services, and ports.
//!
//! Purpose: define strongly typed entities for the catalogue and the three
//! domain services (session resolution, profile creation, comparison), plus
//! the ports behind which the document store and identity verifier live.

pub mod compare;
pub mod error;
pub mod ports;
pub mod profile;
pub mod search;
pub mod session;
pub mod user;
pub mod vehicle;

pub use self::compare::{Comparator, CompareError, VehicleComparison};
pub use self::error::{Error, ErrorCode};
pub use self::profile::ProfileService;
pub use self::search::{FilterableField, SearchValidationError, VehicleFilter};
pub use self::session::SessionResolver;
pub use self::user::{DEFAULT_DISPLAY_NAME, SubjectId, SubjectValidationError, UserProfile};
pub use self::vehicle::{
    CatalogueEntry, Vehicle, VehicleId, VehicleUpdate, VehicleValidationError,
};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
