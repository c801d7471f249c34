//! Identifier mapping assets.
//!
//! The upstream feed names lines by their public label ("U4", "49") and
//! stops by an operator-internal numeric id. GTFS-RT needs the GTFS route
//! and stop ids, so a pair of precomputed, versioned lookup tables is built
//! offline from the GTFS dataset and the municipal stop list, and loaded
//! here once at process start.

mod error;
mod store;

pub use error::MappingError;
pub use store::MappingStore;
