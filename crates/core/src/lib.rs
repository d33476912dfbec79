//! Domain logic for the MyTrip tourism service.
//!
//! Everything here is pure: category code tables, the projected-grid to
//! latitude/longitude transform, list sorting, pagination windows, and the
//! ranking/summary half of the statistics aggregator. Network and database
//! access live in `mytrip-tourapi` and `mytrip-db`.

pub mod codes;
pub mod error;
pub mod geo;
pub mod pagination;
pub mod place;
pub mod sorting;
pub mod stats;
pub mod types;
