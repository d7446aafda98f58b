//! Fuel station catalog.
//!
//! Loads OPIS truckstop pricing data from CSV at startup and serves
//! immutable snapshots to planning requests. The catalog can be
//! refreshed in place when the price file is updated.

mod csv;
mod error;
mod store;

pub use csv::load_stations;
pub use error::CatalogError;
pub use store::StationCatalog;
