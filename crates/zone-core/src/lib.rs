//! Catalog core for the zones client: the zone manifest model, ordering and
//! filtering, the entry of the day, and the loaders that fetch the catalog
//! and individual zone documents.

pub mod catalog;
pub mod config;
pub mod daily;
pub mod error;
pub mod loader;
pub mod platform;
pub mod popularity;
pub mod surface;
pub mod template;
pub mod view;
pub mod viewer;

pub use catalog::{Catalog, SortKey, ZoneRecord, SENTINEL_ID};
pub use error::{LoadError, ZoneError};
