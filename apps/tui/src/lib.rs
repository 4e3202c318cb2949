// Export the recipe engine for the binary and the integration tests
pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod source;

pub use catalog::{AreaCatalog, AreaSelection, CatalogStore, DetailResolver, Listing, QueryEngine, Session};
pub use domain::{CanonicalRecipe, Ingredients, SourceKind, RESERVED_AREA};
pub use error::CatalogError;
