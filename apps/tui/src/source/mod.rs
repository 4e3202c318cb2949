// Recipe sources consumed by the catalog: the remote API and the local dataset

pub mod local;
pub mod mealdb;

use std::future::Future;

use crate::domain::CanonicalRecipe;
use crate::error::CatalogError;

pub use local::{load_local_recipes, parse_local_recipes, LocalRecipe};
pub use mealdb::MealDbClient;

/// Listing query accepted by the remote source. `All` is the startup batch;
/// `Term` is the API's own name search, reached through `--remote-search`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteFilter {
    All,
    Area(String),
    Term(String),
}

/// Remote recipe API. Listings carry partial detail; `lookup` returns the full record.
pub trait RemoteRecipeSource: Send + Sync {
    fn list_areas(&self) -> impl Future<Output = Result<Vec<String>, CatalogError>> + Send;

    fn list_recipes(
        &self,
        filter: &RemoteFilter,
    ) -> impl Future<Output = Result<Vec<CanonicalRecipe>, CatalogError>> + Send;

    fn lookup(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<CanonicalRecipe>, CatalogError>> + Send;
}
