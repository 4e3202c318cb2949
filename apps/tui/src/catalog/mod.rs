// Catalog engine: normalization, merged store, area vocabulary, queries and detail

pub mod areas;
pub mod detail;
pub mod normalize;
pub mod query;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

pub use areas::AreaCatalog;
pub use detail::DetailResolver;
pub use normalize::{normalize, normalize_all};
pub use query::{AreaSelection, Listing, QueryEngine, QueryTicket, RequestSequencer};
pub use store::CatalogStore;

use crate::domain::CanonicalRecipe;
use crate::error::CatalogError;
use crate::source::{load_local_recipes, LocalRecipe, RemoteFilter, RemoteRecipeSource};

/// Everything the render surface needs for one run: the query engine over the
/// merged store, the detail resolver and the area vocabulary.
#[derive(Debug)]
pub struct Session<R> {
    pub engine: QueryEngine<R>,
    pub resolver: DetailResolver<R>,
    pub areas: AreaCatalog,
    /// Degraded startup steps, for the status line.
    pub warnings: Vec<String>,
}

impl<R: RemoteRecipeSource> Session<R> {
    /// Loads the local dataset, the initial remote batch and the remote area
    /// list concurrently. None of the three failing aborts startup.
    pub async fn start(remote: Arc<R>, local_location: &str, timeout: Duration) -> Self {
        let all = RemoteFilter::All;
        let (local, batch, areas) = tokio::join!(
            load_local_recipes(local_location, timeout),
            remote.list_recipes(&all),
            remote.list_areas(),
        );

        Self::assemble(remote, local, batch, areas)
    }

    pub fn assemble(
        remote: Arc<R>,
        local: Result<Vec<LocalRecipe>, CatalogError>,
        batch: Result<Vec<CanonicalRecipe>, CatalogError>,
        areas: Result<Vec<String>, CatalogError>,
    ) -> Self {
        let mut warnings = Vec::new();

        let local = match local {
            Ok(records) => normalize_all(&records),
            Err(err) => {
                warn!(error = %err, "continuing without local recipes");
                warnings.push(err.to_string());
                Vec::new()
            }
        };

        let batch = batch.unwrap_or_else(|err| {
            warn!(error = %err, "continuing without the initial remote batch");
            warnings.push(err.to_string());
            Vec::new()
        });

        let areas = match areas {
            Ok(labels) => AreaCatalog::build(labels),
            Err(err) => {
                warn!(error = %err, "remote area list unavailable");
                warnings.push(err.to_string());
                AreaCatalog::reserved_only()
            }
        };

        let store = CatalogStore::build(local, batch);
        info!(
            local = store.local_count(),
            remote = store.remote_count(),
            areas = areas.len(),
            "catalog ready"
        );

        Self {
            engine: QueryEngine::new(store, Arc::clone(&remote)),
            resolver: DetailResolver::new(remote),
            areas,
            warnings,
        }
    }

    pub const fn store(&self) -> &CatalogStore {
        self.engine.store()
    }

    pub fn summary(&self) -> String {
        let store = self.store();
        format!(
            "Loaded {} local and {} MealDB recipes",
            store.local_count(),
            store.remote_count()
        )
    }
}
