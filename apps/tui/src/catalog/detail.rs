use std::sync::Arc;

use tracing::debug;

use crate::domain::CanonicalRecipe;
use crate::error::CatalogError;
use crate::source::RemoteRecipeSource;

/// Materializes full detail for a selected recipe before display.
#[derive(Debug)]
pub struct DetailResolver<R> {
    remote: Arc<R>,
}

impl<R> Clone for DetailResolver<R> {
    fn clone(&self) -> Self {
        Self {
            remote: Arc::clone(&self.remote),
        }
    }
}

impl<R: RemoteRecipeSource> DetailResolver<R> {
    pub const fn new(remote: Arc<R>) -> Self {
        Self { remote }
    }

    /// Returns the record unchanged when it already carries detail; otherwise
    /// looks the id up and merges the result.
    pub async fn resolve(&self, recipe: CanonicalRecipe) -> Result<CanonicalRecipe, CatalogError> {
        if recipe.is_fully_detailed() {
            return Ok(recipe);
        }

        debug!(id = %recipe.id, "looking up recipe detail");
        let detail = self
            .remote
            .lookup(&recipe.id)
            .await?
            .ok_or_else(|| CatalogError::DetailNotFound {
                id: recipe.id.clone(),
            })?;

        Ok(merge_detail(recipe, detail))
    }

    /// Direct lookup for an id that is not in hand as a listing.
    pub async fn resolve_id(&self, id: &str) -> Result<CanonicalRecipe, CatalogError> {
        self.remote
            .lookup(id)
            .await?
            .ok_or_else(|| CatalogError::DetailNotFound { id: id.to_string() })
    }
}

/// Listing fields win where present; detail fills what the listing lacked.
fn merge_detail(listing: CanonicalRecipe, detail: CanonicalRecipe) -> CanonicalRecipe {
    let prefer = |listed: String, full: String| if listed.is_empty() { full } else { listed };

    CanonicalRecipe {
        id: listing.id,
        name: listing.name,
        thumbnail_url: prefer(listing.thumbnail_url, detail.thumbnail_url),
        region: prefer(listing.region, detail.region),
        category: prefer(listing.category, detail.category),
        instructions: detail.instructions,
        ingredients: detail.ingredients,
        source: listing.source,
    }
}
