use std::sync::Arc;

use crate::domain::{CanonicalRecipe, SourceKind, RESERVED_AREA};

/// The merged session catalog. Built once at startup and read-only afterwards;
/// clones share the same backing slice.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    recipes: Arc<[CanonicalRecipe]>,
    local_count: usize,
}

impl CatalogStore {
    /// Local records first, then the initial remote batch, each in its own order.
    pub fn build(local: Vec<CanonicalRecipe>, remote: Vec<CanonicalRecipe>) -> Self {
        let local_count = local.len();
        let recipes: Vec<CanonicalRecipe> = local.into_iter().chain(remote).collect();

        Self {
            recipes: recipes.into(),
            local_count,
        }
    }

    pub fn all(&self) -> &[CanonicalRecipe] {
        &self.recipes
    }

    /// Ordered subsequence with the given region. The reserved area is owned by
    /// the local dataset, so remote rows that report it are not included.
    pub fn by_region<'a>(
        &'a self,
        label: &'a str,
    ) -> impl Iterator<Item = &'a CanonicalRecipe> + 'a {
        let local_only = label == RESERVED_AREA;
        self.recipes.iter().filter(move |recipe| {
            recipe.region == label && (!local_only || recipe.source == SourceKind::Local)
        })
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub const fn local_count(&self) -> usize {
        self.local_count
    }

    pub fn remote_count(&self) -> usize {
        self.recipes.len() - self.local_count
    }
}
