use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::store::CatalogStore;
use crate::domain::{CanonicalRecipe, RESERVED_AREA};
use crate::error::CatalogError;
use crate::source::{RemoteFilter, RemoteRecipeSource};

/// The area picker's current value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AreaSelection {
    #[default]
    All,
    Reserved,
    Remote(String),
}

impl AreaSelection {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "" => Self::All,
            RESERVED_AREA => Self::Reserved,
            other => Self::Remote(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => "",
            Self::Reserved => RESERVED_AREA,
            Self::Remote(label) => label,
        }
    }
}

/// A result set handed to the render surface. A failed query is an empty
/// listing carrying the error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Listing {
    pub recipes: Vec<CanonicalRecipe>,
    pub error: Option<String>,
}

impl Listing {
    pub const fn ok(recipes: Vec<CanonicalRecipe>) -> Self {
        Self {
            recipes,
            error: None,
        }
    }

    pub fn failed(err: &CatalogError) -> Self {
        Self {
            recipes: Vec::new(),
            error: Some(err.to_string()),
        }
    }

    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Identifies one query in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTicket(u64);

/// Hands out tickets so a response that arrives after a newer query was issued
/// can be recognised and dropped.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn issue(&mut self) -> QueryTicket {
        self.latest += 1;
        QueryTicket(self.latest)
    }

    pub const fn is_current(&self, ticket: QueryTicket) -> bool {
        ticket.0 == self.latest
    }
}

/// Answers area and search queries against the session store, going to the
/// remote source only for a non-reserved area selection.
#[derive(Debug)]
pub struct QueryEngine<R> {
    store: CatalogStore,
    remote: Arc<R>,
}

impl<R> Clone for QueryEngine<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            remote: Arc::clone(&self.remote),
        }
    }
}

impl<R: RemoteRecipeSource> QueryEngine<R> {
    pub const fn new(store: CatalogStore, remote: Arc<R>) -> Self {
        Self { store, remote }
    }

    pub const fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// The part of the area-change semantics the store can answer on its own.
    /// `None` means the selection needs a live remote fetch.
    pub fn select_cached(&self, selection: &AreaSelection) -> Option<Vec<CanonicalRecipe>> {
        match selection {
            AreaSelection::All => Some(self.store.all().to_vec()),
            AreaSelection::Reserved => Some(self.store.by_region(RESERVED_AREA).cloned().collect()),
            AreaSelection::Remote(_) => None,
        }
    }

    /// Area-change semantics. Only `Remote` suspends on the network.
    pub async fn select_area(
        &self,
        selection: &AreaSelection,
    ) -> Result<Vec<CanonicalRecipe>, CatalogError> {
        if let Some(recipes) = self.select_cached(selection) {
            return Ok(recipes);
        }

        let area = selection.label().to_string();
        debug!(%area, "fetching area listing from remote");
        self.remote.list_recipes(&RemoteFilter::Area(area)).await
    }

    /// [`Self::select_area`] with transport failures folded into the listing.
    pub async fn area_listing(&self, selection: &AreaSelection) -> Listing {
        match self.select_area(selection).await {
            Ok(recipes) => Listing::ok(recipes),
            Err(err) => {
                warn!(area = selection.label(), error = %err, "area query failed");
                Listing::failed(&err)
            }
        }
    }

    /// Name search delegated to the remote API. The search box never uses this;
    /// it backs the headless `--remote-search` query.
    pub async fn remote_search(&self, term: &str) -> Listing {
        debug!(term, "searching remote by name");
        match self
            .remote
            .list_recipes(&RemoteFilter::Term(term.to_string()))
            .await
        {
            Ok(recipes) => Listing::ok(recipes),
            Err(err) => {
                warn!(term, error = %err, "remote search failed");
                Listing::failed(&err)
            }
        }
    }

    /// Search-box semantics. Never touches the network: an empty term falls back
    /// to the area selection evaluated against the store.
    pub fn search(&self, term: &str, selection: &AreaSelection) -> Vec<CanonicalRecipe> {
        if term.is_empty() {
            return self.select_cached(selection).unwrap_or_else(|| {
                self.store
                    .by_region(selection.label())
                    .cloned()
                    .collect()
            });
        }

        let needle = term.to_lowercase();
        self.store
            .all()
            .iter()
            .filter(|recipe| recipe.matches_term(&needle))
            .cloned()
            .collect()
    }
}
