use recipe_browser::catalog::{
    AreaSelection, DetailResolver, Listing, QueryEngine, QueryTicket,
};
use recipe_browser::source::RemoteRecipeSource;
use recipe_browser::CanonicalRecipe;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// What the detail popup shows once resolution finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    Ready(CanonicalRecipe),
    /// Lookup failed or found nothing; rendered as an empty detail view.
    Unavailable { name: String, message: String },
}

/// Results delivered back to the event loop by background queries.
#[derive(Debug)]
pub enum AppEvent {
    Listing {
        ticket: QueryTicket,
        listing: Listing,
    },
    Detail {
        ticket: QueryTicket,
        view: DetailView,
    },
}

/// Runs a remote area query off the event loop.
pub fn spawn_area_listing<R>(
    engine: QueryEngine<R>,
    selection: AreaSelection,
    ticket: QueryTicket,
    events: UnboundedSender<AppEvent>,
) where
    R: RemoteRecipeSource + 'static,
{
    tokio::spawn(async move {
        let listing = engine.area_listing(&selection).await;
        if events.send(AppEvent::Listing { ticket, listing }).is_err() {
            debug!("event loop gone; dropping area listing");
        }
    });
}

/// Resolves detail for the selected recipe off the event loop.
pub fn spawn_detail<R>(
    resolver: DetailResolver<R>,
    recipe: CanonicalRecipe,
    ticket: QueryTicket,
    events: UnboundedSender<AppEvent>,
) where
    R: RemoteRecipeSource + 'static,
{
    tokio::spawn(async move {
        let name = recipe.name.clone();
        let view = match resolver.resolve(recipe).await {
            Ok(resolved) => DetailView::Ready(resolved),
            Err(err) => DetailView::Unavailable {
                name,
                message: err.to_string(),
            },
        };
        if events.send(AppEvent::Detail { ticket, view }).is_err() {
            debug!("event loop gone; dropping recipe detail");
        }
    });
}
