use crate::app::actions::{spawn_area_listing, spawn_detail, AppEvent, DetailView};
use recipe_browser::catalog::{AreaSelection, Listing, RequestSequencer, Session};
use recipe_browser::source::RemoteRecipeSource;
use recipe_browser::CanonicalRecipe;
use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::debug;

pub const ALL_AREAS_LABEL: &str = "All cuisines";

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AppScreen {
    Browse,
    Detail,
}

pub struct App<R> {
    pub running: bool,
    pub screen: AppScreen,
    pub show_help: bool,
    pub session: Session<R>,
    pub listing: Listing,
    pub selected_index: usize,
    /// 0 is "All cuisines"; `n` is the `n - 1`th entry of the area catalog.
    pub area_index: usize,
    pub search_query: String,
    pub search_active: bool,
    pub status_message: String,
    pub loading: bool,
    pub throbber: ThrobberState,
    pub detail: Option<DetailView>,
    pub detail_scroll: u16,
    listing_requests: RequestSequencer,
    detail_requests: RequestSequencer,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
}

impl<R> App<R> {
    pub fn area_count(&self) -> usize {
        self.session.areas.len() + 1
    }

    pub fn area_label(&self) -> &str {
        match self.area_index {
            0 => ALL_AREAS_LABEL,
            index => self.session.areas.get(index - 1).unwrap_or(ALL_AREAS_LABEL),
        }
    }

    pub fn selected_area(&self) -> AreaSelection {
        match self.area_index {
            0 => AreaSelection::All,
            index => self
                .session
                .areas
                .get(index - 1)
                .map_or(AreaSelection::All, AreaSelection::from_label),
        }
    }

    pub fn recipes(&self) -> &[CanonicalRecipe] {
        &self.listing.recipes
    }

    pub fn selected_recipe(&self) -> Option<&CanonicalRecipe> {
        self.listing.recipes.get(self.selected_index)
    }

    pub fn tick(&mut self) {
        if self.loading {
            self.throbber.calc_next();
        }
    }
}

impl<R: RemoteRecipeSource + 'static> App<R> {
    pub fn new(session: Session<R>) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        let listing = Listing::ok(session.store().all().to_vec());
        let status_message = if session.warnings.is_empty() {
            session.summary()
        } else {
            format!("{} ({})", session.summary(), session.warnings.join("; "))
        };

        Self {
            running: true,
            screen: AppScreen::Browse,
            show_help: false,
            session,
            listing,
            selected_index: 0,
            area_index: 0,
            search_query: String::new(),
            search_active: false,
            status_message,
            loading: false,
            throbber: ThrobberState::default(),
            detail: None,
            detail_scroll: 0,
            listing_requests: RequestSequencer::default(),
            detail_requests: RequestSequencer::default(),
            events_tx,
            events_rx,
        }
    }

    pub fn set_area_index(&mut self, index: usize) {
        self.area_index = index % self.area_count();
        self.apply_area_selection();
    }

    /// Area-change event. Store-backed selections update immediately; a remote
    /// area is fetched in the background and shows a loading indicator.
    pub fn apply_area_selection(&mut self) {
        let selection = self.selected_area();
        let ticket = self.listing_requests.issue();

        if let Some(recipes) = self.session.engine.select_cached(&selection) {
            self.loading = false;
            self.show_listing(Listing::ok(recipes));
            return;
        }

        self.loading = true;
        self.status_message = format!("Loading {} recipes...", selection.label());
        spawn_area_listing(
            self.session.engine.clone(),
            selection,
            ticket,
            self.events_tx.clone(),
        );
    }

    /// Search-input event. Always answered from the store; it also supersedes
    /// any area fetch still in flight.
    pub fn apply_search(&mut self) {
        self.listing_requests.issue();
        self.loading = false;
        let recipes = self
            .session
            .engine
            .search(&self.search_query, &self.selected_area());
        self.show_listing(Listing::ok(recipes));
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.search_active = false;
        self.apply_search();
    }

    /// Opens the detail popup for the highlighted recipe, resolving it first
    /// when the listing does not carry full detail.
    pub fn open_selected(&mut self) {
        let Some(recipe) = self.selected_recipe().cloned() else {
            return;
        };
        let ticket = self.detail_requests.issue();

        if recipe.is_fully_detailed() {
            self.show_detail(DetailView::Ready(recipe));
            return;
        }

        self.loading = true;
        self.status_message = format!("Loading {}...", recipe.name);
        spawn_detail(
            self.session.resolver.clone(),
            recipe,
            ticket,
            self.events_tx.clone(),
        );
    }

    pub fn close_detail(&mut self) {
        self.detail_requests.issue();
        self.detail = None;
        self.detail_scroll = 0;
        self.screen = AppScreen::Browse;
    }

    /// Applies every background result that has arrived since the last frame.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
    }

    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.events_rx.recv().await
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Listing { ticket, listing } => {
                if !self.listing_requests.is_current(ticket) {
                    debug!("discarding stale area listing");
                    return;
                }
                self.loading = false;
                self.show_listing(listing);
            }
            AppEvent::Detail { ticket, view } => {
                if !self.detail_requests.is_current(ticket) {
                    debug!("discarding stale recipe detail");
                    return;
                }
                self.loading = false;
                self.show_detail(view);
            }
        }
    }

    fn show_listing(&mut self, listing: Listing) {
        self.status_message = listing.error.as_ref().map_or_else(
            || format!("{} recipes", listing.recipes.len()),
            |err| format!("Error: {err}"),
        );
        self.listing = listing;
        self.selected_index = 0;
    }

    fn show_detail(&mut self, view: DetailView) {
        if let DetailView::Unavailable { message, .. } = &view {
            self.status_message = format!("Error: {message}");
        } else {
            self.status_message.clear();
        }
        self.detail = Some(view);
        self.detail_scroll = 0;
        self.screen = AppScreen::Detail;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_browser::catalog::AreaCatalog;
    use recipe_browser::source::{LocalRecipe, RemoteFilter};
    use recipe_browser::{CatalogError, Ingredients, SourceKind, RESERVED_AREA};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeRemote {
        calls: AtomicUsize,
        fail_areas: bool,
        fail_lookups: bool,
    }

    impl RemoteRecipeSource for FakeRemote {
        async fn list_areas(&self) -> Result<Vec<String>, CatalogError> {
            Ok(vec!["Italian".to_string(), "Indian".to_string()])
        }

        async fn list_recipes(
            &self,
            filter: &RemoteFilter,
        ) -> Result<Vec<CanonicalRecipe>, CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_areas {
                return Err(CatalogError::Transport {
                    url: "filter.php".to_string(),
                    reason: "timed out".to_string(),
                });
            }
            let area = match filter {
                RemoteFilter::Area(area) => area.clone(),
                RemoteFilter::All | RemoteFilter::Term(_) => "Italian".to_string(),
            };
            Ok(vec![listing("R9", "Live Lasagne", &area)])
        }

        async fn lookup(&self, id: &str) -> Result<Option<CanonicalRecipe>, CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_lookups {
                return Err(CatalogError::Transport {
                    url: format!("lookup.php?i={id}"),
                    reason: "connection reset".to_string(),
                });
            }
            Ok((id == "R1").then(|| CanonicalRecipe {
                instructions: Some("Whisk eggs into hot pasta.".to_string()),
                category: "Pasta".to_string(),
                ..listing("R1", "Carbonara", "Italian")
            }))
        }
    }

    fn listing(id: &str, name: &str, area: &str) -> CanonicalRecipe {
        CanonicalRecipe {
            id: id.to_string(),
            name: name.to_string(),
            thumbnail_url: String::new(),
            region: area.to_string(),
            category: String::new(),
            instructions: None,
            ingredients: Ingredients::Absent,
            source: SourceKind::Remote,
        }
    }

    fn test_app(remote: FakeRemote) -> (App<FakeRemote>, Arc<FakeRemote>) {
        let remote = Arc::new(remote);
        let dosa = LocalRecipe {
            id: Some("L1".into()),
            name: Some("Dosa".to_string()),
            image: None,
            description: Some("Ferment overnight.".to_string()),
            ingredients: Some(vec!["rice".to_string(), "urad dal".to_string()]),
        };
        let session = Session::assemble(
            Arc::clone(&remote),
            Ok(vec![dosa]),
            Ok(vec![
                listing("R1", "Carbonara", "Italian"),
                listing("R2", "Kedgeree", "British"),
            ]),
            Ok(vec!["Italian".to_string()]),
        );
        (App::new(session), remote)
    }

    fn ids(app: &App<FakeRemote>) -> Vec<&str> {
        app.recipes().iter().map(|recipe| recipe.id.as_str()).collect()
    }

    #[tokio::test]
    async fn starts_with_the_merged_collection() {
        let (app, _remote) = test_app(FakeRemote::default());
        assert_eq!(ids(&app), vec!["L1", "R1", "R2"]);
        assert_eq!(
            app.session.areas,
            AreaCatalog::build(vec!["Indian".to_string(), "Italian".to_string()])
        );
        assert_eq!(app.area_label(), ALL_AREAS_LABEL);
    }

    #[tokio::test]
    async fn reserved_area_filters_locally() {
        let (mut app, remote) = test_app(FakeRemote::default());
        let index = app.session.areas.position(RESERVED_AREA).map_or(0, |i| i + 1);

        app.set_area_index(index);

        assert_eq!(ids(&app), vec!["L1"]);
        assert!(!app.loading);
        assert_eq!(remote.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn remote_area_is_fetched_in_the_background() {
        let (mut app, remote) = test_app(FakeRemote::default());
        let index = app.session.areas.position("Italian").map_or(0, |i| i + 1);

        app.set_area_index(index);
        assert!(app.loading);

        if let Some(event) = app.next_event().await {
            app.handle_event(event);
        }
        assert!(!app.loading);
        assert_eq!(ids(&app), vec!["R9"]);
        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_area_fetch_shows_error_and_empty_listing() {
        let (mut app, _remote) = test_app(FakeRemote {
            fail_areas: true,
            ..FakeRemote::default()
        });
        let index = app.session.areas.position("Italian").map_or(0, |i| i + 1);

        app.set_area_index(index);
        if let Some(event) = app.next_event().await {
            app.handle_event(event);
        }

        assert!(app.recipes().is_empty());
        assert!(app.listing.is_error());
        assert!(app.status_message.starts_with("Error:"));
    }

    #[tokio::test]
    async fn typing_after_an_area_change_discards_the_late_fetch() {
        let (mut app, _remote) = test_app(FakeRemote::default());
        let index = app.session.areas.position("Italian").map_or(0, |i| i + 1);

        app.set_area_index(index);
        app.search_query = "dosa".to_string();
        app.apply_search();

        if let Some(event) = app.next_event().await {
            app.handle_event(event);
        }
        assert_eq!(ids(&app), vec!["L1"]);
    }

    #[tokio::test]
    async fn empty_search_with_remote_area_stays_offline() {
        let (mut app, remote) = test_app(FakeRemote::default());
        app.area_index = app.session.areas.position("Italian").map_or(0, |i| i + 1);

        app.apply_search();

        assert_eq!(ids(&app), vec!["R1"]);
        assert_eq!(remote.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn local_detail_opens_without_lookup() {
        let (mut app, remote) = test_app(FakeRemote::default());
        app.open_selected();

        assert_eq!(app.screen, AppScreen::Detail);
        assert!(matches!(&app.detail, Some(DetailView::Ready(recipe)) if recipe.id == "L1"));
        assert_eq!(remote.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn remote_detail_resolves_then_opens() {
        let (mut app, _remote) = test_app(FakeRemote::default());
        app.selected_index = 1;
        app.open_selected();
        assert_eq!(app.screen, AppScreen::Browse);

        if let Some(event) = app.next_event().await {
            app.handle_event(event);
        }
        assert_eq!(app.screen, AppScreen::Detail);
        assert!(matches!(&app.detail, Some(DetailView::Ready(recipe)) if recipe.category == "Pasta"));
    }

    #[tokio::test]
    async fn missing_detail_opens_placeholder() {
        let (mut app, _remote) = test_app(FakeRemote::default());
        app.selected_index = 2;
        app.open_selected();

        if let Some(event) = app.next_event().await {
            app.handle_event(event);
        }
        assert!(matches!(
            &app.detail,
            Some(DetailView::Unavailable { name, .. }) if name == "Kedgeree"
        ));
    }

    #[tokio::test]
    async fn failed_detail_fetch_opens_placeholder_with_error() {
        let (mut app, remote) = test_app(FakeRemote {
            fail_lookups: true,
            ..FakeRemote::default()
        });
        app.selected_index = 1;
        app.open_selected();

        if let Some(event) = app.next_event().await {
            app.handle_event(event);
        }
        assert!(app.running);
        assert!(!app.loading);
        assert_eq!(app.screen, AppScreen::Detail);
        assert!(matches!(
            &app.detail,
            Some(DetailView::Unavailable { name, message })
                if name == "Carbonara" && message.contains("connection reset")
        ));
        assert!(app.status_message.starts_with("Error:"));
        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn startup_warnings_reach_the_status_line() {
        let session = Session::assemble(
            Arc::new(FakeRemote::default()),
            Ok(Vec::new()),
            Err(CatalogError::Transport {
                url: "search.php".to_string(),
                reason: "timed out".to_string(),
            }),
            Ok(Vec::new()),
        );
        let app = App::new(session);

        assert!(app.status_message.starts_with("Loaded 0 local and 0 MealDB recipes"));
        assert!(app.status_message.contains("timed out"));
        assert!(app.recipes().is_empty());
    }
}
