use crate::clients::{EntityClient, ReferenceResolver};
use crate::framework::{FetchFailed, Transport};
use crate::lifecycle::ExplorerConfig;
use crate::model::{Character, Collection, Location, Page, Reference};
use crate::view::{
    CharacterDetailView, CharacterListView, DetailView, LocationDetail, LocationDetailView,
    LocationListView, PageRequest, PageWindow, RequestToken, StatusFilter, ViewFilterCriteria,
    ViewId, ViewStatus,
};
use std::fmt;
use tracing::{debug, info, instrument, warn};

/// A screen the explorer can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Characters,
    Locations,
    Character(u32),
    Location(u32),
}

impl Route {
    /// The detail route a reference points at, if it is navigable.
    pub fn from_reference(reference: &Reference) -> Option<Route> {
        match reference.target()? {
            (Collection::Character, id) => Some(Route::Character(id)),
            (Collection::Location, id) => Some(Route::Location(id)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Characters => f.write_str("/"),
            Route::Locations => f.write_str("/location"),
            Route::Character(id) => write!(f, "/character/{id}"),
            Route::Location(id) => write!(f, "/location/{id}"),
        }
    }
}

/// User intents forwarded by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SetQuery(String),
    SetStatusFilter(StatusFilter),
    ToggleSort,
    GoToPage(u32),
    NextPage,
    PreviousPage,
    Retry,
    NavigateToCharacter(u32),
    NavigateToLocation(u32),
    NavigateTo(Route),
}

/// What a pending fetch has to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchRequest {
    CharacterPage(u32),
    LocationPage(u32),
    Character(u32),
    Location { id: u32, preview: usize },
}

/// A request issued by a view, to be executed outside the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingFetch {
    pub token: RequestToken,
    pub request: FetchRequest,
}

impl PendingFetch {
    /// Perform the I/O. Only borrows the client, so several requests can be in flight.
    #[instrument(skip(self, client, resolver), fields(view = %self.token.view, generation = self.token.generation))]
    pub async fn execute<T: Transport>(
        self,
        client: &EntityClient<T>,
        resolver: &ReferenceResolver<T>,
    ) -> Completion {
        let outcome = match self.request {
            FetchRequest::CharacterPage(page) => Outcome::CharacterPage(client.fetch_page(page).await),
            FetchRequest::LocationPage(page) => Outcome::LocationPage(client.fetch_page(page).await),
            FetchRequest::Character(id) => Outcome::Character(client.fetch_by_id(id).await),
            FetchRequest::Location { id, preview } => {
                Outcome::Location(load_location_detail(client, resolver, id, preview).await)
            }
        };
        Completion {
            token: self.token,
            outcome,
        }
    }
}

async fn load_location_detail<T: Transport>(
    client: &EntityClient<T>,
    resolver: &ReferenceResolver<T>,
    id: u32,
    preview: usize,
) -> Result<LocationDetail, FetchFailed> {
    let location: Location = client.fetch_by_id(id).await?;
    let residents = resolver
        .resolve_preview(&location.resident_references(), preview)
        .await;
    Ok(LocationDetail {
        location,
        residents,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    CharacterPage(Result<Page<Character>, FetchFailed>),
    LocationPage(Result<Page<Location>, FetchFailed>),
    Character(Result<Character, FetchFailed>),
    Location(Result<LocationDetail, FetchFailed>),
}

/// The result of a [`PendingFetch`], addressed by its token.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub token: RequestToken,
    pub outcome: Outcome,
}

/// Render-ready data for the current view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewData {
    Characters {
        /// Filtered and sorted subset of the current page.
        items: Vec<Character>,
        criteria: ViewFilterCriteria,
        total_count: u32,
    },
    Locations {
        items: Vec<Location>,
        total_count: u32,
    },
    Character(Character),
    Location(LocationDetail),
}

/// Read-only snapshot handed to the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    pub route: Route,
    pub status: ViewStatus,
    pub data: Option<ViewData>,
    pub page_window: Option<PageWindow>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
enum View {
    Characters(CharacterListView),
    Locations(LocationListView),
    Character(CharacterDetailView),
    Location(LocationDetailView),
}

impl View {
    fn id(&self) -> ViewId {
        match self {
            View::Characters(v) => v.paged().id(),
            View::Locations(v) => v.id(),
            View::Character(v) => v.id(),
            View::Location(v) => v.id(),
        }
    }
}

/// Owns the view for the current route.
///
/// Each navigation discards the previous view and mounts a fresh one under a new
/// [`ViewId`], so completions still in flight for the old view are discarded on
/// arrival. Revisiting a route always re-fetches.
pub struct Navigator<T: Transport> {
    client: EntityClient<T>,
    resolver: ReferenceResolver<T>,
    config: ExplorerConfig,
    next_view: u64,
    current: Option<(Route, View)>,
}

impl<T: Transport> Navigator<T> {
    pub fn new(transport: T, config: ExplorerConfig) -> Self {
        let client = EntityClient::new(transport, config.base_url.clone());
        let resolver = ReferenceResolver::new(client.clone());
        Self {
            client,
            resolver,
            config,
            next_view: 0,
            current: None,
        }
    }

    pub fn client(&self) -> &EntityClient<T> {
        &self.client
    }

    pub fn resolver(&self) -> &ReferenceResolver<T> {
        &self.resolver
    }

    pub fn route(&self) -> Option<Route> {
        self.current.as_ref().map(|(route, _)| *route)
    }

    /// Mount a fresh view for `route` and issue its first fetch.
    pub fn navigate(&mut self, route: Route) -> PendingFetch {
        self.next_view += 1;
        let id = ViewId(self.next_view);
        info!(%route, view = %id, "Navigating");

        let (view, pending) = match route {
            Route::Characters => {
                let mut view = CharacterListView::new(id, self.config.character_window);
                let req = view.begin_load();
                (View::Characters(view), character_page(req))
            }
            Route::Locations => {
                let mut view = LocationListView::new(id, self.config.location_window);
                let req = view.begin_load();
                (View::Locations(view), location_page(req))
            }
            Route::Character(entity_id) => {
                let mut view: CharacterDetailView = DetailView::new(id, entity_id);
                let token = view.begin_load();
                (
                    View::Character(view),
                    PendingFetch {
                        token,
                        request: FetchRequest::Character(entity_id),
                    },
                )
            }
            Route::Location(entity_id) => {
                let mut view: LocationDetailView = DetailView::new(id, entity_id);
                let token = view.begin_load();
                (
                    View::Location(view),
                    PendingFetch {
                        token,
                        request: self.location_request(entity_id),
                    },
                )
            }
        };
        self.current = Some((route, view));
        pending
    }

    /// Unmount the current view. Anything still in flight for it is discarded.
    pub fn close(&mut self) {
        if let Some((route, view)) = self.current.take() {
            info!(%route, view = %view.id(), "Closed view");
        }
    }

    /// Apply an intent to the current view. Returns the fetch it requires, if any.
    pub fn dispatch(&mut self, intent: Intent) -> Option<PendingFetch> {
        match intent {
            Intent::NavigateToCharacter(id) => return Some(self.navigate(Route::Character(id))),
            Intent::NavigateToLocation(id) => return Some(self.navigate(Route::Location(id))),
            Intent::NavigateTo(route) => return Some(self.navigate(route)),
            _ => {}
        }

        let location_preview = self.config.resident_preview;
        let Some((route, view)) = self.current.as_mut() else {
            debug!(?intent, "Intent ignored, no view mounted");
            return None;
        };

        match (view, intent) {
            (View::Characters(v), Intent::SetQuery(query)) => {
                v.set_query(query);
                None
            }
            (View::Characters(v), Intent::SetStatusFilter(status)) => {
                v.set_status_filter(status);
                None
            }
            (View::Characters(v), Intent::ToggleSort) => {
                let direction = v.toggle_sort();
                debug!(?direction, "Sort toggled");
                None
            }
            (View::Characters(v), Intent::GoToPage(page)) => v.go_to(page).map(character_page),
            (View::Characters(v), Intent::NextPage) => v.next().map(character_page),
            (View::Characters(v), Intent::PreviousPage) => v.previous().map(character_page),
            (View::Characters(v), Intent::Retry) => v.retry().map(character_page),
            (View::Locations(v), Intent::GoToPage(page)) => v.go_to(page).map(location_page),
            (View::Locations(v), Intent::NextPage) => v.next().map(location_page),
            (View::Locations(v), Intent::PreviousPage) => v.previous().map(location_page),
            (View::Locations(v), Intent::Retry) => v.retry().map(location_page),
            (View::Character(v), Intent::Retry) => v.retry().map(|token| PendingFetch {
                token,
                request: FetchRequest::Character(v.entity_id()),
            }),
            (View::Location(v), Intent::Retry) => v.retry().map(|token| PendingFetch {
                token,
                request: FetchRequest::Location {
                    id: v.entity_id(),
                    preview: location_preview,
                },
            }),
            (_, intent) => {
                debug!(%route, ?intent, "Intent not applicable to view");
                None
            }
        }
    }

    /// Deliver a completion. Returns whether it was applied to the current view.
    pub fn complete(&mut self, completion: Completion) -> bool {
        let Completion { token, outcome } = completion;
        let Some((_, view)) = self.current.as_mut() else {
            warn!(view = %token.view, "Discarding completion, no view mounted");
            return false;
        };
        if view.id() != token.view {
            warn!(view = %token.view, current = %view.id(), "Discarding completion for unmounted view");
            return false;
        }

        match (view, outcome) {
            (View::Characters(v), Outcome::CharacterPage(result)) => v.complete(token, result),
            (View::Locations(v), Outcome::LocationPage(result)) => v.complete(token, result),
            (View::Character(v), Outcome::Character(result)) => v.complete(token, result),
            (View::Location(v), Outcome::Location(result)) => v.complete(token, result),
            (view, _) => {
                warn!(view = %view.id(), "Discarding completion of the wrong kind");
                false
            }
        }
    }

    /// Run `pending` against this navigator's client and apply the result.
    pub async fn run(&mut self, pending: PendingFetch) -> bool {
        let completion = pending.execute(&self.client, &self.resolver).await;
        self.complete(completion)
    }

    /// Navigate to `route` and wait for its first fetch.
    pub async fn open(&mut self, route: Route) -> bool {
        let pending = self.navigate(route);
        self.run(pending).await
    }

    /// Dispatch `intent` and wait for any fetch it triggers.
    pub async fn handle(&mut self, intent: Intent) -> bool {
        match self.dispatch(intent) {
            Some(pending) => self.run(pending).await,
            None => false,
        }
    }

    /// Snapshot of the current view, or `None` when nothing is mounted.
    pub fn snapshot(&self) -> Option<ViewSnapshot> {
        let (route, view) = self.current.as_ref()?;
        let snapshot = match view {
            View::Characters(v) => ViewSnapshot {
                route: *route,
                status: v.paged().status(),
                data: v.paged().page().map(|page| ViewData::Characters {
                    items: v.displayed().to_vec(),
                    criteria: v.criteria().clone(),
                    total_count: page.total_count,
                }),
                page_window: Some(v.paged().window()),
                error: v.paged().error().map(FetchFailed::user_message),
            },
            View::Locations(v) => ViewSnapshot {
                route: *route,
                status: v.status(),
                data: v.page().map(|page| ViewData::Locations {
                    items: page.items.clone(),
                    total_count: page.total_count,
                }),
                page_window: Some(v.window()),
                error: v.error().map(FetchFailed::user_message),
            },
            View::Character(v) => ViewSnapshot {
                route: *route,
                status: v.status(),
                data: v.data().cloned().map(ViewData::Character),
                page_window: None,
                error: v.error().map(FetchFailed::detail_message),
            },
            View::Location(v) => ViewSnapshot {
                route: *route,
                status: v.status(),
                data: v.data().cloned().map(ViewData::Location),
                page_window: None,
                error: v.error().map(FetchFailed::detail_message),
            },
        };
        Some(snapshot)
    }

    fn location_request(&self, id: u32) -> FetchRequest {
        FetchRequest::Location {
            id,
            preview: self.config.resident_preview,
        }
    }
}

fn character_page(req: PageRequest) -> PendingFetch {
    PendingFetch {
        token: req.token,
        request: FetchRequest::CharacterPage(req.page),
    }
}

fn location_page(req: PageRequest) -> PendingFetch {
    PendingFetch {
        token: req.token,
        request: FetchRequest::LocationPage(req.page),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_from_reference() {
        let origin = Reference::new(
            "Earth (C-137)",
            Some("https://rickandmortyapi.com/api/location/1".into()),
        );
        assert_eq!(Route::from_reference(&origin), Some(Route::Location(1)));

        let resident = Reference::to_url("https://rickandmortyapi.com/api/character/38");
        assert_eq!(Route::from_reference(&resident), Some(Route::Character(38)));

        assert_eq!(Route::from_reference(&Reference::new("unknown", None)), None);
    }

    #[test]
    fn test_route_display_matches_paths() {
        assert_eq!(Route::Characters.to_string(), "/");
        assert_eq!(Route::Location(5).to_string(), "/location/5");
    }
}
