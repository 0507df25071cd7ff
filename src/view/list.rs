//! Paged list views: the generic [`PagedView`], the location list, and the
//! character list with its filter criteria.

use crate::framework::FetchFailed;
use crate::model::{ApiEntity, Character, Location, Page};
use crate::view::filter::{self, SortDirection, StatusFilter, ViewFilterCriteria};
use crate::view::pagination::{PageSpan, PageWindow, Pagination};
use crate::view::state::{LoadState, RequestGuard, RequestToken, ViewId, ViewStatus};
use tracing::{debug, info, warn};

/// A page fetch the owning view is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub token: RequestToken,
    pub page: u32,
}

/// State for a paginated collection view.
#[derive(Debug, Clone)]
pub struct PagedView<E> {
    guard: RequestGuard,
    pagination: Pagination,
    state: LoadState<Page<E>>,
}

impl<E: ApiEntity> PagedView<E> {
    pub fn new(view: ViewId, span: PageSpan) -> Self {
        Self {
            guard: RequestGuard::new(view),
            pagination: Pagination::new(span),
            state: LoadState::Idle,
        }
    }

    pub fn id(&self) -> ViewId {
        self.guard.view()
    }

    /// Enter `Loading` for the current page and issue a fresh request.
    pub fn begin_load(&mut self) -> PageRequest {
        self.state = LoadState::Loading;
        let token = self.guard.issue();
        debug!(view = %token.view, generation = token.generation, page = self.pagination.current(), "Loading page");
        PageRequest {
            token,
            page: self.pagination.current(),
        }
    }

    /// Jump to `page`. Out-of-range pages and the current page issue nothing.
    pub fn go_to(&mut self, page: u32) -> Option<PageRequest> {
        match self.pagination.go_to(page) {
            Ok(true) => Some(self.begin_load()),
            Ok(false) => None,
            Err(e) => {
                warn!(view = %self.id(), error = %e, "Page change rejected");
                None
            }
        }
    }

    pub fn next(&mut self) -> Option<PageRequest> {
        self.pagination.next()?;
        Some(self.begin_load())
    }

    pub fn previous(&mut self) -> Option<PageRequest> {
        self.pagination.previous()?;
        Some(self.begin_load())
    }

    /// Re-issue the current page after a failure.
    pub fn retry(&mut self) -> Option<PageRequest> {
        match self.state {
            LoadState::Failed(_) => Some(self.begin_load()),
            _ => None,
        }
    }

    /// Apply a fetch outcome. Returns `false` if the token was superseded.
    pub fn complete(&mut self, token: RequestToken, result: Result<Page<E>, FetchFailed>) -> bool {
        if !self.guard.accepts(&token) {
            warn!(view = %token.view, generation = token.generation, "Discarding stale page");
            return false;
        }
        if let Ok(page) = &result {
            self.pagination.set_total(page.total_pages);
            info!(view = %token.view, page = page.page_number, items = page.items.len(), "Page ready");
        }
        self.state.settle(result);
        true
    }

    pub fn status(&self) -> ViewStatus {
        self.state.status()
    }

    pub fn page(&self) -> Option<&Page<E>> {
        self.state.ready()
    }

    pub fn error(&self) -> Option<&FetchFailed> {
        self.state.error()
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn window(&self) -> PageWindow {
        self.pagination.window()
    }
}

/// The location list shows the fetched page as-is.
pub type LocationListView = PagedView<Location>;

/// Character list: a paged view plus client-side filter criteria.
///
/// Criteria changes never fetch and never enter `Loading`; they recompute the
/// displayed subset over the page already held.
#[derive(Debug, Clone)]
pub struct CharacterListView {
    paged: PagedView<Character>,
    criteria: ViewFilterCriteria,
    displayed: Vec<Character>,
}

impl CharacterListView {
    pub fn new(view: ViewId, span: PageSpan) -> Self {
        Self {
            paged: PagedView::new(view, span),
            criteria: ViewFilterCriteria::default(),
            displayed: Vec::new(),
        }
    }

    pub fn paged(&self) -> &PagedView<Character> {
        &self.paged
    }

    pub fn criteria(&self) -> &ViewFilterCriteria {
        &self.criteria
    }

    /// Filtered, sorted subset of the current page.
    pub fn displayed(&self) -> &[Character] {
        &self.displayed
    }

    pub fn begin_load(&mut self) -> PageRequest {
        self.displayed.clear();
        self.paged.begin_load()
    }

    pub fn go_to(&mut self, page: u32) -> Option<PageRequest> {
        let request = self.paged.go_to(page)?;
        self.displayed.clear();
        Some(request)
    }

    pub fn next(&mut self) -> Option<PageRequest> {
        let request = self.paged.next()?;
        self.displayed.clear();
        Some(request)
    }

    pub fn previous(&mut self) -> Option<PageRequest> {
        let request = self.paged.previous()?;
        self.displayed.clear();
        Some(request)
    }

    pub fn retry(&mut self) -> Option<PageRequest> {
        self.paged.retry()
    }

    pub fn complete(&mut self, token: RequestToken, result: Result<Page<Character>, FetchFailed>) -> bool {
        let applied = self.paged.complete(token, result);
        if applied {
            self.recompute();
        }
        applied
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.criteria.query = query.into();
        self.recompute();
    }

    pub fn set_status_filter(&mut self, status_filter: StatusFilter) {
        self.criteria.status_filter = status_filter;
        self.recompute();
    }

    pub fn toggle_sort(&mut self) -> SortDirection {
        self.criteria.sort_direction = self.criteria.sort_direction.toggled();
        self.recompute();
        self.criteria.sort_direction
    }

    fn recompute(&mut self) {
        self.displayed = match self.paged.page() {
            Some(page) => filter::apply(&page.items, &self.criteria),
            None => Vec::new(),
        };
        debug!(view = %self.paged.id(), shown = self.displayed.len(), "Recomputed view");
    }
}
