// ── List controller ──
//
// Owns what the list view shows: the canonical collection, the working
// set derived from it (or from a remote search / region query), the
// search text, suggestions, region filter, sort spec and load status.
//
// Remote operations come in three steps so a UI can run the network part
// on a background task:
//
//   prepare_*()  -> PendingFetch   (bumps the generation, sets Loading)
//   PendingFetch::run(source)      (the only await point)
//   apply(FetchOutcome)            (drops outcomes from older generations)
//
// The async convenience methods (`load_all`, `search`, ...) chain the
// three for callers that can simply await.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{Country, Region, SortKey, SortOrder, SortSpec};
use crate::query::{sort_countries, suggestions};
use crate::source::CountrySource;
use crate::store::FavoritesStore;
use crate::suggest::{NavInput, SuggestionState};

/// What the list view is currently showing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Ready,
    /// A search or region query matched nothing. Not an error.
    NoResults,
    /// The last request failed; the previous working set (if any) is
    /// still shown.
    Failed(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Which remote query a fetch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchKind {
    All,
    Name(String),
    Region(Region),
}

/// A remote request that has been sequenced but not yet run.
#[derive(Debug, Clone)]
pub struct PendingFetch {
    generation: u64,
    kind: FetchKind,
}

impl PendingFetch {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Perform the request. Never touches controller state.
    pub async fn run<S: CountrySource + ?Sized>(self, source: &S) -> FetchOutcome {
        let result = match &self.kind {
            FetchKind::All => source.all().await,
            FetchKind::Name(query) => source.by_name(query).await,
            FetchKind::Region(region) => source.by_region(*region).await,
        };
        FetchOutcome {
            generation: self.generation,
            kind: self.kind,
            result,
        }
    }
}

/// The finished result of a [`PendingFetch`], ready for [`ListController::apply`].
#[derive(Debug)]
pub struct FetchOutcome {
    generation: u64,
    kind: FetchKind,
    result: Result<Vec<Country>, CoreError>,
}

impl FetchOutcome {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Message shown when the full collection comes back empty.
pub const EMPTY_COLLECTION: &str = "No countries were returned by the registry";

/// State and operations behind the country list view.
pub struct ListController<S> {
    source: Arc<S>,
    favorites: FavoritesStore,
    canonical: Vec<Arc<Country>>,
    working: Vec<Arc<Country>>,
    query: String,
    region: Option<Region>,
    sort: Option<SortSpec>,
    suggestions: Vec<Arc<Country>>,
    suggestion_state: SuggestionState,
    status: LoadStatus,
    generation: u64,
}

impl<S: CountrySource> ListController<S> {
    pub fn new(source: Arc<S>, favorites: FavoritesStore) -> Self {
        Self {
            source,
            favorites,
            canonical: Vec::new(),
            working: Vec::new(),
            query: String::new(),
            region: None,
            sort: None,
            suggestions: Vec::new(),
            suggestion_state: SuggestionState::Closed,
            status: LoadStatus::Idle,
            generation: 0,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// Shared handle to the data source, for running fetches off-task.
    pub fn source(&self) -> Arc<S> {
        Arc::clone(&self.source)
    }

    pub fn canonical(&self) -> &[Arc<Country>] {
        &self.canonical
    }

    /// The displayed list, sorted per the active spec.
    pub fn working_set(&self) -> &[Arc<Country>] {
        &self.working
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn region(&self) -> Option<Region> {
        self.region
    }

    /// `None` until a sort key is chosen; fetch order is kept until then.
    pub fn sort_spec(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn suggestions(&self) -> &[Arc<Country>] {
        &self.suggestions
    }

    pub fn suggestion_state(&self) -> SuggestionState {
        self.suggestion_state
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn is_favorite(&self, code: &str) -> bool {
        self.favorites.contains(code)
    }

    // ── Sequenced remote operations ──────────────────────────────────

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn pending(&mut self, kind: FetchKind) -> PendingFetch {
        let generation = self.next_generation();
        self.status = LoadStatus::Loading;
        debug!(generation, ?kind, "fetch prepared");
        PendingFetch { generation, kind }
    }

    pub fn prepare_load_all(&mut self) -> PendingFetch {
        self.pending(FetchKind::All)
    }

    /// Record `query`. Returns `None` (and restores the canonical set)
    /// when the trimmed query is empty.
    pub fn prepare_search(&mut self, query: &str) -> Option<PendingFetch> {
        self.query = query.to_owned();
        let trimmed = query.trim();
        if trimmed.is_empty() {
            self.next_generation();
            self.restore_canonical();
            return None;
        }
        Some(self.pending(FetchKind::Name(trimmed.to_owned())))
    }

    /// Record `region`. Returns `None` (and restores the canonical set)
    /// for "all regions".
    pub fn prepare_filter_by_region(&mut self, region: Option<Region>) -> Option<PendingFetch> {
        self.region = region;
        match region {
            None => {
                self.next_generation();
                self.restore_canonical();
                None
            }
            Some(region) => Some(self.pending(FetchKind::Region(region))),
        }
    }

    /// Fold a finished fetch into state. Returns `false` if the outcome
    /// was superseded by a newer request and discarded.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.generation != self.generation {
            debug!(
                stale = outcome.generation,
                current = self.generation,
                "discarding superseded fetch result"
            );
            return false;
        }

        match (outcome.kind, outcome.result) {
            (FetchKind::All, Ok(countries)) if !countries.is_empty() => {
                self.canonical = countries.into_iter().map(Arc::new).collect();
                self.working = self.canonical.clone();
                self.apply_sort();
                if !self.query.trim().is_empty() {
                    self.suggestions = suggestions(&self.canonical, &self.query);
                }
                self.status = LoadStatus::Ready;
            }
            (FetchKind::All, Ok(_)) => {
                warn!("registry returned an empty collection");
                self.status = LoadStatus::Failed(EMPTY_COLLECTION.to_owned());
            }
            (_, Ok(countries)) => {
                self.working = countries.into_iter().map(Arc::new).collect();
                self.apply_sort();
                self.status = if self.working.is_empty() {
                    LoadStatus::NoResults
                } else {
                    LoadStatus::Ready
                };
            }
            (kind, Err(e)) => {
                warn!(?kind, error = %e, "country fetch failed");
                self.status = LoadStatus::Failed(e.to_string());
            }
        }
        true
    }

    // ── Async conveniences ───────────────────────────────────────────

    async fn run_and_apply(&mut self, pending: PendingFetch) {
        let source = Arc::clone(&self.source);
        let outcome = pending.run(source.as_ref()).await;
        self.apply(outcome);
    }

    /// Fetch the full collection into canonical and working sets.
    ///
    /// An empty or failed fetch leaves previously loaded data in place.
    pub async fn load_all(&mut self) {
        let pending = self.prepare_load_all();
        self.run_and_apply(pending).await;
    }

    /// Remote name search. An empty query restores the canonical set
    /// without a request.
    pub async fn search(&mut self, query: &str) {
        if let Some(pending) = self.prepare_search(query) {
            self.run_and_apply(pending).await;
        }
    }

    /// Remote region query. `None` restores the canonical set.
    pub async fn filter_by_region(&mut self, region: Option<Region>) {
        if let Some(pending) = self.prepare_filter_by_region(region) {
            self.run_and_apply(pending).await;
        }
    }

    /// Detail lookup: the canonical collection first, then the registry.
    pub async fn country(&self, code: &str) -> Result<Arc<Country>, CoreError> {
        if let Some(hit) = self.cached_country(code) {
            return Ok(hit);
        }
        self.source
            .by_code(code.trim())
            .await?
            .map(Arc::new)
            .ok_or_else(|| CoreError::CountryNotFound {
                code: code.trim().to_ascii_uppercase(),
            })
    }

    // ── Local operations ─────────────────────────────────────────────

    /// Detail lookup against the canonical collection only.
    pub fn cached_country(&self, code: &str) -> Option<Arc<Country>> {
        self.canonical.iter().find(|c| c.has_code(code)).cloned()
    }

    /// Recompute suggestions from the canonical collection and move the
    /// dropdown accordingly. Never touches the network.
    pub fn update_suggestions(&mut self, query: &str) {
        self.query = query.to_owned();
        self.suggestions = suggestions(&self.canonical, query);
        let non_empty = !query.trim().is_empty();
        self.suggestion_state = self
            .suggestion_state
            .next(NavInput::Typed { non_empty }, self.suggestions.len())
            .state;
    }

    /// Feed a navigation input to the dropdown. Returns the committed
    /// suggestion, if this input chose one.
    pub fn navigate_suggestions(&mut self, input: NavInput) -> Option<Arc<Country>> {
        let transition = self.suggestion_state.next(input, self.suggestions.len());
        self.suggestion_state = transition.state;
        transition
            .commit
            .and_then(|idx| self.suggestions.get(idx).cloned())
    }

    /// Reorder the working set. Choosing the active key flips its order;
    /// a different key becomes active with `order`.
    pub fn sort(&mut self, key: SortKey, order: SortOrder) {
        let next = match self.sort {
            Some(active) if active.key == key => SortSpec::new(key, active.order.flipped()),
            _ => SortSpec::new(key, order),
        };
        debug!(key = %next.key, order = %next.order, "sort changed");
        self.sort = Some(next);
        self.apply_sort();
    }

    /// Column-header behaviour: same key flips, a new key starts ascending.
    pub fn select_sort_key(&mut self, key: SortKey) {
        self.sort(key, SortOrder::Ascending);
    }

    /// Set the sort spec outright, without the flip rule.
    pub fn set_sort(&mut self, spec: SortSpec) {
        self.sort = Some(spec);
        self.apply_sort();
    }

    /// Flip favorite membership and persist it. The working set is
    /// untouched.
    pub fn toggle_favorite(&mut self, code: &str) -> Result<bool, CoreError> {
        self.favorites.toggle(code)
    }

    /// Canonical entries that are favorited, in canonical order.
    pub fn favorites_view(&self) -> Vec<Arc<Country>> {
        self.canonical
            .iter()
            .filter(|c| self.favorites.contains(&c.code))
            .cloned()
            .collect()
    }

    /// Clear query, region and suggestions and show the canonical set.
    /// The sort spec is kept.
    pub fn reset_filters(&mut self) {
        self.next_generation();
        self.query.clear();
        self.region = None;
        self.suggestions.clear();
        self.suggestion_state = SuggestionState::Closed;
        self.restore_canonical();
    }

    /// Drop everything scoped to one visit of the list: query, region,
    /// suggestions and sort. A no-op when none of them is set, so an
    /// unfiltered load in flight survives.
    pub fn end_view_session(&mut self) {
        let untouched = self.query.is_empty()
            && self.region.is_none()
            && self.sort.is_none()
            && self.suggestion_state == SuggestionState::Closed;
        if untouched {
            return;
        }
        self.sort = None;
        self.reset_filters();
    }

    fn restore_canonical(&mut self) {
        self.working = self.canonical.clone();
        self.apply_sort();
        self.status = if self.canonical.is_empty() {
            LoadStatus::Idle
        } else {
            LoadStatus::Ready
        };
    }

    fn apply_sort(&mut self) {
        if let Some(spec) = self.sort {
            sort_countries(&mut self.working, spec);
        }
    }
}
