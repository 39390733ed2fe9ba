//! Viewport search controller
//!
//! Watches the map viewport, decides when a new nearby search is due, runs
//! it, and keeps the markers and result list in step with the latest
//! search. Every search carries a generation; completions from an older
//! generation are discarded, so a slow response can never repopulate the
//! map after a newer search cleared it.

use crate::{
    auth::session::IdentityProvider,
    core::{config::ControllerOptions, constants::DEFAULT_ZOOM, viewport::SearchState},
    input::events::MapEvent,
    layers::marker::{DisplayedMarker, MarkerId, MarkerLayer},
    places::{
        cache::DetailsCache,
        provider::PlacesProvider,
        types::{ListingCandidate, NearbyRequest, PageToken, RawPlace, SearchPage},
    },
    runtime::{self, async_utils::async_delay, AsyncHandle},
    search::policy::{self, SearchDecision, SearchTicket},
    traits::{MapSurface, ResultListView},
    ui::{listing::ListingEntry, popup::InfoContent},
    Result,
};
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// State guarded together so a generation check and the push it allows are atomic
#[derive(Debug, Default)]
struct Shared {
    state: SearchState,
    markers: MarkerLayer,
    entries: Vec<ListingEntry>,
}

/// Handle of the newest search task and the generation it belongs to
#[derive(Default)]
struct TaskSlot {
    generation: u64,
    handle: Option<Box<dyn AsyncHandle>>,
}

impl TaskSlot {
    /// Store `next` for `generation` unless a newer generation already owns the
    /// slot. Returns the handle that lost and should be cancelled.
    fn install(
        &mut self,
        generation: u64,
        next: Option<Box<dyn AsyncHandle>>,
    ) -> Option<Box<dyn AsyncHandle>> {
        if generation < self.generation {
            return next;
        }
        self.generation = generation;
        std::mem::replace(&mut self.handle, next)
    }
}

pub(crate) struct Inner {
    pub(crate) map: Arc<dyn MapSurface>,
    pub(crate) list: Arc<dyn ResultListView>,
    pub(crate) places: Arc<dyn PlacesProvider>,
    pub(crate) identity: Arc<dyn IdentityProvider>,
    pub(crate) options: ControllerOptions,
    pub(crate) details_cache: DetailsCache,
    shared: Mutex<Shared>,
    task: Mutex<TaskSlot>,
}

impl Inner {
    pub(crate) fn new(
        map: Arc<dyn MapSurface>,
        list: Arc<dyn ResultListView>,
        places: Arc<dyn PlacesProvider>,
        identity: Arc<dyn IdentityProvider>,
        options: ControllerOptions,
    ) -> Self {
        let details_cache = DetailsCache::new(options.details.cache_size);
        Self {
            map,
            list,
            places,
            identity,
            options,
            details_cache,
            shared: Mutex::new(Shared::default()),
            task: Mutex::new(TaskSlot::default()),
        }
    }
}

/// Cheap to clone; clones drive the same map and share state
#[derive(Clone)]
pub struct SearchController {
    inner: Arc<Inner>,
}

impl SearchController {
    pub(crate) fn from_inner(inner: Inner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn builder() -> crate::search::builder::SearchControllerBuilder {
        crate::search::builder::SearchControllerBuilder::new()
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.inner.options
    }

    fn shared(&self) -> MutexGuard<'_, Shared> {
        self.inner.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// React to a map widget event, starting a search when one is due
    pub fn handle_event(&self, event: MapEvent) -> SearchDecision {
        log::debug!("map event: {}", event.name());
        match event {
            MapEvent::Loaded | MapEvent::Idle => self.maybe_search(),
            MapEvent::PlaceSelected { location: Some(location), name } => match location.validated() {
                Ok(location) => {
                    log::info!("place selected: {} at {}", name.as_deref().unwrap_or("<unnamed>"), location);
                    self.inner.map.set_view(location, DEFAULT_ZOOM);
                    self.maybe_search()
                }
                Err(e) => {
                    log::warn!("ignoring selected place: {}", e);
                    SearchDecision::Skipped
                }
            },
            MapEvent::PlaceSelected { location: None, .. } => SearchDecision::Skipped,
        }
    }

    /// Evaluate the current viewport and run a search in the background if due
    pub fn maybe_search(&self) -> SearchDecision {
        let (decision, generation) = self.decide();
        match decision {
            SearchDecision::Started(ticket) => {
                let controller = self.clone();
                let handle = runtime::spawn(async move { controller.execute(ticket).await });
                self.replace_task(generation, Some(handle));
            }
            SearchDecision::Cleared => self.replace_task(generation, None),
            SearchDecision::Skipped => {}
        }
        decision
    }

    /// Concurrent callers may arrive here out of generation order
    fn replace_task(&self, generation: u64, next: Option<Box<dyn AsyncHandle>>) {
        let loser = self
            .inner
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .install(generation, next);
        if let Some(loser) = loser {
            if !loser.is_finished() {
                log::debug!("cancelling superseded search task");
                loser.cancel();
            }
        }
    }

    /// Synchronous half of a search: decide, record and clear.
    /// The returned ticket is run with [`SearchController::execute`].
    pub fn begin(&self) -> SearchDecision {
        self.decide().0
    }

    /// [`begin`](Self::begin) plus the generation current right after deciding
    fn decide(&self) -> (SearchDecision, u64) {
        let viewport = self.inner.map.viewport();
        let mut shared = self.shared();
        let decision = policy::decide(&self.inner.options.search, &mut shared.state, &viewport);
        match decision {
            SearchDecision::Cleared => {
                log::debug!("zoom {} below street level, clearing results", viewport.zoom);
                self.clear_display(&mut shared);
            }
            SearchDecision::Started(ticket) => {
                log::info!(
                    "searching near {} at zoom {} (generation {})",
                    viewport.center,
                    viewport.zoom,
                    ticket.generation
                );
                self.clear_display(&mut shared);
            }
            SearchDecision::Skipped => {}
        }
        (decision, shared.state.generation)
    }

    /// Asynchronous half of a search: query, paginate, fetch details and render
    pub async fn execute(&self, ticket: SearchTicket) {
        let search = &self.inner.options.search;
        let pagination = &self.inner.options.pagination;
        let request = NearbyRequest {
            location: ticket.viewport.center,
            radius_meters: search.radius_meters,
            keyword: search.keyword.clone(),
        };

        let mut response = self.inner.places.nearby_search(&request).await;
        let mut pages_fetched = 1;
        loop {
            if !self.is_current(ticket.generation) {
                log::debug!("dropping page of superseded search {}", ticket.generation);
                return;
            }
            let page = match Self::usable_page(response) {
                Some(page) => page,
                None => {
                    self.clear_if_current(ticket.generation);
                    return;
                }
            };

            let next_token = page
                .next_page_token
                .filter(|_| pagination.allows_another(pages_fetched));
            let rendering = self.render_batch(ticket.generation, page.results);
            let Some(token) = next_token else {
                rendering.await;
                return;
            };

            let (_, next) = futures::join!(rendering, self.next_page_after_delay(ticket.generation, token));
            match next {
                Some(next) => {
                    response = next;
                    pages_fetched += 1;
                }
                None => return,
            }
        }
    }

    /// A page with at least one result, or `None` after logging why not
    fn usable_page(response: Result<SearchPage>) -> Option<SearchPage> {
        match response {
            Ok(page) if page.has_results() => Some(page),
            Ok(page) => {
                log::warn!("no apartments found in this area (status {})", page.status);
                None
            }
            Err(e) => {
                log::warn!("nearby search failed: {}", e);
                None
            }
        }
    }

    async fn next_page_after_delay(&self, generation: u64, token: PageToken) -> Option<Result<SearchPage>> {
        async_delay(self.inner.options.pagination.next_page_delay()).await;
        if !self.is_current(generation) {
            return None;
        }
        log::debug!("requesting next page for generation {}", generation);
        Some(self.inner.places.next_page(&token).await)
    }

    /// Fetch details for every hit concurrently and render each as it completes
    async fn render_batch(&self, generation: u64, results: Vec<RawPlace>) {
        let mut pending: FuturesUnordered<_> =
            results.into_iter().map(|raw| self.resolve(raw)).collect();
        while let Some(candidate) = pending.next().await {
            if !self.render(generation, candidate) {
                log::debug!("search {} superseded, dropping {} pending details", generation, pending.len());
                return;
            }
        }
    }

    /// Details-enriched candidate, or the bare hit when details are unavailable
    async fn resolve(&self, raw: RawPlace) -> ListingCandidate {
        if let Some(record) = self.inner.details_cache.get(&raw.place_id) {
            return ListingCandidate::enriched(&raw, record);
        }
        match self
            .inner
            .places
            .details(&raw.place_id, &self.inner.options.details.fields)
            .await
        {
            Ok(response) => {
                let status = response.status;
                match response.into_record() {
                    Some(record) => {
                        self.inner.details_cache.insert(raw.place_id.clone(), record.clone());
                        ListingCandidate::enriched(&raw, record)
                    }
                    None => {
                        log::debug!("details for {} returned {}, using search hit", raw.place_id, status);
                        ListingCandidate::from_raw(raw)
                    }
                }
            }
            Err(e) => {
                log::debug!("details for {} failed: {}, using search hit", raw.place_id, e);
                ListingCandidate::from_raw(raw)
            }
        }
    }

    /// Add marker and list entry if `generation` is still current
    fn render(&self, generation: u64, candidate: ListingCandidate) -> bool {
        let details = &self.inner.options.details;
        let places = self.inner.places.as_ref();
        let popup = InfoContent::for_candidate(&candidate, places, details.popup_photo_width);
        let entry = ListingEntry::for_candidate(
            &candidate,
            places,
            details.list_photo_width,
            self.inner.identity.is_signed_in(),
        );

        let mut shared = self.shared();
        if !shared.state.is_current(generation) {
            return false;
        }
        shared.markers.add(self.inner.map.as_ref(), generation, candidate, popup);
        self.inner.list.append(&entry);
        shared.entries.push(entry);
        true
    }

    fn clear_display(&self, shared: &mut Shared) {
        shared.markers.clear(self.inner.map.as_ref());
        shared.entries.clear();
        self.inner.list.clear();
    }

    fn clear_if_current(&self, generation: u64) {
        let mut shared = self.shared();
        if shared.state.is_current(generation) {
            self.clear_display(&mut shared);
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.shared().state.is_current(generation)
    }

    /// Open the popup of a marker this controller placed
    pub fn marker_clicked(&self, id: MarkerId) -> bool {
        self.shared().markers.open_popup(self.inner.map.as_ref(), id)
    }

    /// Forget the last search, cancel in-flight work and clear the display
    pub fn reset(&self) {
        let generation = {
            let mut shared = self.shared();
            shared.state.reset();
            self.clear_display(&mut shared);
            shared.state.generation
        };
        self.replace_task(generation, None);
    }

    pub fn search_state(&self) -> SearchState {
        self.shared().state
    }

    pub fn markers(&self) -> Vec<DisplayedMarker> {
        self.shared().markers.markers().into_iter().cloned().collect()
    }

    pub fn entries(&self) -> Vec<ListingEntry> {
        self.shared().entries.clone()
    }

    /// Whether the most recently started search task has finished
    pub fn is_idle(&self) -> bool {
        self.inner
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .handle
            .as_ref()
            .map_or(true, |task| task.is_finished())
    }

    pub fn clear_details_cache(&self) {
        self.inner.details_cache.clear();
    }
}
