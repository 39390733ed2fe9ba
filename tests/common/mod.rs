//! Test doubles for the map widget, result list and places provider
#![allow(dead_code)]

use aptmap::{
    core::{geo::LatLng, viewport::Viewport},
    layers::marker::{MarkerId, MarkerSpec},
    places::types::{
        DetailsResponse, NearbyRequest, PageToken, PhotoRef, PlaceRecord, PlacesStatus, RawPlace,
        SearchPage,
    },
    prelude::{HashMap, HashSet},
    traits::{MapSurface, ResultListView},
    ui::{listing::ListingEntry, popup::InfoContent},
    MapError, PlacesProvider, Result,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::{sleep, Instant};

pub const AUSTIN: LatLng = LatLng {
    lat: 30.2672,
    lng: -97.7431,
};

/// Let spawned searches, page delays and slow details run to completion
pub async fn settle() {
    sleep(Duration::from_secs(60)).await;
}

#[derive(Default)]
pub struct FakeMap {
    viewport: Mutex<Viewport>,
    next_id: Mutex<u64>,
    live: Mutex<HashMap<MarkerId, MarkerSpec>>,
    pub popups: Mutex<Vec<(MarkerId, InfoContent)>>,
    pub set_view_calls: Mutex<Vec<(LatLng, u8)>>,
    zoom_drift: AtomicBool,
}

impl FakeMap {
    pub fn at(center: LatLng, zoom: u8) -> Self {
        let map = Self::default();
        map.move_to(center, zoom);
        map
    }

    pub fn move_to(&self, center: LatLng, zoom: u8) {
        *self.viewport.lock().unwrap() = Viewport::new(center, zoom);
    }

    pub fn live_markers(&self) -> Vec<MarkerSpec> {
        let live = self.live.lock().unwrap();
        let mut ids: Vec<_> = live.keys().copied().collect();
        ids.sort();
        ids.iter().map(|id| live[id].clone()).collect()
    }

    /// Every `viewport()` read reports a different zoom than the one before
    pub fn zoom_on_every_read(&self) {
        self.zoom_drift.store(true, Ordering::SeqCst);
    }

    pub fn marker_count(&self) -> usize {
        self.live.lock().unwrap().len()
    }
}

impl MapSurface for FakeMap {
    fn viewport(&self) -> Viewport {
        let mut viewport = self.viewport.lock().unwrap();
        if self.zoom_drift.load(Ordering::SeqCst) {
            viewport.zoom = if viewport.zoom == 14 { 15 } else { 14 };
        }
        *viewport
    }

    fn set_view(&self, center: LatLng, zoom: u8) {
        self.set_view_calls.lock().unwrap().push((center, zoom));
        self.move_to(center, zoom);
    }

    fn add_marker(&self, spec: &MarkerSpec) -> MarkerId {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let id = MarkerId(*next);
        self.live.lock().unwrap().insert(id, spec.clone());
        id
    }

    fn remove_marker(&self, id: MarkerId) {
        self.live.lock().unwrap().remove(&id);
    }

    fn open_popup(&self, marker: MarkerId, content: &InfoContent) {
        self.popups.lock().unwrap().push((marker, content.clone()));
    }
}

#[derive(Default)]
pub struct RecordingList {
    entries: Mutex<Vec<ListingEntry>>,
    pub clears: Mutex<usize>,
}

impl RecordingList {
    pub fn entries(&self) -> Vec<ListingEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.entries().into_iter().map(|e| e.name).collect();
        names.sort();
        names
    }
}

impl ResultListView for RecordingList {
    fn clear(&self) {
        *self.clears.lock().unwrap() += 1;
        self.entries.lock().unwrap().clear();
    }

    fn append(&self, entry: &ListingEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

/// A scripted provider answer
#[derive(Clone)]
pub enum Reply {
    Page(SearchPage),
    Fail,
}

#[derive(Clone)]
enum DetailsScript {
    Slow(Duration),
    Status(PlacesStatus),
    Fail,
}

/// Places provider that answers from a script and records every call
#[derive(Default)]
pub struct ScriptedPlaces {
    nearby: Mutex<VecDeque<(Duration, Reply)>>,
    fallback: Mutex<Option<Reply>>,
    pages: Mutex<HashMap<String, Reply>>,
    details: Mutex<HashMap<String, DetailsScript>>,
    pub nearby_calls: Mutex<Vec<(NearbyRequest, Instant)>>,
    pub next_page_calls: Mutex<Vec<(String, Instant)>>,
    pub details_calls: Mutex<Vec<String>>,
    pub detail_fields: Mutex<HashSet<String>>,
}

impl ScriptedPlaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer to the next nearby search
    pub fn then_nearby(self, reply: Reply) -> Self {
        self.then_nearby_after(Duration::ZERO, reply)
    }

    pub fn then_nearby_after(self, delay: Duration, reply: Reply) -> Self {
        self.nearby.lock().unwrap().push_back((delay, reply));
        self
    }

    /// Answer every nearby search past the queued ones with `reply`
    pub fn otherwise(self, reply: Reply) -> Self {
        *self.fallback.lock().unwrap() = Some(reply);
        self
    }

    /// Answer for a next-page token
    pub fn with_page(self, token: &str, reply: Reply) -> Self {
        self.pages.lock().unwrap().insert(token.to_string(), reply);
        self
    }

    pub fn with_slow_details(self, place_id: &str, delay: Duration) -> Self {
        self.details
            .lock()
            .unwrap()
            .insert(place_id.to_string(), DetailsScript::Slow(delay));
        self
    }

    pub fn with_failing_details(self, place_id: &str) -> Self {
        self.details
            .lock()
            .unwrap()
            .insert(place_id.to_string(), DetailsScript::Fail);
        self
    }

    pub fn with_details_status(self, place_id: &str, status: PlacesStatus) -> Self {
        self.details
            .lock()
            .unwrap()
            .insert(place_id.to_string(), DetailsScript::Status(status));
        self
    }

    pub fn nearby_count(&self) -> usize {
        self.nearby_calls.lock().unwrap().len()
    }

    pub fn next_page_count(&self) -> usize {
        self.next_page_calls.lock().unwrap().len()
    }

    pub fn details_count(&self) -> usize {
        self.details_calls.lock().unwrap().len()
    }

    fn answer(reply: Reply) -> Result<SearchPage> {
        match reply {
            Reply::Page(page) => Ok(page),
            Reply::Fail => Err(MapError::Provider(PlacesStatus::UnknownError)),
        }
    }
}

/// Name the details record reports for `place_id`
pub fn detailed_name(place_id: &str) -> String {
    format!("{} (details)", place_id)
}

#[async_trait]
impl PlacesProvider for ScriptedPlaces {
    async fn nearby_search(&self, request: &NearbyRequest) -> Result<SearchPage> {
        self.nearby_calls
            .lock()
            .unwrap()
            .push((request.clone(), Instant::now()));
        let scripted = self.nearby.lock().unwrap().pop_front();
        let fallback = self.fallback.lock().unwrap().clone();
        let (delay, reply) = scripted.unwrap_or((
            Duration::ZERO,
            fallback.unwrap_or(Reply::Page(SearchPage::failed(PlacesStatus::ZeroResults))),
        ));
        if !delay.is_zero() {
            sleep(delay).await;
        }
        Self::answer(reply)
    }

    async fn next_page(&self, token: &PageToken) -> Result<SearchPage> {
        self.next_page_calls
            .lock()
            .unwrap()
            .push((token.0.clone(), Instant::now()));
        let reply = self.pages.lock().unwrap().get(&token.0).cloned();
        Self::answer(reply.unwrap_or(Reply::Page(SearchPage::failed(PlacesStatus::InvalidRequest))))
    }

    async fn details(&self, place_id: &str, fields: &[String]) -> Result<DetailsResponse> {
        self.details_calls.lock().unwrap().push(place_id.to_string());
        self.detail_fields
            .lock()
            .unwrap()
            .extend(fields.iter().cloned());
        let script = self.details.lock().unwrap().get(place_id).cloned();
        match script {
            Some(DetailsScript::Fail) => return Err(MapError::Provider(PlacesStatus::UnknownError)),
            Some(DetailsScript::Status(status)) => {
                return Ok(DetailsResponse {
                    status,
                    result: None,
                })
            }
            Some(DetailsScript::Slow(delay)) => sleep(delay).await,
            None => {}
        }
        Ok(DetailsResponse {
            status: PlacesStatus::Ok,
            result: Some(PlaceRecord {
                place_id: Some(place_id.to_string()),
                name: Some(detailed_name(place_id)),
                vicinity: Some(format!("{} Apartment Row", place_id.len())),
                website: Some(format!("https://{}.example", place_id)),
                ..PlaceRecord::default()
            }),
        })
    }

    fn photo_url(&self, photo: &PhotoRef, max_width: u32) -> String {
        format!("https://photos.example/{}?w={}", photo.0, max_width)
    }
}

/// A raw search hit near `center`
pub fn hit(place_id: &str, center: LatLng) -> RawPlace {
    RawPlace::new(place_id, format!("{} (raw)", place_id), center).with_vicinity("Raw Street")
}

/// An OK page holding one hit per id
pub fn page(ids: &[&str], center: LatLng) -> SearchPage {
    SearchPage::ok(ids.iter().map(|id| hit(id, center)).collect())
}
