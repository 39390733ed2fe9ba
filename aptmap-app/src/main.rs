use anyhow::Context;
use aptmap::{
    core::{geo::LatLng, viewport::Viewport},
    home::{HomeLocation, MemorySessionStore},
    layers::marker::{MarkerId, MarkerSpec},
    places::types::{
        DetailsResponse, NearbyRequest, PageToken, PhotoRef, PlaceRecord, PlacesStatus, RawPlace,
        SearchPage,
    },
    prelude::HashMap,
    storage::{MemoryRowStore, RestRowStore, RowStore, SavedListings},
    ui::{listing::ListingEntry, notice::NoticeBoard, popup::InfoContent},
    AuthEvent, ControllerOptions, GooglePlaces, MapEvent, MapSurface, PlacesProvider,
    ResultListView, SearchController, SearchProfile, Session, UserId,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Headless apartment search: drives the controller through a short session
/// and prints what a browser map would show.
///
/// Environment:
/// - `GOOGLE_PLACES_API_KEY`: query the real places service instead of canned data
/// - `APTMAP_OPTIONS`: path to a JSON file with controller options
/// - `SUPABASE_REST_URL` / `SUPABASE_ANON_KEY`: persist favorites remotely
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = match std::env::var("APTMAP_OPTIONS") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading options from {}", path))?;
            ControllerOptions::from_json(&json).context("parsing controller options")?
        }
        Err(_) => SearchProfile::Standard.resolve(),
    };

    let places: Arc<dyn PlacesProvider> = match std::env::var("GOOGLE_PLACES_API_KEY") {
        Ok(key) => Arc::new(GooglePlaces::new(key)),
        Err(_) => {
            log::info!("GOOGLE_PLACES_API_KEY not set, using canned listings");
            Arc::new(CannedPlaces)
        }
    };

    let home = HomeLocation::new(Arc::new(MemorySessionStore::new()));
    let map = Arc::new(ConsoleMap::new(home.initial_viewport()));
    let list = Arc::new(ConsoleList::default());
    let session = Arc::new(Session::new());

    let controller = SearchController::builder()
        .map(map.clone())
        .list(list.clone())
        .places(places)
        .identity(session.clone())
        .options(options)
        .build()?;

    println!("== initial load at {}", map.viewport().center);
    controller.handle_event(MapEvent::Loaded);
    wait_for(&controller).await;
    list.print();

    session.apply(&AuthEvent::SignedIn {
        user: UserId::new("demo-user"),
    });

    let downtown = LatLng::new(30.2849, -97.7341);
    println!("== address picked: {}", downtown);
    controller.handle_event(MapEvent::PlaceSelected {
        name: Some("University of Texas".to_string()),
        location: Some(downtown),
    });
    wait_for(&controller).await;
    list.print();

    if let Some(marker) = controller.markers().first() {
        controller.marker_clicked(marker.id);
    }

    let store: Arc<dyn RowStore> = match (
        std::env::var("SUPABASE_REST_URL"),
        std::env::var("SUPABASE_ANON_KEY"),
    ) {
        (Ok(url), Ok(key)) => Arc::new(RestRowStore::new(url, key)),
        _ => Arc::new(MemoryRowStore::new()),
    };
    let notices = Arc::new(NoticeBoard::new());
    let saved = SavedListings::new(store, session.clone(), notices.clone());
    let first_saveable = list
        .entries()
        .into_iter()
        .find_map(|entry| entry.save_request().cloned());
    if let Some(request) = first_saveable {
        saved.save(&request).await?;
        saved.rate(&request.place_id, 4).await?;
    }
    for card in saved.saved_panel().await.cards() {
        println!(
            "saved: {} ({}) {}/5",
            card.listing.name,
            card.address,
            card.rating.committed()
        );
    }
    for notice in notices.visible() {
        println!("notice: {}", notice.message);
    }

    println!("== zoomed out to the metro area");
    map.set_view(downtown, 10);
    controller.handle_event(MapEvent::Idle);
    println!("{} listings shown", list.entries().len());

    Ok(())
}

async fn wait_for(controller: &SearchController) {
    let poll = Duration::from_millis(100);
    for _ in 0..300 {
        if controller.is_idle() {
            return;
        }
        tokio::time::sleep(poll).await;
    }
    log::warn!("search still running after 30s");
}

/// Prints marker and popup calls instead of drawing them
struct ConsoleMap {
    viewport: Mutex<Viewport>,
    markers: Mutex<HashMap<MarkerId, MarkerSpec>>,
    next_id: Mutex<u64>,
}

impl ConsoleMap {
    fn new(viewport: Viewport) -> Self {
        Self {
            viewport: Mutex::new(viewport),
            markers: Mutex::new(HashMap::default()),
            next_id: Mutex::new(0),
        }
    }
}

impl MapSurface for ConsoleMap {
    fn viewport(&self) -> Viewport {
        self.viewport.lock().map(|v| *v).unwrap_or_default()
    }

    fn set_view(&self, center: LatLng, zoom: u8) {
        if let Ok(mut viewport) = self.viewport.lock() {
            *viewport = Viewport::new(center, zoom);
        }
    }

    fn add_marker(&self, spec: &MarkerSpec) -> MarkerId {
        let id = match self.next_id.lock() {
            Ok(mut next) => {
                *next += 1;
                MarkerId(*next)
            }
            Err(_) => MarkerId(0),
        };
        log::debug!("marker {:?} at {} ({})", id, spec.position, spec.title);
        if let Ok(mut markers) = self.markers.lock() {
            markers.insert(id, spec.clone());
        }
        id
    }

    fn remove_marker(&self, id: MarkerId) {
        if let Ok(mut markers) = self.markers.lock() {
            markers.remove(&id);
        }
    }

    fn open_popup(&self, marker: MarkerId, content: &InfoContent) {
        println!("popup {:?}:\n{}", marker, content.to_html());
    }
}

#[derive(Default)]
struct ConsoleList {
    entries: Mutex<Vec<ListingEntry>>,
}

impl ConsoleList {
    fn entries(&self) -> Vec<ListingEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    fn print(&self) {
        let entries = self.entries();
        println!("{} listings", entries.len());
        for entry in entries {
            println!("  - {} | {}", entry.name, entry.address);
        }
    }
}

impl ResultListView for ConsoleList {
    fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    fn append(&self, entry: &ListingEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry.clone());
        }
    }
}

/// Offline provider that invents a handful of listings around the search center
struct CannedPlaces;

const CANNED_NAMES: [&str; 4] = [
    "Riverside Lofts",
    "Guadalupe Commons",
    "Eastside Flats",
    "Barton Springs Villas",
];

#[async_trait]
impl PlacesProvider for CannedPlaces {
    async fn nearby_search(&self, request: &NearbyRequest) -> aptmap::Result<SearchPage> {
        let center = request.location;
        let results = CANNED_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let step = 0.003 * (i as f64 + 1.0);
                RawPlace::new(
                    format!("canned-{}-{:.3}", i, center.lat),
                    *name,
                    LatLng::new(center.lat + step, center.lng - step),
                )
                .with_vicinity(format!("{} Congress Ave", 100 * (i + 1)))
            })
            .collect();
        Ok(SearchPage::ok(results))
    }

    async fn next_page(&self, token: &PageToken) -> aptmap::Result<SearchPage> {
        log::debug!("canned provider has no page {}", token.0);
        Ok(SearchPage::failed(PlacesStatus::ZeroResults))
    }

    async fn details(&self, place_id: &str, _fields: &[String]) -> aptmap::Result<DetailsResponse> {
        Ok(DetailsResponse {
            status: PlacesStatus::Ok,
            result: Some(PlaceRecord {
                website: Some(format!("https://{}.example", place_id)),
                ..PlaceRecord::default()
            }),
        })
    }

    fn photo_url(&self, photo: &PhotoRef, max_width: u32) -> String {
        format!("https://photos.example/{}?w={}", photo.0, max_width)
    }
}
