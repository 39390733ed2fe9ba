//! Home-city selection: the place picked on the landing page becomes the
//! map's initial center.

use crate::{
    core::{
        constants::{DEFAULT_CENTER, DEFAULT_ZOOM},
        geo::LatLng,
        viewport::Viewport,
    },
    prelude::HashMap,
    MapError, Result,
};
use std::sync::{Arc, Mutex};

pub const CENTER_LAT_KEY: &str = "initialCenterLat";
pub const CENTER_LNG_KEY: &str = "initialCenterLng";
pub const NO_CITY_SELECTED: &str = "Please select a location from the suggestions first.";

/// Per-tab key/value storage
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }
}

/// The browser's `sessionStorage`
#[cfg(feature = "wasm")]
#[derive(Debug, Default)]
pub struct BrowserSessionStore;

#[cfg(feature = "wasm")]
impl BrowserSessionStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.session_storage().ok()?
    }
}

#[cfg(feature = "wasm")]
impl SessionStore for BrowserSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("sessionStorage rejected {}", key);
            }
        }
    }
}

pub struct HomeLocation {
    store: Arc<dyn SessionStore>,
}

impl HomeLocation {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Remember a picked place; suggestions without usable geometry are ignored
    pub fn select(&self, location: Option<LatLng>) -> bool {
        let Some(location) = location.filter(LatLng::is_valid) else {
            return false;
        };
        self.store.set(CENTER_LAT_KEY, &location.lat.to_string());
        self.store.set(CENTER_LNG_KEY, &location.lng.to_string());
        true
    }

    fn stored(&self, key: &str) -> Option<f64> {
        self.store.get(key)?.trim().parse().ok()
    }

    /// The picked place, if both coordinates are stored
    pub fn selected(&self) -> Option<LatLng> {
        Some(LatLng::new(self.stored(CENTER_LAT_KEY)?, self.stored(CENTER_LNG_KEY)?))
    }

    /// Viewport to open the map tab with, or an error if nothing was picked yet
    pub fn search_city(&self) -> Result<Viewport> {
        self.selected()
            .map(|center| Viewport::new(center, DEFAULT_ZOOM))
            .ok_or_else(|| MapError::MissingInput(NO_CITY_SELECTED.to_string()))
    }

    /// Map center on load; each coordinate falls back to the default on its own
    pub fn initial_viewport(&self) -> Viewport {
        let lat = self.stored(CENTER_LAT_KEY).unwrap_or(DEFAULT_CENTER.0);
        let lng = self.stored(CENTER_LNG_KEY).unwrap_or(DEFAULT_CENTER.1);
        Viewport::new(LatLng::new(lat, lng), DEFAULT_ZOOM)
    }
}
