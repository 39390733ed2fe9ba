//! # aptmap
//!
//! Map-driven apartment search.
//!
//! A [`SearchController`] watches the map viewport, issues nearby-housing
//! queries when the user settles on a new street-level view, enriches each
//! hit with place details and keeps markers and the result list in step with
//! the latest search. [`SavedListings`] covers the favorites side: saving,
//! removing and rating listings for the signed-in user.
//!
//! Rendering surfaces, the places provider and the row store are traits, so
//! the same controller drives a browser map or a headless test double.

pub mod auth;
pub mod core;
pub mod home;
pub mod input;
pub mod layers;
pub mod places;
pub mod prelude;
pub mod runtime;
pub mod search;
pub mod storage;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{ControllerOptions, SearchProfile},
    geo::LatLng,
    viewport::{SearchState, Viewport},
};

pub use auth::{Session, UserId};

pub use input::events::{AuthEvent, MapEvent};

pub use places::{google::GooglePlaces, provider::PlacesProvider};

pub use search::{SearchController, SearchControllerBuilder, SearchDecision};

pub use storage::{memory::MemoryRowStore, rest::RestRowStore, saved::SavedListings, RowStore};

pub use traits::{MapSurface, Notifier, ResultListView};

use crate::places::types::PlacesStatus;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Places service returned {0}")]
    Provider(PlacesStatus),

    #[error("Store error: {0}")]
    Store(String),

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    NotAuthenticated(String),

    #[error("{0}")]
    MissingInput(String),

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Install the `RUST_LOG`-driven logger; calling it twice is harmless
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Route panics to the browser console
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub fn init_wasm() {
    console_error_panic_hook::set_once();
}
