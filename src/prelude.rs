//! Prelude module for common aptmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use aptmap::prelude::*;`

pub use crate::core::{
    config::{ControllerOptions, DetailsConfig, PaginationConfig, SearchConfig, SearchProfile},
    geo::LatLng,
    viewport::{SearchState, Viewport},
};

pub use crate::auth::{AuthClient, AuthFlow, Credentials, IdentityProvider, Session, UserId};

pub use crate::home::{HomeLocation, MemorySessionStore, SessionStore};

pub use crate::input::events::{AuthEvent, MapEvent};

pub use crate::layers::marker::{DisplayedMarker, MarkerId, MarkerSpec};

pub use crate::places::{
    GooglePlaces, ListingCandidate, NearbyRequest, PageToken, PhotoRef, PlaceRecord,
    PlacesProvider, PlacesStatus, RawPlace, SearchPage,
};

pub use crate::search::{SearchController, SearchControllerBuilder, SearchDecision, SearchTicket};

pub use crate::storage::{
    Filter, MemoryRowStore, RestRowStore, RowStore, SavedListing, SavedListings,
};

pub use crate::ui::{
    EntryAction, InfoContent, ListingEntry, Notice, NoticeBoard, NoticeKind, SaveRequest,
    SavedPanel, StarRating,
};

pub use crate::traits::{MapSurface, Notifier, ResultListView};

pub use crate::runtime::{runtime, spawn, AsyncHandle, AsyncSpawner};

pub use crate::{Error as MapError, Result};

pub use std::{pin::Pin, sync::Arc, time::Duration};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};

pub use futures::Future;
