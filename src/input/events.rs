use crate::{auth::UserId, core::geo::LatLng};
use serde::{Deserialize, Serialize};

/// Map event types raised by the map widget and consumed by the search controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapEvent {
    /// The map finished initialising
    Loaded,
    /// The user stopped panning or zooming
    Idle,
    /// An address was picked from the autocomplete input.
    /// `location` is absent when the suggestion carried no geometry.
    PlaceSelected {
        name: Option<String>,
        location: Option<LatLng>,
    },
}

impl MapEvent {
    /// Event type name, matching the widget's listener names
    pub fn name(&self) -> &'static str {
        match self {
            MapEvent::Loaded => "load",
            MapEvent::Idle => "idle",
            MapEvent::PlaceSelected { .. } => "place_changed",
        }
    }
}

/// Sign-in state transitions raised by the identity provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AuthEvent {
    SignedIn { user: UserId },
    TokenRefreshed { user: UserId },
    SignedOut,
}

impl AuthEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AuthEvent::SignedIn { .. } => "SIGNED_IN",
            AuthEvent::TokenRefreshed { .. } => "TOKEN_REFRESHED",
            AuthEvent::SignedOut => "SIGNED_OUT",
        }
    }

    /// The user that is signed in after this event, if any
    pub fn user(&self) -> Option<&UserId> {
        match self {
            AuthEvent::SignedIn { user } | AuthEvent::TokenRefreshed { user } => Some(user),
            AuthEvent::SignedOut => None,
        }
    }
}
