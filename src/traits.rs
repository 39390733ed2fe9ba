//! Shared trait abstractions for the surfaces the controller draws on
//!
//! The map widget, the result list and the notice area are owned by the
//! embedding UI; the controller only talks to them through these traits.
//!
//! [`MapSurface`] and [`ResultListView`] methods run while the controller
//! holds its internal lock. Implementations must return without calling
//! back into the [`SearchController`](crate::SearchController), or the
//! caller deadlocks. Queue the follow-up instead.

use crate::{
    core::{geo::LatLng, viewport::Viewport},
    layers::marker::{MarkerId, MarkerSpec},
    ui::{listing::ListingEntry, notice::Notice, popup::InfoContent},
};

/// The interactive map widget.
///
/// Called with the controller's lock held; must not re-enter the controller.
pub trait MapSurface: Send + Sync {
    /// Current center and zoom
    fn viewport(&self) -> Viewport;

    /// Recenter and zoom the map
    fn set_view(&self, center: LatLng, zoom: u8);

    /// Place a marker and return the widget's handle for it
    fn add_marker(&self, spec: &MarkerSpec) -> MarkerId;

    fn remove_marker(&self, id: MarkerId);

    /// Open the info popup anchored on `marker`
    fn open_popup(&self, marker: MarkerId, content: &InfoContent);
}

/// The result list beside the map.
///
/// Called with the controller's lock held; must not re-enter the controller.
pub trait ResultListView: Send + Sync {
    fn clear(&self);

    fn append(&self, entry: &ListingEntry);
}

/// Transient on-screen messages
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
