use crate::{
    core::geo::LatLng,
    places::types::ListingCandidate,
    prelude::HashMap,
    traits::MapSurface,
    ui::popup::InfoContent,
};
use serde::{Deserialize, Serialize};

/// Widget-assigned marker handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerId(pub u64);

/// What the widget needs to draw a marker
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: LatLng,
    pub title: String,
}

impl MarkerSpec {
    pub fn for_candidate(candidate: &ListingCandidate) -> Self {
        Self {
            position: candidate.location,
            title: candidate.name.clone(),
        }
    }
}

/// A marker currently on the map, with the popup it opens when clicked
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedMarker {
    pub id: MarkerId,
    pub generation: u64,
    pub candidate: ListingCandidate,
    pub popup: InfoContent,
}

/// Bookkeeping for the markers the controller placed on the map
#[derive(Debug, Default)]
pub struct MarkerLayer {
    markers: HashMap<MarkerId, DisplayedMarker>,
    order: Vec<MarkerId>,
}

impl MarkerLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a marker for `candidate` on the map and remember it
    pub fn add(
        &mut self,
        map: &dyn MapSurface,
        generation: u64,
        candidate: ListingCandidate,
        popup: InfoContent,
    ) -> MarkerId {
        let id = map.add_marker(&MarkerSpec::for_candidate(&candidate));
        self.order.push(id);
        self.markers.insert(
            id,
            DisplayedMarker {
                id,
                generation,
                candidate,
                popup,
            },
        );
        id
    }

    /// Remove every marker from the map
    pub fn clear(&mut self, map: &dyn MapSurface) {
        for id in self.order.drain(..) {
            map.remove_marker(id);
        }
        self.markers.clear();
    }

    /// Open the popup belonging to `id`; false when the marker is not ours
    pub fn open_popup(&self, map: &dyn MapSurface, id: MarkerId) -> bool {
        match self.markers.get(&id) {
            Some(marker) => {
                map.open_popup(id, &marker.popup);
                true
            }
            None => false,
        }
    }

    /// Markers in the order they were placed
    pub fn markers(&self) -> Vec<&DisplayedMarker> {
        self.order.iter().filter_map(|id| self.markers.get(id)).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
