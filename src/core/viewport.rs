use crate::core::{
    constants::{DEFAULT_CENTER, DEFAULT_ZOOM},
    geo::LatLng,
};
use serde::{Deserialize, Serialize};

/// The map's current visible region: center coordinate and integer zoom level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: u8,
}

impl Viewport {
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self { center, zoom }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1), DEFAULT_ZOOM)
    }
}

/// What the controller remembers about the last issued search.
///
/// `generation` increments every time displayed results are invalidated,
/// so completions carrying an older value can be recognised and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchState {
    pub last_center: Option<LatLng>,
    pub last_zoom: Option<u8>,
    pub generation: u64,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `viewport` as searched and start a new generation
    pub fn record(&mut self, viewport: &Viewport) -> u64 {
        self.last_center = Some(viewport.center);
        self.last_zoom = Some(viewport.zoom);
        self.bump()
    }

    /// Invalidate in-flight work without recording a search
    pub fn bump(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Forget the last search; the generation keeps counting upward
    pub fn reset(&mut self) {
        self.last_center = None;
        self.last_zoom = None;
        self.bump();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_viewport_is_austin() {
        let viewport = Viewport::default();
        assert_eq!(viewport.center, LatLng::new(30.2672, -97.7431));
        assert_eq!(viewport.zoom, 13);
    }

    #[test]
    fn test_record_bumps_generation() {
        let mut state = SearchState::new();
        let first = state.record(&Viewport::default());
        let second = state.record(&Viewport::default());
        assert_eq!(first + 1, second);
        assert!(state.is_current(second));
        assert!(!state.is_current(first));
    }

    #[test]
    fn test_reset_forgets_last_search() {
        let mut state = SearchState::new();
        let generation = state.record(&Viewport::default());
        state.reset();
        assert_eq!(state.last_center, None);
        assert_eq!(state.last_zoom, None);
        assert!(!state.is_current(generation));
    }
}
