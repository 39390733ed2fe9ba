use crate::core::{
    config::SearchConfig,
    viewport::{SearchState, Viewport},
};

/// A search the controller has committed to run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchTicket {
    pub generation: u64,
    pub viewport: Viewport,
}

/// Outcome of evaluating a viewport against the last search
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchDecision {
    /// Too close to the last search; displayed results stay
    Skipped,
    /// Zoomed out below street level; results are cleared and nothing is requested
    Cleared,
    Started(SearchTicket),
}

impl SearchDecision {
    pub fn ticket(&self) -> Option<SearchTicket> {
        match self {
            SearchDecision::Started(ticket) => Some(*ticket),
            _ => None,
        }
    }
}

/// Whether `viewport` differs enough from the last search to warrant a new one.
///
/// Any zoom change counts; otherwise the center must move strictly more than
/// `threshold_deg` on at least one axis.
pub fn should_search_again(state: &SearchState, viewport: &Viewport, threshold_deg: f64) -> bool {
    let (Some(last_center), Some(last_zoom)) = (state.last_center, state.last_zoom) else {
        return true;
    };
    if viewport.zoom != last_zoom {
        return true;
    }
    viewport.center.moved_beyond(&last_center, threshold_deg)
}

/// Apply the search policy, recording the viewport when a search is started.
///
/// A `Cleared` decision starts a new generation without recording the
/// viewport, so in-flight work from the previous search is dropped.
pub fn decide(config: &SearchConfig, state: &mut SearchState, viewport: &Viewport) -> SearchDecision {
    if viewport.zoom < config.min_zoom {
        state.bump();
        return SearchDecision::Cleared;
    }
    if !should_search_again(state, viewport, config.threshold_deg) {
        return SearchDecision::Skipped;
    }
    let generation = state.record(viewport);
    SearchDecision::Started(SearchTicket {
        generation,
        viewport: *viewport,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    const THRESHOLD: f64 = 0.005;

    fn searched_at(lat: f64, lng: f64, zoom: u8) -> SearchState {
        let mut state = SearchState::new();
        state.record(&Viewport::new(LatLng::new(lat, lng), zoom));
        state
    }

    #[test]
    fn test_first_search_always_runs() {
        let state = SearchState::new();
        for zoom in 13..=21 {
            let viewport = Viewport::new(LatLng::new(30.2672, -97.7431), zoom);
            assert!(should_search_again(&state, &viewport, THRESHOLD));
        }
    }

    #[test]
    fn test_zoom_change_forces_search() {
        let state = searched_at(30.0, -97.0, 14);
        for zoom in [13, 15, 18] {
            assert!(should_search_again(&state, &Viewport::new(LatLng::new(30.0, -97.0), zoom), THRESHOLD));
        }
    }

    #[test]
    fn test_movement_threshold_is_strict_and_per_axis() {
        let state = searched_at(30.0, -97.0, 14);
        let at = |lat: f64, lng: f64| Viewport::new(LatLng::new(lat, lng), 14);

        assert!(!should_search_again(&state, &at(30.004, -96.996), THRESHOLD));
        assert!(should_search_again(&state, &at(30.006, -97.0), THRESHOLD));
        assert!(should_search_again(&state, &at(30.0, -97.006), THRESHOLD));
        assert!(should_search_again(&state, &at(29.994, -97.0), THRESHOLD));
        assert!(!should_search_again(&state, &at(30.0, -97.0), THRESHOLD));
    }

    #[test]
    fn test_decide_low_zoom_clears_without_recording() {
        let config = SearchConfig::default();
        let mut state = searched_at(30.0, -97.0, 14);
        let before = state;

        let decision = decide(&config, &mut state, &Viewport::new(LatLng::new(31.0, -98.0), 12));
        assert_eq!(decision, SearchDecision::Cleared);
        assert_eq!(state.last_center, before.last_center);
        assert_eq!(state.last_zoom, before.last_zoom);
        assert_eq!(state.generation, before.generation + 1);
    }

    #[test]
    fn test_decide_records_started_search() {
        let config = SearchConfig::default();
        let mut state = SearchState::new();
        let viewport = Viewport::new(LatLng::new(30.0, -97.0), 13);

        let ticket = decide(&config, &mut state, &viewport).ticket().expect("search starts");
        assert_eq!(ticket.viewport, viewport);
        assert!(state.is_current(ticket.generation));
        assert_eq!(state.last_center, Some(viewport.center));

        assert_eq!(decide(&config, &mut state, &viewport), SearchDecision::Skipped);
        assert!(state.is_current(ticket.generation));
    }
}
