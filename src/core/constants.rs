//! Core constants for the viewport search policy and the listing UI.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Below this zoom level no nearby search is issued and results are cleared.
pub const MIN_SEARCH_ZOOM: u8 = 13;

/// Per-axis movement (degrees) the center must exceed before re-searching.
pub const RESEARCH_THRESHOLD_DEG: f64 = 0.005;

/// Fixed nearby-search radius in meters (about 10 miles), independent of zoom.
pub const SEARCH_RADIUS_METERS: u32 = 16_000;

/// Keyword filter selecting housing-like places.
pub const HOUSING_KEYWORD: &str = "apartment OR condo OR student housing";

/// Delay before auto-requesting the next result page.
pub const NEXT_PAGE_DELAY_MS: u64 = 2_000;

/// Default cap on pages fetched per search (the provider itself stops at three).
pub const DEFAULT_MAX_PAGES: u32 = 3;

/// Fields requested from the details endpoint.
pub const DETAIL_FIELDS: [&str; 6] = ["name", "photos", "vicinity", "website", "geometry", "place_id"];

/// Photo width used inside the marker popup.
pub const POPUP_PHOTO_MAX_WIDTH: u32 = 300;

/// Photo width used in result and saved lists.
pub const LIST_PHOTO_MAX_WIDTH: u32 = 200;

/// How long a transient notice stays on screen.
pub const NOTICE_DURATION_MS: u64 = 3_000;

/// Map center used when no home city was picked (Austin, TX).
pub const DEFAULT_CENTER: (f64, f64) = (30.2672, -97.7431);

/// Zoom applied on initial load and after an address is picked.
pub const DEFAULT_ZOOM: u8 = 13;

/// Highest star rating a saved listing can carry.
pub const MAX_RATING: u8 = 5;

/// Row-store table holding saved listings.
pub const SAVED_TABLE: &str = "saved_apartments";
