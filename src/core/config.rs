//! Configuration for the viewport search controller
//!
//! Options are grouped by concern and can be picked from a preset profile,
//! customised field by field, or loaded from JSON.

use crate::core::constants::{
    DEFAULT_MAX_PAGES, DETAIL_FIELDS, HOUSING_KEYWORD, LIST_PHOTO_MAX_WIDTH, MIN_SEARCH_ZOOM,
    NEXT_PAGE_DELAY_MS, POPUP_PHOTO_MAX_WIDTH, RESEARCH_THRESHOLD_DEG, SEARCH_RADIUS_METERS,
};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest radius the places web service accepts for a nearby search.
const PROVIDER_MAX_RADIUS_METERS: u32 = 50_000;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchProfile {
    /// Street-level search with a three page cap
    Standard,
    /// One page per search and a larger details cache, for tight quotas
    Frugal,
    /// Follows next-page tokens for as long as the provider hands them out
    Unbounded,
    Custom(ControllerOptions),
}

impl SearchProfile {
    pub fn resolve(&self) -> ControllerOptions {
        match self {
            Self::Standard => ControllerOptions {
                search: SearchConfig::default(),
                pagination: PaginationConfig {
                    max_pages: Some(DEFAULT_MAX_PAGES),
                    next_page_delay_ms: NEXT_PAGE_DELAY_MS,
                },
                details: DetailsConfig::default(),
            },
            Self::Frugal => ControllerOptions {
                search: SearchConfig::default(),
                pagination: PaginationConfig {
                    max_pages: Some(1),
                    next_page_delay_ms: NEXT_PAGE_DELAY_MS,
                },
                details: DetailsConfig {
                    cache_size: 1024,
                    ..DetailsConfig::default()
                },
            },
            Self::Unbounded => ControllerOptions {
                search: SearchConfig::default(),
                pagination: PaginationConfig {
                    max_pages: None,
                    next_page_delay_ms: NEXT_PAGE_DELAY_MS,
                },
                details: DetailsConfig {
                    cache_size: 0,
                    ..DetailsConfig::default()
                },
            },
            Self::Custom(options) => options.clone(),
        }
    }
}

impl Default for SearchProfile {
    fn default() -> Self {
        Self::Standard
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerOptions {
    pub search: SearchConfig,
    pub pagination: PaginationConfig,
    pub details: DetailsConfig,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        SearchProfile::default().resolve()
    }
}

impl ControllerOptions {
    /// Parse options from JSON; missing sections fall back to the standard profile
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        let search = &self.search;
        if !(0.0..=1.0).contains(&search.threshold_deg) {
            return Err(MapError::Config(format!(
                "threshold_deg must be within [0, 1], got {}",
                search.threshold_deg
            )));
        }
        if search.radius_meters == 0 || search.radius_meters > PROVIDER_MAX_RADIUS_METERS {
            return Err(MapError::Config(format!(
                "radius_meters must be within 1..={PROVIDER_MAX_RADIUS_METERS}, got {}",
                search.radius_meters
            )));
        }
        if search.keyword.trim().is_empty() {
            return Err(MapError::Config("keyword must not be empty".to_string()));
        }
        if self.pagination.max_pages == Some(0) {
            return Err(MapError::Config(
                "max_pages must be at least 1 (use null for no cap)".to_string(),
            ));
        }
        if self.details.fields.is_empty() {
            return Err(MapError::Config("details.fields must not be empty".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub min_zoom: u8,
    pub threshold_deg: f64,
    pub radius_meters: u32,
    pub keyword: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_zoom: MIN_SEARCH_ZOOM,
            threshold_deg: RESEARCH_THRESHOLD_DEG,
            radius_meters: SEARCH_RADIUS_METERS,
            keyword: HOUSING_KEYWORD.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// `None` keeps following next-page tokens without a cap
    pub max_pages: Option<u32>,
    pub next_page_delay_ms: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_pages: Some(DEFAULT_MAX_PAGES),
            next_page_delay_ms: NEXT_PAGE_DELAY_MS,
        }
    }
}

impl PaginationConfig {
    /// Whether another page may be requested after `fetched` pages
    pub fn allows_another(&self, fetched: u32) -> bool {
        self.max_pages.map_or(true, |cap| fetched < cap)
    }

    pub fn next_page_delay(&self) -> Duration {
        Duration::from_millis(self.next_page_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailsConfig {
    pub fields: Vec<String>,
    /// Details records kept between searches; 0 disables the cache
    pub cache_size: usize,
    pub popup_photo_width: u32,
    pub list_photo_width: u32,
}

impl Default for DetailsConfig {
    fn default() -> Self {
        Self {
            fields: DETAIL_FIELDS.iter().map(|f| f.to_string()).collect(),
            cache_size: 256,
            popup_photo_width: POPUP_PHOTO_MAX_WIDTH,
            list_photo_width: LIST_PHOTO_MAX_WIDTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_resolve() {
        assert_eq!(SearchProfile::Standard.resolve().pagination.max_pages, Some(3));
        assert_eq!(SearchProfile::Frugal.resolve().pagination.max_pages, Some(1));
        assert_eq!(SearchProfile::Unbounded.resolve().pagination.max_pages, None);

        let mut custom = ControllerOptions::default();
        custom.search.radius_meters = 8_000;
        assert_eq!(SearchProfile::Custom(custom.clone()).resolve(), custom);
    }

    #[test]
    fn test_pagination_cap() {
        let capped = PaginationConfig { max_pages: Some(2), next_page_delay_ms: 2_000 };
        assert!(capped.allows_another(1));
        assert!(!capped.allows_another(2));

        let open = PaginationConfig { max_pages: None, next_page_delay_ms: 2_000 };
        assert!(open.allows_another(1_000));
        assert_eq!(open.next_page_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let options = ControllerOptions::from_json(r#"{"pagination": {"max_pages": null}}"#)
            .expect("valid options");
        assert_eq!(options.pagination.max_pages, None);
        assert_eq!(options.pagination.next_page_delay_ms, 2_000);
        assert_eq!(options.search.radius_meters, 16_000);
        assert_eq!(options.search.min_zoom, 13);
        assert_eq!(options.details.fields.len(), 6);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            ControllerOptions::from_json(r#"{"search": {"radius_meters": 0}}"#),
            Err(MapError::Config(_))
        ));
        assert!(matches!(
            ControllerOptions::from_json(r#"{"pagination": {"max_pages": 0}}"#),
            Err(MapError::Config(_))
        ));
        assert!(matches!(
            ControllerOptions::from_json(r#"{"search": {"keyword": "  "}}"#),
            Err(MapError::Config(_))
        ));
        assert!(matches!(
            ControllerOptions::from_json("not json"),
            Err(MapError::Serialization(_))
        ));
    }
}
