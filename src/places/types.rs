use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Provider status code; only `Ok` counts as success
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlacesStatus {
    Ok,
    ZeroResults,
    OverQueryLimit,
    RequestDenied,
    InvalidRequest,
    NotFound,
    UnknownError,
    #[serde(other)]
    Unrecognized,
}

impl PlacesStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, PlacesStatus::Ok)
    }
}

impl std::fmt::Display for PlacesStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            PlacesStatus::Ok => "OK",
            PlacesStatus::ZeroResults => "ZERO_RESULTS",
            PlacesStatus::OverQueryLimit => "OVER_QUERY_LIMIT",
            PlacesStatus::RequestDenied => "REQUEST_DENIED",
            PlacesStatus::InvalidRequest => "INVALID_REQUEST",
            PlacesStatus::NotFound => "NOT_FOUND",
            PlacesStatus::UnknownError => "UNKNOWN_ERROR",
            PlacesStatus::Unrecognized => "UNRECOGNIZED",
        };
        f.write_str(code)
    }
}

/// Opaque handle the provider turns into a photo URL
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoRef(pub String);

/// Opaque continuation token for the next result page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageToken(pub String);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoMeta {
    pub photo_reference: PhotoRef,
}

/// A place as the provider describes it, in either a search page or a details response.
/// Details responses only carry the fields that were asked for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub photos: Vec<PhotoMeta>,
}

impl PlaceRecord {
    pub fn location(&self) -> Option<LatLng> {
        self.geometry.as_ref().map(|g| g.location)
    }

    pub fn first_photo(&self) -> Option<&PhotoRef> {
        self.photos.first().map(|p| &p.photo_reference)
    }
}

/// A nearby-search hit. Unlike a details record it always has an id and a location.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPlace {
    pub place_id: String,
    pub name: String,
    pub location: LatLng,
    pub vicinity: Option<String>,
    pub website: Option<String>,
    pub photo: Option<PhotoRef>,
}

impl RawPlace {
    pub fn new(place_id: impl Into<String>, name: impl Into<String>, location: LatLng) -> Self {
        Self {
            place_id: place_id.into(),
            name: name.into(),
            location,
            vicinity: None,
            website: None,
            photo: None,
        }
    }

    pub fn with_vicinity(mut self, vicinity: impl Into<String>) -> Self {
        self.vicinity = Some(vicinity.into());
        self
    }

    /// Builds a hit from a search record; `None` when id or geometry is missing
    pub fn from_record(record: PlaceRecord) -> Option<Self> {
        let location = record.location()?;
        let photo = record.first_photo().cloned();
        Some(Self {
            place_id: record.place_id?,
            name: record.name.unwrap_or_default(),
            location,
            vicinity: record.vicinity,
            website: record.website,
            photo,
        })
    }
}

/// Nearby search parameters
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyRequest {
    pub location: LatLng,
    pub radius_meters: u32,
    pub keyword: String,
}

/// One page of nearby-search results
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub status: PlacesStatus,
    pub results: Vec<RawPlace>,
    pub next_page_token: Option<PageToken>,
}

impl SearchPage {
    pub fn ok(results: Vec<RawPlace>) -> Self {
        Self {
            status: PlacesStatus::Ok,
            results,
            next_page_token: None,
        }
    }

    pub fn failed(status: PlacesStatus) -> Self {
        Self {
            status,
            results: Vec::new(),
            next_page_token: None,
        }
    }

    pub fn with_next_page(mut self, token: impl Into<String>) -> Self {
        self.next_page_token = Some(PageToken(token.into()));
        self
    }

    /// Success with at least one result
    pub fn has_results(&self) -> bool {
        self.status.is_ok() && !self.results.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailsResponse {
    pub status: PlacesStatus,
    #[serde(default)]
    pub result: Option<PlaceRecord>,
}

impl DetailsResponse {
    /// The details record when the status is `Ok`
    pub fn into_record(self) -> Option<PlaceRecord> {
        if self.status.is_ok() {
            self.result
        } else {
            None
        }
    }
}

/// A listing ready to be shown: a details record layered over its search hit
#[derive(Debug, Clone, PartialEq)]
pub struct ListingCandidate {
    pub external_id: String,
    pub name: String,
    pub location: LatLng,
    pub address: Option<String>,
    pub website_url: Option<String>,
    pub photo: Option<PhotoRef>,
}

impl ListingCandidate {
    /// Details fields win; anything the details record lacks comes from the hit
    pub fn enriched(raw: &RawPlace, details: PlaceRecord) -> Self {
        let location = details.location().unwrap_or(raw.location);
        let photo = details.first_photo().cloned().or_else(|| raw.photo.clone());
        Self {
            external_id: details.place_id.unwrap_or_else(|| raw.place_id.clone()),
            name: details.name.unwrap_or_else(|| raw.name.clone()),
            location,
            address: details.vicinity.or_else(|| raw.vicinity.clone()),
            website_url: details.website.or_else(|| raw.website.clone()),
            photo,
        }
    }

    /// Fallback used when the details fetch failed
    pub fn from_raw(raw: RawPlace) -> Self {
        Self {
            external_id: raw.place_id,
            name: raw.name,
            location: raw.location,
            address: raw.vicinity,
            website_url: raw.website,
            photo: raw.photo,
        }
    }
}
