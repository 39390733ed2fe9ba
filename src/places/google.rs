use crate::{
    places::{
        provider::PlacesProvider,
        types::{DetailsResponse, NearbyRequest, PageToken, PhotoRef, PlaceRecord, PlacesStatus, RawPlace, SearchPage},
    },
    Result,
};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, Url};
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Shared HTTP client so connection pooling and TLS setup happen once.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(build_client);

#[cfg(not(target_arch = "wasm32"))]
fn build_client() -> Client {
    Client::builder()
        .user_agent(concat!("aptmap/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("falling back to default HTTP client: {}", e);
            Client::new()
        })
}

#[cfg(target_arch = "wasm32")]
fn build_client() -> Client {
    Client::new()
}

#[derive(Debug, Deserialize)]
struct NearbyWire {
    status: PlacesStatus,
    #[serde(default)]
    results: Vec<PlaceRecord>,
    #[serde(default)]
    next_page_token: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

impl NearbyWire {
    fn into_page(self) -> SearchPage {
        if let Some(message) = &self.error_message {
            log::warn!("places search returned {}: {}", self.status, message);
        }
        let total = self.results.len();
        let results: Vec<RawPlace> = self.results.into_iter().filter_map(RawPlace::from_record).collect();
        if results.len() < total {
            log::warn!("skipped {} search results without id or geometry", total - results.len());
        }
        SearchPage {
            status: self.status,
            results,
            next_page_token: self.next_page_token.map(PageToken),
        }
    }
}

/// Decode a nearby-search (or next-page) JSON body
pub fn parse_nearby(body: &str) -> Result<SearchPage> {
    let wire: NearbyWire = serde_json::from_str(body)?;
    Ok(wire.into_page())
}

/// Decode a place-details JSON body
pub fn parse_details(body: &str) -> Result<DetailsResponse> {
    Ok(serde_json::from_str(body)?)
}

/// Places Web Service client (nearby search, details, photos)
#[derive(Debug, Clone)]
pub struct GooglePlaces {
    api_key: String,
    base_url: String,
}

impl GooglePlaces {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at another host, e.g. a proxy that injects the key
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_text(&self, path: &str, params: &[(&str, String)]) -> Result<String> {
        let response = HTTP_CLIENT
            .get(self.endpoint(path))
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl PlacesProvider for GooglePlaces {
    async fn nearby_search(&self, request: &NearbyRequest) -> Result<SearchPage> {
        log::debug!(
            "nearby search at {} radius={}m keyword={:?}",
            request.location,
            request.radius_meters,
            request.keyword
        );
        let params = [
            ("location", request.location.to_query_value()),
            ("radius", request.radius_meters.to_string()),
            ("keyword", request.keyword.clone()),
        ];
        let body = self.get_text("nearbysearch/json", &params).await?;
        parse_nearby(&body)
    }

    async fn next_page(&self, token: &PageToken) -> Result<SearchPage> {
        let body = self
            .get_text("nearbysearch/json", &[("pagetoken", token.0.clone())])
            .await?;
        parse_nearby(&body)
    }

    async fn details(&self, place_id: &str, fields: &[String]) -> Result<DetailsResponse> {
        let params = [
            ("place_id", place_id.to_string()),
            ("fields", fields.join(",")),
        ];
        let body = self.get_text("details/json", &params).await?;
        parse_details(&body)
    }

    fn photo_url(&self, photo: &PhotoRef, max_width: u32) -> String {
        let params = [
            ("maxwidth", max_width.to_string()),
            ("photo_reference", photo.0.clone()),
            ("key", self.api_key.clone()),
        ];
        Url::parse_with_params(&self.endpoint("photo"), &params)
            .map(|url| url.to_string())
            .unwrap_or_else(|e| {
                log::warn!("invalid photo URL for {:?}: {}", photo, e);
                String::new()
            })
    }
}
