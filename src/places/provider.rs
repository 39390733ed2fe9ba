use crate::{
    places::types::{DetailsResponse, NearbyRequest, PageToken, PhotoRef, SearchPage},
    Result,
};
use async_trait::async_trait;

/// A places backend able to run nearby searches and fetch place details.
///
/// `Err` means the request never produced a provider answer (transport,
/// decoding). A provider answer with a non-`Ok` status is returned as `Ok`
/// and judged by the caller.
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn nearby_search(&self, request: &NearbyRequest) -> Result<SearchPage>;

    /// Continue a previous search. Tokens usually need a moment before they become valid.
    async fn next_page(&self, token: &PageToken) -> Result<SearchPage>;

    async fn details(&self, place_id: &str, fields: &[String]) -> Result<DetailsResponse>;

    /// Resolve a photo handle into a URL no wider than `max_width` pixels
    fn photo_url(&self, photo: &PhotoRef, max_width: u32) -> String;
}
