//! Places search: provider contract, wire types, caching and the HTTP adapter

pub mod cache;
pub mod google;
pub mod provider;
pub mod types;

pub use cache::DetailsCache;
pub use google::GooglePlaces;
pub use provider::PlacesProvider;
pub use types::{
    DetailsResponse, ListingCandidate, NearbyRequest, PageToken, PhotoRef, PlaceRecord,
    PlacesStatus, RawPlace, SearchPage,
};
