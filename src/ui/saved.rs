use crate::{
    storage::saved::SavedListing,
    ui::{listing::LIST_MISSING_ADDRESS, rating::StarRating},
};

pub const SAVED_LOGIN_PROMPT: &str = "Please log in to see your saved apartments.";
pub const NO_SAVED_LISTINGS: &str = "No saved apartments yet.";

/// A saved listing with its rating control and unsave button
#[derive(Debug, Clone, PartialEq)]
pub struct SavedCard {
    pub listing: SavedListing,
    pub address: String,
    pub rating: StarRating,
}

impl SavedCard {
    pub fn new(listing: SavedListing) -> Self {
        let address = listing
            .vicinity
            .clone()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| LIST_MISSING_ADDRESS.to_string());
        let rating = StarRating::new(listing.rating);
        Self {
            listing,
            address,
            rating,
        }
    }

    pub fn photo_url(&self) -> Option<&str> {
        Some(self.listing.photo_url.as_str()).filter(|url| !url.is_empty())
    }

    pub fn website(&self) -> Option<&str> {
        Some(self.listing.website.as_str()).filter(|url| !url.is_empty())
    }
}

/// Contents of the saved-listings tab
#[derive(Debug, Clone, PartialEq)]
pub enum SavedPanel {
    LoginRequired(&'static str),
    Empty(&'static str),
    Listings(Vec<SavedCard>),
}

impl SavedPanel {
    pub fn login_required() -> Self {
        SavedPanel::LoginRequired(SAVED_LOGIN_PROMPT)
    }

    pub fn from_listings(listings: Vec<SavedListing>) -> Self {
        if listings.is_empty() {
            SavedPanel::Empty(NO_SAVED_LISTINGS)
        } else {
            SavedPanel::Listings(listings.into_iter().map(SavedCard::new).collect())
        }
    }

    pub fn cards(&self) -> &[SavedCard] {
        match self {
            SavedPanel::Listings(cards) => cards,
            _ => &[],
        }
    }
}
