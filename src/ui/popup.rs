use crate::places::{provider::PlacesProvider, types::ListingCandidate};
use maud::{html, Markup};

/// Address shown in a popup when the listing has none
pub const POPUP_MISSING_ADDRESS: &str = "N/A";

/// Content of the info popup a marker opens when clicked
#[derive(Debug, Clone, PartialEq)]
pub struct InfoContent {
    pub title: String,
    pub address: String,
    pub website: Option<String>,
    pub photo_url: Option<String>,
}

impl InfoContent {
    pub fn for_candidate(
        candidate: &ListingCandidate,
        places: &dyn PlacesProvider,
        photo_width: u32,
    ) -> Self {
        Self {
            title: candidate.name.clone(),
            address: candidate
                .address
                .clone()
                .unwrap_or_else(|| POPUP_MISSING_ADDRESS.to_string()),
            website: candidate.website_url.clone().filter(|w| !w.is_empty()),
            photo_url: candidate
                .photo
                .as_ref()
                .map(|photo| places.photo_url(photo, photo_width)),
        }
    }

    pub fn markup(&self) -> Markup {
        html! {
            div class="listing-popup" {
                h2 { (self.title) }
                p { strong { "Address:" } " " (self.address) }
                @if let Some(website) = &self.website {
                    p { a href=(website) target="_blank" rel="noopener" { "Website" } }
                }
                @if let Some(photo) = &self.photo_url {
                    div class="listing-photo" { img src=(photo) alt="Apartment Photo"; }
                }
            }
        }
    }

    /// Markup for widgets that take an HTML string
    pub fn to_html(&self) -> String {
        self.markup().into_string()
    }
}
