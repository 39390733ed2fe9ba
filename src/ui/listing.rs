use crate::places::{provider::PlacesProvider, types::ListingCandidate};
use maud::{html, Markup};
use serde::{Deserialize, Serialize};

/// Shown instead of the save button when nobody is signed in
pub const LOGIN_PROMPT: &str = "Please log in to save apartments.";

/// Address line used when a listing has none
pub const LIST_MISSING_ADDRESS: &str = "Address not available";

/// Everything needed to persist a listing once the user presses Save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRequest {
    pub place_id: String,
    pub name: String,
    pub vicinity: Option<String>,
    pub website: String,
    pub photo_url: String,
}

/// The single affordance a result entry carries
#[derive(Debug, Clone, PartialEq)]
pub enum EntryAction {
    Save(SaveRequest),
    LoginPrompt(&'static str),
}

/// One entry of the result list
#[derive(Debug, Clone, PartialEq)]
pub struct ListingEntry {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub photo_url: Option<String>,
    pub website: Option<String>,
    pub action: EntryAction,
}

impl ListingEntry {
    /// `signed_in` decides between the Save button and the login prompt
    pub fn for_candidate(
        candidate: &ListingCandidate,
        places: &dyn PlacesProvider,
        photo_width: u32,
        signed_in: bool,
    ) -> Self {
        let photo_url = candidate
            .photo
            .as_ref()
            .map(|photo| places.photo_url(photo, photo_width));
        let website = candidate.website_url.clone().filter(|w| !w.is_empty());

        let action = if signed_in {
            EntryAction::Save(SaveRequest {
                place_id: candidate.external_id.clone(),
                name: candidate.name.clone(),
                vicinity: candidate.address.clone(),
                website: website.clone().unwrap_or_default(),
                photo_url: photo_url.clone().unwrap_or_default(),
            })
        } else {
            EntryAction::LoginPrompt(LOGIN_PROMPT)
        };

        Self {
            place_id: candidate.external_id.clone(),
            name: candidate.name.clone(),
            address: candidate
                .address
                .clone()
                .unwrap_or_else(|| LIST_MISSING_ADDRESS.to_string()),
            photo_url,
            website,
            action,
        }
    }

    pub fn save_request(&self) -> Option<&SaveRequest> {
        match &self.action {
            EntryAction::Save(request) => Some(request),
            EntryAction::LoginPrompt(_) => None,
        }
    }

    pub fn markup(&self) -> Markup {
        html! {
            li class="apartment-item" {
                strong { (self.name) }
                br;
                (self.address)
                br;
                @if let Some(photo) = &self.photo_url {
                    img src=(photo) alt=(self.name);
                }
                @if let Some(website) = &self.website {
                    a href=(website) target="_blank" { "Visit Website" }
                    br;
                }
                @match &self.action {
                    EntryAction::Save(request) => {
                        button data-place-id=(request.place_id) { "Save" }
                    }
                    EntryAction::LoginPrompt(prompt) => {
                        p class="login-prompt" { (prompt) }
                    }
                }
            }
        }
    }

    pub fn to_html(&self) -> String {
        self.markup().into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::geo::LatLng, places::google::GooglePlaces, places::types::PhotoRef};

    fn candidate() -> ListingCandidate {
        ListingCandidate {
            external_id: "p1".into(),
            name: "Eastside Flats".into(),
            location: LatLng::new(30.26, -97.72),
            address: None,
            website_url: Some(String::new()),
            photo: Some(PhotoRef("ref-1".into())),
        }
    }

    #[test]
    fn test_signed_out_entry_carries_only_login_prompt() {
        let places = GooglePlaces::new("test-key");
        let entry = ListingEntry::for_candidate(&candidate(), &places, 200, false);

        assert_eq!(entry.action, EntryAction::LoginPrompt(LOGIN_PROMPT));
        assert!(entry.save_request().is_none());
        let html = entry.to_html();
        assert!(html.contains(LOGIN_PROMPT));
        assert!(!html.contains("<button"));
    }

    #[test]
    fn test_signed_in_entry_carries_only_save_button() {
        let places = GooglePlaces::new("test-key");
        let entry = ListingEntry::for_candidate(&candidate(), &places, 200, true);

        let request = entry.save_request().expect("save affordance");
        assert_eq!(request.place_id, "p1");
        assert_eq!(request.website, "");
        assert!(request.photo_url.contains("maxwidth=200"));
        assert_eq!(entry.address, LIST_MISSING_ADDRESS);
        assert!(entry.website.is_none());

        let html = entry.to_html();
        assert!(html.contains("data-place-id=\"p1\""));
        assert!(!html.contains(LOGIN_PROMPT));
    }
}
