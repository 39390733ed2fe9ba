use crate::{
    auth::session::{IdentityProvider, UserId},
    core::constants::{MAX_RATING, SAVED_TABLE},
    storage::row_store::{Filter, RowStore},
    traits::Notifier,
    ui::{listing::SaveRequest, notice::Notice, saved::SavedPanel},
    MapError, Result,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;
use std::sync::Arc;

const SAVE_REQUIRES_LOGIN: &str = "You must be logged in to save apartments.";
const UNSAVE_REQUIRES_LOGIN: &str = "You must be logged in to remove saved apartments.";
const RATE_REQUIRES_LOGIN: &str = "You must be logged in to rate apartments.";

/// A favorite listing as stored in the `saved_apartments` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedListing {
    pub user_id: UserId,
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub website: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub photo_url: String,
    /// 0 until the user rates it
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: u8,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Saving, removing and rating the signed-in user's favorites
pub struct SavedListings {
    store: Arc<dyn RowStore>,
    identity: Arc<dyn IdentityProvider>,
    notifier: Arc<dyn Notifier>,
}

impl SavedListings {
    pub fn new(
        store: Arc<dyn RowStore>,
        identity: Arc<dyn IdentityProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            identity,
            notifier,
        }
    }

    fn require_user(&self, message: &str) -> Result<UserId> {
        self.identity.current_user().ok_or_else(|| {
            self.notifier.notify(Notice::error(message));
            MapError::NotAuthenticated(message.to_string())
        })
    }

    fn key(user: &UserId, place_id: &str) -> Filter {
        Filter::new()
            .eq("user_id", user.as_str())
            .eq("place_id", place_id)
    }

    /// Store the listing for the current user. A listing saved before keeps its rating.
    pub async fn save(&self, request: &SaveRequest) -> Result<()> {
        let user = self.require_user(SAVE_REQUIRES_LOGIN)?;
        // rating is left out so a re-save does not reset it; new rows read back as 0
        let record = json!({
            "user_id": user.as_str(),
            "place_id": request.place_id,
            "name": request.name,
            "vicinity": request.vicinity,
            "website": request.website,
            "photo_url": request.photo_url,
        });

        match self.store.upsert(SAVED_TABLE, record, &["user_id", "place_id"]).await {
            Ok(()) => {
                log::info!("saved listing {} for {}", request.place_id, user);
                self.notifier.notify(Notice::info("Apartment saved successfully!"));
                Ok(())
            }
            Err(e) => {
                log::error!("error saving listing {}: {}", request.place_id, e);
                self.notifier
                    .notify(Notice::error(format!("Error saving apartment: {}", e)));
                Err(e)
            }
        }
    }

    /// Remove a favorite and return the refreshed list
    pub async fn unsave(&self, place_id: &str) -> Result<Vec<SavedListing>> {
        let user = self.require_user(UNSAVE_REQUIRES_LOGIN)?;
        if let Err(e) = self.store.delete(SAVED_TABLE, &Self::key(&user, place_id)).await {
            log::error!("error removing listing {}: {}", place_id, e);
            self.notifier
                .notify(Notice::error(format!("Error removing apartment: {}", e)));
            return Err(e);
        }
        Ok(self.fetch_saved().await)
    }

    /// Persist a 1 to 5 star rating
    pub async fn rate(&self, place_id: &str, rating: u8) -> Result<()> {
        if !(1..=MAX_RATING).contains(&rating) {
            let err = MapError::InvalidRating(rating);
            self.notifier.notify(Notice::error(err.to_string()));
            return Err(err);
        }
        let user = self.require_user(RATE_REQUIRES_LOGIN)?;
        let outcome = self
            .store
            .update(SAVED_TABLE, json!({ "rating": rating }), &Self::key(&user, place_id))
            .await;
        if let Err(e) = &outcome {
            log::error!("error updating rating for {}: {}", place_id, e);
            self.notifier
                .notify(Notice::error(format!("Error updating rating: {}", e)));
        }
        outcome
    }

    /// The current user's favorites; empty when signed out or when the store fails
    pub async fn fetch_saved(&self) -> Vec<SavedListing> {
        let Some(user) = self.identity.current_user() else {
            return Vec::new();
        };
        let rows = match self
            .store
            .select(SAVED_TABLE, &Filter::new().eq("user_id", user.as_str()))
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                log::error!("error fetching saved listings: {}", e);
                return Vec::new();
            }
        };

        rows.into_iter()
            .filter_map(|row| match serde_json::from_value::<SavedListing>(row) {
                Ok(listing) => Some(listing),
                Err(e) => {
                    log::warn!("skipping malformed saved listing: {}", e);
                    None
                }
            })
            .collect()
    }

    /// What the saved tab should show right now
    pub async fn saved_panel(&self) -> SavedPanel {
        if !self.identity.is_signed_in() {
            return SavedPanel::login_required();
        }
        SavedPanel::from_listings(self.fetch_saved().await)
    }
}
