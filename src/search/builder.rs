//! Fluent construction of a [`SearchController`] from its collaborators

use crate::{
    auth::session::IdentityProvider,
    core::config::{ControllerOptions, SearchProfile},
    places::provider::PlacesProvider,
    search::controller::{Inner, SearchController},
    traits::{MapSurface, ResultListView},
    MapError, Result,
};
use std::sync::Arc;

/// Builder for creating and configuring SearchController instances
#[derive(Default)]
pub struct SearchControllerBuilder {
    map: Option<Arc<dyn MapSurface>>,
    list: Option<Arc<dyn ResultListView>>,
    places: Option<Arc<dyn PlacesProvider>>,
    identity: Option<Arc<dyn IdentityProvider>>,
    profile: SearchProfile,
}

impl SearchControllerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map(mut self, map: Arc<dyn MapSurface>) -> Self {
        self.map = Some(map);
        self
    }

    pub fn list(mut self, list: Arc<dyn ResultListView>) -> Self {
        self.list = Some(list);
        self
    }

    pub fn places(mut self, places: Arc<dyn PlacesProvider>) -> Self {
        self.places = Some(places);
        self
    }

    pub fn identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Pick a preset profile
    pub fn profile(mut self, profile: SearchProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Use explicit options instead of a preset
    pub fn options(mut self, options: ControllerOptions) -> Self {
        self.profile = SearchProfile::Custom(options);
        self
    }

    pub fn build(self) -> Result<SearchController> {
        let options = self.profile.resolve();
        options.validate()?;
        let missing = |what: &str| MapError::Config(format!("search controller needs a {what}"));

        let inner = Inner::new(
            self.map.ok_or_else(|| missing("map surface"))?,
            self.list.ok_or_else(|| missing("result list view"))?,
            self.places.ok_or_else(|| missing("places provider"))?,
            self.identity.ok_or_else(|| missing("identity provider"))?,
            options,
        );
        Ok(SearchController::from_inner(inner))
    }
}
