//! # Favorite Repository
//!
//! Stores the favorites list as one JSON array under the `favorites` key.
//! A missing key means the list has never been written, which lets the
//! service tell "first visit" (seed it) apart from "emptied by the user".

use anyhow::{Context, Result};
use log::debug;
use std::sync::Arc;

use crate::domain::models::DomainFavorite;
use crate::storage::KeyValueStorage;

pub const FAVORITES_KEY: &str = "favorites";

#[derive(Clone)]
pub struct FavoriteRepository {
    storage: Arc<dyn KeyValueStorage>,
}

impl FavoriteRepository {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// The stored list, or `None` if it was never saved
    pub async fn load(&self) -> Result<Option<Vec<DomainFavorite>>> {
        match self.storage.get(FAVORITES_KEY).await? {
            Some(json) => {
                let favorites = serde_json::from_str(&json).context("Corrupt favorites document")?;
                Ok(Some(favorites))
            }
            None => Ok(None),
        }
    }

    pub async fn save(&self, favorites: &[DomainFavorite]) -> Result<()> {
        let json = serde_json::to_string(favorites)?;
        self.storage.set(FAVORITES_KEY, &json).await?;
        debug!("Saved {} favorites", favorites.len());
        Ok(())
    }
}
