//! Favorites service.
//!
//! Backs the "favorite providers" screen: a short list of providers the user
//! pinned, each with a free-text note. The list is seeded with a couple of
//! entries the first time it is read and persisted through the storage port
//! afterwards.

use anyhow::Result;
use chrono::Duration;
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::availability::Clock;
use crate::domain::catalog::ProviderDirectory;
use crate::domain::errors::RecordError;
use crate::domain::models::{DomainFavorite, DomainProvider};
use crate::storage::FavoriteRepository;

/// Maximum length of a favorite or booking note
pub const MAX_NOTE_LENGTH: usize = 256;

/// (provider id, note, days since it was added)
const FAVORITE_SEEDS: &[(u32, &str, i64)] = &[
    (101, "Helped a lot with sensory breaks", 12),
    (301, "Ask about Orton-Gillingham materials", 5),
];

/// A favorite joined with the provider it points at
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteEntry {
    pub favorite: DomainFavorite,
    pub provider: DomainProvider,
}

#[derive(Clone)]
pub struct FavoritesService {
    repository: FavoriteRepository,
    directory: Arc<ProviderDirectory>,
    clock: Arc<dyn Clock>,
    write_lock: Arc<Mutex<()>>,
}

impl FavoritesService {
    pub fn new(repository: FavoriteRepository, directory: Arc<ProviderDirectory>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            directory,
            clock,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Favorites whose provider name or expertise contains `query`
    /// (case-insensitive), in the order they were added
    pub async fn list_favorites(&self, query: Option<&str>) -> Result<Vec<FavoriteEntry>> {
        let favorites = {
            let _guard = self.write_lock.lock().await;
            self.load_or_seed().await?
        };
        let needle = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let entries = favorites
            .into_iter()
            .filter_map(|favorite| self.join(favorite))
            .filter(|entry| match &needle {
                Some(needle) => {
                    entry.provider.name.to_lowercase().contains(needle.as_str())
                        || entry.provider.has_expertise_matching(needle)
                }
                None => true,
            })
            .collect();
        Ok(entries)
    }

    pub async fn add_favorite(&self, provider_id: u32, note: Option<String>) -> Result<FavoriteEntry> {
        let note = validate_note(note.unwrap_or_default())?;
        if self.directory.find(provider_id).is_none() {
            return Err(RecordError::NotFound(format!("Provider {}", provider_id)).into());
        }

        let _guard = self.write_lock.lock().await;
        let mut favorites = self.load_or_seed().await?;
        if favorites.iter().any(|f| f.provider_id == provider_id) {
            return Err(RecordError::AlreadyExists(format!("Favorite for provider {}", provider_id)).into());
        }

        let favorite = DomainFavorite {
            provider_id,
            note,
            added_on: self.clock.today(),
        };
        favorites.push(favorite.clone());
        self.repository.save(&favorites).await?;

        info!("⭐ Added provider {} to favorites", provider_id);
        self.join(favorite)
            .ok_or_else(|| RecordError::NotFound(format!("Provider {}", provider_id)).into())
    }

    pub async fn update_note(&self, provider_id: u32, note: String) -> Result<FavoriteEntry> {
        let note = validate_note(note)?;

        let _guard = self.write_lock.lock().await;
        let mut favorites = self.load_or_seed().await?;
        let favorite = favorites
            .iter_mut()
            .find(|f| f.provider_id == provider_id)
            .ok_or_else(|| RecordError::NotFound(format!("Favorite for provider {}", provider_id)))?;
        favorite.note = note;
        let updated = favorite.clone();
        self.repository.save(&favorites).await?;

        info!("⭐ Updated favorite note for provider {}", provider_id);
        self.join(updated)
            .ok_or_else(|| RecordError::NotFound(format!("Provider {}", provider_id)).into())
    }

    pub async fn remove_favorite(&self, provider_id: u32) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut favorites = self.load_or_seed().await?;
        let before = favorites.len();
        favorites.retain(|f| f.provider_id != provider_id);
        if favorites.len() == before {
            return Err(RecordError::NotFound(format!("Favorite for provider {}", provider_id)).into());
        }
        self.repository.save(&favorites).await?;
        info!("⭐ Removed provider {} from favorites", provider_id);
        Ok(())
    }

    /// Callers must hold `write_lock`: a first read writes the seed
    async fn load_or_seed(&self) -> Result<Vec<DomainFavorite>> {
        if let Some(favorites) = self.repository.load().await? {
            return Ok(favorites);
        }

        let today = self.clock.today();
        let seeded: Vec<DomainFavorite> = FAVORITE_SEEDS
            .iter()
            .map(|(provider_id, note, days_ago)| DomainFavorite {
                provider_id: *provider_id,
                note: note.to_string(),
                added_on: today - Duration::days(*days_ago),
            })
            .collect();
        self.repository.save(&seeded).await?;
        info!("Seeded {} favorites", seeded.len());
        Ok(seeded)
    }

    fn join(&self, favorite: DomainFavorite) -> Option<FavoriteEntry> {
        match self.directory.find(favorite.provider_id) {
            Some(provider) => Some(FavoriteEntry {
                provider: provider.clone(),
                favorite,
            }),
            None => {
                warn!("Favorite points at unknown provider {}", favorite.provider_id);
                None
            }
        }
    }
}

/// Trim a note and enforce the length limit
pub fn validate_note(note: String) -> Result<String, RecordError> {
    let trimmed = note.trim();
    if trimmed.chars().count() > MAX_NOTE_LENGTH {
        return Err(RecordError::NoteTooLong { max: MAX_NOTE_LENGTH });
    }
    Ok(trimmed.to_string())
}
