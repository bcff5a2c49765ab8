use shared::{FavoriteListResponse, FavoriteProvider};

use super::{ProviderMapper, DATE_FORMAT};
use crate::domain::FavoriteEntry;

pub struct FavoriteMapper;

impl FavoriteMapper {
    pub fn to_dto(entry: FavoriteEntry) -> FavoriteProvider {
        FavoriteProvider {
            provider: ProviderMapper::to_dto(entry.provider),
            note: entry.favorite.note,
            added_on: entry.favorite.added_on.format(DATE_FORMAT).to_string(),
        }
    }

    pub fn to_list_response(entries: Vec<FavoriteEntry>) -> FavoriteListResponse {
        FavoriteListResponse {
            favorites: entries.into_iter().map(Self::to_dto).collect(),
        }
    }
}
