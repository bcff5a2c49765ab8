//! Domain model for a favorited provider.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainFavorite {
    pub provider_id: u32,
    pub note: String,
    pub added_on: NaiveDate,
}
