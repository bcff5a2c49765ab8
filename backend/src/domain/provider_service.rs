//! Provider listing and availability lookups for the specialization pages.

use log::info;
use shared::{Specialization, ThemeToken};
use std::sync::Arc;

use crate::domain::availability::{AvailabilityService, AvailableDate, BookableSlot};
use crate::domain::catalog::ProviderDirectory;
use crate::domain::errors::ValidationError;
use crate::domain::models::DomainProvider;

/// Result of a provider listing
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderListing {
    pub providers: Vec<DomainProvider>,
    pub theme: Option<ThemeToken>,
}

#[derive(Clone)]
pub struct ProviderService {
    directory: Arc<ProviderDirectory>,
    availability: AvailabilityService,
}

impl ProviderService {
    pub fn new(directory: Arc<ProviderDirectory>, availability: AvailabilityService) -> Self {
        Self {
            directory,
            availability,
        }
    }

    /// Providers of one specialization (or all of them) whose expertise
    /// matches `query`
    pub fn list_providers(&self, specialization: Option<Specialization>, query: Option<&str>) -> ProviderListing {
        let query = query.unwrap_or("");
        let (providers, theme) = match specialization.and_then(|s| self.directory.catalog(s)) {
            Some(catalog) => (
                catalog.filter(query).into_iter().cloned().collect::<Vec<_>>(),
                Some(catalog.theme().clone()),
            ),
            None => {
                let mut providers = Vec::new();
                for catalog in self.directory.catalogs() {
                    providers.extend(catalog.filter(query).into_iter().cloned());
                }
                (providers, None)
            }
        };

        info!(
            "Listing providers (specialization: {:?}, query: '{}'): {} found",
            specialization,
            query,
            providers.len()
        );
        ProviderListing { providers, theme }
    }

    pub fn get_provider(&self, provider_id: u32) -> Result<DomainProvider, ValidationError> {
        self.directory
            .find(provider_id)
            .cloned()
            .ok_or(ValidationError::UnknownProvider(provider_id))
    }

    pub fn available_dates(&self, provider_id: u32) -> Result<Vec<AvailableDate>, ValidationError> {
        let provider = self.get_provider(provider_id)?;
        Ok(self.availability.available_dates(&provider))
    }

    pub fn available_time_slots(&self) -> Vec<BookableSlot> {
        self.availability.available_time_slots()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::availability::FixedClock;
    use chrono::NaiveDate;

    fn setup_service() -> ProviderService {
        let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 1, 4).unwrap()));
        ProviderService::new(
            Arc::new(ProviderDirectory::builtin().unwrap()),
            AvailabilityService::new(clock),
        )
    }

    #[test]
    fn test_list_one_specialization_with_theme() {
        let service = setup_service();
        let listing = service.list_providers(Some(Specialization::Dyslexia), None);
        assert_eq!(listing.providers.len(), 3);
        assert!(listing.providers.iter().all(|p| p.specialization == Specialization::Dyslexia));
        assert!(listing.theme.is_some());
    }

    #[test]
    fn test_list_everything_filtered() {
        let service = setup_service();
        let listing = service.list_providers(None, Some("communication"));
        let ids: Vec<u32> = listing.providers.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![101, 103]);
        assert!(listing.theme.is_none());
    }

    #[test]
    fn test_available_dates_for_unknown_provider() {
        let service = setup_service();
        assert_eq!(service.available_dates(4242), Err(ValidationError::UnknownProvider(4242)));
        // Dr. James Wilson works Mon and Wed
        let dates = service.available_dates(201).unwrap();
        assert_eq!(dates[0].date, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert_eq!(dates[0].label, "Mon, Jan 8");
    }
}
