//! Expertise filter for provider listings.

use crate::domain::models::DomainProvider;

/// Providers with at least one expertise tag containing `query`,
/// case-insensitively, in their original order.
///
/// A blank query returns every provider.
pub fn filter_by_expertise<'a>(providers: &'a [DomainProvider], query: &str) -> Vec<&'a DomainProvider> {
    if query.trim().is_empty() {
        return providers.iter().collect();
    }
    let needle = query.to_lowercase();
    providers
        .iter()
        .filter(|provider| provider.has_expertise_matching(&needle))
        .collect()
}
