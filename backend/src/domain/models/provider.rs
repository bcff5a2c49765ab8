//! Domain model for a bookable specialist.
use chrono::Weekday;
use shared::Specialization;

#[derive(Debug, Clone, PartialEq)]
pub struct DomainProvider {
    pub id: u32,
    pub name: String,
    pub title: String,
    pub specialization: Specialization,
    pub expertise: Vec<String>,
    pub rating: f64,
    pub review_count: u32,
    pub hourly_rate: f64,
    /// Weekdays the provider accepts sessions on, in calendar order
    pub availability: Vec<Weekday>,
}

impl DomainProvider {
    pub fn is_available_on(&self, weekday: Weekday) -> bool {
        self.availability.contains(&weekday)
    }

    /// True if any expertise tag contains `needle` (already lowercased)
    pub fn has_expertise_matching(&self, needle: &str) -> bool {
        self.expertise
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
    }

    /// Availability as three-letter weekday abbreviations
    pub fn availability_abbreviations(&self) -> Vec<String> {
        self.availability
            .iter()
            .map(|day| day.to_string())
            .collect()
    }
}
