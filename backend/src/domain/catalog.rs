//! Provider catalogs.
//!
//! Each specialization page books from its own fixed list of specialists.
//! A [`ProviderCatalog`] holds one of those lists together with the theme the
//! page renders it in; the [`ProviderDirectory`] groups the three catalogs
//! and resolves provider ids across all of them.

use anyhow::{anyhow, Result};
use chrono::Weekday;
use shared::{Specialization, ThemeToken};
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::expertise_filter::filter_by_expertise;
use crate::domain::models::DomainProvider;

struct ProviderSeed {
    id: u32,
    name: &'static str,
    title: &'static str,
    expertise: &'static [&'static str],
    rating: f64,
    review_count: u32,
    hourly_rate: f64,
    availability: &'static [Weekday],
}

const AUTISM_PROVIDERS: &[ProviderSeed] = &[
    ProviderSeed {
        id: 101,
        name: "Dr. Sarah Johnson",
        title: "Autism Spectrum Specialist",
        expertise: &["Social Skills", "Sensory Processing", "Communication"],
        rating: 4.9,
        review_count: 127,
        hourly_rate: 75.0,
        availability: &[Weekday::Mon, Weekday::Wed, Weekday::Fri],
    },
    ProviderSeed {
        id: 102,
        name: "Michael Chen",
        title: "Behavioral Therapist",
        expertise: &["Applied Behavior Analysis", "Routine Building", "Emotional Regulation"],
        rating: 4.7,
        review_count: 89,
        hourly_rate: 65.0,
        availability: &[Weekday::Tue, Weekday::Thu],
    },
    ProviderSeed {
        id: 103,
        name: "Emily Rodriguez",
        title: "Speech & Language Therapist",
        expertise: &["Communication", "Nonverbal Support", "Social Stories"],
        rating: 4.8,
        review_count: 104,
        hourly_rate: 70.0,
        availability: &[Weekday::Mon, Weekday::Tue, Weekday::Sat],
    },
];

const ADHD_PROVIDERS: &[ProviderSeed] = &[
    ProviderSeed {
        id: 201,
        name: "Dr. James Wilson",
        title: "ADHD Learning Coach",
        expertise: &["Focus Techniques", "Time Management", "Organization"],
        rating: 4.8,
        review_count: 142,
        hourly_rate: 70.0,
        availability: &[Weekday::Mon, Weekday::Wed],
    },
    ProviderSeed {
        id: 202,
        name: "Lisa Thompson",
        title: "Executive Function Specialist",
        expertise: &["Executive Function", "Study Skills", "Task Planning"],
        rating: 4.6,
        review_count: 76,
        hourly_rate: 60.0,
        availability: &[Weekday::Tue, Weekday::Thu, Weekday::Fri],
    },
    ProviderSeed {
        id: 203,
        name: "Daniel Park",
        title: "Mindfulness Instructor",
        expertise: &["Mindfulness", "Impulse Control", "Focus Games"],
        rating: 4.5,
        review_count: 58,
        hourly_rate: 55.0,
        availability: &[Weekday::Wed, Weekday::Sat, Weekday::Sun],
    },
];

const DYSLEXIA_PROVIDERS: &[ProviderSeed] = &[
    ProviderSeed {
        id: 301,
        name: "Dr. Rachel Green",
        title: "Reading Specialist",
        expertise: &["Phonics", "Reading Fluency", "Orton-Gillingham"],
        rating: 4.9,
        review_count: 133,
        hourly_rate: 80.0,
        availability: &[Weekday::Mon, Weekday::Thu],
    },
    ProviderSeed {
        id: 302,
        name: "Thomas Brown",
        title: "Literacy Tutor",
        expertise: &["Spelling Strategies", "Writing Support", "Assistive Technology"],
        rating: 4.6,
        review_count: 67,
        hourly_rate: 55.0,
        availability: &[Weekday::Tue, Weekday::Wed, Weekday::Fri],
    },
    ProviderSeed {
        id: 303,
        name: "Aisha Patel",
        title: "Multisensory Learning Coach",
        expertise: &["Multisensory Learning", "Reading Comprehension", "Memory Techniques"],
        rating: 4.7,
        review_count: 91,
        hourly_rate: 65.0,
        availability: &[Weekday::Mon, Weekday::Fri, Weekday::Sat],
    },
];

/// The colour token each specialization page uses
pub fn theme_for(specialization: Specialization) -> ThemeToken {
    let (primary, accent) = match specialization {
        Specialization::Autism => ("#2563eb", "#93c5fd"),
        Specialization::Adhd => ("#ea580c", "#fdba74"),
        Specialization::Dyslexia => ("#7c3aed", "#c4b5fd"),
    };
    ThemeToken {
        primary: primary.to_string(),
        accent: accent.to_string(),
    }
}

fn seeds_for(specialization: Specialization) -> &'static [ProviderSeed] {
    match specialization {
        Specialization::Autism => AUTISM_PROVIDERS,
        Specialization::Adhd => ADHD_PROVIDERS,
        Specialization::Dyslexia => DYSLEXIA_PROVIDERS,
    }
}

/// Fixed list of providers for one specialization
#[derive(Debug, Clone)]
pub struct ProviderCatalog {
    specialization: Specialization,
    theme: ThemeToken,
    providers: Vec<DomainProvider>,
}

impl ProviderCatalog {
    /// Build a catalog, rejecting duplicate ids, ratings outside [0, 5] and
    /// non-positive hourly rates
    pub fn new(
        specialization: Specialization,
        theme: ThemeToken,
        providers: Vec<DomainProvider>,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        for provider in &providers {
            if !seen.insert(provider.id) {
                return Err(anyhow!("Duplicate provider id {} in {} catalog", provider.id, specialization));
            }
            if !(0.0..=5.0).contains(&provider.rating) {
                return Err(anyhow!("Provider {} has rating {} outside 0-5", provider.id, provider.rating));
            }
            if provider.hourly_rate <= 0.0 {
                return Err(anyhow!("Provider {} must have a positive hourly rate", provider.id));
            }
        }
        Ok(Self {
            specialization,
            theme,
            providers,
        })
    }

    /// The built-in catalog for a specialization page
    pub fn builtin(specialization: Specialization) -> Result<Self> {
        let providers = seeds_for(specialization)
            .iter()
            .map(|seed| DomainProvider {
                id: seed.id,
                name: seed.name.to_string(),
                title: seed.title.to_string(),
                specialization,
                expertise: seed.expertise.iter().map(|tag| tag.to_string()).collect(),
                rating: seed.rating,
                review_count: seed.review_count,
                hourly_rate: seed.hourly_rate,
                availability: seed.availability.to_vec(),
            })
            .collect();
        Self::new(specialization, theme_for(specialization), providers)
    }

    pub fn specialization(&self) -> Specialization {
        self.specialization
    }

    pub fn theme(&self) -> &ThemeToken {
        &self.theme
    }

    pub fn providers(&self) -> &[DomainProvider] {
        &self.providers
    }

    pub fn find(&self, provider_id: u32) -> Option<&DomainProvider> {
        self.providers.iter().find(|p| p.id == provider_id)
    }

    pub fn filter(&self, query: &str) -> Vec<&DomainProvider> {
        filter_by_expertise(&self.providers, query)
    }
}

/// All specialization catalogs, addressable by provider id
#[derive(Debug, Clone)]
pub struct ProviderDirectory {
    catalogs: Vec<Arc<ProviderCatalog>>,
}

impl ProviderDirectory {
    /// Group catalogs, rejecting provider ids that appear in more than one
    pub fn new(catalogs: Vec<ProviderCatalog>) -> Result<Self> {
        let mut seen = HashSet::new();
        for provider in catalogs.iter().flat_map(|c| c.providers()) {
            if !seen.insert(provider.id) {
                return Err(anyhow!("Provider id {} appears in more than one catalog", provider.id));
            }
        }
        Ok(Self {
            catalogs: catalogs.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn builtin() -> Result<Self> {
        let catalogs = Specialization::all()
            .into_iter()
            .map(ProviderCatalog::builtin)
            .collect::<Result<Vec<_>>>()?;
        Self::new(catalogs)
    }

    pub fn catalog(&self, specialization: Specialization) -> Option<Arc<ProviderCatalog>> {
        self.catalogs
            .iter()
            .find(|c| c.specialization() == specialization)
            .cloned()
    }

    pub fn catalogs(&self) -> &[Arc<ProviderCatalog>] {
        &self.catalogs
    }

    pub fn find(&self, provider_id: u32) -> Option<&DomainProvider> {
        self.catalogs.iter().find_map(|c| c.find(provider_id))
    }
}
