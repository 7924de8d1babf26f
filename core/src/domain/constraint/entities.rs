use std::{collections::BTreeSet, fmt};

use serde::Serialize;

use crate::domain::constraint::tables;

/// A filter identifier reduced to its comparison key.
///
/// Keys keep only lowercase ASCII letters and digits, so `"highProtein"`,
/// `"High-Protein"` and `"high protein"` are the same filter. Known aliases
/// collapse onto their catalog key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FilterId(String);

impl FilterId {
    pub fn normalize(raw: &str) -> Option<Self> {
        let key: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if key.is_empty() {
            return None;
        }

        let key = tables::resolve_alias(&key).map_or(key, str::to_string);
        Some(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterCategory {
    DietType,
    Allergy,
    Health,
    Trending,
    Cuisine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub key: &'static str,
    pub id: &'static str,
    pub label: &'static str,
    pub category: FilterCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ComplexityTier {
    Simple,
    Complex,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contradiction {
    pub filters: BTreeSet<FilterId>,
    pub message: String,
}

/// Diet and cuisine pairings that tend to produce fusion dishes unless steered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthenticityProfile {
    VeganIndian,
}

impl AuthenticityProfile {
    pub fn diet(&self) -> &'static str {
        match self {
            AuthenticityProfile::VeganIndian => "vegan",
        }
    }

    pub fn cuisine(&self) -> &'static str {
        match self {
            AuthenticityProfile::VeganIndian => "indian",
        }
    }

    /// Long guidance block for the system instruction.
    pub fn guidance(&self) -> &'static str {
        match self {
            AuthenticityProfile::VeganIndian => tables::VEGAN_INDIAN_GUIDANCE,
        }
    }

    /// Short reminder appended to the user instruction.
    pub fn user_addendum(&self) -> &'static str {
        match self {
            AuthenticityProfile::VeganIndian => tables::VEGAN_INDIAN_USER_ADDENDUM,
        }
    }

    /// Requirement paragraph repeated in the strict corrective prompt.
    pub fn retry_requirement(&self) -> &'static str {
        match self {
            AuthenticityProfile::VeganIndian => tables::VEGAN_INDIAN_RETRY_REQUIREMENT,
        }
    }

    pub fn signature_spices(&self) -> &'static [&'static str] {
        match self {
            AuthenticityProfile::VeganIndian => tables::INDIAN_SPICES,
        }
    }

    pub fn techniques(&self) -> &'static [&'static str] {
        match self {
            AuthenticityProfile::VeganIndian => tables::INDIAN_TECHNIQUES,
        }
    }

    pub fn fusion_title_words(&self) -> &'static [&'static str] {
        match self {
            AuthenticityProfile::VeganIndian => tables::FUSION_TITLE_WORDS,
        }
    }
}

/// Everything the rest of the pipeline needs to know about the selected filters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledConstraints {
    pub filters: Vec<FilterId>,
    pub requirement_clauses: Vec<String>,
    pub forbidden_terms: BTreeSet<String>,
    pub contradictions: Vec<Contradiction>,
    pub complexity_tier: ComplexityTier,
    pub authenticity: Option<AuthenticityProfile>,
}

impl CompiledConstraints {
    pub fn has(&self, key: &str) -> bool {
        self.filters.iter().any(|f| f.as_str() == key)
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn is_complex(&self) -> bool {
        self.complexity_tier == ComplexityTier::Complex
    }

    /// Vegan, vegetarian and pescatarian already fix the protein source.
    pub fn restricts_protein(&self) -> bool {
        tables::PROTEIN_RESTRICTIVE_FILTERS
            .iter()
            .any(|key| self.has(key))
    }

    /// Catalog spelling of each filter (`highProtein`), or the key for unknown filters.
    pub fn canonical_ids(&self) -> Vec<&str> {
        self.filters
            .iter()
            .map(|f| tables::catalog_entry(f.as_str()).map_or(f.as_str(), |e| e.id))
            .collect()
    }

    pub fn contradiction_messages(&self) -> Vec<String> {
        self.contradictions
            .iter()
            .map(|c| c.message.clone())
            .collect()
    }
}
