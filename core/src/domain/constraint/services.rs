use std::collections::{BTreeMap, BTreeSet};

use crate::domain::constraint::{
    entities::{AuthenticityProfile, ComplexityTier, CompiledConstraints, Contradiction, FilterId},
    tables,
};

/// Normalizes raw filter identifiers, dropping blanks and duplicates.
///
/// Each key keeps the lexicographically smallest raw spelling seen for it so the
/// result does not depend on selection order.
pub fn normalize_filters<S: AsRef<str>>(raw_filters: &[S]) -> BTreeMap<FilterId, String> {
    let mut selection: BTreeMap<FilterId, String> = BTreeMap::new();

    for raw in raw_filters {
        let raw = raw.as_ref().trim();
        let Some(key) = FilterId::normalize(raw) else {
            continue;
        };

        selection
            .entry(key)
            .and_modify(|kept| {
                if raw < kept.as_str() {
                    *kept = raw.to_string();
                }
            })
            .or_insert_with(|| raw.to_string());
    }

    selection
}

/// Compiles a filter selection into clauses, forbidden terms, contradictions and a tier.
///
/// Pure: the same input always yields the same output.
pub fn compile_constraints<S: AsRef<str>>(raw_filters: &[S]) -> CompiledConstraints {
    let selection = normalize_filters(raw_filters);
    let keys: BTreeSet<&str> = selection.keys().map(FilterId::as_str).collect();

    let requirement_clauses = selection
        .iter()
        .map(|(key, raw)| requirement_clause(key.as_str(), raw, &keys))
        .collect();

    let forbidden_terms = keys
        .iter()
        .flat_map(|key| tables::forbidden_terms_for(key).iter())
        .map(|term| term.to_string())
        .collect();

    CompiledConstraints {
        filters: selection.keys().cloned().collect(),
        requirement_clauses,
        forbidden_terms,
        contradictions: detect_contradictions(&keys),
        complexity_tier: classify_complexity(&keys),
        authenticity: match_authenticity(&keys),
    }
}

fn requirement_clause(key: &str, raw: &str, keys: &BTreeSet<&str>) -> String {
    if key == "highprotein" {
        return high_protein_clause(keys.contains("vegan"), keys.contains("keto"));
    }

    if let Some(clause) = tables::clause_for(key) {
        return clause.to_string();
    }

    tables::catalog_entry(key)
        .map(|entry| entry.label.to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn high_protein_clause(vegan: bool, keto: bool) -> String {
    let mut clause = tables::HIGH_PROTEIN_BASE.to_string();
    if vegan {
        clause.push_str(tables::HIGH_PROTEIN_VEGAN);
    }
    if keto {
        clause.push_str(tables::HIGH_PROTEIN_KETO);
    }
    if !vegan && !keto {
        clause.push_str(tables::HIGH_PROTEIN_GENERAL);
    }
    clause
}

fn detect_contradictions(keys: &BTreeSet<&str>) -> Vec<Contradiction> {
    let mut reported: BTreeSet<BTreeSet<FilterId>> = BTreeSet::new();
    let mut contradictions = Vec::new();

    for rule in tables::CONTRADICTION_RULES {
        if !rule.filters.iter().all(|f| keys.contains(f)) {
            continue;
        }

        let filters: BTreeSet<FilterId> = rule
            .filters
            .iter()
            .filter_map(|f| FilterId::normalize(f))
            .collect();

        if reported.insert(filters.clone()) {
            contradictions.push(Contradiction {
                filters,
                message: rule.message.to_string(),
            });
        }
    }

    contradictions
}

fn classify_complexity(keys: &BTreeSet<&str>) -> ComplexityTier {
    let many_filters = keys.len() >= 3;
    let individually_hard = tables::INDIVIDUALLY_COMPLEX
        .iter()
        .any(|k| keys.contains(k));
    let hard_pairing = tables::COMPLEX_PAIRINGS
        .iter()
        .any(|(a, b)| keys.contains(a) && keys.contains(b));
    let challenging_vegan_cuisine = keys.contains("vegan")
        && keys
            .iter()
            .any(|k| tables::is_cuisine(k) && !tables::VEGAN_FRIENDLY_CUISINES.contains(k));

    if many_filters || individually_hard || hard_pairing || challenging_vegan_cuisine {
        ComplexityTier::Complex
    } else {
        ComplexityTier::Simple
    }
}

fn match_authenticity(keys: &BTreeSet<&str>) -> Option<AuthenticityProfile> {
    tables::AUTHENTICITY_PROFILES
        .iter()
        .copied()
        .find(|profile| keys.contains(profile.diet()) && keys.contains(profile.cuisine()))
}
