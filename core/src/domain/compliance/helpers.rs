use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    compliance::{
        entities::{AuthenticityAudit, ComplianceFinding, ComplianceReport},
        tables::{
            DAIRY_ALTERNATIVE_PREFIXES, DAIRY_STYLE_TERMS, HIGH_OXALATE_TERMS, NON_VEGAN_TERMS,
            PLANT_BASED_PREFIXES, PLANT_BASED_SUFFIXES,
        },
    },
    constraint::entities::AuthenticityProfile,
    recipe::entities::RecipeDraft,
};

struct TermPattern {
    term: &'static str,
    pattern: Regex,
    dairy_style: bool,
}

static NON_VEGAN_PATTERNS: LazyLock<Vec<TermPattern>> = LazyLock::new(|| {
    NON_VEGAN_TERMS
        .iter()
        .filter_map(|&term| {
            Regex::new(&plural_pattern(term)).ok().map(|pattern| TermPattern {
                term,
                pattern,
                dairy_style: DAIRY_STYLE_TERMS.contains(&term),
            })
        })
        .collect()
});

/// Whole-word pattern for a term and its plurals: `egg(s)`, `anchovy`/`anchovies`.
fn plural_pattern(term: &str) -> String {
    let escaped = regex::escape(term);
    match term.strip_suffix('y') {
        Some(stem) => format!(r"\b(?:{}(?:s|es)?|{}ies)\b", escaped, regex::escape(stem)),
        None => format!(r"\b{}(?:s|es)?\b", escaped),
    }
}

/// Scans text for non-vegan terms, checking every occurrence for a plant-based qualifier.
pub fn scan_non_vegan(text: &str) -> ComplianceReport {
    let text = text.to_lowercase();

    let findings = NON_VEGAN_PATTERNS
        .iter()
        .filter_map(|TermPattern { term, pattern, dairy_style }| {
            let mut occurrences = 0;
            let mut excused = 0;

            for found in pattern.find_iter(&text) {
                occurrences += 1;
                if is_excused(&text[..found.start()], &text[found.end()..], *dairy_style) {
                    excused += 1;
                }
            }

            (occurrences > 0).then(|| ComplianceFinding {
                term: term.to_string(),
                occurrences,
                excused,
            })
        })
        .collect();

    ComplianceReport { findings }
}

fn is_excused(before: &str, after: &str, dairy_style: bool) -> bool {
    let qualified_by = |qualifiers: &[&str]| {
        qualifiers.iter().any(|qualifier| {
            [" ", "-"].iter().any(|separator| {
                before
                    .strip_suffix(separator)
                    .and_then(|rest| rest.strip_suffix(qualifier))
                    .is_some_and(|rest| rest.chars().last().is_none_or(|c| !c.is_alphanumeric()))
            })
        })
    };

    qualified_by(PLANT_BASED_PREFIXES)
        || (dairy_style && qualified_by(DAIRY_ALTERNATIVE_PREFIXES))
        || PLANT_BASED_SUFFIXES.iter().any(|suffix| after.starts_with(suffix))
}

/// High-oxalate ingredients present in the text, ignoring explicit substitutes.
pub fn scan_high_oxalate(text: &str) -> Vec<&'static str> {
    let text = text.to_lowercase();

    HIGH_OXALATE_TERMS
        .iter()
        .copied()
        .filter(|term| {
            text.contains(term)
                && !text.contains(&format!("{term} substitute"))
                && !text.contains(&format!("low-oxalate {term}"))
        })
        .collect()
}

/// Ensures "vegan" is tagged exactly once and drops "vegetarian".
pub fn normalize_vegan_tags(tags: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = tags
        .iter()
        .filter(|t| !t.eq_ignore_ascii_case("vegetarian"))
        .cloned()
        .collect();

    if !normalized.iter().any(|t| t.eq_ignore_ascii_case("vegan")) {
        normalized.push("vegan".to_string());
    }

    normalized
}

pub fn audit_authenticity(draft: &RecipeDraft, profile: AuthenticityProfile) -> AuthenticityAudit {
    let title = draft.title.to_lowercase();
    let text = format!("{} {}", title, draft.searchable_text());

    let found = |words: &'static [&'static str], haystack: &str| -> Vec<&'static str> {
        words.iter().copied().filter(|w| haystack.contains(w)).collect()
    };

    AuthenticityAudit {
        spices_found: found(profile.signature_spices(), &text),
        techniques_found: found(profile.techniques(), &text),
        fusion_words: found(profile.fusion_title_words(), &title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recipe::entities::fixtures;

    #[test]
    fn plain_milk_is_a_violation() {
        let report = scan_non_vegan("1 cup milk\nwhisk the milk into the batter");
        assert_eq!(report.violations(), vec!["milk"]);
        assert!(!report.is_compliant());
    }

    #[test]
    fn coconut_milk_is_excused() {
        let report = scan_non_vegan("1 can coconut milk\nsimmer in the coconut milk");

        assert!(report.is_compliant());
        let finding = &report.findings[0];
        assert_eq!(finding.term, "milk");
        assert!(finding.has_exception());
    }

    #[test]
    fn one_unqualified_occurrence_is_enough() {
        let report = scan_non_vegan("1 cup oat milk\nfinish with a splash of milk");
        assert_eq!(report.violations(), vec!["milk"]);
    }

    #[test]
    fn suffix_qualifiers_excuse_the_term() {
        let report = scan_non_vegan("1 flax egg replacer, dairy-free yogurt, cream of tartar, egg substitute");
        assert!(report.is_compliant(), "{:?}", report.violations());
    }

    #[test]
    fn matches_whole_words_and_plurals_only() {
        let report = scan_non_vegan("roast the eggplant with butternut squash and chickpeas");
        assert!(report.findings.is_empty());

        let report = scan_non_vegan("2 eggs, beaten");
        assert_eq!(report.violations(), vec!["egg"]);
    }

    #[test]
    fn ies_plurals_are_matched() {
        let report = scan_non_vegan("4 anchovies, minced\nmash the anchovies into the oil");
        assert_eq!(report.violations(), vec!["anchovy"]);

        let report = scan_non_vegan("1 anchovy fillet\nskip the dairies");
        assert_eq!(report.violations(), vec!["anchovy", "dairy"]);
    }

    #[test]
    fn milk_alternatives_do_not_excuse_meat_or_fish() {
        let report = scan_non_vegan("1 lb coconut chicken\n2 almond fish fillets\ncashew chicken");
        assert_eq!(report.violations(), vec!["chicken", "fish"]);
    }

    #[test]
    fn plant_based_qualifiers_excuse_meat_terms() {
        let report = scan_non_vegan("200 g vegan chicken\nmock meat crumbles\nplant-based bacon");
        assert!(report.is_compliant(), "{:?}", report.violations());
    }

    #[test]
    fn qualifier_must_be_a_whole_word() {
        let report = scan_non_vegan("papea milk");
        assert_eq!(report.violations(), vec!["milk"]);
    }

    #[test]
    fn non_dairy_qualifies_both_words() {
        let report = scan_non_vegan("non-dairy milk and peanut butter");
        assert!(report.is_compliant(), "{:?}", report.violations());
    }

    #[test]
    fn high_oxalate_scan_skips_substitutes() {
        assert_eq!(scan_high_oxalate("2 cups spinach"), vec!["spinach"]);
        assert!(scan_high_oxalate("tahini substitute made from sunflower").is_empty());
    }

    #[test]
    fn vegan_tag_replaces_vegetarian() {
        let tags = vec!["Vegetarian".to_string(), "gluten-free".to_string()];
        assert_eq!(normalize_vegan_tags(&tags), vec!["gluten-free", "vegan"]);

        let tags = vec!["Vegan".to_string(), "vegetarian".to_string()];
        assert_eq!(normalize_vegan_tags(&tags), vec!["Vegan"]);
    }

    #[test]
    fn authenticity_audit_counts_markers() {
        let audit = audit_authenticity(&fixtures::draft(), AuthenticityProfile::VeganIndian);

        assert!(audit.spices_found.contains(&"turmeric"));
        assert!(audit.spices_found.contains(&"garam masala"));
        assert!(audit.techniques_found.contains(&"temper"));
        assert!(audit.fusion_words.is_empty());
    }

    #[test]
    fn fusion_titles_are_flagged() {
        let mut draft = fixtures::draft();
        draft.title = "Curry Quinoa Bowl".to_string();
        draft.instructions = vec!["Mix everything".to_string()];
        draft.ingredients.clear();

        let audit = audit_authenticity(&draft, AuthenticityProfile::VeganIndian);
        assert_eq!(audit.fusion_words, vec!["bowl", "quinoa"]);
        assert_eq!(audit.warnings().len(), 3);
    }
}
