use rand::Rng;

use crate::domain::{
    constraint::entities::{CompiledConstraints, ComplexityTier},
    prompt::{entities::AssembledPrompt, schema::RECIPE_JSON_SHAPE, value_objects::ProteinFocus},
};

const COMPLEX_PERSONA: &str = "You are a professional chef and nutritionist specializing in creating delicious recipes with accurate nutritional information. Create diverse recipes that include a variety of dietary approaches including meat, fish, poultry, and plant-based options unless specific dietary restrictions are requested.";

const SIMPLE_PERSONA: &str = "You are a professional chef and nutritionist specializing in creating delicious, healthy recipes with accurate nutritional information.";

const GENERATION_RULES: &str = "Generate a complete recipe with clear instructions and accurate measurements.
Ensure all dietary requirements are strictly followed and reflected in the dietaryTags.

IMPORTANT: Write instructions WITHOUT step numbers (like \"1.\", \"2.\", etc.) - numbering is added when the recipe is displayed.";

const VALIDATION_RULE: &str = "VALIDATION: Before finalizing the recipe, double-check that EVERY ingredient complies with ALL dietary requirements. Include ONLY the appropriate dietary tags in the dietaryTags array (e.g., if vegan filters are applied, the recipe must be tagged as \"vegan\", NOT \"vegetarian\").";

const STRICT_VEGAN_PERSONA: &str = "You are a vegan chef specializing in 100% plant-based recipes.
Generate a complete recipe with clear instructions and accurate measurements.
IMPORTANT: Write instructions WITHOUT step numbers - numbering is added when the recipe is displayed.
Format your response as a JSON object exactly as specified.";

const STRICT_VEGAN_FORBIDDEN: &str = "ABSOLUTELY FORBIDDEN INGREDIENTS:
- NO dairy products (milk, cheese, butter, cream, yogurt, ghee, whey, casein)
- NO animal products (meat, chicken, beef, fish, seafood, eggs)
- NO honey (use maple syrup, agave, or date syrup instead)
- NO gelatin (use agar-agar instead)";

const STRICT_VEGAN_REQUIRED: &str = "REQUIRED: Use only plant-based ingredients like:
- Plant milks (almond, oat, soy, coconut)
- Plant-based proteins (tofu, tempeh, legumes, nuts, seeds)
- Vegetables, fruits, grains, herbs, spices
- Plant-based fats (olive oil, coconut oil, avocado)";

const STRICT_KETO_SECTION: &str = "KETO REQUIREMENTS:
- High fat (70-80% of calories), moderate protein (20-25%), very low carbs (5-10%)
- Use high-fat plant sources: avocados, coconut oil, olive oil, nuts, seeds
- Avoid grains, potatoes, most fruits (except berries in small amounts)
- Focus on leafy greens, cruciferous vegetables, plant proteins like tofu/tempeh
- Target: 20-30g fat, 15-20g protein, 5-10g net carbs per serving";

const STRICT_HIGH_PROTEIN: &str = "ENSURE high protein (25g+ per serving) using plant sources like tofu, tempeh, legumes, quinoa, hemp seeds.";

const STRICT_LOW_OXALATE: &str = "AVOID high-oxalate foods: spinach, beets, chocolate, nuts, sweet potatoes. Use low-oxalate vegetables like cabbage, cauliflower, broccoli.";

/// Builds the generation prompt for a request.
///
/// The RNG is only consulted when no protein-restrictive filter is selected, so
/// vegan, vegetarian and pescatarian requests are fully deterministic.
pub fn assemble_prompt<R: Rng + ?Sized>(
    request: &str,
    constraints: &CompiledConstraints,
    rng: &mut R,
) -> AssembledPrompt {
    let protein_focus =
        (!constraints.restricts_protein()).then(|| ProteinFocus::choose(rng));

    AssembledPrompt {
        system: system_instruction(constraints),
        user: user_instruction(request, constraints, protein_focus),
    }
}

fn system_instruction(constraints: &CompiledConstraints) -> String {
    let persona = match constraints.complexity_tier {
        ComplexityTier::Complex => COMPLEX_PERSONA,
        ComplexityTier::Simple => SIMPLE_PERSONA,
    };

    let mut sections = vec![persona.to_string()];
    if let Some(requirements) = requirements_section(constraints) {
        sections.push(requirements);
    }
    sections.push(GENERATION_RULES.to_string());
    sections.push(format!(
        "Format your response as a JSON object with the following structure:\n{RECIPE_JSON_SHAPE}"
    ));

    sections.join("\n\n")
}

fn requirements_section(constraints: &CompiledConstraints) -> Option<String> {
    if constraints.requirement_clauses.is_empty() {
        return None;
    }

    let clauses = constraints
        .requirement_clauses
        .iter()
        .map(|clause| format!("- {clause}"))
        .collect::<Vec<_>>()
        .join("\n");

    let mut parts = vec![format!(
        "CRITICAL DIETARY REQUIREMENTS - The recipe MUST strictly comply with ALL of these requirements:\n{clauses}"
    )];

    if !constraints.forbidden_terms.is_empty() {
        let forbidden = constraints
            .forbidden_terms
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(format!(
            "FORBIDDEN INGREDIENTS - These ingredients are COMPLETELY PROHIBITED: {forbidden}"
        ));
    }

    if !constraints.contradictions.is_empty() {
        let advisories = constraints
            .contradictions
            .iter()
            .map(|c| format!("- {}", c.message))
            .collect::<Vec<_>>()
            .join("\n");
        parts.push(format!(
            "CONFLICTING REQUIREMENTS - Some selected requirements pull against each other. Satisfy every hard restriction first, then balance the rest:\n{advisories}"
        ));
    }

    if let Some(profile) = constraints.authenticity {
        parts.push(profile.guidance().to_string());
    }

    parts.push(VALIDATION_RULE.to_string());

    Some(parts.join("\n\n"))
}

fn user_instruction(
    request: &str,
    constraints: &CompiledConstraints,
    protein_focus: Option<ProteinFocus>,
) -> String {
    let mut user = format!("Create a recipe for: \"{request}\"");

    if let Some(profile) = constraints.authenticity {
        user.push_str("\n\n");
        user.push_str(profile.user_addendum());
    }

    if let Some(focus) = protein_focus {
        user.push_str(&format!(
            "\n\nIMPORTANT: This recipe MUST prominently feature {} as the main protein source.",
            focus.description()
        ));
    }

    user
}

/// Builds the single corrective prompt issued after a vegan compliance violation.
pub fn strict_vegan_retry_prompt(request: &str, constraints: &CompiledConstraints) -> AssembledPrompt {
    let mut sections = vec![format!(
        "CRITICAL VEGAN REQUIREMENT: Create a 100% plant-based recipe for: \"{request}\""
    )];

    if let Some(profile) = constraints.authenticity {
        sections.push(profile.retry_requirement().to_string());
    }

    sections.push(STRICT_VEGAN_FORBIDDEN.to_string());
    sections.push(STRICT_VEGAN_REQUIRED.to_string());

    if constraints.has("keto") {
        sections.push(STRICT_KETO_SECTION.to_string());
    }

    if let Some(profile) = constraints.authenticity {
        sections.push(profile.guidance().to_string());
    }

    if constraints.has("highprotein") {
        sections.push(STRICT_HIGH_PROTEIN.to_string());
    }

    if constraints.has("lowoxalate") {
        sections.push(STRICT_LOW_OXALATE.to_string());
    }

    sections.push(format!(
        "RESPONSE FORMAT: Return a complete JSON object with ALL required fields:\n{RECIPE_JSON_SHAPE}"
    ));

    AssembledPrompt {
        system: STRICT_VEGAN_PERSONA.to_string(),
        user: sections.join("\n\n"),
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::domain::constraint::services::compile_constraints;

    fn assemble(request: &str, filters: &[&str], seed: u64) -> AssembledPrompt {
        let constraints = compile_constraints(filters);
        assemble_prompt(request, &constraints, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn system_instruction_echoes_the_shape_verbatim() {
        for filters in [&[][..], &["vegan", "indian"][..], &["keto"][..]] {
            let prompt = assemble("quick dinner", filters, 1);
            assert!(prompt.system.contains(RECIPE_JSON_SHAPE));
        }
    }

    #[test]
    fn no_filters_means_no_requirement_block() {
        let prompt = assemble("pancakes", &[], 1);

        assert!(!prompt.system.contains("CRITICAL DIETARY REQUIREMENTS"));
        assert!(prompt.system.starts_with(SIMPLE_PERSONA));
        assert!(prompt.user.starts_with("Create a recipe for: \"pancakes\""));
    }

    #[test]
    fn requirements_and_forbidden_terms_are_listed() {
        let prompt = assemble("stew", &["vegan"], 1);

        assert!(prompt.system.starts_with(COMPLEX_PERSONA));
        assert!(prompt.system.contains("- VEGAN: ABSOLUTELY NO ANIMAL PRODUCTS"));
        assert!(prompt.system.contains("COMPLETELY PROHIBITED: butter, casein, cheese"));
    }

    #[test]
    fn restrictive_diets_get_no_protein_steer() {
        for filter in ["vegan", "vegetarian", "pescatarian"] {
            let first = assemble("curry", &[filter], 1);
            let second = assemble("curry", &[filter], 99);

            assert!(!first.user.contains("main protein source"), "{filter}");
            assert_eq!(first, second);
        }
    }

    #[test]
    fn unrestricted_requests_get_a_seeded_protein_steer() {
        let first = assemble("curry", &["glutenFree"], 5);
        let again = assemble("curry", &["glutenFree"], 5);

        assert!(first.user.contains("as the main protein source."));
        assert_eq!(first, again);
    }

    #[test]
    fn authenticity_addendum_and_guidance_for_vegan_indian() {
        let prompt = assemble("quick dinner", &["vegan", "indian"], 1);

        assert!(prompt.user.contains("authentic traditional Indian dish"));
        assert!(prompt.system.contains("ESSENTIAL INGREDIENTS FOR VEGAN INDIAN"));
    }

    #[test]
    fn contradictions_are_echoed_as_advisory() {
        let prompt = assemble("lunch", &["vegan", "keto"], 1);

        assert!(prompt.system.contains("CONFLICTING REQUIREMENTS"));
        assert!(prompt.system.contains("Vegan keto requires careful planning"));
    }

    #[test]
    fn strict_retry_adds_filter_specific_sections() {
        let constraints = compile_constraints(&["vegan", "keto", "highProtein", "lowOxalate", "indian"]);
        let prompt = strict_vegan_retry_prompt("dinner", &constraints);

        assert!(prompt.user.contains("ABSOLUTELY FORBIDDEN INGREDIENTS"));
        assert!(prompt.user.contains("KETO REQUIREMENTS"));
        assert!(prompt.user.contains("ENSURE high protein"));
        assert!(prompt.user.contains("AVOID high-oxalate foods"));
        assert!(prompt.user.contains("AUTHENTICITY REQUIREMENT"));
        assert!(prompt.user.contains(RECIPE_JSON_SHAPE));
    }

    #[test]
    fn strict_retry_without_extras_stays_minimal() {
        let constraints = compile_constraints(&["vegan"]);
        let prompt = strict_vegan_retry_prompt("dinner", &constraints);

        assert!(!prompt.user.contains("KETO REQUIREMENTS"));
        assert!(!prompt.user.contains("AUTHENTICITY REQUIREMENT"));
    }
}
