use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    compliance::helpers::{
        audit_authenticity, normalize_vegan_tags, scan_high_oxalate, scan_non_vegan,
    },
    constraint::entities::CompiledConstraints,
    image::ports::{AssetHostPort, ImageGenerator},
    llm::ports::LLMClient,
    prompt::services::strict_vegan_retry_prompt,
    recipe::{
        entities::RecipeDraft,
        generation::{GenerationPlan, generate_draft},
    },
};

#[derive(Debug)]
enum ComplianceState {
    Checked { draft: RecipeDraft, retried: bool },
    Retrying { first_violations: Vec<String> },
    Accepted(RecipeDraft),
    Failed(CoreError),
}

/// Verifies a draft against the vegan vocabulary, allowing exactly one corrective regeneration.
#[instrument(skip_all)]
pub async fn verify_vegan<L>(
    llm: &L,
    request: &str,
    constraints: &CompiledConstraints,
    draft: RecipeDraft,
) -> Result<RecipeDraft, CoreError>
where
    L: LLMClient,
{
    let mut state = ComplianceState::Checked {
        draft,
        retried: false,
    };

    loop {
        state = match state {
            ComplianceState::Checked { draft, retried } => {
                let report = scan_non_vegan(&draft.searchable_text());

                if report.is_compliant() {
                    ComplianceState::Accepted(draft)
                } else if retried {
                    let terms = report.violations();
                    tracing::error!(violations = ?terms, "Corrected recipe is still not vegan");
                    ComplianceState::Failed(CoreError::ComplianceViolation { terms })
                } else {
                    let first_violations = report.violations();
                    tracing::warn!(
                        violations = ?first_violations,
                        "Vegan violations detected, retrying with stricter instructions"
                    );
                    ComplianceState::Retrying { first_violations }
                }
            }
            ComplianceState::Retrying { first_violations } => {
                let prompt = strict_vegan_retry_prompt(request, constraints);

                match generate_draft(llm, prompt.to_messages(), GenerationPlan::single_shot()).await
                {
                    Ok(draft) => ComplianceState::Checked {
                        draft,
                        retried: true,
                    },
                    Err(e) => {
                        tracing::error!(error = %e, "Corrective generation failed");
                        ComplianceState::Failed(CoreError::ComplianceViolation {
                            terms: first_violations,
                        })
                    }
                }
            }
            ComplianceState::Accepted(draft) => {
                let dietary_tags = normalize_vegan_tags(&draft.dietary_tags);
                return Ok(RecipeDraft {
                    dietary_tags,
                    ..draft
                });
            }
            ComplianceState::Failed(error) => return Err(error),
        };
    }
}

/// Logs soft findings that never block acceptance.
pub fn run_soft_audits(draft: &RecipeDraft, constraints: &CompiledConstraints) {
    if constraints.has("lowoxalate") {
        let found = scan_high_oxalate(&draft.searchable_text());
        if !found.is_empty() {
            tracing::warn!(ingredients = ?found, "High-oxalate ingredients in a low-oxalate recipe");
        }
    }

    if let Some(profile) = constraints.authenticity {
        let audit = audit_authenticity(draft, profile);
        for warning in audit.warnings() {
            tracing::warn!(profile = ?profile, "Authenticity warning: {}", warning);
        }
        tracing::info!(
            spices = audit.spices_found.len(),
            techniques = audit.techniques_found.len(),
            "Authenticity check complete"
        );
    }
}

impl<LLM, IG, AH> Service<LLM, IG, AH>
where
    LLM: LLMClient,
    IG: ImageGenerator,
    AH: AssetHostPort,
{
    pub(crate) async fn enforce_compliance(
        &self,
        request: &str,
        constraints: &CompiledConstraints,
        draft: RecipeDraft,
    ) -> Result<RecipeDraft, CoreError> {
        let draft = if constraints.has("vegan") {
            verify_vegan(self.llm_client.as_ref(), request, constraints, draft).await?
        } else {
            draft
        };

        run_soft_audits(&draft, constraints);

        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{
        common::GenerationSettings,
        constraint::{entities::AuthenticityProfile, services::compile_constraints},
        image::ports::{MockAssetHostPort, MockImageGenerator},
        llm::fake::ScriptedLLM,
        recipe::entities::fixtures,
    };

    fn service() -> Service<ScriptedLLM, MockImageGenerator, MockAssetHostPort> {
        Service::new(
            ScriptedLLM::new(),
            MockImageGenerator::new(),
            MockAssetHostPort::new(),
            GenerationSettings::default(),
            "recipe-images".to_string(),
        )
    }

    fn draft_with(ingredient: &str, tags: &[&str]) -> RecipeDraft {
        let mut draft = fixtures::draft();
        draft.ingredients[1].name = ingredient.to_string();
        draft.dietary_tags = tags.iter().map(|t| t.to_string()).collect();
        draft
    }

    fn body_with(ingredient: &str) -> String {
        json!({
            "title": "Dal Tadka",
            "description": "Lentils with tempering",
            "ingredients": [{"name": ingredient, "quantity": "2 tbsp"}, {"name": "toor dal", "quantity": "1 cup"}],
            "instructions": ["Temper cumin in the fat", "Simmer the dal"],
            "cookingTime": 40,
            "servings": 4,
            "dietaryTags": ["vegetarian"],
            "nutritionInfo": {"calories": 300, "protein": 15, "fat": 9, "carbs": 40}
        })
        .to_string()
    }

    #[tokio::test]
    async fn compliant_draft_is_accepted_without_a_call() {
        let llm = ScriptedLLM::new();
        let constraints = compile_constraints(&["vegan"]);
        let draft = draft_with("coconut oil", &["vegetarian"]);

        let accepted = verify_vegan(&llm, "curry", &constraints, draft).await.unwrap();

        assert_eq!(llm.call_count(), 0);
        assert_eq!(accepted.dietary_tags, vec!["vegan"]);
    }

    #[tokio::test]
    async fn violation_triggers_exactly_one_strict_retry() {
        let llm = ScriptedLLM::new().then_answer(body_with("coconut oil"));
        let constraints = compile_constraints(&["vegan", "keto"]);
        let draft = draft_with("ghee", &["vegan"]);

        let accepted = verify_vegan(&llm, "curry", &constraints, draft).await.unwrap();

        assert_eq!(llm.call_count(), 1);
        let request = &llm.requests()[0];
        assert!(request.user_content().unwrap().contains("KETO REQUIREMENTS"));
        assert!(request.system_content().unwrap().contains("100% plant-based"));
        assert!(accepted.has_tag("vegan"));
        assert!(!accepted.has_tag("vegetarian"));
    }

    #[tokio::test]
    async fn persistent_violation_fails_naming_the_terms() {
        let llm = ScriptedLLM::new()
            .then_answer(body_with("butter"))
            .then_answer(body_with("coconut oil"));
        let constraints = compile_constraints(&["vegan"]);
        let draft = draft_with("ghee", &[]);

        let error = verify_vegan(&llm, "curry", &constraints, draft)
            .await
            .unwrap_err();

        assert_eq!(
            error,
            CoreError::ComplianceViolation {
                terms: vec!["butter".to_string()]
            }
        );
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn failed_corrective_call_reports_first_pass_terms() {
        let llm = ScriptedLLM::new().then_answer("{\"title\": \"broken\"}");
        let constraints = compile_constraints(&["vegan"]);
        let draft = draft_with("honey", &[]);

        let error = verify_vegan(&llm, "curry", &constraints, draft)
            .await
            .unwrap_err();

        assert_eq!(
            error,
            CoreError::ComplianceViolation {
                terms: vec!["honey".to_string()]
            }
        );
    }

    #[tokio::test]
    async fn high_oxalate_ingredients_never_block_acceptance() {
        let service = service();
        let constraints = compile_constraints(&["lowOxalate"]);
        let draft = draft_with("spinach", &["low-oxalate"]);
        assert!(!scan_high_oxalate(&draft.searchable_text()).is_empty());

        let accepted = service
            .enforce_compliance("green curry", &constraints, draft.clone())
            .await
            .unwrap();

        assert_eq!(accepted, draft);
        assert_eq!(service.llm_client.call_count(), 0);
    }

    #[tokio::test]
    async fn authenticity_warnings_never_block_acceptance() {
        let service = service();
        let constraints = compile_constraints(&["vegan", "indian"]);
        let mut draft = draft_with("coconut oil", &["vegan"]);
        draft.title = "Quinoa Bowl".to_string();
        let audit = audit_authenticity(&draft, AuthenticityProfile::VeganIndian);
        assert!(!audit.warnings().is_empty());

        let accepted = service
            .enforce_compliance("quick dinner", &constraints, draft)
            .await
            .unwrap();

        assert_eq!(accepted.title, "Quinoa Bowl");
        assert_eq!(accepted.dietary_tags, vec!["vegan"]);
        assert_eq!(service.llm_client.call_count(), 0);
    }
}
