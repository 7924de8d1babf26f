use serde::Serialize;
use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    image::ports::{AssetHostPort, ImageGenerator},
    llm::{
        entities::{ChatMessage, ChatRequest},
        ports::LLMClient,
    },
    recipe::{entities::RecipeDraft, helpers::parse_json_body},
    safety::entities::SafetyVerdict,
};

pub const ALLERGEN_TAG: &str = "Contains Allergens";

const SAFETY_VALIDATOR_PROMPT: &str = r#"You are a recipe safety validator with expertise in food safety, allergens, and nutrition.
Your task is to analyze recipes and identify potential safety issues including:
1. Dangerous food combinations
2. Allergen risks not properly labeled
3. Contradictions between dietary tags and actual ingredients (e.g., "vegan" recipe with animal products)
4. Unsafe cooking instructions
5. Improper food handling guidance

Respond with JSON containing "safe" (boolean) and "issues" (array of strings describing problems found).
If the recipe is safe, the "issues" array should be empty."#;

pub fn safety_request(draft: &RecipeDraft) -> ChatRequest {
    ChatRequest::new(vec![
        ChatMessage::system(SAFETY_VALIDATOR_PROMPT),
        ChatMessage::user(format!(
            "Validate this recipe for safety issues:\nTitle: {}\nDescription: {}\nIngredients: {}\nInstructions: {}\nDietary Tags: {}",
            draft.title,
            draft.description,
            json(&draft.ingredients),
            json(&draft.instructions),
            json(&draft.dietary_tags),
        )),
    ])
}

fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Folds a verdict into the draft. Safe or missing verdicts leave it untouched.
pub fn annotate(mut draft: RecipeDraft, verdict: Option<SafetyVerdict>) -> RecipeDraft {
    let Some(verdict) = verdict.filter(|v| !v.safe) else {
        return draft;
    };

    if let Some(first) = verdict.issues.first() {
        draft.description = format!("{} (Note: {})", draft.description, first);
    }

    if verdict.mentions_allergens() && !draft.has_tag(ALLERGEN_TAG) {
        draft.dietary_tags.push(ALLERGEN_TAG.to_string());
    }

    draft
}

impl<LLM, IG, AH> Service<LLM, IG, AH>
where
    LLM: LLMClient,
    IG: ImageGenerator,
    AH: AssetHostPort,
{
    /// Runs the safety classification. Any failure degrades to `None`.
    #[instrument(skip_all, fields(title = %draft.title))]
    pub(crate) async fn check_safety(&self, draft: &RecipeDraft) -> Option<SafetyVerdict> {
        match self.request_verdict(draft).await {
            Ok(verdict) => {
                if !verdict.safe {
                    tracing::warn!(issues = ?verdict.issues, "Recipe safety warning");
                }
                Some(verdict)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Safety validation failed, skipping annotation");
                None
            }
        }
    }

    async fn request_verdict(&self, draft: &RecipeDraft) -> Result<SafetyVerdict, CoreError> {
        let raw = self.llm_client.complete(safety_request(draft)).await?;
        let value = parse_json_body(&raw).map_err(CoreError::ExternalServiceError)?;

        serde_json::from_value(value).map_err(|e| {
            tracing::error!("Invalid safety verdict: {}", e);
            CoreError::ExternalServiceError(format!("Invalid safety verdict: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recipe::entities::fixtures;

    fn unsafe_verdict(issues: &[&str]) -> Option<SafetyVerdict> {
        Some(SafetyVerdict {
            safe: false,
            issues: issues.iter().map(|i| i.to_string()).collect(),
        })
    }

    #[test]
    fn safe_or_missing_verdicts_change_nothing() {
        let draft = fixtures::draft();

        let safe = Some(SafetyVerdict {
            safe: true,
            issues: vec!["ignored".to_string()],
        });
        assert_eq!(annotate(draft.clone(), safe), draft);
        assert_eq!(annotate(draft.clone(), None), draft);
    }

    #[test]
    fn first_issue_is_appended_to_the_description() {
        let annotated = annotate(
            fixtures::draft(),
            unsafe_verdict(&["Undercooked chickpeas", "Too much salt"]),
        );

        assert!(annotated.description.ends_with("(Note: Undercooked chickpeas)"));
        assert!(!annotated.has_tag(ALLERGEN_TAG));
    }

    #[test]
    fn allergen_issues_add_the_tag_once() {
        let mut draft = fixtures::draft();
        draft.dietary_tags.push("contains allergens".to_string());

        let annotated = annotate(draft, unsafe_verdict(&["Cashews are a common allergen"]));
        let count = annotated
            .dietary_tags
            .iter()
            .filter(|t| t.eq_ignore_ascii_case(ALLERGEN_TAG))
            .count();
        assert_eq!(count, 1);

        let annotated = annotate(fixtures::draft(), unsafe_verdict(&["Risk for people with nut allergy"]));
        assert!(annotated.has_tag(ALLERGEN_TAG));
    }

    #[test]
    fn verdict_issues_default_to_empty() {
        let verdict: SafetyVerdict = serde_json::from_str(r#"{"safe": true}"#).unwrap();
        assert!(verdict.issues.is_empty());
    }

    #[test]
    fn request_embeds_the_recipe() {
        let request = safety_request(&fixtures::draft());
        let user = request.user_content().unwrap();

        assert!(user.contains("Title: Chana Masala"));
        assert!(user.contains("\"coconut oil\""));
    }
}
