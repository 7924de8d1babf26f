use tracing::instrument;

use crate::domain::{
    common::{GenerationSettings, entities::app_errors::CoreError},
    constraint::entities::ComplexityTier,
    llm::{
        entities::{ChatMessage, ChatRequest, ResponseFormat},
        ports::LLMClient,
    },
    prompt::schema::{RECIPE_SCHEMA_NAME, get_recipe_schema},
    recipe::{
        entities::RecipeDraft,
        helpers::{draft_from_value, parse_json_body},
    },
};

/// How a single generation call is issued.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationPlan {
    pub temperature: Option<f32>,
    /// Attempts allowed for transport and body failures. Missing fields are never retried.
    pub max_attempts: u8,
}

impl GenerationPlan {
    pub fn for_tier(tier: ComplexityTier, settings: &GenerationSettings) -> Self {
        match tier {
            ComplexityTier::Complex => Self {
                temperature: Some(settings.complex_temperature),
                max_attempts: 2,
            },
            ComplexityTier::Simple => Self {
                temperature: settings.simple_temperature,
                max_attempts: 1,
            },
        }
    }

    pub fn single_shot() -> Self {
        Self {
            temperature: None,
            max_attempts: 1,
        }
    }
}

#[derive(Debug)]
enum GenerationState {
    Draft { attempt: u8 },
    Parsed(serde_json::Value),
    Accepted(RecipeDraft),
    Failed(CoreError),
}

/// Issues a recipe request and drives it to an accepted draft or a generation failure.
#[instrument(skip(llm, messages), fields(temperature = ?plan.temperature, max_attempts = plan.max_attempts))]
pub async fn generate_draft<L>(
    llm: &L,
    messages: Vec<ChatMessage>,
    plan: GenerationPlan,
) -> Result<RecipeDraft, CoreError>
where
    L: LLMClient,
{
    let request = ChatRequest::new(messages)
        .with_temperature(plan.temperature)
        .with_response_format(ResponseFormat::JsonSchema {
            name: RECIPE_SCHEMA_NAME.to_string(),
            schema: get_recipe_schema(),
        });

    let mut state = GenerationState::Draft { attempt: 1 };

    loop {
        state = match state {
            GenerationState::Draft { attempt } => match request_body(llm, &request).await {
                Ok(value) => GenerationState::Parsed(value),
                Err(e) if e.is_transient() && attempt < plan.max_attempts => {
                    tracing::warn!(attempt, error = %e, "Generation attempt failed, retrying");
                    GenerationState::Draft {
                        attempt: attempt + 1,
                    }
                }
                Err(e) => {
                    tracing::error!(attempt, error = %e, "Generation failed");
                    GenerationState::Failed(CoreError::GenerationFailed(e.to_string()))
                }
            },
            GenerationState::Parsed(value) => match draft_from_value(&value) {
                Ok(draft) => GenerationState::Accepted(draft),
                Err(missing) => {
                    tracing::error!(missing = ?missing, "Generated recipe is incomplete");
                    GenerationState::Failed(CoreError::GenerationFailed(format!(
                        "generated recipe is incomplete, missing: {}",
                        missing.join(", ")
                    )))
                }
            },
            GenerationState::Accepted(draft) => return Ok(draft),
            GenerationState::Failed(error) => return Err(error),
        };
    }
}

async fn request_body<L>(llm: &L, request: &ChatRequest) -> Result<serde_json::Value, CoreError>
where
    L: LLMClient,
{
    let raw = llm.complete(request.clone()).await?;

    parse_json_body(&raw).map_err(CoreError::ExternalServiceError)
}
