use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::common::entities::app_errors::CoreError;

/// Inbound generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRecipeInput {
    #[validate(length(
        min = 1,
        max = 1000,
        message = "prompt must be between 1 and 1000 characters"
    ))]
    pub prompt: String,
    #[serde(default)]
    pub dietary_filters: Vec<String>,
}

impl GenerateRecipeInput {
    pub fn new(prompt: impl Into<String>, dietary_filters: Vec<String>) -> Self {
        Self {
            prompt: prompt.into(),
            dietary_filters,
        }
    }

    /// Rejects empty, blank or oversized prompts before any external call.
    pub fn ensure_valid(&self) -> Result<(), CoreError> {
        self.validate().map_err(|e| {
            tracing::warn!("Rejected generation request: {}", e);
            CoreError::InvalidInput(e.to_string())
        })?;

        if self.prompt.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "prompt must not be blank".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_prompts_within_bounds() {
        assert!(GenerateRecipeInput::new("a", vec![]).ensure_valid().is_ok());
        assert!(
            GenerateRecipeInput::new("x".repeat(1000), vec![])
                .ensure_valid()
                .is_ok()
        );
    }

    #[test]
    fn rejects_empty_blank_and_oversized_prompts() {
        for prompt in [String::new(), "   ".to_string(), "x".repeat(1001)] {
            let result = GenerateRecipeInput::new(prompt, vec![]).ensure_valid();
            assert!(matches!(result, Err(CoreError::InvalidInput(_))));
        }
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let prompt = "é".repeat(1000);
        assert!(GenerateRecipeInput::new(prompt, vec![]).ensure_valid().is_ok());
    }

    #[test]
    fn filters_are_optional_on_the_wire() {
        let input: GenerateRecipeInput =
            serde_json::from_str(r#"{"prompt": "quick dinner"}"#).unwrap();
        assert!(input.dietary_filters.is_empty());
    }
}
