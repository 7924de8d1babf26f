use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("recipe generation failed: {0}")]
    GenerationFailed(String),

    #[error("unable to generate a compliant recipe, forbidden ingredients remain: {}", terms.join(", "))]
    ComplianceViolation { terms: Vec<String> },

    #[error("external service error: {0}")]
    ExternalServiceError(String),

    #[error("object storage error: {0}")]
    ObjectStorageError(String),

    #[error("Internal server error")]
    InternalServerError,
}

impl CoreError {
    /// Errors of this kind are worth one more attempt of the same request.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            CoreError::ExternalServiceError(_) | CoreError::GenerationFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compliance_error_names_every_term() {
        let error = CoreError::ComplianceViolation {
            terms: vec!["milk".to_string(), "honey".to_string()],
        };

        let message = error.to_string();
        assert!(message.contains("milk, honey"));
    }

    #[test]
    fn generation_error_is_recognizable() {
        let error = CoreError::GenerationFailed("empty body".to_string());
        assert!(error.to_string().starts_with("recipe generation failed"));
        assert!(error.is_transient());
        assert!(!CoreError::InvalidInput("x".to_string()).is_transient());
    }
}
