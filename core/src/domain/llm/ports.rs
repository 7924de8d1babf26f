use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, llm::entities::ChatRequest};

/// Chat-completion collaborator. Returns the raw text of the first choice.
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn complete(
        &self,
        request: ChatRequest,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}
