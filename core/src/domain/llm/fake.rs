//! Scripted chat client for pipeline tests.

use std::{collections::VecDeque, sync::Mutex};

use crate::domain::{
    common::entities::app_errors::CoreError,
    llm::{entities::ChatRequest, ports::LLMClient},
};

/// Replays queued answers in order and records every request it receives.
///
/// When the script runs dry, each further call fails with an external service error.
#[derive(Debug, Default)]
pub struct ScriptedLLM {
    script: Mutex<VecDeque<Result<String, CoreError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedLLM {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_answer(self, body: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Ok(body.into()));
        self
    }

    pub fn then_fail(self, error: CoreError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl LLMClient for ScriptedLLM {
    async fn complete(&self, request: ChatRequest) -> Result<String, CoreError> {
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CoreError::ExternalServiceError("script exhausted".into())))
    }
}
