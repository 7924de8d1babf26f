use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    llm::{
        entities::{ChatMessage, ChatRequest, ResponseFormat},
        ports::LLMClient,
    },
};

/// Chat client for any OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    api_key: String,
    base_url: String,
    model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    response_format: ResponseFormatBody,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ResponseFormatBody {
    JsonObject,
    JsonSchema { json_schema: JsonSchemaBody },
}

#[derive(Debug, Serialize)]
struct JsonSchemaBody {
    name: String,
    schema: serde_json::Value,
}

impl From<&ResponseFormat> for ResponseFormatBody {
    fn from(format: &ResponseFormat) -> Self {
        match format {
            ResponseFormat::JsonObject => ResponseFormatBody::JsonObject,
            ResponseFormat::JsonSchema { name, schema } => ResponseFormatBody::JsonSchema {
                json_schema: JsonSchemaBody {
                    name: name.clone(),
                    schema: schema.clone(),
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAIClient {
    pub fn new(config: &LLMConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                CoreError::ExternalServiceError(format!("HTTP client error: {}", e))
            })?;

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            client,
        })
    }

    fn body<'a>(&'a self, request: &'a ChatRequest) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
            response_format: ResponseFormatBody::from(&request.response_format),
        }
    }

    async fn call_chat_api(&self, request: &ChatRequest) -> Result<String, CoreError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.body(request))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Chat completion request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Chat completion error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse chat completion: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))
    }
}

impl LLMClient for OpenAIClient {
    async fn complete(&self, request: ChatRequest) -> Result<String, CoreError> {
        tracing::debug!(
            model = %self.model,
            messages = request.messages.len(),
            temperature = ?request.temperature,
            "Requesting chat completion"
        );

        self.call_chat_api(&request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn client() -> OpenAIClient {
        OpenAIClient::new(&LLMConfig {
            api_key: "sk-test".to_string(),
            base_url: "https://api.example.com/v1/".to_string(),
            model: "gpt-test".to_string(),
            image_model: "img-test".to_string(),
            request_timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        assert_eq!(client().base_url, "https://api.example.com/v1");
    }

    #[test]
    fn json_object_body() {
        let client = client();
        let request = ChatRequest::new(vec![ChatMessage::user("hi")]);

        let body = serde_json::to_value(client.body(&request)).unwrap();

        assert_eq!(
            body,
            json!({
                "model": "gpt-test",
                "messages": [{"role": "user", "content": "hi"}],
                "response_format": {"type": "json_object"}
            })
        );
    }

    #[test]
    fn json_schema_body_carries_temperature() {
        let client = client();
        let request = ChatRequest::new(vec![ChatMessage::system("s")])
            .with_temperature(Some(1.5))
            .with_response_format(ResponseFormat::JsonSchema {
                name: "recipe".to_string(),
                schema: json!({"type": "object"}),
            });

        let body = serde_json::to_value(client.body(&request)).unwrap();

        assert_eq!(body["temperature"], 1.5);
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["name"], "recipe");
    }

    #[test]
    fn completion_content_is_extracted() {
        let parsed: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": "{\"ok\": true}"}}]
        }))
        .unwrap();

        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("{\"ok\": true}"));
    }
}
