use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    image::ports::ImageGenerator,
};

const IMAGE_SIZE: &str = "1024x1024";
const IMAGE_QUALITY: &str = "standard";

#[derive(Debug, Clone)]
pub struct OpenAIImageClient {
    api_key: String,
    base_url: String,
    model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ImageGenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
    quality: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
    b64_json: Option<String>,
}

impl ImageData {
    /// Hosted URL when the service returns one, otherwise an inline data URL.
    fn into_url(self) -> Option<String> {
        self.url
            .or_else(|| self.b64_json.map(|b64| format!("data:image/png;base64,{}", b64)))
    }
}

impl OpenAIImageClient {
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
            model: config.image_model.clone(),
            client,
        })
    }
}

impl ImageGenerator for OpenAIImageClient {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn generate_image(&self, prompt: String) -> Result<String, CoreError> {
        let url = format!("{}/images/generations", self.base_url);
        let body = ImageGenerationRequest {
            model: &self.model,
            prompt: &prompt,
            n: 1,
            size: IMAGE_SIZE,
            quality: IMAGE_QUALITY,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Image generation request failed: {}", e);
                CoreError::ExternalServiceError(format!("Image API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Image generation error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "Image API returned error: {} - {}",
                status, error_text
            )));
        }

        let generated: ImageGenerationResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse image response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse image response: {}", e))
        })?;

        generated
            .data
            .into_iter()
            .next()
            .and_then(ImageData::into_url)
            .ok_or_else(|| CoreError::ExternalServiceError("No image returned".to_string()))
    }
}
