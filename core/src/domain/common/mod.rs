use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod services;

pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-2024-11-20";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_IMAGE_FOLDER: &str = "recipe-images";

#[derive(Clone, Debug)]
pub struct RecipeGenConfig {
    pub llm: LLMConfig,
    pub object_storage: ObjectStorageConfig,
    pub generation: GenerationSettings,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub image_model: String,
    pub request_timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct ObjectStorageConfig {
    pub endpoint: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    pub public_base_url: String,
    pub folder: String,
}

/// Knobs that shape a single generation run.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationSettings {
    /// Sampling temperature for requests classified as complex.
    pub complex_temperature: f32,
    /// Sampling temperature for simple requests; `None` leaves the service default.
    pub simple_temperature: Option<f32>,
    /// Seed for the protein-category steer. `None` draws from entropy.
    pub protein_seed: Option<u64>,
    /// Run a dedicated nutrition analysis call before reconciliation.
    pub analyze_nutrition: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            complex_temperature: 1.2,
            simple_temperature: None,
            protein_seed: None,
            analyze_nutrition: false,
        }
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}
